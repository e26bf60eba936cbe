// Annexport - Annex-aware Archive Exporter
// Copyright (C) 2026 Annexport Contributors
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU Affero General Public License as published
// by the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.
//
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE. See the
// GNU Affero General Public License for more details.

//! Annex reference detection.
//!
//! Classifies a tree blob as plain content, an annex reference, or an
//! ordinary symlink. Only a bounded prefix of regular blobs is ever
//! inspected; classification cost is O(1) regardless of file size.

/// Path fragment identifying the annex object directory in a reference.
pub const ANNEX_OBJECTS_MARKER: &str = "/annex/objects";

/// Window (in bytes) within which the marker must appear for a regular
/// blob to be considered a pointer stub.
pub const POINTER_MARKER_WINDOW: usize = 32;

/// Maximum size of an unlocked pointer stub. Regular blobs larger than
/// this are plain content even if their prefix contains the marker.
pub const MAX_POINTER_SIZE: u64 = 10240;

/// Classification of a tree blob.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BlobClass {
    /// The blob's own bytes are the content
    Plain,
    /// Annex reference (locked symlink or unlocked pointer stub); the
    /// content lives in the store under this key
    Annexed {
        /// Extracted annex key
        key: String,
    },
    /// Ordinary symlink, exported as a link to this target
    Symlink {
        /// Link target text
        target: String,
    },
}

/// Classifies a symlink blob by its target text.
///
/// A symlink is an annex reference iff its target passes through the annex
/// object directory; the key is the last path segment, whitespace-trimmed.
///
/// # Example
///
/// ```
/// use annexport_annex::{classify_symlink, BlobClass};
///
/// let class = classify_symlink("../.git/annex/objects/6f4/3d4/WORM-s10-m1--a.dat");
/// assert_eq!(class, BlobClass::Annexed { key: "WORM-s10-m1--a.dat".to_string() });
///
/// assert_eq!(
///     classify_symlink("../sibling.txt"),
///     BlobClass::Symlink { target: "../sibling.txt".to_string() }
/// );
/// ```
pub fn classify_symlink(target: &str) -> BlobClass {
    if target.contains(ANNEX_OBJECTS_MARKER) {
        BlobClass::Annexed {
            key: last_segment(target),
        }
    } else {
        BlobClass::Symlink {
            target: target.to_string(),
        }
    }
}

/// Classifies a regular blob from a bounded prefix of its content.
///
/// `prefix` need only hold the first [`MAX_POINTER_SIZE`] bytes; `size` is
/// the blob's full size. The blob is an unlocked pointer stub iff the
/// marker appears within the first [`POINTER_MARKER_WINDOW`] bytes and the
/// whole blob fits the stub bound. The key is the last path segment of the
/// stub text.
pub fn classify_regular(prefix: &[u8], size: u64) -> BlobClass {
    if size > MAX_POINTER_SIZE {
        return BlobClass::Plain;
    }
    let window = &prefix[..prefix.len().min(POINTER_MARKER_WINDOW)];
    // marker check runs on raw bytes; stub text itself must be UTF-8
    if !contains_marker(window) {
        return BlobClass::Plain;
    }
    match std::str::from_utf8(prefix) {
        Ok(text) => BlobClass::Annexed {
            key: last_segment(text),
        },
        Err(_) => BlobClass::Plain,
    }
}

fn contains_marker(window: &[u8]) -> bool {
    let marker = ANNEX_OBJECTS_MARKER.as_bytes();
    window
        .windows(marker.len())
        .any(|candidate| candidate == marker)
}

/// Last path segment of a reference, trimmed of surrounding whitespace
/// (pointer stubs end in a newline).
fn last_segment(text: &str) -> String {
    let trimmed = text.trim();
    trimmed
        .rsplit('/')
        .next()
        .unwrap_or(trimmed)
        .trim()
        .to_string()
}
