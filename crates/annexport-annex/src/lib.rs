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

//! # Annexport git-annex Layer
//!
//! This crate implements the parts of the git-annex object model that an
//! archive exporter needs: mapping an annex key to its location inside a
//! content store, recognizing annex references inside a git tree, and
//! resolving them to real files on disk.
//!
//! ## Key addressing
//!
//! git-annex stores a large object under a two-level directory derived from
//! the MD5 digest of its key. Two historical layouts exist side by side:
//!
//! - **lower-case**: `md5hex[0..3]/md5hex[3..6]/KEY`
//! - **mixed-case (legacy)**: two-letter segments drawn from a fixed
//!   32-character alphabet, computed from the first word of the digest
//!
//! A single store may hold objects written under either layout, so lookups
//! try both (lower-case first).
//!
//! ## Reference forms
//!
//! An annexed file appears in the tree either as a symlink whose target
//! points into `.git/annex/objects` (locked) or as a small text stub whose
//! content is such a path (unlocked pointer file). In both cases the key is
//! the last path segment.

pub mod detect;
pub mod error;
pub mod hashdir;
pub mod store;

pub use detect::{classify_regular, classify_symlink, BlobClass, ANNEX_OBJECTS_MARKER};
pub use error::{AnnexError, AnnexResult};
pub use hashdir::{hash_dir_lower, hash_dir_mixed};
pub use store::{ContentLocation, ContentStore};
