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

//! Key-to-path hashing for the annex content store.
//!
//! Both layouts derive the directory pair from the MD5 digest of the key
//! string. This is an addressing convention inherited from the annex
//! backend and is reproduced bit-for-bit; any deviation silently breaks
//! lookups against existing stores.

use md5::{Digest, Md5};
use std::path::PathBuf;

/// Alphabet used by the mixed-case (legacy) directory layout.
///
/// The order is fixed by the backend; index n is the letter for the 5-bit
/// group with value n.
const HASH_DIR_ALPHABET: &[u8; 32] = b"0123456789zqjxkmvwgpfZQJXKMVWGPF";

/// Relative content path for `key` under the lower-case layout.
///
/// The first two path segments are characters `[0..3]` and `[3..6]` of the
/// hex-encoded MD5 digest of the key.
///
/// # Example
///
/// ```
/// use annexport_annex::hash_dir_lower;
///
/// let path = hash_dir_lower("WORM-s1024-m1234567890--file.dat");
/// assert_eq!(path.to_str().unwrap(), "6f4/3d4/WORM-s1024-m1234567890--file.dat");
/// ```
pub fn hash_dir_lower(key: &str) -> PathBuf {
    let digest = Md5::digest(key.as_bytes());
    let hex = hex::encode(digest);
    let mut path = PathBuf::from(&hex[0..3]);
    path.push(&hex[3..6]);
    path.push(key);
    path
}

/// Relative content path for `key` under the mixed-case (legacy) layout.
///
/// The first four digest bytes are byte-reversed and read as an unsigned
/// 32-bit word. Four letters are extracted by masking 5 bits and shifting
/// right by 6 per iteration (the asymmetric shift is part of the format).
/// The directory pair is `letters[1]letters[0]` and `letters[3]letters[2]`.
pub fn hash_dir_mixed(key: &str) -> PathBuf {
    let digest = Md5::digest(key.as_bytes());
    // reversed byte order of digest[0..4], i.e. little-endian read
    let mut word = u32::from_le_bytes([digest[0], digest[1], digest[2], digest[3]]);
    let mut letters = [0u8; 4];
    for letter in &mut letters {
        *letter = HASH_DIR_ALPHABET[(word & 0x1F) as usize];
        word >>= 6;
    }
    let mut path = PathBuf::from(format!("{}{}", letters[1] as char, letters[0] as char));
    path.push(format!("{}{}", letters[3] as char, letters[2] as char));
    path.push(key);
    path
}
