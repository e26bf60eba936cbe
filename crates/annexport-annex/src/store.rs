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

//! Content store discovery and key resolution.
//!
//! The object directory sits either directly under the repository root
//! (bare repository) or one level down inside the git metadata directory
//! (non-bare). The layout is a property of the store, probed once per
//! export and cached in the [`ContentStore`] handle.

use crate::error::{AnnexError, AnnexResult};
use crate::hashdir::{hash_dir_lower, hash_dir_mixed};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Object directory path inside a non-bare repository.
const NON_BARE_OBJECTS_DIR: &str = ".git/annex/objects";

/// Object directory path inside a bare repository.
const BARE_OBJECTS_DIR: &str = "annex/objects";

/// A resolved annex object: where it lives and what the archive entry
/// should carry for it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContentLocation {
    /// Absolute path of the content file
    pub path: PathBuf,
    /// POSIX permission bits of the content file
    pub mode: u32,
    /// Size of the content file in bytes
    pub size: u64,
}

/// Handle to a repository's annex object store.
///
/// Holds the resolved object directory so the bare/non-bare probe runs
/// once, not per file.
#[derive(Debug, Clone)]
pub struct ContentStore {
    objects_dir: PathBuf,
}

impl ContentStore {
    /// Locates the annex object directory under `repo_root`.
    ///
    /// Probes the non-bare layout first, then the bare layout. Fails with
    /// [`AnnexError::StoreLayout`] when neither directory exists, since no
    /// object could ever be resolved for such a repository.
    pub fn discover(repo_root: &Path) -> AnnexResult<Self> {
        for candidate in [NON_BARE_OBJECTS_DIR, BARE_OBJECTS_DIR] {
            let dir = repo_root.join(candidate);
            if dir.is_dir() {
                debug!(objects_dir = %dir.display(), "located annex object store");
                return Ok(Self { objects_dir: dir });
            }
        }
        Err(AnnexError::StoreLayout {
            root: repo_root.to_path_buf(),
        })
    }

    /// Returns the resolved object directory.
    pub fn objects_dir(&self) -> &Path {
        &self.objects_dir
    }

    /// Resolves `key` to the content file on disk.
    ///
    /// Tries the lower-case layout first, then the mixed-case legacy
    /// layout; the first existing file wins. The returned location carries
    /// the file's permission bits and size from a single stat.
    pub fn locate(&self, key: &str) -> AnnexResult<ContentLocation> {
        for relative in [hash_dir_lower(key), hash_dir_mixed(key)] {
            let path = self.objects_dir.join(relative);
            match fs::metadata(&path) {
                Ok(meta) if meta.is_file() => {
                    debug!(key, path = %path.display(), "resolved annex content");
                    return Ok(ContentLocation {
                        mode: permission_bits(&meta),
                        size: meta.len(),
                        path,
                    });
                }
                Ok(_) => continue,
                Err(err) if err.kind() == std::io::ErrorKind::NotFound => continue,
                Err(err) => return Err(err.into()),
            }
        }
        Err(AnnexError::ContentNotFound {
            key: key.to_string(),
        })
    }
}

#[cfg(unix)]
fn permission_bits(meta: &fs::Metadata) -> u32 {
    use std::os::unix::fs::MetadataExt;
    meta.mode() & 0o7777
}

#[cfg(not(unix))]
fn permission_bits(meta: &fs::Metadata) -> u32 {
    if meta.permissions().readonly() {
        0o444
    } else {
        0o660
    }
}
