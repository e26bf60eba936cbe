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

//! Single-pass tree export.
//!
//! Walks the commit tree once, resolving each blob as it is reached and
//! handing the result straight to the archive encoder. Annex references
//! are replaced by the referenced store content (with the content file's
//! own permission bits); everything else streams through unchanged.
//!
//! The export is strict: a missing annex object aborts the whole run.
//! Writes go to a temporary sibling of the target which is renamed into
//! place only after the encoder has flushed its trailers, so the target
//! path holds either a complete valid archive or nothing.

use crate::error::{ExportError, ExportResult};
use annexport_annex::{classify_regular, classify_symlink, BlobClass, ContentStore};
use annexport_annex::detect::MAX_POINTER_SIZE;
use annexport_archive::{create_encoder, ArchiveEncoder, ArchiveFormat, DEFAULT_FILE_MODE};
use annexport_git::git2::Tree;
use annexport_git::{walk_tree, BlobRecord, RepoSnapshot, TreeVisitor};
use std::fs::{self, File};
use std::io::BufReader;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Exports `tree` into an archive at `target`.
///
/// The tree is typically a commit's root tree obtained from
/// [`RepoSnapshot::tree`]. On any failure the temporary file is removed
/// and `target` is left untouched.
pub fn export_tree(
    snapshot: &RepoSnapshot,
    tree: &Tree<'_>,
    target: &Path,
    format: ArchiveFormat,
) -> ExportResult<()> {
    let temp = temp_path(target);
    let written = export_into(snapshot, tree, &temp, format)
        .and_then(|()| fs::rename(&temp, target).map_err(ExportError::from));
    match written {
        Ok(()) => {
            info!(target = %target.display(), %format, "export complete");
            Ok(())
        }
        Err(err) => {
            let _ = fs::remove_file(&temp);
            Err(err)
        }
    }
}

/// Convenience wrapper: resolves `rev` and exports its root tree.
pub fn export_revision(
    snapshot: &RepoSnapshot,
    rev: &str,
    target: &Path,
    format: ArchiveFormat,
) -> ExportResult<()> {
    let tree = snapshot.tree(rev)?;
    export_tree(snapshot, &tree, target, format)
}

fn export_into(
    snapshot: &RepoSnapshot,
    tree: &Tree<'_>,
    temp: &Path,
    format: ArchiveFormat,
) -> ExportResult<()> {
    let encoder = create_encoder(format, temp)?;
    let mut visitor = ExportVisitor {
        root: snapshot.root().to_path_buf(),
        encoder,
        store: None,
    };
    walk_tree(snapshot, tree, &mut visitor)?;
    visitor.encoder.finish()?;
    Ok(())
}

fn temp_path(target: &Path) -> PathBuf {
    let mut name = target.as_os_str().to_os_string();
    name.push(".tmp");
    PathBuf::from(name)
}

struct ExportVisitor {
    root: PathBuf,
    encoder: Box<dyn ArchiveEncoder>,
    /// Lazily discovered on the first annex reference; a tree without
    /// annexed files never needs a store.
    store: Option<ContentStore>,
}

impl ExportVisitor {
    fn store(&mut self) -> ExportResult<&ContentStore> {
        match self.store {
            Some(ref store) => Ok(store),
            None => {
                let store = ContentStore::discover(&self.root)?;
                Ok(self.store.insert(store))
            }
        }
    }

    fn add_plain(&mut self, path: &str, blob: &BlobRecord<'_>) -> ExportResult<()> {
        let mut content = blob.content();
        self.encoder
            .add_file(path, DEFAULT_FILE_MODE, blob.size(), &mut content)?;
        Ok(())
    }

    fn add_annexed(&mut self, path: &str, key: &str) -> ExportResult<()> {
        let location = self.store()?.locate(key)?;
        debug!(path, key, content = %location.path.display(), "resolved annex entry");
        let mut reader = BufReader::new(File::open(&location.path)?);
        self.encoder
            .add_file(path, location.mode, location.size, &mut reader)?;
        Ok(())
    }
}

impl TreeVisitor for ExportVisitor {
    type Error = ExportError;

    fn enter_directory(&mut self, path: &str) -> ExportResult<()> {
        self.encoder.add_directory(path)?;
        Ok(())
    }

    fn visit_blob(&mut self, path: &str, blob: &BlobRecord<'_>) -> ExportResult<()> {
        if blob.is_symlink() {
            let target = std::str::from_utf8(blob.content()).map_err(|_| {
                ExportError::InvalidLinkTarget {
                    path: path.to_string(),
                }
            })?;
            return match classify_symlink(target) {
                BlobClass::Annexed { key } => self.add_annexed(path, &key),
                BlobClass::Symlink { target } => {
                    self.encoder.add_symlink(path, &target)?;
                    Ok(())
                }
                BlobClass::Plain => self.add_plain(path, blob),
            };
        }

        let content = blob.content();
        let bound = content.len().min(MAX_POINTER_SIZE as usize);
        match classify_regular(&content[..bound], blob.size()) {
            BlobClass::Annexed { key } => self.add_annexed(path, &key),
            _ => self.add_plain(path, blob),
        }
    }
}
