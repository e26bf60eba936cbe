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

//! Recursive tree traversal.
//!
//! Visits every entry of a tree depth-first in the provider's listing
//! order (no re-sorting). Directory entries are announced before their
//! contents; blob entries carry the blob handle and its symlink flag.
//! Any listing or sub-tree failure aborts the walk and propagates.

use crate::error::RepoError;
use crate::repo::RepoSnapshot;
use git2::{Blob, ObjectType, Tree};
use tracing::warn;

/// Git filemode bit pattern for symbolic links.
const FILEMODE_SYMLINK: i32 = 0o120000;

/// A blob reached during the walk.
pub struct BlobRecord<'repo> {
    blob: Blob<'repo>,
    symlink: bool,
}

impl BlobRecord<'_> {
    /// Raw object bytes. For a symlink this is the link target text.
    pub fn content(&self) -> &[u8] {
        self.blob.content()
    }

    /// Declared size of the blob in bytes.
    pub fn size(&self) -> u64 {
        self.blob.size() as u64
    }

    /// Whether the entry's filemode marks it as a symbolic link.
    pub fn is_symlink(&self) -> bool {
        self.symlink
    }
}

/// Callback surface for [`walk_tree`].
///
/// The associated error type lets callers thread their own error through
/// the walk; walk-internal failures arrive via `From<RepoError>`.
pub trait TreeVisitor {
    /// Error type propagated out of the walk
    type Error: From<RepoError>;

    /// Called for each directory entry, before its contents.
    fn enter_directory(&mut self, path: &str) -> Result<(), Self::Error>;

    /// Called for each blob entry (regular file or symlink).
    fn visit_blob(&mut self, path: &str, blob: &BlobRecord<'_>) -> Result<(), Self::Error>;
}

/// Walks `tree` depth-first, invoking `visitor` for every entry.
///
/// Paths handed to the visitor are forward-slash separated and relative
/// to the tree root. Submodule (gitlink) entries have no blob content and
/// are skipped with a warning.
pub fn walk_tree<V: TreeVisitor>(
    snapshot: &RepoSnapshot,
    tree: &Tree<'_>,
    visitor: &mut V,
) -> Result<(), V::Error> {
    walk_into(snapshot, tree, "", visitor)
}

fn walk_into<V: TreeVisitor>(
    snapshot: &RepoSnapshot,
    tree: &Tree<'_>,
    prefix: &str,
    visitor: &mut V,
) -> Result<(), V::Error> {
    let repo = snapshot.git();
    for entry in tree.iter() {
        let name = entry.name().ok_or_else(|| RepoError::NonUtf8Path {
            parent: prefix.to_string(),
        })?;
        let path = join_path(prefix, name);

        match entry.kind() {
            Some(ObjectType::Tree) => {
                visitor.enter_directory(&path)?;
                let subtree = entry
                    .to_object(repo)
                    .and_then(|object| object.peel_to_tree())
                    .map_err(RepoError::from)?;
                walk_into(snapshot, &subtree, &path, visitor)?;
            }
            Some(ObjectType::Blob) => {
                let blob = entry
                    .to_object(repo)
                    .and_then(|object| object.peel_to_blob())
                    .map_err(RepoError::from)?;
                let record = BlobRecord {
                    blob,
                    symlink: entry.filemode() == FILEMODE_SYMLINK,
                };
                visitor.visit_blob(&path, &record)?;
            }
            Some(ObjectType::Commit) => {
                // submodule; there is no blob to export
                warn!(path, "skipping submodule entry");
            }
            kind => {
                warn!(path, ?kind, "skipping tree entry of unexpected kind");
            }
        }
    }
    Ok(())
}

fn join_path(prefix: &str, name: &str) -> String {
    if prefix.is_empty() {
        name.to_string()
    } else {
        format!("{prefix}/{name}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use git2::Repository;
    use tempfile::TempDir;

    /// Visitor recording the walk as "D path" / "B path" lines.
    #[derive(Default)]
    struct Recorder {
        events: Vec<String>,
    }

    impl TreeVisitor for Recorder {
        type Error = RepoError;

        fn enter_directory(&mut self, path: &str) -> Result<(), RepoError> {
            self.events.push(format!("D {path}"));
            Ok(())
        }

        fn visit_blob(&mut self, path: &str, blob: &BlobRecord<'_>) -> Result<(), RepoError> {
            let tag = if blob.is_symlink() { "L" } else { "B" };
            self.events.push(format!("{tag} {path}"));
            Ok(())
        }
    }

    /// Builds a repo with the tree:
    ///   README          (blob)
    ///   data/           (dir)
    ///     nested/       (dir, empty)
    ///     raw.bin       (blob)
    ///   link            (symlink -> README)
    fn fixture() -> (TempDir, RepoSnapshot) {
        let tmp = TempDir::new().unwrap();
        let repo = Repository::init(tmp.path()).unwrap();
        {
            let readme = repo.blob(b"hello").unwrap();
            let raw = repo.blob(&[0u8; 64]).unwrap();
            let link = repo.blob(b"README").unwrap();

            let empty = {
                let builder = repo.treebuilder(None).unwrap();
                builder.write().unwrap()
            };
            let data = {
                let mut builder = repo.treebuilder(None).unwrap();
                builder.insert("nested", empty, 0o040000).unwrap();
                builder.insert("raw.bin", raw, 0o100644).unwrap();
                builder.write().unwrap()
            };
            let root = {
                let mut builder = repo.treebuilder(None).unwrap();
                builder.insert("README", readme, 0o100644).unwrap();
                builder.insert("data", data, 0o040000).unwrap();
                builder.insert("link", link, 0o120000).unwrap();
                builder.write().unwrap()
            };

            let tree = repo.find_tree(root).unwrap();
            let sig = git2::Signature::now("test", "test@example.com").unwrap();
            repo.commit(Some("HEAD"), &sig, &sig, "initial", &tree, &[])
                .unwrap();
        }
        let snapshot = RepoSnapshot::open(tmp.path()).unwrap();
        (tmp, snapshot)
    }

    #[test]
    fn walk_visits_in_listing_order_with_full_paths() {
        let (_tmp, snapshot) = fixture();
        let tree = snapshot.tree("HEAD").unwrap();

        let mut recorder = Recorder::default();
        walk_tree(&snapshot, &tree, &mut recorder).unwrap();

        assert_eq!(
            recorder.events,
            vec![
                "B README",
                "D data",
                "D data/nested",
                "B data/raw.bin",
                "L link",
            ]
        );
    }

    #[test]
    fn blob_record_exposes_size_and_content() {
        let (_tmp, snapshot) = fixture();
        let tree = snapshot.tree("HEAD").unwrap();

        struct Check;
        impl TreeVisitor for Check {
            type Error = RepoError;
            fn enter_directory(&mut self, _path: &str) -> Result<(), RepoError> {
                Ok(())
            }
            fn visit_blob(&mut self, path: &str, blob: &BlobRecord<'_>) -> Result<(), RepoError> {
                if path == "README" {
                    assert_eq!(blob.content(), b"hello");
                    assert_eq!(blob.size(), 5);
                }
                if path == "link" {
                    assert!(blob.is_symlink());
                    assert_eq!(blob.content(), b"README");
                }
                Ok(())
            }
        }
        walk_tree(&snapshot, &tree, &mut Check).unwrap();
    }

    #[test]
    fn visitor_error_aborts_walk() {
        let (_tmp, snapshot) = fixture();
        let tree = snapshot.tree("HEAD").unwrap();

        struct FailFast {
            seen: usize,
        }
        impl TreeVisitor for FailFast {
            type Error = RepoError;
            fn enter_directory(&mut self, _path: &str) -> Result<(), RepoError> {
                Ok(())
            }
            fn visit_blob(&mut self, _path: &str, _blob: &BlobRecord<'_>) -> Result<(), RepoError> {
                self.seen += 1;
                Err(git2::Error::from_str("stop").into())
            }
        }

        let mut visitor = FailFast { seen: 0 };
        let result = walk_tree(&snapshot, &tree, &mut visitor);
        assert!(result.is_err());
        assert_eq!(visitor.seen, 1);
    }

    #[test]
    fn resolve_rejects_non_commit_revision() {
        let (_tmp, snapshot) = fixture();
        let tree = snapshot.tree("HEAD").unwrap();
        let tree_id = tree.id().to_string();
        drop(tree);

        let result = snapshot.commit(&tree_id);
        assert!(matches!(result, Err(RepoError::NotACommit { .. })));
    }
}
