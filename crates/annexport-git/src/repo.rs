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

//! Read-only repository snapshot.

use crate::error::{RepoError, RepoResult};
use git2::{Commit, Repository, Tree};
use std::path::Path;
use tracing::debug;

/// A repository opened for export.
///
/// Thin wrapper around [`git2::Repository`] exposing exactly what the
/// exporter consumes: revision-to-commit resolution, the commit's root
/// tree, and the filesystem root under which the annex store is anchored.
pub struct RepoSnapshot {
    repo: Repository,
}

impl RepoSnapshot {
    /// Opens the repository at `path` (bare or non-bare).
    pub fn open(path: &Path) -> RepoResult<Self> {
        let repo = Repository::open(path)?;
        debug!(path = %path.display(), bare = repo.is_bare(), "opened repository");
        Ok(Self { repo })
    }

    /// The filesystem root the annex object store is anchored under:
    /// the working directory for a non-bare repository, the repository
    /// directory itself for a bare one.
    pub fn root(&self) -> &Path {
        self.repo.workdir().unwrap_or_else(|| self.repo.path())
    }

    /// Resolves a revision expression (`HEAD`, a branch, a tag, an object
    /// id prefix) to a commit.
    pub fn commit(&self, rev: &str) -> RepoResult<Commit<'_>> {
        let object = self.repo.revparse_single(rev)?;
        object.peel_to_commit().map_err(|_| RepoError::NotACommit {
            rev: rev.to_string(),
        })
    }

    /// Root tree of the commit at `rev`.
    pub fn tree(&self, rev: &str) -> RepoResult<Tree<'_>> {
        Ok(self.commit(rev)?.tree()?)
    }

    /// Underlying libgit2 handle, for tree traversal.
    pub fn git(&self) -> &Repository {
        &self.repo
    }
}
