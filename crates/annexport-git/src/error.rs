// SPDX-License-Identifier: AGPL-3.0
// Copyright (C) 2026 Annexport Contributors

//! Error types for repository access

use thiserror::Error;

/// Result type for repository operations
pub type RepoResult<T> = Result<T, RepoError>;

/// Error types for repository and tree access
#[derive(Debug, Error)]
pub enum RepoError {
    /// libgit2 error (open, revision lookup, tree/blob reads)
    #[error("git error: {0}")]
    Git2(#[from] git2::Error),

    /// A tree entry name is not valid UTF-8 and cannot become an archive path
    #[error("tree entry under {parent:?} has a non-UTF-8 name")]
    NonUtf8Path {
        /// Path of the containing directory
        parent: String,
    },

    /// The revision did not resolve to a commit
    #[error("revision {rev:?} does not point to a commit")]
    NotACommit {
        /// The offending revision expression
        rev: String,
    },
}
