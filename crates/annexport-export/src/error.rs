// SPDX-License-Identifier: AGPL-3.0
// Copyright (C) 2026 Annexport Contributors

//! Error types for the export orchestration

use annexport_annex::AnnexError;
use annexport_archive::ArchiveError;
use annexport_git::RepoError;
use thiserror::Error;

/// Result type for export operations
pub type ExportResult<T> = Result<T, ExportError>;

/// Error types for a whole-tree export.
///
/// Every variant is fatal: the export halts at the first error and the
/// partially written target is removed.
#[derive(Debug, Error)]
pub enum ExportError {
    /// Tree or sub-tree listing failed (upstream provider fault)
    #[error("tree read failed: {0}")]
    Tree(#[from] RepoError),

    /// Annex resolution failed (missing content or unusable store layout)
    #[error(transparent)]
    Annex(#[from] AnnexError),

    /// Writing a header or content chunk to the archive failed
    #[error("archive encoding failed: {0}")]
    Encode(#[from] ArchiveError),

    /// IO fault outside the encoders (content file open, rename)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// A symlink blob's target is not valid UTF-8
    #[error("symlink {path:?} has a non-UTF-8 target")]
    InvalidLinkTarget {
        /// Archive path of the offending entry
        path: String,
    },
}
