// SPDX-License-Identifier: AGPL-3.0
// Copyright (C) 2026 Annexport Contributors

//! Error types for archive encoding

use thiserror::Error;

/// Result type for archive encoding
pub type ArchiveResult<T> = Result<T, ArchiveError>;

/// Error types for writing archive headers and content
#[derive(Debug, Error)]
pub enum ArchiveError {
    /// IO fault on the target file or a compression writer
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// ZIP container error
    #[error("zip error: {0}")]
    Zip(#[from] zip::result::ZipError),
}
