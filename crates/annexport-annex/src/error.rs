// SPDX-License-Identifier: AGPL-3.0
// Copyright (C) 2026 Annexport Contributors

//! Error types for annex operations

use std::path::PathBuf;
use thiserror::Error;

/// Result type for annex operations
pub type AnnexResult<T> = Result<T, AnnexError>;

/// Error types for annex key resolution and content lookup
#[derive(Debug, Error)]
pub enum AnnexError {
    /// The key exists under neither hashing scheme in the content store
    #[error("annex content not found for key {key:?}")]
    ContentNotFound {
        /// The annex key that could not be resolved
        key: String,
    },

    /// Neither the bare nor the non-bare store layout exists on disk
    #[error("no annex object store found under {root:?} (tried bare and non-bare layouts)")]
    StoreLayout {
        /// Repository root that was probed
        root: PathBuf,
    },

    /// IO error while probing or reading the content store
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
