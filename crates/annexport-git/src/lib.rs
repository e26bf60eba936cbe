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

//! # Annexport Repository Layer
//!
//! Read-only access to a git repository for the exporter: opening a
//! snapshot, resolving a revision to its root tree, and walking that tree
//! depth-first with a visitor.
//!
//! The walk is single-threaded by design; archive formats require one
//! ordered writer, so nothing here is worth parallelizing.

pub mod error;
pub mod repo;
pub mod walk;

pub use error::{RepoError, RepoResult};
pub use repo::RepoSnapshot;
pub use walk::{walk_tree, BlobRecord, TreeVisitor};

/// Re-export of the underlying git library for callers that hold [`git2::Tree`]
/// or [`git2::Commit`] handles across the API boundary.
pub use git2;
