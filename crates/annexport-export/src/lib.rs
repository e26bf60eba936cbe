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

//! # Annexport Exporter
//!
//! Ties the layers together: walks a commit tree ([`annexport_git`]),
//! resolves annex references ([`annexport_annex`]), and streams every
//! entry into a ZIP or TAR.GZ encoder ([`annexport_archive`]).
//!
//! ```no_run
//! use annexport_archive::ArchiveFormat;
//! use annexport_export::export_revision;
//! use annexport_git::RepoSnapshot;
//! use std::path::Path;
//!
//! let snapshot = RepoSnapshot::open(Path::new("/data/repo"))?;
//! export_revision(&snapshot, "HEAD", Path::new("/tmp/repo.zip"), ArchiveFormat::Zip)?;
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod error;
pub mod exporter;

pub use error::{ExportError, ExportResult};
pub use exporter::{export_revision, export_tree};
