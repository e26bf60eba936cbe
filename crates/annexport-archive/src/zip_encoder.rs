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

//! ZIP encoder.
//!
//! Streams entry content as it is read; the local and central directory
//! headers absorb the length, so no size is needed up front. Directory
//! entries are written explicitly (the format supports them), symlinks are
//! stored as entries whose content is the target with the link mode bit
//! recorded in the external attributes.

use crate::error::ArchiveResult;
use crate::{ArchiveEncoder, DIR_MODE, SYMLINK_MODE};
use std::fs::File;
use std::io::{self, Read};
use std::path::Path;
use tracing::trace;
use zip::write::{SimpleFileOptions, ZipWriter};
use zip::CompressionMethod;

/// ZIP archive encoder over a target file.
pub struct ZipEncoder {
    writer: ZipWriter<File>,
}

impl ZipEncoder {
    /// Creates the target file and prepares an empty archive.
    pub fn create(target: &Path) -> ArchiveResult<Self> {
        let file = File::create(target)?;
        Ok(Self {
            writer: ZipWriter::new(file),
        })
    }

    fn options(&self, mode: u32) -> SimpleFileOptions {
        SimpleFileOptions::default()
            .compression_method(CompressionMethod::Deflated)
            .last_modified_time(export_timestamp())
            .unix_permissions(mode)
    }
}

/// Entries are stamped with export wall-clock time, not commit time.
fn export_timestamp() -> zip::DateTime {
    time::OffsetDateTime::now_utc()
        .try_into()
        .unwrap_or_default()
}

impl ArchiveEncoder for ZipEncoder {
    fn add_directory(&mut self, path: &str) -> ArchiveResult<()> {
        trace!(path, "zip: directory entry");
        self.writer.add_directory(path, self.options(DIR_MODE))?;
        Ok(())
    }

    fn add_file(
        &mut self,
        path: &str,
        mode: u32,
        size: u64,
        content: &mut dyn Read,
    ) -> ArchiveResult<()> {
        trace!(path, mode, size, "zip: file entry");
        let options = self.options(mode).large_file(size >= u64::from(u32::MAX));
        self.writer.start_file(path, options)?;
        io::copy(content, &mut self.writer)?;
        Ok(())
    }

    fn add_symlink(&mut self, path: &str, target: &str) -> ArchiveResult<()> {
        trace!(path, target, "zip: symlink entry");
        self.writer
            .add_symlink(path, target, self.options(SYMLINK_MODE))?;
        Ok(())
    }

    fn finish(mut self: Box<Self>) -> ArchiveResult<()> {
        // writes the central directory and hands the file back for close
        let file = self.writer.finish()?;
        file.sync_all()?;
        Ok(())
    }
}
