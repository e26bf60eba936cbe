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

//! TAR.GZ encoder.
//!
//! The tar header carries the exact byte count before any content is
//! streamed, so callers must know entry sizes up front (from the content
//! file's stat or the blob's declared size). Symlinks use the format's
//! native entry type with a link-name field and no content bytes.
//! Directory entries are not written; parent directories are implied by
//! member paths.

use crate::error::ArchiveResult;
use crate::{ArchiveEncoder, SYMLINK_MODE};
use flate2::write::GzEncoder;
use flate2::Compression;
use std::fs::File;
use std::io::Read;
use std::path::Path;
use std::time::{SystemTime, UNIX_EPOCH};
use tar::{Builder, EntryType, Header};
use tracing::trace;

/// Gzip-compressed tar encoder over a target file.
pub struct TarGzEncoder {
    builder: Builder<GzEncoder<File>>,
}

impl TarGzEncoder {
    /// Creates the target file and wraps it in the gzip and tar writers.
    pub fn create(target: &Path) -> ArchiveResult<Self> {
        let file = File::create(target)?;
        let gzip = GzEncoder::new(file, Compression::default());
        Ok(Self {
            builder: Builder::new(gzip),
        })
    }

    fn base_header(&self, mode: u32) -> Header {
        let mut header = Header::new_gnu();
        header.set_mode(mode);
        header.set_mtime(export_timestamp());
        header.set_uid(0);
        header.set_gid(0);
        header
    }
}

/// Entries are stamped with export wall-clock time, not commit time.
fn export_timestamp() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|elapsed| elapsed.as_secs())
        .unwrap_or(0)
}

impl ArchiveEncoder for TarGzEncoder {
    fn add_directory(&mut self, path: &str) -> ArchiveResult<()> {
        // directories are implied by member paths in a plain tar stream
        trace!(path, "tar: directory implied, no entry written");
        Ok(())
    }

    fn add_file(
        &mut self,
        path: &str,
        mode: u32,
        size: u64,
        content: &mut dyn Read,
    ) -> ArchiveResult<()> {
        trace!(path, mode, size, "tar: file entry");
        let mut header = self.base_header(mode);
        header.set_entry_type(EntryType::Regular);
        header.set_size(size);
        self.builder.append_data(&mut header, path, content)?;
        Ok(())
    }

    fn add_symlink(&mut self, path: &str, target: &str) -> ArchiveResult<()> {
        trace!(path, target, "tar: symlink entry");
        let mut header = self.base_header(SYMLINK_MODE);
        header.set_entry_type(EntryType::Symlink);
        header.set_size(0);
        self.builder.append_link(&mut header, path, target)?;
        Ok(())
    }

    fn finish(self: Box<Self>) -> ArchiveResult<()> {
        // reverse order of acquisition: tar trailer, then gzip trailer,
        // then the file handle
        let gzip = self.builder.into_inner()?;
        let file = gzip.finish()?;
        file.sync_all()?;
        Ok(())
    }
}
