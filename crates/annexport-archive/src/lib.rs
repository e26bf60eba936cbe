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

//! # Annexport Archive Layer
//!
//! One entry model, two container formats. An [`ArchiveEncoder`] receives
//! a stream of (path, mode, content) records and produces either a ZIP
//! file or a gzip-compressed POSIX tar.
//!
//! The two formats disagree on metadata: tar headers need the exact byte
//! count before any content is streamed, ZIP absorbs a streamed unknown
//! length; ZIP carries explicit directory entries, tar implies directories
//! from member paths; tar has a native symlink entry type, ZIP stores the
//! target as entry content with the link mode bit set. The trait keeps
//! those differences behind one call surface so the exporter never
//! branches on format.

pub mod error;
pub mod tar_encoder;
pub mod zip_encoder;

pub use error::{ArchiveError, ArchiveResult};
pub use tar_encoder::TarGzEncoder;
pub use zip_encoder::ZipEncoder;

use std::io::Read;
use std::path::Path;

/// Default permission bits for regular file entries.
pub const DEFAULT_FILE_MODE: u32 = 0o660;

/// Permission bits for directory entries.
pub const DIR_MODE: u32 = 0o770;

/// Permission bits for symlink entries.
pub const SYMLINK_MODE: u32 = 0o777;

/// Target container format.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArchiveFormat {
    /// ZIP with deflate compression
    Zip,
    /// POSIX tar inside a gzip stream
    TarGz,
}

impl ArchiveFormat {
    /// Conventional file extension, without leading dot.
    pub fn extension(&self) -> &'static str {
        match self {
            ArchiveFormat::Zip => "zip",
            ArchiveFormat::TarGz => "tar.gz",
        }
    }
}

impl std::fmt::Display for ArchiveFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.extension())
    }
}

/// A single ordered writer producing one archive file.
///
/// Implementations own the target file handle and every wrapping writer,
/// and release them exactly once, in reverse order of acquisition, when
/// [`finish`](ArchiveEncoder::finish) runs or the encoder is dropped after
/// a failure.
pub trait ArchiveEncoder {
    /// Appends a directory entry. A no-op for formats where directories
    /// are implied by member paths.
    fn add_directory(&mut self, path: &str) -> ArchiveResult<()>;

    /// Appends a regular file entry, streaming `content` in bounded
    /// chunks. `size` must be the exact byte count of the content.
    fn add_file(&mut self, path: &str, mode: u32, size: u64, content: &mut dyn Read)
        -> ArchiveResult<()>;

    /// Appends a symlink entry pointing at `target`.
    fn add_symlink(&mut self, path: &str, target: &str) -> ArchiveResult<()>;

    /// Flushes trailers and closes the format writers. Must be called for
    /// the archive to be valid.
    fn finish(self: Box<Self>) -> ArchiveResult<()>;
}

/// Opens `target` for writing and wraps it in the encoder for `format`.
pub fn create_encoder(
    format: ArchiveFormat,
    target: &Path,
) -> ArchiveResult<Box<dyn ArchiveEncoder>> {
    Ok(match format {
        ArchiveFormat::Zip => Box::new(ZipEncoder::create(target)?),
        ArchiveFormat::TarGz => Box::new(TarGzEncoder::create(target)?),
    })
}
