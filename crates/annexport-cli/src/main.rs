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

mod output;

use anyhow::{Context, Result};
use annexport_archive::ArchiveFormat;
use annexport_export::export_tree;
use annexport_git::RepoSnapshot;
use clap::{Parser, ValueEnum};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "annexport")]
#[command(version, about = "Export a repository snapshot into a portable archive")]
#[command(
    long_about = "Exports a commit's file tree into a ZIP or TAR.GZ archive. Files held in \
the git-annex object store (locked symlinks or unlocked pointer files) are replaced by \
their actual content, so consumers of the archive only ever see regular files."
)]
struct Cli {
    /// Repository to export (bare or non-bare)
    #[arg(value_name = "REPOSITORY")]
    repository: PathBuf,

    /// Archive container format
    #[arg(short, long, value_enum, default_value_t = FormatArg::Zip)]
    format: FormatArg,

    /// Output file (default: <short-commit-id>.<ext> next to the repository)
    #[arg(short, long, value_name = "PATH")]
    output: Option<PathBuf>,

    /// Revision to export
    #[arg(long, value_name = "REV", default_value = "HEAD")]
    rev: String,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum FormatArg {
    /// ZIP with deflate compression
    Zip,
    /// POSIX tar inside a gzip stream
    Tar,
}

impl From<FormatArg> for ArchiveFormat {
    fn from(arg: FormatArg) -> Self {
        match arg {
            FormatArg::Zip => ArchiveFormat::Zip,
            FormatArg::Tar => ArchiveFormat::TarGz,
        }
    }
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    if let Err(err) = run(&cli) {
        output::error(&format!("{err:#}"));
        std::process::exit(1);
    }
}

fn run(cli: &Cli) -> Result<()> {
    let format = ArchiveFormat::from(cli.format);
    let snapshot = RepoSnapshot::open(&cli.repository)
        .with_context(|| format!("failed to open repository {}", cli.repository.display()))?;
    let commit = snapshot
        .commit(&cli.rev)
        .with_context(|| format!("failed to resolve revision {:?}", cli.rev))?;
    let short_id = commit.id().to_string().chars().take(6).collect::<String>();
    let tree = commit.tree().context("failed to read the commit tree")?;

    let target = match &cli.output {
        Some(path) => path.clone(),
        None => default_target(&cli.repository, &short_id, format)?,
    };
    debug!(target = %target.display(), %format, "resolved export target");

    output::detail("Revision", &format!("{} ({})", cli.rev, short_id));
    output::detail("Format", format.extension());

    export_tree(&snapshot, &tree, &target, format)
        .with_context(|| format!("export to {} failed", target.display()))?;

    output::success(&format!("wrote {}", target.display()));
    Ok(())
}

/// Default output: `<short-id>.<ext>` in the repository's parent directory.
fn default_target(repository: &Path, short_id: &str, format: ArchiveFormat) -> Result<PathBuf> {
    let absolute = fs::canonicalize(repository)
        .with_context(|| format!("failed to resolve {}", repository.display()))?;
    let parent = absolute.parent().unwrap_or(Path::new("."));
    Ok(parent.join(format!("{short_id}.{}", format.extension())))
}

fn init_tracing(verbose: bool) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(if verbose { "debug" } else { "warn" }));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
