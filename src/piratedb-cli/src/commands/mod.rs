//! Command handlers for piratedb CLI
//!
//! Each subcommand has its own module with handler functions.

pub mod build;
pub mod classify;
pub mod configure;
pub mod scan;

use anyhow::{Context as _, Result};
use piratedb::{aggregate, Context, DirArchive, PipelineConfig, Records, TemplateManifest};
use std::path::Path;

/// Open an extracted archive and its template manifest
pub fn open_archive(dir: &Path) -> Result<(DirArchive, TemplateManifest)> {
    let archive = DirArchive::open(dir)
        .with_context(|| format!("Failed to open archive at {}", dir.display()))?;
    let manifest = TemplateManifest::load(&archive).context("Failed to load template manifest")?;
    tracing::info!(
        "Opened {} ({} files, {} templates)",
        dir.display(),
        archive.list_files().len(),
        manifest.len()
    );
    Ok((archive, manifest))
}

/// Run every configured scan over an archive directory
pub fn collect_records(dir: &Path, config: &PipelineConfig) -> Result<Records> {
    let (archive, manifest) = open_archive(dir)?;
    let ctx = Context::new(&archive, &manifest, config);
    aggregate::collect(&ctx, &config.scans).context("Failed to project templates")
}
