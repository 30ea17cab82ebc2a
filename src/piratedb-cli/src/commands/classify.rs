//! Single-template classification command

use super::open_archive;
use crate::config::Config;
use anyhow::{Context as _, Result};
use piratedb::{classify, Archive, Context, TemplateRecord};
use std::path::Path;

/// Classify one template and print its record as JSON
pub fn handle(config: &Config, archive_dir: &Path, path: &str) -> Result<()> {
    let (archive, manifest) = open_archive(archive_dir)?;
    let node = archive
        .deserialize(path)
        .with_context(|| format!("Could not deserialize {}", path))?;

    let pipeline = &config.pipeline;
    let Some(kind) = classify(&node, &pipeline.policy) else {
        println!("{}: unclassified", path);
        return Ok(());
    };

    let ctx = Context::new(&archive, &manifest, pipeline);
    let record = TemplateRecord::project(kind, &node, &ctx)
        .with_context(|| format!("Failed to project {} as {}", path, kind))?;

    println!("{}", serde_json::to_string_pretty(&record)?);
    Ok(())
}
