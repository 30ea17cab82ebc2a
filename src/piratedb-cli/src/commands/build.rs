//! Database build command

use super::collect_records;
use crate::config::Config;
use anyhow::{Context, Result};
use piratedb_db::{LocaleTable, SqliteDb, DEFAULT_DB_PATH};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Instant;

/// Build the database from `archive` into `output`
///
/// Projection runs before the old database is touched, so a failed run
/// leaves the previous output in place.
pub fn handle(
    config: &Config,
    archive: &Path,
    output: Option<PathBuf>,
    locale: Option<PathBuf>,
) -> Result<()> {
    let started = Instant::now();

    let output = output
        .or_else(|| config.output.clone())
        .unwrap_or_else(|| PathBuf::from(DEFAULT_DB_PATH));
    let locale = locale.or_else(|| config.locale.clone());

    let locale = locale
        .map(|path| {
            LocaleTable::load(&path)
                .with_context(|| format!("Failed to load locale from {}", path.display()))
        })
        .transpose()?;

    let records = collect_records(archive, &config.pipeline)?;

    if output.exists() {
        fs::remove_file(&output)
            .with_context(|| format!("Failed to remove old database {}", output.display()))?;
    }

    let mut db = SqliteDb::open(&output)
        .with_context(|| format!("Failed to open database {}", output.display()))?;
    db.init().context("Failed to create schema")?;
    if let Some(locale) = &locale {
        db.write_locale(locale).context("Failed to write locale")?;
    }
    db.write_records(&records).context("Failed to write records")?;

    println!(
        "Wrote {} records to {} in {:.2?}",
        records.len(),
        output.display(),
        started.elapsed()
    );
    Ok(())
}
