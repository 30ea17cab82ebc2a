//! Archive scan command

use super::collect_records;
use crate::config::Config;
use anyhow::Result;
use std::path::Path;

/// Print per-kind counts, or every record as JSON
pub fn handle(config: &Config, archive: &Path, json: bool) -> Result<()> {
    let records = collect_records(archive, &config.pipeline)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&records)?);
        return Ok(());
    }

    for (kind, count) in records.counts() {
        println!("{:<18} {:>6}", kind.name(), count);
    }
    println!("{:<18} {:>6}", "total", records.len());
    Ok(())
}
