//! `gdork files list` and `gdork files cleanup`.

use anyhow::Result;

use crate::config::Config;
use crate::output::DorkWriter;

pub fn run_files_list(config: &Config) -> Result<()> {
    let writer = DorkWriter::new(&config.output.dir)?;
    let files = writer.list()?;

    if files.is_empty() {
        println!("No saved dork files in {}.", writer.dir().display());
        return Ok(());
    }

    for f in &files {
        println!(
            "{}  {:>8} B  {}",
            f.modified.format("%Y-%m-%d %H:%M:%S"),
            f.size,
            f.name
        );
    }
    println!("{} file(s) in {}", files.len(), writer.dir().display());
    Ok(())
}

/// Remove files older than `days`, or `[output].retention_days` when unset.
pub fn run_files_cleanup(config: &Config, days: Option<u32>) -> Result<()> {
    let days = days.unwrap_or(config.output.retention_days);
    if days == 0 {
        anyhow::bail!("--days must be >= 1");
    }

    let writer = DorkWriter::new(&config.output.dir)?;
    let removed = writer.cleanup(days)?;
    println!("Removed {} file(s) older than {} day(s).", removed, days);
    Ok(())
}
