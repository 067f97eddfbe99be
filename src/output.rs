//! Saved dork files.
//!
//! Each `gdork generate --save` (or `generate_search_dorks` tool call with
//! `save: true`) writes one pretty-printed JSON file:
//!
//! ```json
//! {
//!   "generated_at": "2026-10-16T09:30:00+00:00",
//!   "topic": "rural broadband",
//!   "location": "Ohio",
//!   "dorks": { "google": "...", "bing": "...", "duckduckgo": "..." }
//! }
//! ```
//!
//! Files are named `<YYYYMMDD_HHMMSS>_dorks_<slug>.json`. Two saves of the
//! same topic within one second share a name and the later one wins.

use anyhow::{Context, Result};
use chrono::{DateTime, Local};
use grant_dorks_core::DorkSet;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::{Duration, SystemTime};

/// Maximum slug length before trailing underscores are stripped.
const SLUG_MAX_CHARS: usize = 50;

const LOCATION_PLACEHOLDER: &str = "Not specified";

/// On-disk shape of a saved dork file.
#[derive(Debug, Serialize, Deserialize)]
pub struct DorkFile {
    pub generated_at: String,
    pub topic: String,
    pub location: String,
    pub dorks: DorkSet,
}

/// Metadata for one saved file, as returned by [`DorkWriter::list`].
#[derive(Debug, Clone, Serialize)]
pub struct SavedFile {
    pub name: String,
    pub path: PathBuf,
    pub size: u64,
    pub modified: DateTime<Local>,
}

/// Writes and manages dork files under one directory.
#[derive(Debug, Clone)]
pub struct DorkWriter {
    dir: PathBuf,
}

impl DorkWriter {
    /// Create a writer, creating `dir` if it does not exist.
    pub fn new(dir: impl Into<PathBuf>) -> Result<Self> {
        let dir = dir.into();
        std::fs::create_dir_all(&dir)
            .with_context(|| format!("Failed to create output directory: {}", dir.display()))?;
        Ok(Self { dir })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Save a compiled dork set and return the file path.
    pub fn save(&self, topic: &str, location: Option<&str>, dorks: &DorkSet) -> Result<PathBuf> {
        let now = Local::now();
        let filename = format!(
            "{}_dorks_{}.json",
            now.format("%Y%m%d_%H%M%S"),
            sanitize_filename(topic)
        );
        let path = self.dir.join(filename);

        let location = location
            .map(str::trim)
            .filter(|l| !l.is_empty())
            .unwrap_or(LOCATION_PLACEHOLDER);

        let file = DorkFile {
            generated_at: now.to_rfc3339(),
            topic: topic.to_string(),
            location: location.to_string(),
            dorks: dorks.clone(),
        };
        let json = serde_json::to_string_pretty(&file)?;
        std::fs::write(&path, json)
            .with_context(|| format!("Failed to write dork file: {}", path.display()))?;

        tracing::info!(path = %path.display(), "saved dorks");
        Ok(path)
    }

    /// Saved `.json` files, newest first.
    pub fn list(&self) -> Result<Vec<SavedFile>> {
        let mut files = Vec::new();
        for entry in std::fs::read_dir(&self.dir)
            .with_context(|| format!("Failed to read output directory: {}", self.dir.display()))?
        {
            let entry = entry?;
            let path = entry.path();
            if !is_json(&path) {
                continue;
            }
            let meta = entry.metadata()?;
            if !meta.is_file() {
                continue;
            }
            files.push(SavedFile {
                name: entry.file_name().to_string_lossy().into_owned(),
                path,
                size: meta.len(),
                modified: DateTime::<Local>::from(meta.modified()?),
            });
        }
        files.sort_by(|a, b| b.modified.cmp(&a.modified).then_with(|| b.name.cmp(&a.name)));
        Ok(files)
    }

    /// Remove `.json` files last modified more than `days` days ago.
    /// Returns the number of files removed.
    pub fn cleanup(&self, days: u32) -> Result<usize> {
        let age = Duration::from_secs(u64::from(days) * 24 * 60 * 60);
        let cutoff = SystemTime::now()
            .checked_sub(age)
            .unwrap_or(SystemTime::UNIX_EPOCH);

        let mut removed = 0;
        for file in self.list()? {
            if SystemTime::from(file.modified) < cutoff {
                std::fs::remove_file(&file.path)
                    .with_context(|| format!("Failed to remove {}", file.path.display()))?;
                tracing::debug!(path = %file.path.display(), "removed old dork file");
                removed += 1;
            }
        }
        Ok(removed)
    }
}

fn is_json(path: &Path) -> bool {
    path.extension().is_some_and(|ext| ext == "json")
}

/// Turn a topic into a filename slug: characters other than letters,
/// digits, `_`, `-` and whitespace become `_`, whitespace becomes `_`,
/// the result is cut to 50 characters, trailing `_` are stripped, and
/// everything is lower-cased.
pub fn sanitize_filename(text: &str) -> String {
    let slug: String = text
        .chars()
        .map(|c| {
            if c.is_alphanumeric() || c == '_' || c == '-' {
                c
            } else {
                '_'
            }
        })
        .take(SLUG_MAX_CHARS)
        .collect();
    slug.trim_end_matches('_').to_lowercase()
}
