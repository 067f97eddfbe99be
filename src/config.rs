//! TOML configuration.
//!
//! Every section is optional; missing keys fall back to the defaults shown
//! in `config/gdork.example.toml`.

use anyhow::{Context, Result};
use grant_dorks_core::{CompileOptions, DuckDuckGoMode};
use serde::Deserialize;
use std::path::{Path, PathBuf};

#[derive(Debug, Deserialize, Clone, Default)]
pub struct Config {
    #[serde(default)]
    pub output: OutputConfig,
    #[serde(default)]
    pub compiler: CompilerConfig,
    #[serde(default)]
    pub repair: RepairConfig,
    #[serde(default)]
    pub server: ServerConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct OutputConfig {
    #[serde(default = "default_output_dir")]
    pub dir: PathBuf,
    #[serde(default = "default_retention_days")]
    pub retention_days: u32,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            dir: default_output_dir(),
            retention_days: default_retention_days(),
        }
    }
}

fn default_output_dir() -> PathBuf {
    PathBuf::from("./grant_dorks")
}
fn default_retention_days() -> u32 {
    30
}

#[derive(Debug, Deserialize, Clone)]
pub struct CompilerConfig {
    #[serde(default)]
    pub duckduckgo_mode: DuckDuckGoMode,
    /// Attach a validation report to every generated dork.
    #[serde(default = "default_validate")]
    pub validate: bool,
}

impl Default for CompilerConfig {
    fn default() -> Self {
        Self {
            duckduckgo_mode: DuckDuckGoMode::default(),
            validate: default_validate(),
        }
    }
}

fn default_validate() -> bool {
    true
}

impl CompilerConfig {
    pub fn options(&self) -> CompileOptions {
        CompileOptions {
            duckduckgo_mode: self.duckduckgo_mode,
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct RepairConfig {
    #[serde(default = "default_max_retries")]
    pub max_retries: u32,
}

impl Default for RepairConfig {
    fn default() -> Self {
        Self {
            max_retries: default_max_retries(),
        }
    }
}

fn default_max_retries() -> u32 {
    3
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    #[serde(default = "default_bind")]
    pub bind: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: default_bind(),
        }
    }
}

fn default_bind() -> String {
    "127.0.0.1:7341".to_string()
}

impl Config {
    /// Defaults for every section, used when no config file exists.
    pub fn minimal() -> Self {
        Self::default()
    }
}

pub fn load_config(path: &Path) -> Result<Config> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {}", path.display()))?;

    let config: Config = toml::from_str(&content).with_context(|| "Failed to parse config file")?;
    validate_config(&config)?;

    tracing::debug!(path = %path.display(), "loaded config");
    Ok(config)
}

/// Load `path` if it exists, otherwise fall back to [`Config::minimal`].
/// A file that exists but fails to parse or validate is still an error.
pub fn load_or_default(path: &Path) -> Result<Config> {
    if path.exists() {
        load_config(path)
    } else {
        tracing::debug!(path = %path.display(), "no config file, using defaults");
        Ok(Config::minimal())
    }
}

fn validate_config(config: &Config) -> Result<()> {
    if config.repair.max_retries < 1 {
        anyhow::bail!("repair.max_retries must be >= 1");
    }

    if config.output.retention_days < 1 {
        anyhow::bail!("output.retention_days must be >= 1");
    }

    if config.server.bind.trim().is_empty() {
        anyhow::bail!("server.bind must not be empty");
    }

    Ok(())
}
