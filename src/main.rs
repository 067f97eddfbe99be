//! # Grant Dorks CLI (`gdork`)
//!
//! ## Usage
//!
//! ```bash
//! gdork --config ./config/gdork.toml <command>
//! ```
//!
//! ## Commands
//!
//! | Command | Description |
//! |---------|-------------|
//! | `gdork generate <topic>` | Compile and validate dorks for every engine |
//! | `gdork validate <engine> <dork>` | Check a dork; `--fix` runs the repair loop |
//! | `gdork rules <engine>` | Print an engine's operator table |
//! | `gdork guidance <engine>` | Print markdown guidance with verified examples |
//! | `gdork files list` | List saved dork files |
//! | `gdork files cleanup` | Remove saved files past retention |
//! | `gdork serve mcp` | Start the HTTP tool server and MCP endpoint |
//! | `gdork completions <shell>` | Print a shell completion script |
//!
//! A missing config file is not an error: every setting has a default.
//! Diagnostics go to stderr and are controlled with `RUST_LOG`.

use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::Shell;
use grant_dorks::config;
use grant_dorks::generate::GenerateOptions;
use grant_dorks_core::{DuckDuckGoMode, SearchEngine};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// Grant Dorks: engine-aware search dorks for grant discovery.
#[derive(Parser)]
#[command(
    name = "gdork",
    about = "Grant Dorks: engine-aware search dorks for grant discovery",
    version,
    long_about = "Grant Dorks compiles a grant topic and optional locations into search \
    dorks for Google, Bing, and DuckDuckGo, validates each against the engine's operator \
    grammar, and serves the same operations as HTTP and MCP tools."
)]
struct Cli {
    /// Path to configuration file (TOML).
    ///
    /// Defaults to `./config/gdork.toml`. When the file does not exist the
    /// built-in defaults are used.
    #[arg(long, global = true, default_value = "./config/gdork.toml")]
    config: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Compile dorks for a grant topic.
    ///
    /// Prints one dork per engine followed by its validation report.
    Generate {
        /// Grant topic, e.g. "rural broadband".
        topic: String,

        /// Comma-separated locations, e.g. "Michigan, Minnesota".
        #[arg(long, short)]
        location: Option<String>,

        /// Only print the dork for this engine (google, bing, duckduckgo).
        #[arg(long, value_parser = parse_engine)]
        engine: Option<SearchEngine>,

        /// DuckDuckGo output: `combined` (one string) or `split` (several
        /// simple queries). Overrides `[compiler].duckduckgo_mode`.
        #[arg(long = "ddg-mode", value_parser = parse_ddg_mode)]
        ddg_mode: Option<DuckDuckGoMode>,

        /// Write all three dorks to a JSON file in `[output].dir`.
        #[arg(long)]
        save: bool,

        /// Print the full report as JSON.
        #[arg(long)]
        json: bool,
    },

    /// Validate a dork against an engine's grammar.
    ///
    /// Exits non-zero when the dork is invalid (or cannot be repaired with
    /// `--fix`).
    Validate {
        /// google, bing, or duckduckgo.
        engine: String,
        /// The dork to check.
        dork: String,
        /// Apply known fixes, up to `[repair].max_retries` rounds.
        #[arg(long)]
        fix: bool,
        /// Print the report as JSON.
        #[arg(long)]
        json: bool,
    },

    /// Print the operator table for an engine.
    Rules {
        engine: String,
        #[arg(long)]
        json: bool,
    },

    /// Print markdown guidance and verified examples for an engine.
    Guidance { engine: String },

    /// Manage saved dork files.
    Files {
        #[command(subcommand)]
        action: FilesAction,
    },

    /// Start a server.
    Serve {
        #[command(subcommand)]
        service: ServeService,
    },

    /// Print a shell completion script.
    Completions { shell: Shell },
}

#[derive(Subcommand)]
enum FilesAction {
    /// List saved dork files, newest first.
    List,
    /// Remove saved dork files older than the retention period.
    Cleanup {
        /// Age threshold in days. Defaults to `[output].retention_days`.
        #[arg(long)]
        days: Option<u32>,
    },
}

#[derive(Subcommand)]
enum ServeService {
    /// Start the HTTP tool server with the MCP endpoint at `/mcp`.
    ///
    /// Binds to `[server].bind`.
    Mcp,
}

fn parse_engine(s: &str) -> Result<SearchEngine, String> {
    s.parse().map_err(|e: grant_dorks_core::DorkError| e.to_string())
}

fn parse_ddg_mode(s: &str) -> Result<DuckDuckGoMode, String> {
    s.parse()
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("grant_dorks=warn,grant_dorks_core=warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    // Commands that don't require config
    match &cli.command {
        Commands::Rules { engine, json } => return grant_dorks::rules::run_rules(engine, *json),
        Commands::Guidance { engine } => return grant_dorks::rules::run_guidance(engine),
        Commands::Completions { shell } => {
            clap_complete::generate(*shell, &mut Cli::command(), "gdork", &mut std::io::stdout());
            return Ok(());
        }
        _ => {}
    }

    let cfg = config::load_or_default(&cli.config)?;

    match cli.command {
        Commands::Generate {
            topic,
            location,
            engine,
            ddg_mode,
            save,
            json,
        } => {
            let opts = GenerateOptions {
                engine,
                duckduckgo_mode: ddg_mode,
                save,
            };
            grant_dorks::generate::run_generate(&cfg, &topic, location.as_deref(), &opts, json)?;
        }
        Commands::Validate {
            engine,
            dork,
            fix,
            json,
        } => {
            grant_dorks::check::run_validate(&cfg, &engine, &dork, fix, json)?;
        }
        Commands::Files { action } => match action {
            FilesAction::List => grant_dorks::files::run_files_list(&cfg)?,
            FilesAction::Cleanup { days } => grant_dorks::files::run_files_cleanup(&cfg, days)?,
        },
        Commands::Serve { service } => match service {
            ServeService::Mcp => {
                grant_dorks::server::run_server(&cfg).await?;
            }
        },
        Commands::Rules { .. } | Commands::Guidance { .. } | Commands::Completions { .. } => {
            // Handled above (before config loading)
        }
    }

    Ok(())
}
