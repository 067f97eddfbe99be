//! Dork generation: compile, validate, optionally save.
//!
//! [`generate_dorks`] is the shared entry point for `gdork generate` and the
//! `generate_search_dorks` tool. [`run_generate`] is the CLI printer.

use anyhow::Result;
use grant_dorks_core::{
    compile_engine, compile_request, compile_validated, DorkQuery, DuckDuckGoMode, SearchEngine,
    SearchRequest, ValidationResult,
};
use serde::Serialize;
use std::path::PathBuf;

use crate::config::Config;
use crate::output::DorkWriter;

/// Per-call overrides on top of `[compiler]` config.
#[derive(Debug, Clone, Default)]
pub struct GenerateOptions {
    /// Restrict output to one engine. Saved files always hold all three.
    pub engine: Option<SearchEngine>,
    pub duckduckgo_mode: Option<DuckDuckGoMode>,
    pub save: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct GeneratedDork {
    pub engine: SearchEngine,
    pub query: DorkQuery,
    /// False when `[compiler].validate` is off; check the query with
    /// `gdork validate` or the `validate_dork` tool before use.
    pub validated: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub validation: Option<ValidationResult>,
}

#[derive(Debug, Clone, Serialize)]
pub struct GenerateReport {
    pub topic: String,
    pub location: Option<String>,
    pub duckduckgo_mode: DuckDuckGoMode,
    pub dorks: Vec<GeneratedDork>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub saved_to: Option<PathBuf>,
}

/// Compile dorks for `topic`, attaching validation reports when
/// `[compiler].validate` is on. Fails only for a blank topic or a save
/// error.
pub fn generate_dorks(
    config: &Config,
    topic: &str,
    location: Option<&str>,
    opts: &GenerateOptions,
) -> Result<GenerateReport> {
    let request = SearchRequest::new(topic, location)?;

    let mut options = config.compiler.options();
    if let Some(mode) = opts.duckduckgo_mode {
        options.duckduckgo_mode = mode;
    }

    let wanted = |engine: SearchEngine| opts.engine.map_or(true, |e| e == engine);

    let dorks: Vec<GeneratedDork> = if config.compiler.validate {
        compile_validated(&request, &options)
            .into_iter()
            .filter(|d| wanted(d.engine))
            .map(|d| GeneratedDork {
                engine: d.engine,
                query: d.query,
                validated: true,
                validation: Some(d.validation),
            })
            .collect()
    } else {
        SearchEngine::all()
            .iter()
            .copied()
            .filter(|e| wanted(*e))
            .map(|e| {
                let dork = compile_engine(e, &request, &options);
                GeneratedDork {
                    engine: dork.engine,
                    query: dork.query,
                    validated: false,
                    validation: None,
                }
            })
            .collect()
    };

    let saved_to = if opts.save {
        let writer = DorkWriter::new(&config.output.dir)?;
        let set = compile_request(&request, &options);
        Some(writer.save(request.topic(), location, &set)?)
    } else {
        None
    };

    Ok(GenerateReport {
        topic: request.topic().to_string(),
        location: location.map(str::trim).filter(|l| !l.is_empty()).map(String::from),
        duckduckgo_mode: options.duckduckgo_mode,
        dorks,
        saved_to,
    })
}

/// `gdork generate`: print each dork followed by its validation report.
pub fn run_generate(
    config: &Config,
    topic: &str,
    location: Option<&str>,
    opts: &GenerateOptions,
    json: bool,
) -> Result<()> {
    let report = generate_dorks(config, topic, location, opts)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    println!("Topic: {}", report.topic);
    println!(
        "Location: {}",
        report.location.as_deref().unwrap_or("Not specified")
    );
    println!();

    for dork in &report.dorks {
        println!("=== {} ===", dork.engine);
        for q in dork.query.queries() {
            println!("{}", q);
        }
        match dork.validation {
            Some(ref v) => print_validation(v),
            None => println!(
                "  NOT VALIDATED (check with: gdork validate {} '<dork>')",
                dork.engine.tag()
            ),
        }
        println!();
    }

    if let Some(ref path) = report.saved_to {
        println!("Saved to {}", path.display());
    }
    Ok(())
}

/// Print a validation report in the indented style used by every command.
pub fn print_validation(result: &ValidationResult) {
    if result.is_valid {
        println!("  valid");
    } else {
        println!("  INVALID");
    }
    for e in &result.errors {
        println!("    error: {}", e);
    }
    for w in &result.warnings {
        println!("    warning: {}", w);
    }
    for s in &result.suggestions {
        println!("    suggestion: {}", s);
    }
}
