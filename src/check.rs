//! `gdork validate`: check a dork against one engine's grammar, and
//! optionally run the repair loop.

use anyhow::Result;
use grant_dorks_core::{repair_dork, DorkError, DorkValidator, RepairOutcome, SearchEngine};
use serde::Serialize;

use crate::config::Config;
use crate::generate::print_validation;

/// Result of the repair loop in a shape that serializes the same whether
/// or not repair succeeded.
#[derive(Debug, Clone, Serialize)]
pub struct RepairReport {
    pub engine: SearchEngine,
    pub original: String,
    pub repaired: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dork: Option<String>,
    pub attempts: u32,
    pub applied: Vec<&'static str>,
    pub errors: Vec<String>,
    pub warnings: Vec<String>,
    pub suggestions: Vec<String>,
}

/// Run the repair loop with `[repair].max_retries` rounds. Unrepairable
/// input is reported in the result, not as an error.
pub fn repair(config: &Config, engine: SearchEngine, dork: &str) -> Result<RepairReport> {
    let validator = DorkValidator::new(engine);
    match repair_dork(&validator, dork, config.repair.max_retries) {
        Ok(RepairOutcome {
            dork: fixed,
            attempts,
            applied,
            validation,
        }) => Ok(RepairReport {
            engine,
            original: dork.to_string(),
            repaired: true,
            dork: Some(fixed),
            attempts,
            applied,
            errors: validation.errors,
            warnings: validation.warnings,
            suggestions: validation.suggestions,
        }),
        Err(DorkError::Unrepairable {
            attempts,
            applied,
            errors,
            warnings,
            suggestions,
        }) => Ok(RepairReport {
            engine,
            original: dork.to_string(),
            repaired: false,
            dork: None,
            attempts,
            applied,
            errors,
            warnings,
            suggestions,
        }),
        Err(e) => Err(e.into()),
    }
}

pub fn run_validate(config: &Config, engine: &str, dork: &str, fix: bool, json: bool) -> Result<()> {
    let engine: SearchEngine = engine.parse()?;

    if fix {
        let report = repair(config, engine, dork)?;
        if json {
            println!("{}", serde_json::to_string_pretty(&report)?);
        } else if let Some(ref fixed) = report.dork {
            println!("{}", fixed);
            if report.applied.is_empty() {
                println!("  valid as written");
            } else {
                println!(
                    "  repaired after {} attempt(s): {}",
                    report.attempts,
                    report.applied.join(", ")
                );
            }
            for w in &report.warnings {
                println!("    warning: {}", w);
            }
        } else {
            if !report.applied.is_empty() {
                eprintln!("tried: {}", report.applied.join(", "));
            }
            for e in &report.errors {
                eprintln!("error: {}", e);
            }
            for w in &report.warnings {
                eprintln!("warning: {}", w);
            }
            for s in &report.suggestions {
                eprintln!("suggestion: {}", s);
            }
        }
        if !report.repaired {
            anyhow::bail!(
                "could not repair dork for {} after {} attempt(s)",
                engine,
                report.attempts
            );
        }
        return Ok(());
    }

    let result = DorkValidator::new(engine).validate(dork);
    if json {
        println!("{}", serde_json::to_string_pretty(&result)?);
    } else {
        println!("{} dork: {}", engine, dork);
        print_validation(&result);
    }

    if !result.is_valid {
        anyhow::bail!(
            "dork is not valid for {} ({} error(s))",
            engine,
            result.errors.len()
        );
    }
    Ok(())
}
