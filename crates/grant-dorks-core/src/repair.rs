//! Validate-and-fix loop for hand-written or externally generated dorks.
//!
//! Each round validates the current string and, if it fails, applies the
//! mechanical fixes the validator knows about. Errors that need a human
//! (unbalanced parentheses, stray quotes, DuckDuckGo `OR` chains) are never
//! "fixed"; the loop gives up as soon as a round changes nothing.

use regex::Regex;
use serde::Serialize;
use std::sync::LazyLock;

use crate::engine::SearchEngine;
use crate::error::{DorkError, Result};
use crate::validator::{DorkValidator, ValidationResult, MSG_LOWERCASE_OR};

static OPERATOR_SPACE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(site|filetype|intext|inurl|intitle|inbody|loc|contains):\s+").expect("valid regex")
});

static LOWERCASE_OR_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s+or\s+").expect("valid regex"));

/// A dork that passed validation, possibly after fixes.
#[derive(Debug, Clone, Serialize)]
pub struct RepairOutcome {
    pub dork: String,
    /// Validation rounds used, starting at 1. Checking the last round's
    /// fixes does not count as an extra round.
    pub attempts: u32,
    /// Names of the fixes applied, in order.
    pub applied: Vec<&'static str>,
    /// Report for the final string; may still carry warnings.
    pub validation: ValidationResult,
}

/// Run up to `max_retries` validation rounds over `dork`.
///
/// Returns [`DorkError::Unrepairable`] with the report for the last string
/// checked when attempts run out or no fix applies.
pub fn repair_dork(validator: &DorkValidator, dork: &str, max_retries: u32) -> Result<RepairOutcome> {
    if max_retries == 0 {
        return Err(DorkError::InvalidRequest(
            "max_retries must be at least 1".into(),
        ));
    }

    let mut current = dork.trim().to_string();
    let mut applied = Vec::new();

    for attempt in 1..=max_retries {
        let result = validator.validate(&current);
        if result.is_valid {
            tracing::debug!(attempt, fixes = applied.len(), "dork validated");
            return Ok(RepairOutcome {
                dork: current,
                attempts: attempt,
                applied,
                validation: result,
            });
        }

        let (fixed, fixes) = apply_fixes(validator.engine(), &current, &result);
        if fixes.is_empty() {
            tracing::debug!(attempt, "no applicable fix, giving up");
            return Err(unrepairable(attempt, applied, result));
        }
        tracing::debug!(attempt, ?fixes, "applied dork fixes");
        applied.extend(fixes);
        current = fixed;
    }

    // Fixes from the final round have not been checked yet.
    let result = validator.validate(&current);
    if result.is_valid {
        tracing::debug!(attempts = max_retries, fixes = applied.len(), "dork validated");
        return Ok(RepairOutcome {
            dork: current,
            attempts: max_retries,
            applied,
            validation: result,
        });
    }
    Err(unrepairable(max_retries, applied, result))
}

fn unrepairable(attempts: u32, applied: Vec<&'static str>, result: ValidationResult) -> DorkError {
    DorkError::Unrepairable {
        attempts,
        applied,
        errors: result.errors,
        warnings: result.warnings,
        suggestions: result.suggestions,
    }
}

/// Apply every fix that `result` calls for and that changes `dork`.
/// Returns the new string and the names of the fixes that fired.
fn apply_fixes(
    engine: SearchEngine,
    dork: &str,
    result: &ValidationResult,
) -> (String, Vec<&'static str>) {
    let mut fixes = Vec::new();
    let mut out = dork.to_string();

    let step = OPERATOR_SPACE_RE.replace_all(&out, "$1:").into_owned();
    if step != out {
        fixes.push("remove_space_after_colon");
        out = step;
    }

    if result.has_warning(MSG_LOWERCASE_OR) {
        let step = outside_quotes(&out, |part| LOWERCASE_OR_RE.replace_all(part, " OR ").into_owned());
        if step != out {
            fixes.push("uppercase_or");
            out = step;
        }
    }

    match engine {
        SearchEngine::Bing if out.contains("intext:") => {
            out = out.replace("intext:", "inbody:");
            fixes.push("intext_to_inbody");
        }
        SearchEngine::DuckDuckGo if out.contains('*') => {
            out = out.replace('*', "").split_whitespace().collect::<Vec<_>>().join(" ");
            fixes.push("drop_wildcards");
        }
        _ => {}
    }

    (out, fixes)
}

/// Rewrite only the text outside double-quoted phrases.
fn outside_quotes(dork: &str, rewrite: impl Fn(&str) -> String) -> String {
    dork.split('"')
        .enumerate()
        .map(|(i, part)| if i % 2 == 0 { rewrite(part) } else { part.to_string() })
        .collect::<Vec<_>>()
        .join("\"")
}
