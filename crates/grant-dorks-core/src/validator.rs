//! Schema validator: checks a dork string against one engine's grammar.
//!
//! Invalid input is reported through [`ValidationResult`], never as an
//! error, so callers can batch-validate candidate dorks. `is_valid` is
//! true iff `errors` is empty; warnings never affect validity.
//!
//! # Checks
//!
//! | Engine | Check | Severity |
//! |--------|-------|----------|
//! | Bing | `intext:` present | error |
//! | DuckDuckGo | ` OR ` present | error |
//! | DuckDuckGo | `intext:` or `inurl:` present | error |
//! | DuckDuckGo | `*` together with quotes | error |
//! | all | whitespace after an operator colon | error |
//! | all | lowercase ` or ` mixed with ` OR ` | warning |
//! | all | unbalanced parentheses | error |
//! | all | odd number of quotes | error |

use regex::Regex;
use serde::Serialize;
use std::sync::LazyLock;

use crate::compiler::DorkQuery;
use crate::engine::SearchEngine;

pub const MSG_BING_INTEXT: &str = "Bing does not support 'intext:' - use 'inbody:' instead";
pub const MSG_DDG_OR: &str = "DuckDuckGo has unreliable OR support";
pub const MSG_DDG_INTEXT_INURL: &str = "DuckDuckGo does not support intext: or inurl:";
pub const MSG_DDG_WILDCARD: &str = "DuckDuckGo does not support wildcards";
pub const MSG_SPACE_AFTER_COLON: &str = "No space allowed after operator colon";
pub const MSG_LOWERCASE_OR: &str = "OR operator should be UPPERCASE";
pub const MSG_UNBALANCED_PARENS: &str = "Unbalanced parentheses";
pub const MSG_UNBALANCED_QUOTES: &str = "Unbalanced quotes";

static SPACE_AFTER_COLON_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(site|filetype|intext|inurl|intitle|inbody|loc):\s+").expect("valid regex")
});

/// Outcome of validating one dork.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValidationResult {
    pub engine: SearchEngine,
    pub is_valid: bool,
    pub errors: Vec<String>,
    pub warnings: Vec<String>,
    pub suggestions: Vec<String>,
}

impl ValidationResult {
    fn new(engine: SearchEngine) -> Self {
        Self {
            engine,
            is_valid: true,
            errors: Vec::new(),
            warnings: Vec::new(),
            suggestions: Vec::new(),
        }
    }

    fn error(&mut self, message: &str, suggestion: Option<&str>) {
        self.errors.push(message.to_string());
        if let Some(s) = suggestion {
            self.suggestions.push(s.to_string());
        }
    }

    fn warning(&mut self, message: &str, suggestion: &str) {
        self.warnings.push(message.to_string());
        self.suggestions.push(suggestion.to_string());
    }

    fn finish(mut self) -> Self {
        self.is_valid = self.errors.is_empty();
        self
    }

    /// Whether `message` is among the errors.
    pub fn has_error(&self, message: &str) -> bool {
        self.errors.iter().any(|e| e == message)
    }

    pub fn has_warning(&self, message: &str) -> bool {
        self.warnings.iter().any(|w| w == message)
    }
}

/// Validates dorks for a single engine.
#[derive(Debug, Clone, Copy)]
pub struct DorkValidator {
    engine: SearchEngine,
}

impl DorkValidator {
    pub fn new(engine: SearchEngine) -> Self {
        Self { engine }
    }

    pub fn engine(&self) -> SearchEngine {
        self.engine
    }

    pub fn validate(&self, dork: &str) -> ValidationResult {
        let mut result = ValidationResult::new(self.engine);

        match self.engine {
            SearchEngine::Bing => {
                if dork.contains("intext:") {
                    result.error(MSG_BING_INTEXT, Some("Replace 'intext:' with 'inbody:'"));
                }
            }
            SearchEngine::DuckDuckGo => {
                if dork.contains(" OR ") {
                    result.error(MSG_DDG_OR, Some("Split into multiple simple queries instead"));
                }
                if dork.contains("intext:") || dork.contains("inurl:") {
                    result.error(
                        MSG_DDG_INTEXT_INURL,
                        Some("Remove these operators and use exact phrases only"),
                    );
                }
                if dork.contains('*') && dork.contains('"') {
                    result.error(MSG_DDG_WILDCARD, Some("Remove wildcards"));
                }
            }
            SearchEngine::Google => {}
        }

        if SPACE_AFTER_COLON_RE.is_match(dork) {
            result.error(
                MSG_SPACE_AFTER_COLON,
                Some("Remove the space after the colon (write 'site:grants.gov', not 'site: grants.gov')"),
            );
        }

        if dork.contains(" or ") && dork.contains(" OR ") {
            result.warning(MSG_LOWERCASE_OR, "Change 'or' to 'OR'");
        }

        let open = dork.matches('(').count();
        let close = dork.matches(')').count();
        if open != close {
            let fix = if open > close {
                "Add the missing ')'"
            } else {
                "Remove the extra ')' or add the missing '('"
            };
            result.error(MSG_UNBALANCED_PARENS, Some(fix));
        }

        if dork.matches('"').count() % 2 != 0 {
            result.error(MSG_UNBALANCED_QUOTES, Some("Close the open quoted phrase"));
        }

        let result = result.finish();
        tracing::trace!(
            engine = self.engine.tag(),
            valid = result.is_valid,
            errors = result.errors.len(),
            warnings = result.warnings.len(),
            "validated dork"
        );
        result
    }

    /// Validate every query of a compiled dork. For a sequence, messages
    /// are prefixed with the 1-based query index.
    pub fn validate_query(&self, query: &DorkQuery) -> ValidationResult {
        match query {
            DorkQuery::Single(q) => self.validate(q),
            DorkQuery::Sequence(queries) => {
                let mut merged = ValidationResult::new(self.engine);
                for (i, q) in queries.iter().enumerate() {
                    let r = self.validate(q);
                    let tag = |m: String| format!("query {}: {}", i + 1, m);
                    merged.errors.extend(r.errors.into_iter().map(tag));
                    merged.warnings.extend(r.warnings.into_iter().map(tag));
                    merged.suggestions.extend(r.suggestions.into_iter().map(tag));
                }
                merged.finish()
            }
        }
    }
}

/// Validate `dork` for `engine`.
pub fn validate(engine: SearchEngine, dork: &str) -> ValidationResult {
    DorkValidator::new(engine).validate(dork)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::compiler::{compile_engine, CompileOptions, DuckDuckGoMode};
    use crate::request::SearchRequest;

    #[test]
    fn space_after_colon_is_an_error() {
        let result = validate(SearchEngine::Google, "site: grants.gov");
        assert!(!result.is_valid);
        assert!(result.errors.iter().any(|e| e.contains("space")));
        assert_eq!(result.suggestions.len(), 1);
    }

    #[test]
    fn no_space_after_colon_passes() {
        let result = validate(SearchEngine::Google, "site:grants.gov");
        assert!(!result.has_error(MSG_SPACE_AFTER_COLON));
        assert!(result.is_valid);
    }

    #[test]
    fn space_check_applies_to_every_engine() {
        for engine in SearchEngine::all() {
            let result = validate(*engine, "intitle:   grant");
            assert!(result.has_error(MSG_SPACE_AFTER_COLON), "{engine}");
        }
    }

    #[test]
    fn bing_rejects_intext() {
        let result = validate(SearchEngine::Bing, "intext:nonprofit \"grant\"");
        assert!(!result.is_valid);
        assert!(result.has_error(MSG_BING_INTEXT));
        assert!(result.suggestions.iter().any(|s| s.contains("inbody:")));
    }

    #[test]
    fn google_accepts_intext() {
        assert!(validate(SearchEngine::Google, "intext:nonprofit").is_valid);
    }

    #[test]
    fn duckduckgo_rejects_or() {
        let result = validate(SearchEngine::DuckDuckGo, "grant OR funding");
        assert!(!result.is_valid);
        assert!(result.has_error(MSG_DDG_OR));
        assert!(result
            .suggestions
            .iter()
            .any(|s| s.contains("multiple simple queries")));
    }

    #[test]
    fn duckduckgo_rejects_intext_and_inurl() {
        let result = validate(SearchEngine::DuckDuckGo, "inurl:grant");
        assert!(result.has_error(MSG_DDG_INTEXT_INURL));
    }

    #[test]
    fn duckduckgo_wildcard_needs_quotes_to_trip() {
        assert!(validate(SearchEngine::DuckDuckGo, "opportunit*").is_valid);
        let result = validate(SearchEngine::DuckDuckGo, "\"grant * process\"");
        assert!(result.has_error(MSG_DDG_WILDCARD));
    }

    #[test]
    fn unbalanced_parentheses_flagged_on_every_engine() {
        for engine in SearchEngine::all() {
            let result = validate(*engine, "(a OR b");
            assert!(result.has_error(MSG_UNBALANCED_PARENS), "{engine}");
            assert!(!result.is_valid);
        }
    }

    #[test]
    fn odd_quotes_flagged() {
        let result = validate(SearchEngine::Google, "\"grant application");
        assert!(result.has_error(MSG_UNBALANCED_QUOTES));
    }

    #[test]
    fn mixed_case_or_is_only_a_warning() {
        let result = validate(SearchEngine::Google, "grant or funding OR award");
        assert!(result.is_valid);
        assert!(result.has_warning(MSG_LOWERCASE_OR));
        assert_eq!(result.suggestions, vec!["Change 'or' to 'OR'"]);
    }

    #[test]
    fn lowercase_or_alone_is_not_flagged() {
        let result = validate(SearchEngine::Google, "grant or funding");
        assert!(result.warnings.is_empty());
    }

    #[test]
    fn validity_tracks_errors_only() {
        let result = validate(SearchEngine::Bing, "grant or award OR fund (x");
        assert!(!result.is_valid);
        assert_eq!(result.errors, vec![MSG_UNBALANCED_PARENS]);
        assert_eq!(result.warnings, vec![MSG_LOWERCASE_OR]);
    }

    #[test]
    fn combined_duckduckgo_output_disagrees_with_grammar() {
        let request = SearchRequest::new("rural broadband", Some("Ohio")).unwrap();
        let dork = compile_engine(SearchEngine::DuckDuckGo, &request, &CompileOptions::default());
        let result = DorkValidator::new(SearchEngine::DuckDuckGo).validate_query(&dork.query);
        assert!(!result.is_valid);
        assert!(result.has_error(MSG_DDG_OR));
    }

    #[test]
    fn split_duckduckgo_output_validates() {
        let request = SearchRequest::new("indigenous education", Some("Michigan, Minnesota")).unwrap();
        let options = CompileOptions {
            duckduckgo_mode: DuckDuckGoMode::Split,
        };
        let dork = compile_engine(SearchEngine::DuckDuckGo, &request, &options);
        let result = DorkValidator::new(SearchEngine::DuckDuckGo).validate_query(&dork.query);
        assert!(result.is_valid, "{:?}", result.errors);
    }

    #[test]
    fn sequence_messages_carry_query_index() {
        let query = DorkQuery::Sequence(vec!["\"ok\"".into(), "bad OR worse".into()]);
        let result = DorkValidator::new(SearchEngine::DuckDuckGo).validate_query(&query);
        assert!(!result.is_valid);
        assert_eq!(result.errors, vec![format!("query 2: {MSG_DDG_OR}")]);
    }

    #[test]
    fn compiled_google_and_bing_are_valid() {
        let request = SearchRequest::new(
            "indigenous tribal native american grants",
            Some("Michigan, Minnesota"),
        )
        .unwrap();
        for engine in [SearchEngine::Google, SearchEngine::Bing] {
            let dork = compile_engine(engine, &request, &CompileOptions::default());
            let result = DorkValidator::new(engine).validate_query(&dork.query);
            assert!(result.is_valid, "{engine}: {:?}", result.errors);
        }
    }
}
