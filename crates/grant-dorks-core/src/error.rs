//! Error types for the core crate.
//!
//! Validation problems are not errors: they are reported through
//! [`ValidationResult`](crate::validator::ValidationResult). The variants
//! here are the conditions a caller must correct before anything can be
//! compiled or checked.

/// Errors raised by request normalization, engine lookup, and repair.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DorkError {
    /// The request cannot be compiled (e.g. a blank topic).
    #[error("invalid request: {0}")]
    InvalidRequest(String),

    /// An engine tag outside `google`, `bing`, `duckduckgo`.
    #[error("unsupported engine: '{0}' (expected google, bing, or duckduckgo)")]
    UnknownEngine(String),

    /// The repair loop ran out of attempts or fixes. Carries the report
    /// for the last string checked and the fixes tried on the way there.
    #[error("unable to produce a valid dork after {attempts} attempt(s): {}", errors.join("; "))]
    Unrepairable {
        attempts: u32,
        applied: Vec<&'static str>,
        errors: Vec<String>,
        warnings: Vec<String>,
        suggestions: Vec<String>,
    },
}

/// Convenience alias for core results.
pub type Result<T> = std::result::Result<T, DorkError>;
