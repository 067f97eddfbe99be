//! Dork compiler: one strategy per search engine.
//!
//! Each strategy turns a normalized [`SearchRequest`] into an
//! engine-specific query. Strategies are stateless apart from their
//! options, so compiling all three engines concurrently is safe.
//!
//! # Query shape
//!
//! ```text
//! Google      (core terms, in-body + in-URL) qualification process [location]
//! Bing        (quoted core terms) intitle:"kw" (other kws) [loc:"first"] (process)
//! DuckDuckGo  combined: one string with OR groups
//!             split:    ordered list of simple queries, no OR / wildcards
//! ```

mod bing;
mod duckduckgo;
mod google;

pub use bing::BingStrategy;
pub use duckduckgo::{DuckDuckGoMode, DuckDuckGoStrategy};
pub use google::GoogleStrategy;

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::engine::SearchEngine;
use crate::error::Result;
use crate::request::SearchRequest;
use crate::validator::{DorkValidator, ValidationResult};

/// Grant-domain vocabulary shared by every engine.
pub const GRANT_CORE_TERMS: [&str; 13] = [
    "grant",
    "philanthropy",
    "application",
    "funding",
    "opportunit*",
    "intake",
    "award",
    "fellowship",
    "unrestricted",
    "guidelines",
    "apply",
    "endowment",
    "fund",
];

/// A compiled query: one string, or an ordered list of independent
/// simple queries for engines without boolean support.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum DorkQuery {
    Single(String),
    Sequence(Vec<String>),
}

impl DorkQuery {
    /// The individual query strings, in order.
    pub fn queries(&self) -> Vec<&str> {
        match self {
            Self::Single(q) => vec![q.as_str()],
            Self::Sequence(qs) => qs.iter().map(String::as_str).collect(),
        }
    }

    pub fn as_single(&self) -> Option<&str> {
        match self {
            Self::Single(q) => Some(q),
            Self::Sequence(_) => None,
        }
    }
}

impl fmt::Display for DorkQuery {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Single(q) => f.write_str(q),
            Self::Sequence(qs) => f.write_str(&qs.join("\n")),
        }
    }
}

/// Compiled output for one engine.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EngineDork {
    pub engine: SearchEngine,
    pub query: DorkQuery,
}

/// A compilation strategy for one engine dialect.
pub trait DorkStrategy: Send + Sync {
    /// The engine whose dialect this strategy emits.
    fn engine(&self) -> SearchEngine;

    /// Compile a request. Never fails: a [`SearchRequest`] is already
    /// validated at construction.
    fn compile(&self, request: &SearchRequest) -> DorkQuery;
}

/// Options that change strategy output.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompileOptions {
    #[serde(default)]
    pub duckduckgo_mode: DuckDuckGoMode,
}

/// Returns the strategy for `engine`.
pub fn strategy_for(engine: SearchEngine, options: &CompileOptions) -> Box<dyn DorkStrategy> {
    match engine {
        SearchEngine::Google => Box::new(GoogleStrategy),
        SearchEngine::Bing => Box::new(BingStrategy),
        SearchEngine::DuckDuckGo => Box::new(DuckDuckGoStrategy::new(options.duckduckgo_mode)),
    }
}

/// Compile for one engine.
pub fn compile_engine(
    engine: SearchEngine,
    request: &SearchRequest,
    options: &CompileOptions,
) -> EngineDork {
    let query = strategy_for(engine, options).compile(request);
    tracing::debug!(engine = engine.tag(), "compiled dork");
    EngineDork { engine, query }
}

/// The three compiled dorks, keyed by engine tag when serialized.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DorkSet {
    pub google: DorkQuery,
    pub bing: DorkQuery,
    pub duckduckgo: DorkQuery,
}

impl DorkSet {
    pub fn get(&self, engine: SearchEngine) -> &DorkQuery {
        match engine {
            SearchEngine::Google => &self.google,
            SearchEngine::Bing => &self.bing,
            SearchEngine::DuckDuckGo => &self.duckduckgo,
        }
    }

    /// `(engine, query)` pairs in output order.
    pub fn iter(&self) -> impl Iterator<Item = (SearchEngine, &DorkQuery)> {
        SearchEngine::all().iter().map(move |e| (*e, self.get(*e)))
    }
}

/// Compile a request for every engine.
pub fn compile_request(request: &SearchRequest, options: &CompileOptions) -> DorkSet {
    DorkSet {
        google: compile_engine(SearchEngine::Google, request, options).query,
        bing: compile_engine(SearchEngine::Bing, request, options).query,
        duckduckgo: compile_engine(SearchEngine::DuckDuckGo, request, options).query,
    }
}

/// Normalize `(topic, location)` and compile for every engine with
/// default options. Fails only for a blank topic.
pub fn compile(topic: &str, location: Option<&str>) -> Result<DorkSet> {
    let request = SearchRequest::new(topic, location)?;
    Ok(compile_request(&request, &CompileOptions::default()))
}

/// A compiled dork together with its validation report.
#[derive(Debug, Clone, Serialize)]
pub struct ValidatedDork {
    pub engine: SearchEngine,
    pub query: DorkQuery,
    pub validation: ValidationResult,
}

/// Compile for every engine and validate each result against its grammar.
pub fn compile_validated(request: &SearchRequest, options: &CompileOptions) -> Vec<ValidatedDork> {
    SearchEngine::all()
        .iter()
        .map(|engine| {
            let dork = compile_engine(*engine, request, options);
            let validation = DorkValidator::new(*engine).validate_query(&dork.query);
            if !validation.is_valid {
                tracing::debug!(
                    engine = engine.tag(),
                    errors = validation.errors.len(),
                    "compiled dork failed validation"
                );
            }
            ValidatedDork {
                engine: dork.engine,
                query: dork.query,
                validation,
            }
        })
        .collect()
}

// ============ Clause helpers ============

pub(crate) fn quote(term: &str) -> String {
    format!("\"{}\"", term)
}

pub(crate) fn or_join<I, S>(items: I) -> String
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    items
        .into_iter()
        .map(|s| s.as_ref().to_string())
        .collect::<Vec<_>>()
        .join(" OR ")
}

pub(crate) fn group(inner: &str) -> String {
    format!("({})", inner)
}
