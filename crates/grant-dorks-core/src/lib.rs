//! # Grant Dorks Core
//!
//! Pure logic for building and checking grant-search dorks: request
//! normalization, one compiler strategy per engine, declarative operator
//! grammars, the schema validator, and the repair loop.
//!
//! This crate does no I/O. File output, configuration, and the CLI and
//! tool-server surfaces live in the `grant-dorks` application crate.
//!
//! ```
//! use grant_dorks_core::{compile, validate, SearchEngine};
//!
//! let dorks = compile("rural broadband", Some("Ohio")).unwrap();
//! let report = validate(SearchEngine::Bing, &dorks.bing.to_string());
//! assert!(report.is_valid);
//! ```

pub mod compiler;
pub mod engine;
pub mod error;
pub mod grammar;
pub mod guidance;
pub mod repair;
pub mod request;
pub mod validator;

pub use compiler::{
    compile, compile_engine, compile_request, compile_validated, CompileOptions, DorkQuery,
    DorkSet, DorkStrategy, DuckDuckGoMode, EngineDork, ValidatedDork,
};
pub use engine::SearchEngine;
pub use error::{DorkError, Result};
pub use grammar::{OperatorRule, VerifiedExample};
pub use guidance::render_guidance;
pub use repair::{repair_dork, RepairOutcome};
pub use request::{IdentityProfile, SearchRequest};
pub use validator::{validate, DorkValidator, ValidationResult};
