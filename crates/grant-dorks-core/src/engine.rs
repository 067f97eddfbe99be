//! Target search engine identification.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::DorkError;

/// Search engines the compiler and validator know a dialect for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SearchEngine {
    /// Full operator set: `intext:`, `inurl:`, `OR`, `*` wildcards.
    Google,
    /// `inbody:` instead of `intext:`, geo-anchoring with `loc:`, no wildcards.
    Bing,
    /// Smallest dialect: no `OR`, no `intext:`/`inurl:`, no wildcards.
    DuckDuckGo,
}

impl SearchEngine {
    /// The lowercase tag used in config, JSON, and on the command line.
    pub fn tag(&self) -> &'static str {
        match self {
            Self::Google => "google",
            Self::Bing => "bing",
            Self::DuckDuckGo => "duckduckgo",
        }
    }

    /// Human-readable name.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Google => "Google",
            Self::Bing => "Bing",
            Self::DuckDuckGo => "DuckDuckGo",
        }
    }

    /// All engines, in output order.
    pub fn all() -> &'static [SearchEngine] {
        &[Self::Google, Self::Bing, Self::DuckDuckGo]
    }
}

impl fmt::Display for SearchEngine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for SearchEngine {
    type Err = DorkError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "google" => Ok(Self::Google),
            "bing" => Ok(Self::Bing),
            "duckduckgo" | "ddg" => Ok(Self::DuckDuckGo),
            _ => Err(DorkError::UnknownEngine(s.to_string())),
        }
    }
}
