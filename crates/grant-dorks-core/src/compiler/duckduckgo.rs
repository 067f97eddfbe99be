//! DuckDuckGo strategy.
//!
//! DuckDuckGo's grammar has no reliable `OR`, no `intext:`/`inurl:`, and no
//! wildcards. Two output modes exist:
//!
//! * [`DuckDuckGoMode::Combined`] (default) emits one string with
//!   parenthesized OR groups. DuckDuckGo tolerates bare `OR` weakly, and
//!   the validator reports these groups as errors.
//! * [`DuckDuckGoMode::Split`] emits an ordered sequence of self-contained
//!   queries using only exact phrases and `intitle:`, which the validator
//!   accepts.

use serde::{Deserialize, Serialize};
use std::str::FromStr;

use super::{group, or_join, quote, DorkQuery, DorkStrategy};
use crate::engine::SearchEngine;
use crate::request::SearchRequest;

/// Core terms used by both DuckDuckGo modes.
const DDG_CORE_TERMS: [&str; 4] = ["grant", "funding", "fellowship", "application"];

/// Terms that also get an `intitle:` operator.
const DDG_TITLE_TERMS: [&str; 3] = ["grant", "funding", "apply"];

const DDG_PROCESS_TERMS: [&str; 3] = ["deadline", "eligibility", "guidelines"];

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DuckDuckGoMode {
    #[default]
    Combined,
    Split,
}

impl FromStr for DuckDuckGoMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "combined" => Ok(Self::Combined),
            "split" => Ok(Self::Split),
            other => Err(format!(
                "unknown duckduckgo mode '{}': expected combined or split",
                other
            )),
        }
    }
}

pub struct DuckDuckGoStrategy {
    mode: DuckDuckGoMode,
}

impl DuckDuckGoStrategy {
    pub fn new(mode: DuckDuckGoMode) -> Self {
        Self { mode }
    }

    pub fn mode(&self) -> DuckDuckGoMode {
        self.mode
    }
}

impl Default for DuckDuckGoStrategy {
    fn default() -> Self {
        Self::new(DuckDuckGoMode::Combined)
    }
}

impl DorkStrategy for DuckDuckGoStrategy {
    fn engine(&self) -> SearchEngine {
        SearchEngine::DuckDuckGo
    }

    fn compile(&self, request: &SearchRequest) -> DorkQuery {
        match self.mode {
            DuckDuckGoMode::Combined => DorkQuery::Single(combined(request)),
            DuckDuckGoMode::Split => DorkQuery::Sequence(split(request)),
        }
    }
}

fn combined(request: &SearchRequest) -> String {
    let mut parts = vec![
        quote(request.primary_keyword()),
        group(&or_join(DDG_CORE_TERMS)),
    ];

    if !request.locations().is_empty() {
        parts.push(group(&or_join(
            request.locations().iter().map(|l| quote(l)),
        )));
    }

    parts.push(group(&or_join(
        DDG_TITLE_TERMS.iter().map(|t| format!("intitle:{t}")),
    )));
    parts.push(group(&or_join(DDG_PROCESS_TERMS.iter().map(|t| quote(t)))));

    parts.join(" ")
}

/// One query per core term, or per (core term, location) pair when
/// locations were supplied. Each query stands alone.
fn split(request: &SearchRequest) -> Vec<String> {
    let primary = quote(request.primary_keyword());
    let locations: Vec<Option<&str>> = if request.locations().is_empty() {
        vec![None]
    } else {
        request.locations().iter().map(|l| Some(l.as_str())).collect()
    };

    let mut queries = Vec::with_capacity(DDG_CORE_TERMS.len() * locations.len());
    for term in DDG_CORE_TERMS {
        for location in &locations {
            let mut parts = vec![primary.clone(), quote(term)];
            if let Some(loc) = location {
                parts.push(quote(loc));
            }
            if DDG_TITLE_TERMS.contains(&term) {
                parts.push(format!("intitle:{term}"));
            }
            queries.push(parts.join(" "));
        }
    }
    queries
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(topic: &str, location: Option<&str>) -> SearchRequest {
        SearchRequest::new(topic, location).unwrap()
    }

    #[test]
    fn combined_shape_with_locations() {
        let dork = DuckDuckGoStrategy::default()
            .compile(&request("rural broadband", Some("Michigan, Minnesota")))
            .to_string();
        assert_eq!(
            dork,
            "\"rural broadband\" (grant OR funding OR fellowship OR application) \
             (\"Michigan\" OR \"Minnesota\") \
             (intitle:grant OR intitle:funding OR intitle:apply) \
             (\"deadline\" OR \"eligibility\" OR \"guidelines\")"
        );
    }

    #[test]
    fn combined_without_location_omits_group() {
        let dork = DuckDuckGoStrategy::default()
            .compile(&request("education", None))
            .to_string();
        assert_eq!(dork.matches('(').count(), 3);
        assert!(dork.starts_with("\"education\" (grant OR"));
    }

    #[test]
    fn split_emits_one_query_per_term_and_location() {
        let query = DuckDuckGoStrategy::new(DuckDuckGoMode::Split)
            .compile(&request("rural broadband", Some("Michigan, Minnesota")));
        let DorkQuery::Sequence(queries) = query else {
            panic!("split mode must produce a sequence");
        };
        assert_eq!(queries.len(), 8);
        assert_eq!(
            queries[0],
            "\"rural broadband\" \"grant\" \"Michigan\" intitle:grant"
        );
        assert_eq!(
            queries[7],
            "\"rural broadband\" \"application\" \"Minnesota\""
        );
    }

    #[test]
    fn split_queries_have_no_boolean_constructs() {
        let query = DuckDuckGoStrategy::new(DuckDuckGoMode::Split)
            .compile(&request("tribal education", None));
        let queries = query.queries();
        assert_eq!(queries.len(), 4);
        for q in queries {
            assert!(!q.contains(" OR "));
            assert!(!q.contains('('));
            assert!(!q.contains('*'));
            assert!(!q.contains("intext:") && !q.contains("inurl:"));
        }
    }

    #[test]
    fn mode_parses_from_str() {
        assert_eq!("split".parse::<DuckDuckGoMode>(), Ok(DuckDuckGoMode::Split));
        assert_eq!(" Combined".parse::<DuckDuckGoMode>(), Ok(DuckDuckGoMode::Combined));
        assert!("both".parse::<DuckDuckGoMode>().is_err());
    }
}
