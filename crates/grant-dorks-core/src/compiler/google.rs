//! Google strategy: the full dialect.
//!
//! Output is a conjunction (space juxtaposition) of OR clause groups, in
//! fixed order:
//!
//! 1. core terms, each as `intext:` and `inurl:`, plus identity synonyms
//!    merged into the same group when the topic carries identity context;
//! 2. qualification phrases (identity vocabulary, or topic keywords);
//! 3. grant-process indicators, including `**` infix wildcards;
//! 4. quoted locations, omitted entirely when none were supplied.

use super::{group, or_join, quote, DorkQuery, DorkStrategy, GRANT_CORE_TERMS};
use crate::engine::SearchEngine;
use crate::request::SearchRequest;

/// Grant-process phrases; emitted quoted on every Google dork.
pub const GRANT_PROCESS_PHRASES: [&str; 12] = [
    "our grant ** process",
    "our ** process",
    "application process",
    "how to apply",
    "submit application",
    "request for proposals",
    "rfp",
    "letter of inquiry",
    "loi",
    "eligibility",
    "criteria",
    "consideration",
];

pub struct GoogleStrategy;

impl DorkStrategy for GoogleStrategy {
    fn engine(&self) -> SearchEngine {
        SearchEngine::Google
    }

    fn compile(&self, request: &SearchRequest) -> DorkQuery {
        let mut parts = vec![core_clause(request), qualification_clause(request)];
        parts.push(or_join(GRANT_PROCESS_PHRASES.iter().map(|p| quote(p))));

        if !request.locations().is_empty() {
            parts.push(or_join(request.locations().iter().map(|l| quote(l))));
        }

        DorkQuery::Single(parts.join(" "))
    }
}

fn core_clause(request: &SearchRequest) -> String {
    let mut operators: Vec<String> = GRANT_CORE_TERMS
        .iter()
        .flat_map(|term| [format!("intext:{term}"), format!("inurl:{term}")])
        .collect();

    if let Some(profile) = request.identity() {
        operators.extend(profile.synonyms.iter().map(|s| format!("intext:{s}")));
        operators.extend(
            profile
                .synonyms
                .iter()
                .map(|s| format!("inurl:{}", s.replace(' ', "-"))),
        );
    }

    group(&or_join(&operators))
}

fn qualification_clause(request: &SearchRequest) -> String {
    match request.identity() {
        Some(profile) => or_join(profile.qualifications.iter().map(|q| quote(q))),
        None => or_join(keyword_variants(request.keywords())),
    }
}

/// Each keyword quoted; multi-word keywords are followed by their words
/// longer than three characters, each quoted on its own.
fn keyword_variants(keywords: &[String]) -> Vec<String> {
    let mut variants = Vec::new();
    for kw in keywords {
        variants.push(quote(kw));
        if kw.contains(' ') {
            variants.extend(
                kw.split_whitespace()
                    .filter(|w| w.chars().count() > 3)
                    .map(quote),
            );
        }
    }
    variants
}
