//! Bing strategy.
//!
//! Bing has `inbody:` instead of `intext:`, a first-class `loc:` geo
//! operator, and no wildcards. Core terms are emitted as plain quoted
//! phrases rather than stacked `inbody:`/`intitle:` operators.
//!
//! `loc:` anchors on the first location only; additional locations are
//! dropped. Callers that need every location should use the Google dork.

use super::{group, or_join, quote, DorkQuery, DorkStrategy, GRANT_CORE_TERMS};
use crate::engine::SearchEngine;
use crate::request::SearchRequest;

/// Number of leading core terms used in the Bing core clause.
const BING_CORE_TERM_COUNT: usize = 10;

const BING_PROCESS_TERMS: [&str; 4] = ["application", "apply", "deadline", "eligibility"];

pub struct BingStrategy;

impl DorkStrategy for BingStrategy {
    fn engine(&self) -> SearchEngine {
        SearchEngine::Bing
    }

    fn compile(&self, request: &SearchRequest) -> DorkQuery {
        let mut parts = Vec::with_capacity(5);

        let core = GRANT_CORE_TERMS[..BING_CORE_TERM_COUNT]
            .iter()
            .map(|t| quote(t));
        parts.push(group(&or_join(core)));

        let keywords = request.keywords();
        parts.push(format!("intitle:{}", quote(&keywords[0])));
        if keywords.len() > 1 {
            parts.push(group(&or_join(keywords[1..].iter().map(|k| quote(k)))));
        }

        if let Some(first) = request.locations().first() {
            if request.locations().len() > 1 {
                tracing::debug!(
                    kept = first.as_str(),
                    dropped = request.locations().len() - 1,
                    "bing loc: anchors on the first location only"
                );
            }
            parts.push(format!("loc:{}", quote(first)));
        }

        parts.push(group(&or_join(BING_PROCESS_TERMS.iter().map(|t| quote(t)))));

        DorkQuery::Single(parts.join(" "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bing(topic: &str, location: Option<&str>) -> String {
        let request = SearchRequest::new(topic, location).unwrap();
        BingStrategy.compile(&request).to_string()
    }

    #[test]
    fn full_shape() {
        assert_eq!(
            bing("rural broadband", Some("Ohio")),
            "(\"grant\" OR \"philanthropy\" OR \"application\" OR \"funding\" OR \
             \"opportunit*\" OR \"intake\" OR \"award\" OR \"fellowship\" OR \
             \"unrestricted\" OR \"guidelines\") \
             intitle:\"rural broadband\" (\"rural\" OR \"broadband\") loc:\"Ohio\" \
             (\"application\" OR \"apply\" OR \"deadline\" OR \"eligibility\")"
        );
    }

    #[test]
    fn loc_uses_only_first_location() {
        let dork = bing("arts", Some("Michigan, Minnesota, Wisconsin"));
        assert!(dork.contains("loc:\"Michigan\""));
        assert!(!dork.contains("Minnesota"));
        assert!(!dork.contains("Wisconsin"));
        assert_eq!(dork.matches("loc:").count(), 1);
    }

    #[test]
    fn loc_skips_leading_empty_segment() {
        let dork = bing("arts", Some(" , Minnesota"));
        assert!(dork.contains("loc:\"Minnesota\""));
    }

    #[test]
    fn single_keyword_has_no_secondary_group() {
        let dork = bing("education", None);
        assert!(dork.contains("intitle:\"education\" (\"application\""));
        assert!(!dork.contains("loc:"));
    }

    #[test]
    fn never_uses_intext() {
        let dork = bing("tribal education", Some("Ohio"));
        assert!(!dork.contains("intext:"));
        assert!(!dork.contains("inurl:"));
    }
}
