//! Declarative per-engine operator grammars and verified examples.
//!
//! These tables are the single source for both the validator's
//! supported/unsupported view and the rendered guidance text. They are
//! `static` and never mutated.

use serde::Serialize;

use crate::engine::SearchEngine;

/// One row of an engine grammar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct OperatorRule {
    /// Stable key (`"site"`, `"OR"`, `"wildcard"`, ...).
    pub key: &'static str,
    /// Operator as written in a query.
    pub operator: &'static str,
    pub supported: bool,
    pub syntax: &'static str,
    pub example: &'static str,
    pub notes: &'static str,
}

const fn rule(
    key: &'static str,
    operator: &'static str,
    supported: bool,
    syntax: &'static str,
    example: &'static str,
    notes: &'static str,
) -> OperatorRule {
    OperatorRule {
        key,
        operator,
        supported,
        syntax,
        example,
        notes,
    }
}

#[rustfmt::skip]
static GOOGLE_RULES: [OperatorRule; 10] = [
    rule("exact_phrase", "\"exact phrase\"", true, "\"phrase\"", "\"grant application\"", "Always use quotes for multi-word phrases"),
    rule("OR", "OR", true, "term1 OR term2", "grant OR funding", "Must be UPPERCASE"),
    rule("exclude", "-", true, "-term", "-loan", "No space after minus"),
    rule("wildcard", "*", true, "word * word", "\"grant * process\"", "Matches any word(s)"),
    rule("site", "site:", true, "site:domain.com", "site:grants.gov", "No space after colon"),
    rule("filetype", "filetype:", true, "filetype:ext", "filetype:pdf", "Common: pdf, doc, docx"),
    rule("intext", "intext:", true, "intext:term", "intext:nonprofit", "Single word or quoted phrase"),
    rule("inurl", "inurl:", true, "inurl:term", "inurl:grant", "Use hyphens for multi-word"),
    rule("intitle", "intitle:", true, "intitle:term", "intitle:grant", "Single word only"),
    rule("AROUND", "AROUND(n)", true, "word1 AROUND(5) word2", "grant AROUND(5) application", "Words within n words of each other"),
];

#[rustfmt::skip]
static BING_RULES: [OperatorRule; 12] = [
    rule("exact_phrase", "\"exact phrase\"", true, "\"phrase\"", "\"grant funding\"", "Same as Google"),
    rule("OR", "OR", true, "term1 OR term2", "grant OR funding", "Must be UPPERCASE"),
    rule("NOT", "NOT", true, "term1 NOT term2", "grant NOT loan", "Bing-specific exclusion"),
    rule("exclude", "-", true, "-term", "-loan", "Alternative to NOT"),
    rule("site", "site:", true, "site:domain.com", "site:gov", "Can use TLD"),
    rule("filetype", "filetype:", true, "filetype:ext", "filetype:pdf", "Same as Google"),
    rule("inbody", "inbody:", true, "inbody:term", "inbody:nonprofit", "Use instead of intext"),
    rule("intitle", "intitle:", true, "intitle:term", "intitle:grant", "Single word"),
    rule("loc", "loc:", true, "loc:\"Location\"", "loc:\"Michigan\"", "Bing-specific geolocation"),
    rule("contains", "contains:", true, "contains:term", "contains:deadline", "Broader matching"),
    rule("intext", "intext:", false, "N/A", "N/A", "Use inbody: instead"),
    rule("wildcard", "*", false, "N/A", "N/A", "Not supported in Bing"),
];

#[rustfmt::skip]
static DUCKDUCKGO_RULES: [OperatorRule; 9] = [
    rule("exact_phrase", "\"exact phrase\"", true, "\"phrase\"", "\"grant funding\"", "Same as others"),
    rule("site", "site:", true, "site:full.domain.com", "site:grants.gov", "Full domain required"),
    rule("filetype", "filetype:", true, "filetype:ext", "filetype:pdf", "Same as others"),
    rule("intitle", "intitle:", true, "intitle:term", "intitle:grant", "Basic support"),
    rule("exclude", "-", true, "-term", "-loan", "Use minus only"),
    rule("OR", "OR", false, "N/A", "N/A", "Unreliable - split into multiple queries"),
    rule("intext", "intext:", false, "N/A", "N/A", "Not supported"),
    rule("inurl", "inurl:", false, "N/A", "N/A", "Limited support"),
    rule("wildcard", "*", false, "N/A", "N/A", "Not supported"),
];

/// The operator grammar for `engine`.
pub fn rules(engine: SearchEngine) -> &'static [OperatorRule] {
    match engine {
        SearchEngine::Google => &GOOGLE_RULES,
        SearchEngine::Bing => &BING_RULES,
        SearchEngine::DuckDuckGo => &DUCKDUCKGO_RULES,
    }
}

/// Look up a rule by key.
pub fn find_rule(engine: SearchEngine, key: &str) -> Option<&'static OperatorRule> {
    rules(engine).iter().find(|r| r.key == key)
}

/// Whether `engine` declares support for operator `key`. Operators
/// absent from the table are treated as unsupported.
pub fn supports(engine: SearchEngine, key: &str) -> bool {
    find_rule(engine, key).is_some_and(|r| r.supported)
}

/// A query pattern known to work on an engine.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct VerifiedExample {
    pub description: &'static str,
    /// One query, or several for engines that need split queries.
    pub queries: &'static [&'static str],
    pub explanation: &'static str,
}

static GOOGLE_EXAMPLES: [VerifiedExample; 4] = [
    VerifiedExample {
        description: "Basic nonprofit grant search",
        queries: &["\"grant application\" (nonprofit OR foundation) site:grants.gov filetype:pdf"],
        explanation: "Finds grant applications for nonprofits/foundations on grants.gov",
    },
    VerifiedExample {
        description: "Comprehensive indigenous/tribal grant search",
        queries: &["(intext:grant OR inurl:grant OR intext:funding OR inurl:funding OR intext:tribal OR intext:indigenous) (\"tribal\" OR \"indigenous\" OR \"native american\" OR \"federally recognized\") (\"application process\" OR \"eligibility\") (\"Michigan\" OR \"Minnesota\")"],
        explanation: "Multi-part dork with core terms, identity qualifications, process terms, and location",
    },
    VerifiedExample {
        description: "Using wildcards for flexible matching",
        queries: &["\"grant * process\" OR \"application * deadline\" nonprofit"],
        explanation: "Matches variations like 'grant application process', 'grant review process'",
    },
    VerifiedExample {
        description: "Research grant for STEM",
        queries: &["(research OR \"R&D\") (grant OR funding OR fellowship) (STEM OR technology) site:nsf.gov OR site:nih.gov filetype:pdf -expired"],
        explanation: "Research grants for STEM from NSF/NIH, excluding expired",
    },
];

static BING_EXAMPLES: [VerifiedExample; 3] = [
    VerifiedExample {
        description: "Basic nonprofit grant (Bing-optimized)",
        queries: &["(\"grant\" OR \"funding\") intitle:nonprofit loc:\"Michigan\" site:gov filetype:pdf"],
        explanation: "Uses loc: for geographic targeting and simplified structure",
    },
    VerifiedExample {
        description: "Research grant with recent date",
        queries: &["intitle:(grant OR funding) inbody:\"research proposal\" (site:nsf.gov OR site:nih.gov) contains:2024 NOT expired"],
        explanation: "Uses inbody: instead of intext:, contains: for flexible matching",
    },
    VerifiedExample {
        description: "Indigenous grants (Bing translation)",
        queries: &["(\"grant\" OR \"funding\") intitle:tribal OR intitle:indigenous inbody:(\"federally recognized\" OR \"native american\") loc:Michigan site:gov"],
        explanation: "Simplified structure with inbody: and loc: instead of Google operators",
    },
];

static DUCKDUCKGO_EXAMPLES: [VerifiedExample; 4] = [
    VerifiedExample {
        description: "Simple grant search (DDG-optimized)",
        queries: &["\"grant funding\" nonprofit \"Michigan\" site:grants.gov filetype:pdf"],
        explanation: "Simple structure with only exact phrases and basic operators",
    },
    VerifiedExample {
        description: "Indigenous grant (DDG - single query)",
        queries: &["\"tribal grant\" \"native american\" \"application\" site:gov filetype:pdf -loan"],
        explanation: "Combined terms into exact phrases, removed OR logic",
    },
    VerifiedExample {
        description: "Indigenous grants (DDG - multiple queries approach)",
        queries: &[
            "\"indigenous grant\" \"Michigan\" site:grants.gov filetype:pdf",
            "\"tribal funding\" \"Michigan\" site:grants.gov filetype:pdf",
            "\"native american grant\" \"Michigan\" site:grants.gov filetype:pdf",
        ],
        explanation: "Split OR chains into separate simple queries for DDG",
    },
    VerifiedExample {
        description: "Research grant (DDG)",
        queries: &["\"research grant\" STEM site:nsf.gov filetype:pdf"],
        explanation: "Minimal structure works best for DuckDuckGo",
    },
];

/// Verified examples for `engine`.
pub fn examples(engine: SearchEngine) -> &'static [VerifiedExample] {
    match engine {
        SearchEngine::Google => &GOOGLE_EXAMPLES,
        SearchEngine::Bing => &BING_EXAMPLES,
        SearchEngine::DuckDuckGo => &DUCKDUCKGO_EXAMPLES,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validator::DorkValidator;
    use std::collections::HashSet;

    #[test]
    fn every_engine_has_a_grammar() {
        for engine in SearchEngine::all() {
            assert!(!rules(*engine).is_empty(), "{engine} has no rules");
            assert!(!examples(*engine).is_empty(), "{engine} has no examples");
        }
    }

    #[test]
    fn rule_keys_are_unique_per_engine() {
        for engine in SearchEngine::all() {
            let mut seen = HashSet::new();
            for r in rules(*engine) {
                assert!(seen.insert(r.key), "duplicate key {} for {engine}", r.key);
            }
        }
    }

    #[test]
    fn unsupported_rules_have_no_syntax() {
        for engine in SearchEngine::all() {
            for r in rules(*engine).iter().filter(|r| !r.supported) {
                assert_eq!(r.syntax, "N/A", "{engine} {}", r.key);
            }
        }
    }

    #[test]
    fn dialect_differences() {
        assert!(supports(SearchEngine::Google, "intext"));
        assert!(!supports(SearchEngine::Bing, "intext"));
        assert!(supports(SearchEngine::Bing, "inbody"));
        assert!(supports(SearchEngine::Bing, "loc"));
        assert!(!supports(SearchEngine::Google, "loc"));
        assert!(!supports(SearchEngine::DuckDuckGo, "OR"));
        assert!(!supports(SearchEngine::DuckDuckGo, "wildcard"));
        assert!(supports(SearchEngine::DuckDuckGo, "intitle"));
    }

    #[test]
    fn duckduckgo_examples_pass_validation() {
        let validator = DorkValidator::new(SearchEngine::DuckDuckGo);
        for example in examples(SearchEngine::DuckDuckGo) {
            for q in example.queries {
                let result = validator.validate(q);
                assert!(result.is_valid, "{q}: {:?}", result.errors);
            }
        }
    }
}
