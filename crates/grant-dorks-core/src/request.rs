//! Request normalization: topic keywords, identity context, and locations.
//!
//! A [`SearchRequest`] is built once per compile call and never mutated.
//! Everything the compiler strategies need (keywords, identity profile,
//! location alternatives) is derived here so the strategies stay pure
//! string assembly.

use serde::Serialize;

use crate::error::{DorkError, Result};

/// Words dropped during keyword extraction.
pub const STOPWORDS: &[&str] = &["for", "the", "and", "or", "in", "on", "at", "to", "a", "an"];

/// Vocabulary attached to an identity-related topic.
///
/// `synonyms` feed the body/URL operator variants of the core clause;
/// `qualifications` are emitted as exact phrases only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct IdentityProfile {
    pub id: &'static str,
    pub synonyms: &'static [&'static str],
    pub qualifications: &'static [&'static str],
}

/// Tribal / indigenous eligibility vocabulary.
pub const TRIBAL_PROFILE: IdentityProfile = IdentityProfile {
    id: "tribal",
    synonyms: &[
        "tribal",
        "indigenous",
        "native american",
        "first nation",
        "native",
        "federally recognized",
    ],
    qualifications: &[
        "tribal",
        "indigenous",
        "native",
        "first nation",
        "native american",
        "federally recognized",
        "cib",
        "state recognized",
        "tribal citizen",
        "tribal id",
        "tribal identification",
        "indigena",
    ],
};

/// Characters with operator meaning in at least one engine. They are
/// replaced by spaces in keywords and locations so a quoted term can never
/// open a phrase, group, wildcard, or operator of its own.
const QUERY_SYNTAX: &[char] = &['"', '(', ')', '*', ':'];

/// Topic substrings that select an identity profile. Scanned in order;
/// the first alias found in the lower-cased topic wins. Matching is on
/// substrings, so "alternative" selects the tribal profile via "native".
const IDENTITY_ALIASES: &[(&str, &IdentityProfile)] = &[
    ("indigenous", &TRIBAL_PROFILE),
    ("tribal", &TRIBAL_PROFILE),
    ("native", &TRIBAL_PROFILE),
    ("native american", &TRIBAL_PROFILE),
];

/// A normalized grant search request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SearchRequest {
    topic: String,
    locations: Vec<String>,
    keywords: Vec<String>,
    identity: Option<IdentityMatch>,
}

/// The alias that matched and the profile it resolved to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct IdentityMatch {
    pub alias: &'static str,
    pub profile: &'static IdentityProfile,
}

impl SearchRequest {
    /// Normalize a raw topic and optional comma-separated location list.
    ///
    /// Fails with [`DorkError::InvalidRequest`] when the topic is blank or
    /// holds nothing but query syntax.
    pub fn new(topic: &str, location: Option<&str>) -> Result<Self> {
        let topic = topic.trim();
        if topic.is_empty() {
            return Err(DorkError::InvalidRequest("topic must not be empty".into()));
        }
        if strip_syntax(topic).is_empty() {
            return Err(DorkError::InvalidRequest(
                "topic must contain at least one searchable word".into(),
            ));
        }

        let locations = location.map(split_locations).unwrap_or_default();
        let keywords = extract_keywords(topic);
        let identity = detect_identity(topic);

        tracing::debug!(
            topic,
            keywords = keywords.len(),
            locations = locations.len(),
            identity = identity.as_ref().map(|m| m.alias),
            "normalized search request"
        );

        Ok(Self {
            topic: topic.to_string(),
            locations,
            keywords,
            identity,
        })
    }

    /// The trimmed topic as supplied.
    pub fn topic(&self) -> &str {
        &self.topic
    }

    /// Location alternatives, in input order.
    pub fn locations(&self) -> &[String] {
        &self.locations
    }

    /// Extracted keywords; never empty. When more than one significant
    /// word remains, the first entry is the full lower-cased topic.
    pub fn keywords(&self) -> &[String] {
        &self.keywords
    }

    /// First keyword: the full phrase for multi-word topics.
    pub fn primary_keyword(&self) -> &str {
        &self.keywords[0]
    }

    pub fn identity(&self) -> Option<&'static IdentityProfile> {
        self.identity.as_ref().map(|m| m.profile)
    }

    pub fn identity_match(&self) -> Option<&IdentityMatch> {
        self.identity.as_ref()
    }
}

/// Lower-case, strip query syntax, split on whitespace, drop stopwords.
/// Prepends the whole phrase when more than one word survives. A topic made
/// only of stopwords falls back to the whole phrase so there is always a
/// primary keyword.
pub fn extract_keywords(topic: &str) -> Vec<String> {
    let lowered = strip_syntax(&topic.to_lowercase());
    let mut keywords: Vec<String> = lowered
        .split_whitespace()
        .filter(|w| !STOPWORDS.contains(w))
        .map(str::to_string)
        .collect();

    if keywords.len() > 1 {
        keywords.insert(0, lowered);
    } else if keywords.is_empty() {
        keywords.push(lowered);
    }
    keywords
}

fn detect_identity(topic: &str) -> Option<IdentityMatch> {
    let lowered = topic.to_lowercase();
    IDENTITY_ALIASES
        .iter()
        .find(|(alias, _)| lowered.contains(*alias))
        .map(|&(alias, profile)| IdentityMatch { alias, profile })
}

/// Comma-split, strip query syntax, and drop empty segments.
pub fn split_locations(location: &str) -> Vec<String> {
    location
        .split(',')
        .map(strip_syntax)
        .filter(|s| !s.is_empty())
        .collect()
}

/// Replace query syntax with spaces and collapse whitespace.
fn strip_syntax(text: &str) -> String {
    text.replace(QUERY_SYNTAX, " ")
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}
