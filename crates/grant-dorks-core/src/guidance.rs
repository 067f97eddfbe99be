//! Markdown guidance rendered from the grammar tables.

use std::fmt::Write;

use crate::engine::SearchEngine;
use crate::grammar::{examples, rules};

/// Render operator guidance for `engine`: supported operators, operators to
/// avoid, and verified examples.
pub fn render_guidance(engine: SearchEngine) -> String {
    let mut out = String::new();
    let name = engine.name();

    // Writing to a String cannot fail.
    let _ = writeln!(out, "# {name} dork guidance\n");

    let _ = writeln!(out, "## Supported operators\n");
    let _ = writeln!(out, "| Operator | Syntax | Example | Notes |");
    let _ = writeln!(out, "|----------|--------|---------|-------|");
    for r in rules(engine).iter().filter(|r| r.supported) {
        let _ = writeln!(
            out,
            "| `{}` | `{}` | `{}` | {} |",
            r.operator, r.syntax, r.example, r.notes
        );
    }

    let unsupported: Vec<_> = rules(engine).iter().filter(|r| !r.supported).collect();
    if !unsupported.is_empty() {
        let _ = writeln!(out, "\n## Do not use\n");
        for r in unsupported {
            let _ = writeln!(out, "- `{}`: {}", r.operator, r.notes);
        }
    }

    let _ = writeln!(out, "\n## Verified examples");
    for example in examples(engine) {
        let _ = writeln!(out, "\n### {}\n", example.description);
        let _ = writeln!(out, "```text");
        for q in example.queries {
            let _ = writeln!(out, "{q}");
        }
        let _ = writeln!(out, "```\n");
        let _ = writeln!(out, "{}", example.explanation);
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bing_guidance_steers_away_from_intext() {
        let text = render_guidance(SearchEngine::Bing);
        assert!(text.starts_with("# Bing dork guidance"));
        assert!(text.contains("| `inbody:` |"));
        assert!(text.contains("- `intext:`: Use inbody: instead"));
        assert!(text.contains("loc:\"Michigan\""));
    }

    #[test]
    fn google_has_no_unsupported_section() {
        let text = render_guidance(SearchEngine::Google);
        assert!(!text.contains("## Do not use"));
        assert!(text.contains("AROUND(n)"));
    }

    #[test]
    fn duckduckgo_lists_every_split_query() {
        let text = render_guidance(SearchEngine::DuckDuckGo);
        assert!(text.contains("- `OR`: Unreliable - split into multiple queries"));
        assert!(text.contains("\"indigenous grant\" \"Michigan\""));
        assert!(text.contains("\"native american grant\" \"Michigan\""));
    }

    #[test]
    fn every_example_is_rendered() {
        for engine in SearchEngine::all() {
            let text = render_guidance(*engine);
            assert_eq!(
                text.matches("\n### ").count(),
                examples(*engine).len(),
                "{engine}"
            );
        }
    }
}
