//! `gdork rules` and `gdork guidance`.

use anyhow::Result;
use grant_dorks_core::grammar::rules;
use grant_dorks_core::{render_guidance, SearchEngine};

pub fn run_rules(engine: &str, json: bool) -> Result<()> {
    let engine: SearchEngine = engine.parse()?;
    let table = rules(engine);

    if json {
        println!("{}", serde_json::to_string_pretty(table)?);
        return Ok(());
    }

    println!("{} operators:", engine);
    for r in table {
        let mark = if r.supported { "yes" } else { "no " };
        println!("  [{}] {:<16} {}", mark, r.operator, r.notes);
        if r.supported {
            println!("        syntax: {}   e.g. {}", r.syntax, r.example);
        }
    }
    Ok(())
}

pub fn run_guidance(engine: &str) -> Result<()> {
    let engine: SearchEngine = engine.parse()?;
    print!("{}", render_guidance(engine));
    Ok(())
}
