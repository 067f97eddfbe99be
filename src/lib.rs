//! # Grant Dorks
//!
//! Engine-aware search dork generation for grant discovery.
//!
//! A topic and optional locations are compiled into one dork per search
//! engine (Google, Bing, DuckDuckGo), each in that engine's operator
//! dialect, and checked against a declarative grammar. The pure compiler
//! and validator live in [`grant_dorks_core`]; this crate adds
//! configuration, saved dork files, the `gdork` CLI, and an HTTP / MCP
//! tool server.
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────┐   ┌──────────────┐   ┌─────────────┐
//! │  topic +     │──▶│  compiler    │──▶│  validator  │
//! │  locations   │   │  (per engine)│   │  + repair   │
//! └──────────────┘   └──────────────┘   └──────┬──────┘
//!                                              │
//!                  ┌─────────────────┬─────────┴───────┐
//!                  ▼                 ▼                 ▼
//!             ┌─────────┐      ┌───────────┐     ┌──────────┐
//!             │   CLI   │      │ HTTP /mcp │     │ JSON file│
//!             │ (gdork) │      │  tools    │     │  output  │
//!             └─────────┘      └───────────┘     └──────────┘
//! ```
//!
//! ## Quick Start
//!
//! ```bash
//! gdork generate "rural broadband" --location "Ohio, Michigan"
//! gdork generate "tribal education" --ddg-mode split --save
//! gdork validate bing 'intext:grant loc:"Ohio"' --fix
//! gdork guidance duckduckgo
//! gdork serve mcp
//! ```
//!
//! ## Modules
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`config`] | TOML configuration parsing |
//! | [`generate`] | Compile + validate + save |
//! | [`check`] | Validation and repair commands |
//! | [`rules`] | Operator tables and guidance |
//! | [`output`] | Saved dork files |
//! | [`files`] | Saved file listing and cleanup |
//! | [`traits`] | Tool trait and registry |
//! | [`tool_schema`] | Tool parameter validation |
//! | [`server`] | HTTP tool server |
//! | [`mcp`] | MCP protocol bridge |

pub mod check;
pub mod config;
pub mod files;
pub mod generate;
pub mod mcp;
pub mod output;
pub mod rules;
pub mod server;
pub mod tool_schema;
pub mod traits;
