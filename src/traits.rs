//! Tool trait and registry.
//!
//! Every operation exposed over HTTP and MCP is a [`Tool`]. The built-in
//! tools wrap the same functions the CLI calls, so a dork generated through
//! `POST /tools/generate_search_dorks` is identical to `gdork generate`.
//!
//! ```text
//! ┌──────────────────────────────────────────────┐
//! │                ToolRegistry                  │
//! │  generate_search_dorks   validate_dork       │
//! │  repair_dork             operator_rules      │
//! │  dork_guidance           + custom Rust tools │
//! └──────────────┬───────────────────────────────┘
//!                ▼
//!   run_server() → REST /tools/{name} and MCP /mcp
//! ```
//!
//! # Usage
//!
//! ```rust
//! use grant_dorks::traits::ToolRegistry;
//!
//! let mut tools = ToolRegistry::with_builtins();
//! // tools.register(Box::new(MyTool));
//! assert_eq!(tools.len(), 5);
//! ```

use anyhow::Result;
use async_trait::async_trait;
use grant_dorks_core::grammar::{examples, rules};
use grant_dorks_core::{
    render_guidance, DorkValidator, DuckDuckGoMode, SearchEngine, ValidationResult,
};
use serde_json::{json, Value};
use std::sync::Arc;

use crate::check::{repair, RepairReport};
use crate::config::Config;
use crate::generate::{generate_dorks, GenerateOptions, GenerateReport};

// ═══════════════════════════════════════════════════════════════════════
// Tool Trait
// ═══════════════════════════════════════════════════════════════════════

/// A tool that agents can discover and call.
///
/// Tools are registered at server startup and exposed via
/// `GET /tools/list` and the MCP `tools/list` method; each call goes
/// through [`execute`](Tool::execute) after the parameters were validated
/// against [`parameters_schema`](Tool::parameters_schema).
///
/// # Example
///
/// ```rust
/// use async_trait::async_trait;
/// use anyhow::Result;
/// use serde_json::{json, Value};
/// use grant_dorks::traits::{Tool, ToolContext};
///
/// pub struct EngineCountTool;
///
/// #[async_trait]
/// impl Tool for EngineCountTool {
///     fn name(&self) -> &str { "engine_count" }
///     fn description(&self) -> &str { "Number of supported engines" }
///
///     fn parameters_schema(&self) -> Value {
///         json!({ "type": "object", "properties": {} })
///     }
///
///     async fn execute(&self, _params: Value, _ctx: &ToolContext) -> Result<Value> {
///         Ok(json!({ "engines": grant_dorks_core::SearchEngine::all().len() }))
///     }
/// }
/// ```
#[async_trait]
pub trait Tool: Send + Sync {
    /// Route name (`POST /tools/{name}`); lowercase with underscores.
    fn name(&self) -> &str;

    /// One-line description for agent discovery.
    fn description(&self) -> &str;

    /// Marks tools shipped with the binary in `GET /tools/list`.
    fn is_builtin(&self) -> bool {
        false
    }

    /// JSON Schema object with `type: "object"`, `properties`, and
    /// optionally `required`.
    fn parameters_schema(&self) -> Value;

    /// Run the tool. `params` is always a JSON object.
    async fn execute(&self, params: Value, ctx: &ToolContext) -> Result<Value>;
}

// ═══════════════════════════════════════════════════════════════════════
// ToolContext
// ═══════════════════════════════════════════════════════════════════════

/// Per-call bridge from a tool to the application.
pub struct ToolContext {
    config: Arc<Config>,
}

impl ToolContext {
    pub fn new(config: Arc<Config>) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Equivalent to `gdork generate`.
    pub fn generate(
        &self,
        topic: &str,
        location: Option<&str>,
        opts: &GenerateOptions,
    ) -> Result<GenerateReport> {
        generate_dorks(&self.config, topic, location, opts)
    }

    /// Equivalent to `gdork validate <engine> <dork>`.
    pub fn validate(&self, engine: &str, dork: &str) -> Result<ValidationResult> {
        let engine: SearchEngine = engine.parse()?;
        Ok(DorkValidator::new(engine).validate(dork))
    }

    /// Equivalent to `gdork validate --fix`.
    pub fn repair(&self, engine: &str, dork: &str) -> Result<RepairReport> {
        let engine: SearchEngine = engine.parse()?;
        repair(&self.config, engine, dork)
    }
}

fn str_param<'a>(params: &'a Value, key: &str) -> &'a str {
    params[key].as_str().unwrap_or("")
}

fn engine_schema() -> Value {
    json!({
        "type": "string",
        "description": "Target engine: google, bing, or duckduckgo"
    })
}

// ═══════════════════════════════════════════════════════════════════════
// Built-in Tool Implementations
// ═══════════════════════════════════════════════════════════════════════

/// Compile dorks for all engines, with validation reports.
pub struct GenerateDorksTool;

#[async_trait]
impl Tool for GenerateDorksTool {
    fn name(&self) -> &str {
        "generate_search_dorks"
    }

    fn description(&self) -> &str {
        "Generate grant search dorks for Google, Bing, and DuckDuckGo"
    }

    fn is_builtin(&self) -> bool {
        true
    }

    fn parameters_schema(&self) -> Value {
        json!({
            "type": "object",
            "properties": {
                "topic": { "type": "string", "description": "Grant topic, e.g. \"rural broadband\"" },
                "location": { "type": "string", "description": "Comma-separated locations, e.g. \"Michigan, Minnesota\"" },
                "duckduckgo_mode": { "type": "string", "enum": ["combined", "split"], "description": "Override the configured DuckDuckGo output mode" },
                "save": { "type": "boolean", "description": "Write the dorks to the output directory", "default": false }
            },
            "required": ["topic"]
        })
    }

    async fn execute(&self, params: Value, ctx: &ToolContext) -> Result<Value> {
        let topic = str_param(&params, "topic");
        if topic.trim().is_empty() {
            anyhow::bail!("topic must not be empty");
        }
        let location = params["location"].as_str();
        let duckduckgo_mode = params["duckduckgo_mode"]
            .as_str()
            .map(str::parse::<DuckDuckGoMode>)
            .transpose()
            .map_err(anyhow::Error::msg)?;

        let opts = GenerateOptions {
            engine: None,
            duckduckgo_mode,
            save: params["save"].as_bool().unwrap_or(false),
        };
        let report = ctx.generate(topic, location, &opts)?;
        Ok(serde_json::to_value(&report)?)
    }
}

/// Validate one dork against an engine grammar.
pub struct ValidateDorkTool;

#[async_trait]
impl Tool for ValidateDorkTool {
    fn name(&self) -> &str {
        "validate_dork"
    }

    fn description(&self) -> &str {
        "Check a search dork against an engine's operator grammar"
    }

    fn is_builtin(&self) -> bool {
        true
    }

    fn parameters_schema(&self) -> Value {
        json!({
            "type": "object",
            "properties": {
                "engine": engine_schema(),
                "dork": { "type": "string", "description": "The query to check" }
            },
            "required": ["engine", "dork"]
        })
    }

    async fn execute(&self, params: Value, ctx: &ToolContext) -> Result<Value> {
        let result = ctx.validate(str_param(&params, "engine"), str_param(&params, "dork"))?;
        Ok(serde_json::to_value(&result)?)
    }
}

/// Validate and apply mechanical fixes.
pub struct RepairDorkTool;

#[async_trait]
impl Tool for RepairDorkTool {
    fn name(&self) -> &str {
        "repair_dork"
    }

    fn description(&self) -> &str {
        "Validate a dork and apply known fixes until it passes"
    }

    fn is_builtin(&self) -> bool {
        true
    }

    fn parameters_schema(&self) -> Value {
        json!({
            "type": "object",
            "properties": {
                "engine": engine_schema(),
                "dork": { "type": "string", "description": "The query to repair" }
            },
            "required": ["engine", "dork"]
        })
    }

    async fn execute(&self, params: Value, ctx: &ToolContext) -> Result<Value> {
        let report = ctx.repair(str_param(&params, "engine"), str_param(&params, "dork"))?;
        Ok(serde_json::to_value(&report)?)
    }
}

/// The operator table for one engine.
pub struct OperatorRulesTool;

#[async_trait]
impl Tool for OperatorRulesTool {
    fn name(&self) -> &str {
        "operator_rules"
    }

    fn description(&self) -> &str {
        "List supported and unsupported search operators for an engine"
    }

    fn is_builtin(&self) -> bool {
        true
    }

    fn parameters_schema(&self) -> Value {
        json!({
            "type": "object",
            "properties": { "engine": engine_schema() },
            "required": ["engine"]
        })
    }

    async fn execute(&self, params: Value, _ctx: &ToolContext) -> Result<Value> {
        let engine: SearchEngine = str_param(&params, "engine").parse()?;
        Ok(json!({
            "engine": engine,
            "rules": rules(engine),
            "examples": examples(engine),
        }))
    }
}

/// Rendered markdown guidance for one engine.
pub struct DorkGuidanceTool;

#[async_trait]
impl Tool for DorkGuidanceTool {
    fn name(&self) -> &str {
        "dork_guidance"
    }

    fn description(&self) -> &str {
        "Markdown guidance for writing dorks for an engine"
    }

    fn is_builtin(&self) -> bool {
        true
    }

    fn parameters_schema(&self) -> Value {
        json!({
            "type": "object",
            "properties": { "engine": engine_schema() },
            "required": ["engine"]
        })
    }

    async fn execute(&self, params: Value, _ctx: &ToolContext) -> Result<Value> {
        let engine: SearchEngine = str_param(&params, "engine").parse()?;
        Ok(json!({
            "engine": engine,
            "guidance": render_guidance(engine),
        }))
    }
}

// ═══════════════════════════════════════════════════════════════════════
// Registry
// ═══════════════════════════════════════════════════════════════════════

/// Registry for built-in and custom tools.
pub struct ToolRegistry {
    tools: Vec<Box<dyn Tool>>,
}

impl ToolRegistry {
    /// Create an empty tool registry.
    pub fn new() -> Self {
        Self { tools: Vec::new() }
    }

    /// Create a registry pre-loaded with the built-in tools.
    pub fn with_builtins() -> Self {
        let mut registry = Self::new();
        registry.register(Box::new(GenerateDorksTool));
        registry.register(Box::new(ValidateDorkTool));
        registry.register(Box::new(RepairDorkTool));
        registry.register(Box::new(OperatorRulesTool));
        registry.register(Box::new(DorkGuidanceTool));
        registry
    }

    /// Register a tool. A later tool with an existing name is shadowed by
    /// the earlier one in [`find`](Self::find).
    pub fn register(&mut self, tool: Box<dyn Tool>) {
        if self.find(tool.name()).is_some() {
            tracing::warn!(tool = tool.name(), "duplicate tool name; earlier registration wins");
        }
        self.tools.push(tool);
    }

    /// Move every tool from `other` into this registry.
    pub fn extend(&mut self, other: ToolRegistry) {
        for tool in other.tools {
            self.register(tool);
        }
    }

    pub fn tools(&self) -> &[Box<dyn Tool>] {
        &self.tools
    }

    pub fn find(&self, name: &str) -> Option<&dyn Tool> {
        self.tools
            .iter()
            .find(|t| t.name() == name)
            .map(|t| t.as_ref())
    }

    pub fn is_empty(&self) -> bool {
        self.tools.is_empty()
    }

    pub fn len(&self) -> usize {
        self.tools.len()
    }
}

impl Default for ToolRegistry {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ctx() -> ToolContext {
        ToolContext::new(Arc::new(Config::minimal()))
    }

    #[test]
    fn builtins_are_registered_in_order() {
        let registry = ToolRegistry::with_builtins();
        let names: Vec<&str> = registry.tools().iter().map(|t| t.name()).collect();
        assert_eq!(
            names,
            vec![
                "generate_search_dorks",
                "validate_dork",
                "repair_dork",
                "operator_rules",
                "dork_guidance"
            ]
        );
        assert!(registry.tools().iter().all(|t| t.is_builtin()));
    }

    #[test]
    fn schemas_are_objects() {
        for tool in ToolRegistry::with_builtins().tools() {
            let schema = tool.parameters_schema();
            assert_eq!(schema["type"], "object", "{}", tool.name());
            assert!(schema["properties"].is_object(), "{}", tool.name());
        }
    }

    #[tokio::test]
    async fn validate_tool_returns_report() {
        let out = ValidateDorkTool
            .execute(json!({ "engine": "bing", "dork": "intext:grant" }), &ctx())
            .await
            .unwrap();
        assert_eq!(out["is_valid"], false);
        assert_eq!(out["engine"], "bing");
    }

    #[tokio::test]
    async fn unknown_engine_is_an_error() {
        let err = OperatorRulesTool
            .execute(json!({ "engine": "yahoo" }), &ctx())
            .await
            .unwrap_err();
        assert!(err.downcast_ref::<grant_dorks_core::DorkError>().is_some());
    }

    #[tokio::test]
    async fn generate_tool_honours_mode_override() {
        let out = GenerateDorksTool
            .execute(
                json!({ "topic": "arts", "location": "Ohio", "duckduckgo_mode": "split" }),
                &ctx(),
            )
            .await
            .unwrap();
        assert_eq!(out["duckduckgo_mode"], "split");
        assert!(out["dorks"][2]["query"].is_array());
    }

    #[tokio::test]
    async fn guidance_tool_renders_markdown() {
        let out = DorkGuidanceTool
            .execute(json!({ "engine": "duckduckgo" }), &ctx())
            .await
            .unwrap();
        assert!(out["guidance"]
            .as_str()
            .unwrap()
            .starts_with("# DuckDuckGo dork guidance"));
    }
}
