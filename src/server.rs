//! HTTP tool server.
//!
//! Exposes the [`ToolRegistry`] as a JSON REST API and as an MCP Streamable
//! HTTP endpoint. Both surfaces dispatch to the same tool instances.
//!
//! # Endpoints
//!
//! | Method | Path | Description |
//! |--------|------|-------------|
//! | `GET`  | `/health` | Health check (returns version) |
//! | `GET`  | `/tools/list` | List all registered tools with schemas |
//! | `POST` | `/tools/{name}` | Call a tool by name |
//! | `*`    | `/mcp` | MCP JSON-RPC over Streamable HTTP |
//!
//! # Error Contract
//!
//! ```json
//! { "error": { "code": "bad_request", "message": "missing required parameter: topic" } }
//! ```
//!
//! Error codes: `bad_request` (400), `unknown_engine` (400), `not_found` (404),
//! `tool_error` (500).
//!
//! # MCP client configuration
//!
//! ```json
//! {
//!   "mcpServers": {
//!     "grant-dorks": { "url": "http://127.0.0.1:7341/mcp" }
//!   }
//! }
//! ```

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use grant_dorks_core::DorkError;
use rmcp::transport::streamable_http_server::{
    session::local::LocalSessionManager, StreamableHttpServerConfig, StreamableHttpService,
};
use serde::Serialize;
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};

use crate::config::Config;
use crate::mcp::McpBridge;
use crate::tool_schema::{validate_params, ToolInfo};
use crate::traits::{ToolContext, ToolRegistry};

/// Shared state for route handlers.
#[derive(Clone)]
struct AppState {
    config: Arc<Config>,
    tools: Arc<ToolRegistry>,
}

/// Start the server with the built-in tools. Runs until the process exits.
///
/// This is the entry point for `gdork serve mcp`.
pub async fn run_server(config: &Config) -> anyhow::Result<()> {
    run_server_with_extensions(config, ToolRegistry::new()).await
}

/// Start the server with custom tools served alongside the built-ins.
///
/// ```rust,no_run
/// use grant_dorks::server::run_server_with_extensions;
/// use grant_dorks::traits::ToolRegistry;
///
/// # async fn example(config: &grant_dorks::config::Config) -> anyhow::Result<()> {
/// let mut tools = ToolRegistry::new();
/// // tools.register(Box::new(MyTool));
/// run_server_with_extensions(config, tools).await?;
/// # Ok(())
/// # }
/// ```
pub async fn run_server_with_extensions(
    config: &Config,
    extra_tools: ToolRegistry,
) -> anyhow::Result<()> {
    let bind_addr = config.server.bind.clone();
    let config = Arc::new(config.clone());

    let mut registry = ToolRegistry::with_builtins();
    registry.extend(extra_tools);

    println!("Registered {} tools:", registry.len());
    for t in registry.tools() {
        let tag = if t.is_builtin() { "builtin" } else { "rust" };
        println!("  POST /tools/{}: {} ({})", t.name(), t.description(), tag);
    }

    let app = router(config, Arc::new(registry));

    let listener = tokio::net::TcpListener::bind(&bind_addr).await?;
    println!("Tool server listening on http://{}", bind_addr);
    println!("MCP endpoint: http://{}/mcp", bind_addr);
    tracing::info!(bind = %bind_addr, "server started");

    axum::serve(listener, app).await?;
    Ok(())
}

/// Build the application router: REST tool API, health check, and MCP.
pub fn router(config: Arc<Config>, tools: Arc<ToolRegistry>) -> Router {
    let bridge = McpBridge::new(config.clone(), tools.clone());
    let mcp_service = StreamableHttpService::new(
        move || Ok(bridge.clone()),
        LocalSessionManager::default().into(),
        StreamableHttpServerConfig::default(),
    );

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/tools/list", get(handle_list_tools))
        .route("/tools/{name}", post(handle_tool_call))
        .route("/health", get(handle_health))
        .nest_service("/mcp", mcp_service)
        .layer(cors)
        .with_state(AppState { config, tools })
}

// ============ Error response ============

#[derive(Serialize)]
struct ErrorBody {
    error: ErrorDetail,
}

#[derive(Serialize)]
struct ErrorDetail {
    code: String,
    message: String,
}

struct AppError {
    status: StatusCode,
    code: &'static str,
    message: String,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let body = ErrorBody {
            error: ErrorDetail {
                code: self.code.to_string(),
                message: self.message,
            },
        };
        (self.status, Json(body)).into_response()
    }
}

fn error(status: StatusCode, code: &'static str, message: impl Into<String>) -> AppError {
    AppError {
        status,
        code,
        message: message.into(),
    }
}

fn bad_request(message: impl Into<String>) -> AppError {
    error(StatusCode::BAD_REQUEST, "bad_request", message)
}

fn not_found(message: impl Into<String>) -> AppError {
    error(StatusCode::NOT_FOUND, "not_found", message)
}

/// Map a tool failure to a status code. Typed core errors are matched
/// directly; anything else falls back to message inspection.
fn classify_tool_error(tool_name: &str, err: anyhow::Error) -> AppError {
    let msg = format!("{}: {}", tool_name, err);

    if let Some(dork_err) = err.downcast_ref::<DorkError>() {
        return match dork_err {
            DorkError::UnknownEngine(_) => error(StatusCode::BAD_REQUEST, "unknown_engine", msg),
            DorkError::InvalidRequest(_) => bad_request(msg),
            DorkError::Unrepairable { .. } => {
                error(StatusCode::INTERNAL_SERVER_ERROR, "tool_error", msg)
            }
        };
    }

    let text = err.to_string();
    if text.contains("not found") {
        not_found(msg)
    } else if text.contains("must not be empty") || text.contains("invalid") {
        bad_request(msg)
    } else {
        error(StatusCode::INTERNAL_SERVER_ERROR, "tool_error", msg)
    }
}

// ============ GET /health ============

#[derive(Serialize)]
struct HealthResponse {
    status: String,
    version: String,
}

async fn handle_health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

// ============ GET /tools/list ============

#[derive(Serialize)]
struct ToolListResponse {
    tools: Vec<ToolInfo>,
}

async fn handle_list_tools(State(state): State<AppState>) -> Json<ToolListResponse> {
    let tools = state
        .tools
        .tools()
        .iter()
        .map(|t| ToolInfo {
            name: t.name().to_string(),
            description: t.description().to_string(),
            builtin: t.is_builtin(),
            parameters: t.parameters_schema(),
        })
        .collect();

    Json(ToolListResponse { tools })
}

// ============ POST /tools/{name} ============

/// Look up the tool, validate parameters against its schema, execute.
/// Results are wrapped as `{ "result": ... }`.
async fn handle_tool_call(
    State(state): State<AppState>,
    Path(name): Path<String>,
    Json(params): Json<serde_json::Value>,
) -> Result<Json<serde_json::Value>, AppError> {
    let tool = state
        .tools
        .find(&name)
        .ok_or_else(|| not_found(format!("no tool registered with name: {}", name)))?;

    let validated_params = validate_params(&tool.parameters_schema(), &params)
        .map_err(|e| bad_request(e.to_string()))?;

    let ctx = ToolContext::new(state.config.clone());
    let result = tool
        .execute(validated_params, &ctx)
        .await
        .map_err(|e| classify_tool_error(&name, e))?;

    Ok(Json(serde_json::json!({ "result": result })))
}
