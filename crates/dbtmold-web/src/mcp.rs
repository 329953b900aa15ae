//! Model Context Protocol endpoint: JSON-RPC 2.0 over a single `POST /mcp`.
//!
//! Stateless: every request is answered on its own and no session id is
//! issued. Supported methods are `initialize`, `ping`, `tools/list`,
//! `tools/call`, `prompts/list` and `prompts/get`. Requests without an `id`
//! are notifications and get `202 Accepted` with an empty body.
//!
//! Tool failures caused by the arguments (bad schema, domain violations) are
//! reported inside the result with `isError: true`, so the calling model can
//! see and correct them. Unknown tools and prompts, and malformed prompt
//! parameters, are JSON-RPC errors.

use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use dbtmold::prompts::{self, PromptAssembler, PromptRequest};
use dbtmold::tools::ToolSet;
use dbtmold::{ErrorKind, PromptError};
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};
use tracing::debug;

use crate::api::AppState;

pub const SERVER_NAME: &str = "DBT Template Generator MCP Server";
pub const PROTOCOL_VERSION: &str = "2025-03-26";

const PARSE_ERROR: i64 = -32700;
const INVALID_REQUEST: i64 = -32600;
const METHOD_NOT_FOUND: i64 = -32601;
const INVALID_PARAMS: i64 = -32602;

#[derive(Deserialize)]
struct RpcRequest {
    jsonrpc: String,
    #[serde(default)]
    id: Option<Value>,
    method: String,
    #[serde(default)]
    params: Value,
}

#[derive(Serialize, Debug, PartialEq)]
struct RpcError {
    code: i64,
    message: String,
}

impl RpcError {
    fn new(code: i64, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }
}

impl From<PromptError> for RpcError {
    fn from(e: PromptError) -> Self {
        Self::new(INVALID_PARAMS, e.to_string())
    }
}

/// POST /mcp
pub async fn post_mcp(State(app): State<AppState>, body: String) -> Response {
    let raw: Value = match serde_json::from_str(&body) {
        Ok(raw) => raw,
        Err(e) => return reply(Value::Null, Err(RpcError::new(PARSE_ERROR, e.to_string()))),
    };
    let request: RpcRequest = match serde_json::from_value(raw) {
        Ok(request) => request,
        Err(e) => return reply(Value::Null, Err(RpcError::new(INVALID_REQUEST, e.to_string()))),
    };
    let Some(id) = request.id else {
        debug!("[mcp] notification '{}'", request.method);
        return StatusCode::ACCEPTED.into_response();
    };
    if request.jsonrpc != "2.0" {
        let message = format!("unsupported jsonrpc version '{}'", request.jsonrpc);
        return reply(id, Err(RpcError::new(INVALID_REQUEST, message)));
    }

    debug!("[mcp] {} (id {id})", request.method);
    let outcome = handle(&app, &request.method, request.params).await;
    reply(id, outcome)
}

fn reply(id: Value, outcome: Result<Value, RpcError>) -> Response {
    let body = match outcome {
        Ok(result) => json!({ "jsonrpc": "2.0", "id": id, "result": result }),
        Err(error) => json!({ "jsonrpc": "2.0", "id": id, "error": error }),
    };
    Json(body).into_response()
}

async fn handle(app: &AppState, method: &str, params: Value) -> Result<Value, RpcError> {
    match method {
        "initialize" => Ok(initialize(&params)),
        "ping" => Ok(json!({})),
        "tools/list" => Ok(list_tools(&app.tools)),
        "tools/call" => call_tool(&app.tools, params).await,
        "prompts/list" => Ok(list_prompts()),
        "prompts/get" => get_prompt(&app.assembler, params),
        other => Err(RpcError::new(
            METHOD_NOT_FOUND,
            format!("method not found: {other}"),
        )),
    }
}

fn initialize(params: &Value) -> Value {
    let version = params["protocolVersion"].as_str().unwrap_or(PROTOCOL_VERSION);
    json!({
        "protocolVersion": version,
        "capabilities": { "tools": {}, "prompts": {} },
        "serverInfo": { "name": SERVER_NAME, "version": env!("CARGO_PKG_VERSION") },
    })
}

fn list_tools(tools: &ToolSet) -> Value {
    let tools: Vec<Value> = tools
        .definitions()
        .into_iter()
        .map(|def| {
            json!({
                "name": def.function.name,
                "description": def.function.description,
                "inputSchema": def.function.parameters,
            })
        })
        .collect();
    json!({ "tools": tools })
}

#[derive(Deserialize)]
struct CallParams {
    name: String,
    #[serde(default)]
    arguments: Option<Value>,
}

async fn call_tool(tools: &ToolSet, params: Value) -> Result<Value, RpcError> {
    let call: CallParams =
        serde_json::from_value(params).map_err(|e| RpcError::new(INVALID_PARAMS, e.to_string()))?;
    let arguments = call.arguments.unwrap_or_else(|| json!({}));
    let terminal = tools.is_terminal(&call.name);

    match tools.dispatch_value(&call.name, &arguments).await {
        Ok(value) => Ok(json!({
            "content": [{ "type": "text", "text": value.to_string() }],
            "structuredContent": { "result": value },
            "isError": false,
            "_meta": { "terminal": terminal },
        })),
        Err(e) if e.kind == ErrorKind::UnknownOperation => {
            Err(RpcError::new(INVALID_PARAMS, e.to_string()))
        }
        Err(e) => Ok(json!({
            "content": [{ "type": "text", "text": e.message }],
            "isError": true,
        })),
    }
}

fn list_prompts() -> Value {
    json!({ "prompts": prompts::catalogue() })
}

#[derive(Deserialize)]
struct GetPromptParams {
    name: String,
    #[serde(default)]
    arguments: Option<Value>,
}

fn get_prompt(assembler: &PromptAssembler, params: Value) -> Result<Value, RpcError> {
    let get: GetPromptParams =
        serde_json::from_value(params).map_err(|e| RpcError::new(INVALID_PARAMS, e.to_string()))?;
    let request =
        PromptRequest::from_parts(&get.name, get.arguments.unwrap_or_else(|| json!({})))?;
    let prompt = assembler.build(&request)?;

    let description = prompts::catalogue()
        .into_iter()
        .find(|def| def.name == prompt.kind)
        .map(|def| def.description)
        .unwrap_or_default();
    let messages: Vec<Value> = prompt
        .messages
        .iter()
        .map(|m| json!({ "role": m.role, "content": { "type": "text", "text": m.content } }))
        .collect();
    Ok(json!({ "description": description, "messages": messages }))
}
