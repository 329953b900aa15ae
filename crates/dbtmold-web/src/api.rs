//! REST API endpoint handlers.
//!
//! Request bodies are read as raw text so that malformed JSON surfaces as a
//! structured validation error instead of an extractor rejection.

use std::sync::Arc;

use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use dbtmold::prompts::{self, AssembledPrompt, PromptAssembler, PromptDef, PromptRequest};
use dbtmold::tools::ToolSet;
use dbtmold::{ErrorKind, ToolDef, ToolError};
use serde_json::json;

use crate::health::HEALTH_MESSAGE;

/// Shared application state passed to all handlers via axum's `State` extractor.
#[derive(Clone)]
pub struct AppState {
    pub tools: Arc<ToolSet>,
    pub assembler: Arc<PromptAssembler>,
}

/// A failure rendered as `{"error": {"kind", "message"}}`.
pub struct ApiError(ToolError);

impl From<ToolError> for ApiError {
    fn from(e: ToolError) -> Self {
        Self(e)
    }
}

impl From<dbtmold::PromptError> for ApiError {
    fn from(e: dbtmold::PromptError) -> Self {
        Self(e.into())
    }
}

fn status_for(kind: ErrorKind) -> StatusCode {
    match kind {
        ErrorKind::Validation => StatusCode::BAD_REQUEST,
        ErrorKind::UnknownOperation => StatusCode::NOT_FOUND,
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (status_for(self.0.kind), Json(json!({ "error": self.0 }))).into_response()
    }
}

/// GET /api/health
pub async fn get_health() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok", "message": HEALTH_MESSAGE }))
}

/// GET /api/tools: Every tool definition, sorted by name.
pub async fn get_tools(State(app): State<AppState>) -> Json<Vec<ToolDef>> {
    Json(app.tools.definitions())
}

/// POST /api/tools/{name}: Invoke a tool with the JSON object body as its
/// arguments. An empty body means no arguments. `terminal` is true when the
/// call ends the caller's loop (`final_answer`).
pub async fn post_tool(
    State(app): State<AppState>,
    Path(name): Path<String>,
    body: String,
) -> Result<Json<serde_json::Value>, ApiError> {
    let value = app.tools.dispatch(&name, &body).await?;
    Ok(Json(json!({
        "result": value,
        "terminal": app.tools.is_terminal(&name),
    })))
}

/// GET /api/prompts: Every prompt kind with its arguments.
pub async fn get_prompts() -> Json<Vec<PromptDef>> {
    Json(prompts::catalogue())
}

/// POST /api/prompts/{kind}: Assemble a prompt from the JSON object body.
pub async fn post_prompt(
    State(app): State<AppState>,
    Path(kind): Path<String>,
    body: String,
) -> Result<Json<AssembledPrompt>, ApiError> {
    let params = parse_params(&body)?;
    let request = PromptRequest::from_parts(&kind, params)?;
    Ok(Json(app.assembler.build(&request)?))
}

fn parse_params(body: &str) -> Result<serde_json::Value, ToolError> {
    if body.trim().is_empty() {
        return Ok(json!({}));
    }
    serde_json::from_str(body).map_err(|e| ToolError::validation(format!("invalid JSON body: {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_kinds_map_to_statuses() {
        assert_eq!(status_for(ErrorKind::Validation), StatusCode::BAD_REQUEST);
        assert_eq!(status_for(ErrorKind::UnknownOperation), StatusCode::NOT_FOUND);
    }

    #[test]
    fn empty_body_is_empty_object() {
        assert_eq!(parse_params("  ").unwrap(), json!({}));
        assert_eq!(parse_params(r#"{"topic": "x"}"#).unwrap()["topic"], "x");
        assert_eq!(parse_params("{").unwrap_err().kind, ErrorKind::Validation);
    }
}
