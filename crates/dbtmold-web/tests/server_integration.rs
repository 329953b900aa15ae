//! Integration tests for the dbtmold-web server.
//!
//! These tests start a real axum server on a random port and exercise the
//! REST endpoints.

use std::path::PathBuf;

use dbtmold::artifacts::ARTIFACT_NOT_FOUND;
use dbtmold::config::MoldConfig;
use dbtmold_web::{HEALTH_MESSAGE, WebConfig, spawn_web};

/// Helper: spawn a test server on port 0 (random available port).
async fn spawn_test_server(template_dir: PathBuf) -> String {
    let config = WebConfig {
        bind_addr: ([127, 0, 0, 1], 0).into(),
        mold: MoldConfig::default().with_template_dir(template_dir),
    };
    let addr = spawn_web(config).await.unwrap();
    format!("http://{addr}")
}

fn shipped_templates() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("../../template")
}

async fn post(url: String, body: &str) -> reqwest::Response {
    reqwest::Client::new()
        .post(url)
        .header("content-type", "application/json")
        .body(body.to_string())
        .send()
        .await
        .unwrap()
}

// ── Health and discovery ─────────────────────────────────────────────

#[tokio::test]
async fn health_endpoint_and_tool_agree() {
    let base = spawn_test_server(shipped_templates()).await;

    let resp = reqwest::get(format!("{base}/api/health")).await.unwrap();
    assert_eq!(resp.status(), 200);
    let json: serde_json::Value = resp.json().await.unwrap();
    assert_eq!(json["message"], HEALTH_MESSAGE);

    let resp = post(format!("{base}/api/tools/health_check"), "").await;
    assert_eq!(resp.status(), 200);
    let json: serde_json::Value = resp.json().await.unwrap();
    assert_eq!(json["result"], HEALTH_MESSAGE);
}

#[tokio::test]
async fn tool_catalogue_is_sorted_and_complete() {
    let base = spawn_test_server(shipped_templates()).await;

    let json: serde_json::Value = reqwest::get(format!("{base}/api/tools"))
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    let names: Vec<&str> = json
        .as_array()
        .unwrap()
        .iter()
        .map(|d| d["function"]["name"].as_str().unwrap())
        .collect();

    assert_eq!(names.len(), 13);
    assert!(names.windows(2).all(|w| w[0] < w[1]));
    assert!(names.contains(&"final_answer"));
    assert!(names.contains(&"health_check"));
}

#[tokio::test]
async fn prompt_catalogue_lists_kinds() {
    let base = spawn_test_server(shipped_templates()).await;

    let json: serde_json::Value = reqwest::get(format!("{base}/api/prompts"))
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    let kinds: Vec<&str> = json
        .as_array()
        .unwrap()
        .iter()
        .map(|d| d["name"].as_str().unwrap())
        .collect();
    assert_eq!(kinds, ["sql-model", "schema", "test-config", "explain-topic"]);
}

// ── Tool calls ───────────────────────────────────────────────────────

#[tokio::test]
async fn tool_call_returns_result() {
    let base = spawn_test_server(shipped_templates()).await;

    let resp = post(format!("{base}/api/tools/lcm"), r#"{"a": 4, "b": 6}"#).await;
    assert_eq!(resp.status(), 200);
    let json: serde_json::Value = resp.json().await.unwrap();
    assert_eq!(json["result"], 12);
    assert_eq!(json["terminal"], false);
}

#[tokio::test]
async fn final_answer_call_is_marked_terminal() {
    let base = spawn_test_server(shipped_templates()).await;

    let resp = post(
        format!("{base}/api/tools/final_answer"),
        r#"{"answer": "The total is 42."}"#,
    )
    .await;
    assert_eq!(resp.status(), 200);
    let json: serde_json::Value = resp.json().await.unwrap();
    assert_eq!(json["result"], "The total is 42.");
    assert_eq!(json["terminal"], true);
}

#[tokio::test]
async fn domain_violation_is_bad_request() {
    let base = spawn_test_server(shipped_templates()).await;

    let resp = post(format!("{base}/api/tools/divide"), r#"{"a": 1, "b": 0}"#).await;
    assert_eq!(resp.status(), 400);
    let json: serde_json::Value = resp.json().await.unwrap();
    assert_eq!(json["error"]["kind"], "validation");
}

#[tokio::test]
async fn unknown_tool_is_not_found() {
    let base = spawn_test_server(shipped_templates()).await;

    let resp = post(format!("{base}/api/tools/modulo"), r#"{"a": 1, "b": 2}"#).await;
    assert_eq!(resp.status(), 404);
    let json: serde_json::Value = resp.json().await.unwrap();
    assert_eq!(json["error"]["kind"], "unknown_operation");
}

// ── Prompts ──────────────────────────────────────────────────────────

#[tokio::test]
async fn prompt_embeds_shipped_artifact() {
    let base = spawn_test_server(shipped_templates()).await;

    let resp = post(
        format!("{base}/api/prompts/sql-model"),
        r#"{"table_name": "bal_rpt", "description": "Balances", "source_tables": "t24.account"}"#,
    )
    .await;
    assert_eq!(resp.status(), 200);
    let json: serde_json::Value = resp.json().await.unwrap();
    assert_eq!(json["kind"], "sql-model");
    assert_eq!(json["messages"][0]["role"], "user");
    let content = json["messages"][0]["content"].as_str().unwrap();
    assert!(content.contains("materialized='incremental'"));
    assert!(!content.contains(ARTIFACT_NOT_FOUND));
}

#[tokio::test]
async fn prompt_with_missing_artifact_still_succeeds() {
    let dir = std::env::temp_dir().join("dbtmold-web-no-templates");
    let base = spawn_test_server(dir).await;

    let resp = post(
        format!("{base}/api/prompts/test-config"),
        r#"{"model_name": "bal_rpt", "description": "Balances"}"#,
    )
    .await;
    assert_eq!(resp.status(), 200);
    let json: serde_json::Value = resp.json().await.unwrap();
    let content = json["messages"][0]["content"].as_str().unwrap();
    assert!(content.contains(ARTIFACT_NOT_FOUND));
}

#[tokio::test]
async fn prompt_errors_map_to_statuses() {
    let base = spawn_test_server(shipped_templates()).await;

    let resp = post(format!("{base}/api/prompts/schema"), r#"{"model_name": ""}"#).await;
    assert_eq!(resp.status(), 400);

    let resp = post(format!("{base}/api/prompts/schema"), "not json").await;
    assert_eq!(resp.status(), 400);

    let resp = post(format!("{base}/api/prompts/snapshot"), "{}").await;
    assert_eq!(resp.status(), 404);
    let json: serde_json::Value = resp.json().await.unwrap();
    assert_eq!(json["error"]["kind"], "unknown_operation");
}
