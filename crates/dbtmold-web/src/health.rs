//! The `health_check` tool, registered alongside the standard catalogue when
//! serving over HTTP.

use dbtmold::tools::{Tool, ToolFuture, ToolValue, parse_tool_args};
use dbtmold::{ToolDef, json_schema_for};
use schemars::JsonSchema;
use serde::Deserialize;

pub const HEALTH_CHECK: &str = "health_check";
pub const HEALTH_MESSAGE: &str = "MCP Server is healthy and running";

/// Reports that the server is up. Takes no arguments.
pub struct HealthCheck;

#[derive(Deserialize, JsonSchema)]
#[serde(deny_unknown_fields)]
struct NoArgs {}

impl Tool for HealthCheck {
    fn definition(&self) -> ToolDef {
        ToolDef::new(
            HEALTH_CHECK,
            "Check that the server is up. Takes no arguments.",
            json_schema_for::<NoArgs>(),
        )
    }

    fn execute(&self, arguments: &str) -> ToolFuture<'_> {
        let parsed = parse_tool_args::<NoArgs>(arguments);
        Box::pin(async move { parsed.map(|_| ToolValue::Text(HEALTH_MESSAGE.into())) })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use dbtmold::ErrorKind;
    use dbtmold::tools::ToolSet;

    #[tokio::test]
    async fn reports_healthy() {
        let tools = ToolSet::new().with(HealthCheck);
        let value = tools.dispatch(HEALTH_CHECK, "").await.unwrap();
        assert_eq!(value, ToolValue::Text(HEALTH_MESSAGE.into()));
        assert_eq!(value.to_string(), "MCP Server is healthy and running");
    }

    #[tokio::test]
    async fn rejects_arguments() {
        let tools = ToolSet::new().with(HealthCheck);
        let err = tools
            .dispatch(HEALTH_CHECK, r#"{"verbose": true}"#)
            .await
            .unwrap_err();
        assert_eq!(err.kind, ErrorKind::Validation);
    }
}
