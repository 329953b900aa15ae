//! The terminal `final_answer` tool.
//!
//! Returns its argument verbatim and is flagged terminal, so an agent loop
//! that sees a successful `final_answer` call stops issuing tool calls and
//! reports the text as its answer.

use super::core::{Tool, ToolFuture, ToolValue, parse_tool_args};
use crate::ToolDef;
use schemars::JsonSchema;
use serde::Deserialize;

/// Name the finalize tool is registered under.
pub const FINAL_ANSWER: &str = "final_answer";

/// Passthrough tool that ends an agent's tool-use sequence.
pub struct FinalAnswer;

/// Typed arguments for `final_answer`.
#[derive(Deserialize, JsonSchema)]
#[serde(deny_unknown_fields)]
pub struct FinalAnswerArgs {
    /// The complete answer to report. Returned unchanged.
    pub answer: String,
}

impl Tool for FinalAnswer {
    fn definition(&self) -> ToolDef {
        ToolDef::new(
            FINAL_ANSWER,
            "Report the final answer and end the tool-use sequence. Call this \
             exactly once, after all calculations are done. The 'answer' text \
             is returned unchanged.",
            crate::json_schema_for::<FinalAnswerArgs>(),
        )
    }

    fn execute(&self, arguments: &str) -> ToolFuture<'_> {
        let parsed = parse_tool_args::<FinalAnswerArgs>(arguments);
        Box::pin(async move { parsed.map(|args| ToolValue::Text(args.answer)) })
    }

    fn is_terminal(&self) -> bool {
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ErrorKind;
    use crate::tools::ToolSet;

    #[tokio::test]
    async fn returns_answer_verbatim() {
        let answer = "  The total is 42.\nDone. ";
        let args = serde_json::json!({ "answer": answer }).to_string();
        let result = FinalAnswer.execute(&args).await;
        assert_eq!(result, Ok(ToolValue::Text(answer.into())));
    }

    #[tokio::test]
    async fn empty_answer_is_allowed() {
        let set = ToolSet::new().with(FinalAnswer);
        let result = set.dispatch(FINAL_ANSWER, r#"{"answer": ""}"#).await;
        assert_eq!(result, Ok(ToolValue::Text(String::new())));
    }

    #[tokio::test]
    async fn missing_answer_is_a_validation_error() {
        let set = ToolSet::new().with(FinalAnswer);
        let err = set.dispatch(FINAL_ANSWER, "{}").await.unwrap_err();
        assert_eq!(err.kind, ErrorKind::Validation);
    }

    #[test]
    fn registered_as_terminal() {
        let set = ToolSet::new().with(FinalAnswer);
        assert!(set.is_terminal(FINAL_ANSWER));
    }
}
