//! `explain-topic`: a one-line question about a concept. No artifact.

use super::{PromptArgument, PromptKind, PromptTemplate, require};
use crate::error::PromptError;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, JsonSchema, Clone, Debug, Default, PartialEq, Eq)]
#[serde(default, deny_unknown_fields)]
pub struct TopicParams {
    /// The concept to explain, e.g. "incremental models".
    pub topic: String,
}

impl PromptTemplate for TopicParams {
    const KIND: PromptKind = PromptKind::ExplainTopic;
    const DESCRIPTION: &'static str =
        "Ask for an explanation of a dbt or data platform concept.";
    const ARGUMENTS: &'static [PromptArgument] = &[PromptArgument {
        name: "topic",
        description: "The concept to explain",
        required: true,
    }];

    fn validate(&self) -> Result<(), PromptError> {
        require(Self::KIND, "topic", &self.topic)
    }

    fn render(&self, _reference: &str) -> String {
        format!(
            "Can you please explain the concept of '{}'?",
            self.topic.trim()
        )
    }
}
