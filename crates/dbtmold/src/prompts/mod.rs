//! Prompt assembly for dbt code generation.
//!
//! Each generator kind pairs a typed parameter struct with a fixed reference
//! artifact and a fixed guidance checklist. Assembly always follows the same
//! steps:
//!
//! 1. validate that required parameters are non-empty,
//! 2. resolve empty optional parameters to their documented defaults,
//! 3. load the kind's reference artifact (a missing file degrades to a
//!    placeholder sentence, never an error),
//! 4. render the instruction document with [`InstructionBuilder`],
//! 5. wrap it as the single `user` [`Message`] of an [`AssembledPrompt`].
//!
//! | Kind | Params | Artifact |
//! |------|--------|----------|
//! | `sql-model` | [`SqlModelParams`] | [`ArtifactId::SqlModel`] |
//! | `schema` | [`SchemaParams`] | [`ArtifactId::Schema`] |
//! | `test-config` | [`TestConfigParams`] | [`ArtifactId::TestConfig`] |
//! | `explain-topic` | [`TopicParams`] | none |
//!
//! [`InstructionBuilder`]: builder::InstructionBuilder

pub mod builder;
pub mod schema;
pub mod sql_model;
pub mod test_config;
pub mod topic;

pub use schema::SchemaParams;
pub use sql_model::SqlModelParams;
pub use test_config::TestConfigParams;
pub use topic::TopicParams;

use crate::Message;
use crate::artifacts::{ArtifactId, ArtifactStore};
use crate::error::PromptError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use tracing::{debug, info};

// ── Kinds ──────────────────────────────────────────────────────────

/// The prompt generators.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[serde(rename_all = "kebab-case")]
pub enum PromptKind {
    SqlModel,
    Schema,
    TestConfig,
    ExplainTopic,
}

impl PromptKind {
    pub const ALL: [PromptKind; 4] = [
        PromptKind::SqlModel,
        PromptKind::Schema,
        PromptKind::TestConfig,
        PromptKind::ExplainTopic,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            PromptKind::SqlModel => "sql-model",
            PromptKind::Schema => "schema",
            PromptKind::TestConfig => "test-config",
            PromptKind::ExplainTopic => "explain-topic",
        }
    }

    /// The reference artifact embedded by this kind, if any.
    pub fn artifact(self) -> Option<ArtifactId> {
        match self {
            PromptKind::SqlModel => Some(ArtifactId::SqlModel),
            PromptKind::Schema => Some(ArtifactId::Schema),
            PromptKind::TestConfig => Some(ArtifactId::TestConfig),
            PromptKind::ExplainTopic => None,
        }
    }
}

impl fmt::Display for PromptKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PromptKind {
    type Err = PromptError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        PromptKind::ALL
            .into_iter()
            .find(|k| k.as_str() == s)
            .ok_or_else(|| PromptError::UnknownKind(s.to_string()))
    }
}

// ── Templates ──────────────────────────────────────────────────────

/// One catalogue entry in a prompt's argument list.
#[derive(Serialize, Clone, Copy, Debug, PartialEq, Eq)]
pub struct PromptArgument {
    pub name: &'static str,
    pub description: &'static str,
    pub required: bool,
}

/// Parameters for one generator kind, plus the text that kind renders.
pub trait PromptTemplate {
    const KIND: PromptKind;
    const DESCRIPTION: &'static str;
    const ARGUMENTS: &'static [PromptArgument];

    /// Check required parameters. Runs before the artifact is loaded.
    fn validate(&self) -> Result<(), PromptError>;

    /// Render the instruction document around the artifact text (empty for
    /// kinds without an artifact). Only called after `validate` succeeds.
    fn render(&self, reference: &str) -> String;
}

/// Fail with `MissingParameter` when `value` is empty or whitespace.
pub(crate) fn require(
    kind: PromptKind,
    parameter: &'static str,
    value: &str,
) -> Result<(), PromptError> {
    if value.trim().is_empty() {
        Err(PromptError::MissingParameter {
            kind: kind.as_str(),
            parameter,
        })
    } else {
        Ok(())
    }
}

/// The trimmed value, or `default` when absent or blank.
pub(crate) fn or_default<'a>(value: &'a Option<String>, default: &'a str) -> &'a str {
    match value.as_deref().map(str::trim) {
        Some(v) if !v.is_empty() => v,
        _ => default,
    }
}

// ── Requests and results ───────────────────────────────────────────

/// A prompt-generation request, keyed by generator kind.
///
/// ```
/// use dbtmold::prompts::{PromptKind, PromptRequest};
///
/// let request: PromptRequest = serde_json::from_str(
///     r#"{"kind": "schema", "model_name": "fct_orders", "description": "Orders"}"#,
/// ).unwrap();
/// assert_eq!(request.kind(), PromptKind::Schema);
/// ```
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub enum PromptRequest {
    SqlModel(SqlModelParams),
    Schema(SchemaParams),
    TestConfig(TestConfigParams),
    ExplainTopic(TopicParams),
}

impl PromptRequest {
    pub fn kind(&self) -> PromptKind {
        match self {
            PromptRequest::SqlModel(_) => PromptKind::SqlModel,
            PromptRequest::Schema(_) => PromptKind::Schema,
            PromptRequest::TestConfig(_) => PromptKind::TestConfig,
            PromptRequest::ExplainTopic(_) => PromptKind::ExplainTopic,
        }
    }

    /// Build a request from a kind name and a JSON object of parameters, as
    /// received by a transport.
    pub fn from_parts(kind: &str, params: serde_json::Value) -> Result<Self, PromptError> {
        let kind: PromptKind = kind.parse()?;
        let invalid = |e: serde_json::Error| PromptError::InvalidParameters {
            kind: kind.as_str(),
            reason: e.to_string(),
        };
        Ok(match kind {
            PromptKind::SqlModel => {
                PromptRequest::SqlModel(serde_json::from_value(params).map_err(invalid)?)
            }
            PromptKind::Schema => {
                PromptRequest::Schema(serde_json::from_value(params).map_err(invalid)?)
            }
            PromptKind::TestConfig => {
                PromptRequest::TestConfig(serde_json::from_value(params).map_err(invalid)?)
            }
            PromptKind::ExplainTopic => {
                PromptRequest::ExplainTopic(serde_json::from_value(params).map_err(invalid)?)
            }
        })
    }
}

/// An assembled prompt: always at least one message, in stable order.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct AssembledPrompt {
    pub kind: PromptKind,
    pub messages: Vec<Message>,
}

impl AssembledPrompt {
    /// The instruction text of the first message.
    pub fn text(&self) -> &str {
        self.messages
            .first()
            .map(|m| m.content.as_str())
            .unwrap_or_default()
    }
}

// ── Catalogue ──────────────────────────────────────────────────────

/// Discovery entry for one prompt kind.
#[derive(Serialize, Clone, Debug)]
pub struct PromptDef {
    pub name: PromptKind,
    pub description: &'static str,
    pub arguments: &'static [PromptArgument],
}

fn def_of<T: PromptTemplate>() -> PromptDef {
    PromptDef {
        name: T::KIND,
        description: T::DESCRIPTION,
        arguments: T::ARGUMENTS,
    }
}

/// Every prompt kind with its description and arguments.
pub fn catalogue() -> Vec<PromptDef> {
    vec![
        def_of::<SqlModelParams>(),
        def_of::<SchemaParams>(),
        def_of::<TestConfigParams>(),
        def_of::<TopicParams>(),
    ]
}

// ── Assembler ──────────────────────────────────────────────────────

/// Validates parameters, loads reference artifacts, and assembles prompts.
#[derive(Debug, Clone, Default)]
pub struct PromptAssembler {
    store: ArtifactStore,
}

impl PromptAssembler {
    pub fn new(store: ArtifactStore) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &ArtifactStore {
        &self.store
    }

    pub fn build_model_prompt(
        &self,
        params: &SqlModelParams,
    ) -> Result<AssembledPrompt, PromptError> {
        self.assemble(params)
    }

    pub fn build_schema_prompt(
        &self,
        params: &SchemaParams,
    ) -> Result<AssembledPrompt, PromptError> {
        self.assemble(params)
    }

    pub fn build_test_prompt(
        &self,
        params: &TestConfigParams,
    ) -> Result<AssembledPrompt, PromptError> {
        self.assemble(params)
    }

    pub fn build_topic_prompt(&self, params: &TopicParams) -> Result<AssembledPrompt, PromptError> {
        self.assemble(params)
    }

    /// Assemble any request.
    pub fn build(&self, request: &PromptRequest) -> Result<AssembledPrompt, PromptError> {
        match request {
            PromptRequest::SqlModel(p) => self.build_model_prompt(p),
            PromptRequest::Schema(p) => self.build_schema_prompt(p),
            PromptRequest::TestConfig(p) => self.build_test_prompt(p),
            PromptRequest::ExplainTopic(p) => self.build_topic_prompt(p),
        }
    }

    fn assemble<T: PromptTemplate>(&self, params: &T) -> Result<AssembledPrompt, PromptError> {
        params.validate()?;

        let text = match T::KIND.artifact() {
            Some(id) => {
                let artifact = self.store.load(id);
                debug!(
                    "[prompt] {} using artifact {id} (found: {})",
                    T::KIND,
                    artifact.is_found()
                );
                params.render(artifact.content())
            }
            None => params.render(""),
        };

        info!("[prompt] assembled {} ({} chars)", T::KIND, text.len());
        Ok(AssembledPrompt {
            kind: T::KIND,
            messages: vec![Message::user(text)],
        })
    }
}
