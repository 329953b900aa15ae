//! Prompt assembly and deterministic tools for dbt-generating agents.
//!
//! `dbtmold` serves two independent request families to an automated agent:
//!
//! - **Prompt generation.** The [`PromptAssembler`](prompts::PromptAssembler)
//!   validates caller parameters, reads a fixed reference artifact (a dbt SQL
//!   model, a `schema.yml`, or a test configuration) through the
//!   [`ArtifactStore`](artifacts::ArtifactStore), and produces a single
//!   instruction document wrapped as an ordered list of role-tagged
//!   [`Message`]s.
//! - **Tool calls.** The [`ToolSet`](tools::ToolSet) holds a fixed catalogue
//!   of pure arithmetic operations plus a terminal `final_answer` tool, and
//!   dispatches invocations by name with JSON Schema argument validation.
//!
//! Both paths are stateless. A missing reference artifact never fails a prompt
//! request; the document embeds a placeholder sentence instead. Empty required
//! parameters and out-of-domain tool arguments surface as typed failures
//! carrying an [`ErrorKind`].
//!
//! # Example
//!
//! ```ignore
//! use dbtmold::prelude::*;
//!
//! let config = MoldConfig::default().with_template_dir("template");
//! let tools = config.build_tool_set();
//! let assembler = config.build_assembler();
//!
//! let value = tools.dispatch("lcm", r#"{"a": 4, "b": 6}"#).await?;
//! assert_eq!(value, ToolValue::Integer(12));
//!
//! let prompt = assembler.build_model_prompt(&SqlModelParams {
//!     table_name: "cdp_bal_rpt_byday".into(),
//!     description: "Daily balance report".into(),
//!     source_tables: "core.accounts, core.balances".into(),
//!     business_logic: None,
//! })?;
//! assert_eq!(prompt.messages.len(), 1);
//! ```
//!
//! # Modules
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`artifacts`] | [`ArtifactStore`](artifacts::ArtifactStore) and [`ReferenceArtifact`](artifacts::ReferenceArtifact) |
//! | [`prompts`] | [`PromptAssembler`](prompts::PromptAssembler), request/parameter types, prompt catalogue |
//! | [`tools`] | [`Tool`](tools::Tool) trait, [`ToolSet`](tools::ToolSet) dispatcher, arithmetic and finalize tools |
//! | [`error`] | [`ToolError`], [`PromptError`], [`ErrorKind`] |
//! | [`config`] | [`MoldConfig`](config::MoldConfig) factory for the tool set and assembler |

pub mod artifacts;
pub mod config;
pub mod error;
pub mod prelude;
pub mod prompts;
pub mod tools;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

pub use error::{ErrorKind, PromptError, ToolError};

// Re-export schemars for downstream crates.
pub use schemars;

// ── Schema generation ──────────────────────────────────────────────

/// Generate a JSON Schema `serde_json::Value` from a type that implements
/// `schemars::JsonSchema`. Tool parameter schemas are always derived this way
/// so the declared shape and the deserialization logic cannot diverge.
///
/// # Example
///
/// ```
/// use dbtmold::json_schema_for;
/// use schemars::JsonSchema;
/// use serde::Deserialize;
///
/// #[derive(Deserialize, JsonSchema)]
/// struct PairArgs {
///     a: f64,
///     b: f64,
/// }
///
/// let schema = json_schema_for::<PairArgs>();
/// assert_eq!(schema["type"], "object");
/// assert!(schema["required"].as_array().unwrap().contains(&"a".into()));
/// ```
pub fn json_schema_for<T: JsonSchema>() -> serde_json::Value {
    let schema = schemars::schema_for!(T);
    serde_json::to_value(schema)
        .unwrap_or_else(|_| serde_json::json!({"type": "object", "properties": {}}))
}

// ── Message types ──────────────────────────────────────────────────

/// Role of a message in an assembled prompt.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum MessageRole {
    User,
}

/// A role-tagged text message.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct Message {
    pub role: MessageRole,
    pub content: String,
}

impl Message {
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: MessageRole::User,
            content: content.into(),
        }
    }
}

// ── Tool types ─────────────────────────────────────────────────────

/// The type of a tool definition. Currently always `Function`.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub enum ToolType {
    #[serde(rename = "function")]
    Function,
}

/// Tool definition published in the catalogue (OpenAI function-calling format).
#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct ToolDef {
    #[serde(rename = "type")]
    pub tool_type: ToolType,
    pub function: FunctionDef,
}

impl ToolDef {
    /// Create a function-calling tool definition.
    pub fn new(
        name: impl Into<String>,
        description: impl Into<String>,
        parameters: serde_json::Value,
    ) -> Self {
        Self {
            tool_type: ToolType::Function,
            function: FunctionDef {
                name: name.into(),
                description: description.into(),
                parameters,
            },
        }
    }
}

#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct FunctionDef {
    pub name: String,
    pub description: String,
    pub parameters: serde_json::Value,
}
