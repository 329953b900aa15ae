//! Convenience re-exports for common `dbtmold` types.
//!
//! ```ignore
//! use dbtmold::prelude::*;
//! ```
//!
//! Pulls in the configuration factory, the tool dispatcher and its result
//! types, and the prompt assembler with its parameter structs. Individual
//! arithmetic functions and the instruction builder are left out; import
//! those from their modules directly.

// ── Core types ──────────────────────────────────────────────────────
pub use crate::config::MoldConfig;
pub use crate::error::{ErrorKind, PromptError, ToolError};
pub use crate::{Message, MessageRole, ToolDef, json_schema_for};

// ── Artifacts ───────────────────────────────────────────────────────
pub use crate::artifacts::{ArtifactId, ArtifactStore, ReferenceArtifact};

// ── Prompts ─────────────────────────────────────────────────────────
pub use crate::prompts::{
    AssembledPrompt, PromptAssembler, PromptKind, PromptRequest, SchemaParams, SqlModelParams,
    TestConfigParams, TopicParams,
};

// ── Tools ───────────────────────────────────────────────────────────
pub use crate::tools::spec::ToolSpec;
pub use crate::tools::{
    FINAL_ANSWER, FinalAnswer, FnTool, Tool, ToolFuture, ToolInvocation, ToolResult, ToolSet,
    ToolValue, parse_tool_args,
};
