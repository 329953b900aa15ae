//! Tool abstraction and dispatch.
//!
//! The [`Tool`] trait defines the interface every catalogue entry implements:
//! a static definition (name, description, JSON Schema parameters) and an
//! async `execute` method returning a [`ToolResult`]. Tools are collected into
//! a [`ToolSet`], built once at startup and read-only afterwards, which
//! resolves invocation names, validates arguments, and logs each call.

use crate::ToolDef;
use crate::error::ToolError;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashSet};
use std::fmt;
use std::future::Future;
use std::pin::Pin;
use tracing::{debug, info, trace, warn};

// ── Results ────────────────────────────────────────────────────────

/// A successful tool result. Each tool always returns the same variant.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(untagged)]
pub enum ToolValue {
    Integer(i64),
    Number(f64),
    Text(String),
}

impl fmt::Display for ToolValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ToolValue::Integer(n) => write!(f, "{n}"),
            ToolValue::Number(x) => write!(f, "{x}"),
            ToolValue::Text(s) => f.write_str(s),
        }
    }
}

/// Outcome of a single tool invocation.
pub type ToolResult = Result<ToolValue, ToolError>;

/// Boxed future returned by [`Tool::execute`].
pub type ToolFuture<'a> = Pin<Box<dyn Future<Output = ToolResult> + Send + 'a>>;

/// A named invocation with its JSON arguments, as received from a caller.
#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct ToolInvocation {
    pub name: String,
    #[serde(default = "empty_arguments")]
    pub arguments: serde_json::Value,
}

fn empty_arguments() -> serde_json::Value {
    serde_json::json!({})
}

impl ToolInvocation {
    pub fn new(name: impl Into<String>, arguments: serde_json::Value) -> Self {
        Self {
            name: name.into(),
            arguments,
        }
    }
}

// ── Tool trait ─────────────────────────────────────────────────────

/// An operation an agent can invoke by name.
///
/// Implementors provide a static [`Tool::definition`] and an async
/// [`Tool::execute`] that receives the raw JSON arguments string. Domain
/// violations are returned as [`ToolError`]s, never raised as panics.
pub trait Tool: Send + Sync {
    /// The tool definition published in the catalogue.
    fn definition(&self) -> ToolDef;

    /// Execute the tool with the given raw JSON arguments string.
    ///
    /// Uses a boxed future so that the trait is dyn-compatible.
    fn execute(&self, arguments: &str) -> ToolFuture<'_>;

    /// The tool's name (delegates to the definition).
    fn name(&self) -> String {
        self.definition().function.name.clone()
    }

    /// Whether a successful call ends the agent's tool-use sequence.
    fn is_terminal(&self) -> bool {
        false
    }
}

// ── ToolSet ────────────────────────────────────────────────────────

/// A catalogue of tools dispatched by name.
///
/// # Example
///
/// ```ignore
/// let tools = ToolSet::new()
///     .with_arithmetic_tools()
///     .with(FinalAnswer);
///
/// let value = tools.dispatch("divide", r#"{"a": 9, "b": 3}"#).await?;
/// assert_eq!(value, ToolValue::Number(3.0));
/// ```
pub struct ToolSet {
    tools: BTreeMap<String, Box<dyn Tool>>,
    /// Whether to validate tool arguments against JSON Schema before execution.
    validate_args: bool,
    /// Tool names populated from `Tool::is_terminal()`.
    terminal_tools: HashSet<String>,
}

impl fmt::Debug for ToolSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ToolSet")
            .field("tools", &self.tools.keys().collect::<Vec<_>>())
            .field("validate_args", &self.validate_args)
            .finish()
    }
}

impl ToolSet {
    /// Create an empty tool set with argument validation enabled.
    pub fn new() -> Self {
        Self {
            tools: BTreeMap::new(),
            validate_args: true,
            terminal_tools: HashSet::new(),
        }
    }

    /// Toggle JSON Schema argument validation before tool execution.
    ///
    /// Typed argument parsing still rejects malformed input when disabled;
    /// the schema pass only adds a complete list of violations.
    pub fn with_arg_validation(mut self, enabled: bool) -> Self {
        self.validate_args = enabled;
        self
    }

    /// Register a tool. Replaces any existing tool with the same name.
    pub fn register(&mut self, tool: impl Tool + 'static) {
        let name = tool.name();
        if tool.is_terminal() {
            self.terminal_tools.insert(name.clone());
        } else {
            self.terminal_tools.remove(&name);
        }
        self.tools.insert(name, Box::new(tool));
    }

    /// Register a tool (builder pattern).
    pub fn with(mut self, tool: impl Tool + 'static) -> Self {
        self.register(tool);
        self
    }

    /// All tool definitions, sorted by name.
    pub fn definitions(&self) -> Vec<ToolDef> {
        self.tools.values().map(|t| t.definition()).collect()
    }

    /// Registered tool names, sorted.
    pub fn names(&self) -> Vec<&str> {
        self.tools.keys().map(String::as_str).collect()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.tools.contains_key(name)
    }

    /// Number of registered tools.
    pub fn len(&self) -> usize {
        self.tools.len()
    }

    /// Whether the set is empty.
    pub fn is_empty(&self) -> bool {
        self.tools.is_empty()
    }

    /// Whether a tool ends the agent's tool-use sequence.
    pub fn is_terminal(&self, name: &str) -> bool {
        self.terminal_tools.contains(name)
    }

    /// Resolve `name`, validate `arguments`, and execute the tool.
    ///
    /// Unknown names yield [`ErrorKind::UnknownOperation`](crate::ErrorKind). Malformed JSON,
    /// schema violations, and domain violations yield
    /// [`ErrorKind::Validation`](crate::ErrorKind). An empty argument string is treated as `{}`.
    pub async fn dispatch(&self, name: &str, arguments: &str) -> ToolResult {
        let Some(tool) = self.tools.get(name) else {
            warn!("[tool] unknown tool '{name}'");
            return Err(ToolError::unknown_operation(name));
        };

        let arguments = if arguments.trim().is_empty() {
            "{}"
        } else {
            arguments
        };

        if self.validate_args {
            validate_tool_arguments(tool.as_ref(), arguments)?;
        }

        log_tool_call(name, arguments);
        let start = std::time::Instant::now();
        let result = tool.execute(arguments).await;
        let elapsed = start.elapsed();

        match &result {
            Ok(value) => debug!(
                "Tool {name} completed in {:.3}ms: {value}",
                elapsed.as_secs_f64() * 1000.0
            ),
            Err(e) => debug!(
                "Tool {name} failed in {:.3}ms: {e}",
                elapsed.as_secs_f64() * 1000.0
            ),
        }
        result
    }

    /// Dispatch with arguments already parsed as JSON.
    pub async fn dispatch_value(&self, name: &str, arguments: &serde_json::Value) -> ToolResult {
        self.dispatch(name, &arguments.to_string()).await
    }

    /// Dispatch independent invocations concurrently. Results are returned in
    /// the same order as `calls`.
    pub async fn dispatch_all(&self, calls: &[ToolInvocation]) -> Vec<ToolResult> {
        let futures: Vec<_> = calls
            .iter()
            .map(|call| self.dispatch_value(&call.name, &call.arguments))
            .collect();
        futures::future::join_all(futures).await
    }
}

impl Default for ToolSet {
    fn default() -> Self {
        Self::new()
    }
}

// ── FnTool ────────────────────────────────────────────────────────

/// Type-erased async handler for [`FnTool`].
type ErasedToolHandler = Box<dyn Fn(String) -> ToolFuture<'static> + Send + Sync>;

/// A closure-based tool that auto-parses arguments and delegates to a handler.
///
/// The generic constructors perform type erasure so `FnTool` is a concrete,
/// dyn-compatible type. Argument parse errors become validation failures.
///
/// # Example
///
/// ```ignore
/// #[derive(Deserialize, JsonSchema)]
/// struct PairArgs { a: f64, b: f64 }
///
/// let tool = FnTool::pure(
///     ToolDef::new("subtract", "Subtract b from a", json_schema_for::<PairArgs>()),
///     |args: PairArgs| Ok(ToolValue::Number(args.a - args.b)),
/// );
/// ```
pub struct FnTool {
    def: ToolDef,
    handler: ErasedToolHandler,
    terminal: bool,
}

impl FnTool {
    /// Create a tool from an async handler.
    pub fn new<A, F, Fut>(def: ToolDef, handler: F) -> Self
    where
        A: serde::de::DeserializeOwned + Send + 'static,
        F: Fn(A) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = ToolResult> + Send + 'static,
    {
        let erased = move |raw: String| -> ToolFuture<'static> {
            match parse_tool_args::<A>(&raw) {
                Ok(args) => Box::pin(handler(args)),
                Err(e) => Box::pin(async move { Err(e) }),
            }
        };

        Self {
            def,
            handler: Box::new(erased),
            terminal: false,
        }
    }

    /// Create a tool from a synchronous, pure handler.
    pub fn pure<A, F>(def: ToolDef, handler: F) -> Self
    where
        A: serde::de::DeserializeOwned + Send + 'static,
        F: Fn(A) -> ToolResult + Send + Sync + 'static,
    {
        Self::new(def, move |args: A| {
            let result = handler(args);
            async move { result }
        })
    }

    /// Mark this tool as terminal (builder pattern).
    pub fn terminal(mut self, is_terminal: bool) -> Self {
        self.terminal = is_terminal;
        self
    }
}

impl Tool for FnTool {
    fn definition(&self) -> ToolDef {
        self.def.clone()
    }

    fn execute(&self, arguments: &str) -> ToolFuture<'_> {
        (self.handler)(arguments.to_string())
    }

    fn is_terminal(&self) -> bool {
        self.terminal
    }
}

impl fmt::Debug for FnTool {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FnTool")
            .field("name", &self.def.function.name)
            .field("terminal", &self.terminal)
            .finish()
    }
}

// ── Helpers ────────────────────────────────────────────────────────

/// Validate tool arguments against the tool's declared JSON Schema.
///
/// The error message lists every violation so the caller can fix the call in
/// one round.
pub fn validate_tool_arguments(tool: &dyn Tool, arguments: &str) -> Result<(), ToolError> {
    let name = tool.name();
    let args_value: serde_json::Value = serde_json::from_str(arguments).map_err(|e| {
        ToolError::validation(format!("invalid JSON arguments for tool '{name}': {e}"))
    })?;

    let schema = tool.definition().function.parameters;

    let validator = match jsonschema::validator_for(&schema) {
        Ok(v) => v,
        Err(e) => {
            // A broken schema is a registration bug; typed parsing still guards execution.
            warn!("Tool {name} has an invalid parameter schema: {e}");
            return Ok(());
        }
    };

    let errors: Vec<String> = validator
        .iter_errors(&args_value)
        .map(|e| format!("  - {}: {e}", e.instance_path()))
        .collect();

    if errors.is_empty() {
        Ok(())
    } else {
        Err(ToolError::validation(format!(
            "argument validation failed for tool '{name}':\n{}",
            errors.join("\n")
        )))
    }
}

/// Log a tool call at INFO level with a truncated preview of arguments.
pub fn log_tool_call(name: &str, arguments: &str) {
    let args_preview: String = arguments.chars().take(120).collect();
    info!(
        "[tool] {}({args_preview}{})",
        name,
        if arguments.chars().count() > 120 { "..." } else { "" }
    );
    trace!("[tool] {name} arguments: {arguments}");
}

/// Parse raw JSON arguments into a typed struct.
pub fn parse_tool_args<T: serde::de::DeserializeOwned>(arguments: &str) -> Result<T, ToolError> {
    serde_json::from_str(arguments).map_err(|e| {
        ToolError::validation(format!(
            "invalid tool arguments: {e}. \
             Provide JSON matching the tool's parameter schema."
        ))
    })
}

// ── Tests ──────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ErrorKind;
    use schemars::JsonSchema;

    #[derive(Deserialize, JsonSchema)]
    #[serde(deny_unknown_fields)]
    struct EchoArgs {
        text: String,
    }

    fn echo_tool() -> FnTool {
        FnTool::pure(
            ToolDef::new("echo", "Echo the input", crate::json_schema_for::<EchoArgs>()),
            |args: EchoArgs| Ok(ToolValue::Text(args.text)),
        )
    }

    fn fail_tool() -> FnTool {
        FnTool::pure(
            ToolDef::new(
                "fail",
                "Always fails",
                serde_json::json!({"type": "object", "properties": {}}),
            ),
            |_: serde_json::Value| Err(ToolError::validation("intentional failure")),
        )
    }

    #[test]
    fn tool_name_from_definition() {
        assert_eq!(echo_tool().name(), "echo");
    }

    #[test]
    fn toolset_register_and_definitions_sorted() {
        let set = ToolSet::new().with(fail_tool()).with(echo_tool());
        assert_eq!(set.len(), 2);
        let names: Vec<String> = set
            .definitions()
            .iter()
            .map(|d| d.function.name.clone())
            .collect();
        assert_eq!(names, vec!["echo", "fail"]);
        assert_eq!(set.names(), vec!["echo", "fail"]);
    }

    #[tokio::test]
    async fn dispatch_known_tool() {
        let set = ToolSet::new().with(echo_tool());
        let result = set.dispatch("echo", r#"{"text": "hello"}"#).await;
        assert_eq!(result, Ok(ToolValue::Text("hello".into())));
    }

    #[tokio::test]
    async fn dispatch_unknown_tool() {
        let set = ToolSet::new().with(echo_tool());
        let err = set.dispatch("nonexistent", "{}").await.unwrap_err();
        assert_eq!(err.kind, ErrorKind::UnknownOperation);
        assert!(err.message.contains("nonexistent"));
    }

    #[tokio::test]
    async fn dispatch_propagates_tool_failure() {
        let set = ToolSet::new().with(fail_tool());
        let err = set.dispatch("fail", "{}").await.unwrap_err();
        assert_eq!(err.kind, ErrorKind::Validation);
        assert_eq!(err.message, "intentional failure");
    }

    #[tokio::test]
    async fn dispatch_rejects_malformed_json() {
        let set = ToolSet::new().with(echo_tool());
        let err = set.dispatch("echo", "{not json").await.unwrap_err();
        assert_eq!(err.kind, ErrorKind::Validation);
        assert!(err.message.contains("invalid JSON"));
    }

    #[tokio::test]
    async fn dispatch_rejects_schema_mismatch() {
        let set = ToolSet::new().with(echo_tool());
        let err = set.dispatch("echo", r#"{"text": 5}"#).await.unwrap_err();
        assert_eq!(err.kind, ErrorKind::Validation);
        assert!(err.message.contains("argument validation failed"));
    }

    #[tokio::test]
    async fn dispatch_rejects_unknown_fields() {
        let set = ToolSet::new().with(echo_tool());
        let err = set
            .dispatch("echo", r#"{"text": "a", "extra": 1}"#)
            .await
            .unwrap_err();
        assert_eq!(err.kind, ErrorKind::Validation);
    }

    #[tokio::test]
    async fn typed_parsing_guards_when_schema_validation_disabled() {
        let set = ToolSet::new().with_arg_validation(false).with(echo_tool());
        let err = set.dispatch("echo", "{}").await.unwrap_err();
        assert_eq!(err.kind, ErrorKind::Validation);
        assert!(err.message.contains("invalid tool arguments"));
    }

    #[tokio::test]
    async fn blank_arguments_are_an_empty_object() {
        let set = ToolSet::new().with(fail_tool());
        let err = set.dispatch("fail", "  ").await.unwrap_err();
        assert_eq!(err.message, "intentional failure");
    }

    #[tokio::test]
    async fn dispatch_all_preserves_order() {
        let set = ToolSet::new().with(echo_tool());
        let calls = vec![
            ToolInvocation::new("echo", serde_json::json!({"text": "one"})),
            ToolInvocation::new("missing", serde_json::json!({})),
            ToolInvocation::new("echo", serde_json::json!({"text": "three"})),
        ];
        let results = set.dispatch_all(&calls).await;
        assert_eq!(results[0], Ok(ToolValue::Text("one".into())));
        assert_eq!(
            results[1].as_ref().unwrap_err().kind,
            ErrorKind::UnknownOperation
        );
        assert_eq!(results[2], Ok(ToolValue::Text("three".into())));
    }

    #[test]
    fn terminal_flag_tracked_on_register() {
        let set = ToolSet::new()
            .with(echo_tool().terminal(true))
            .with(fail_tool());
        assert!(set.is_terminal("echo"));
        assert!(!set.is_terminal("fail"));

        // Re-registering a non-terminal tool under the same name clears the flag.
        let set = set.with(echo_tool());
        assert!(!set.is_terminal("echo"));
    }

    #[test]
    fn invocation_defaults_to_empty_arguments() {
        let call: ToolInvocation = serde_json::from_str(r#"{"name": "final_answer"}"#).unwrap();
        assert_eq!(call.arguments, serde_json::json!({}));
    }

    #[test]
    fn tool_value_display_and_serialization() {
        assert_eq!(ToolValue::Number(1024.0).to_string(), "1024");
        assert_eq!(ToolValue::Integer(12).to_string(), "12");
        assert_eq!(
            serde_json::to_value(ToolValue::Text("done".into())).unwrap(),
            "done"
        );
        assert_eq!(serde_json::to_value(ToolValue::Integer(7)).unwrap(), 7);
    }
}
