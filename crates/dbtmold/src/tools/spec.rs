//! Structured tool descriptions.
//!
//! `ToolSpec` turns a purpose line, usage guidance, the failure conditions,
//! and worked examples into the single description string agents see in the
//! catalogue. Spelling out failure conditions up front saves a round trip on
//! calls that would only be rejected.

use crate::ToolDef;

/// A structured tool specification.
#[derive(Debug, Clone)]
pub struct ToolSpec {
    /// Tool name (must be unique within a ToolSet).
    pub name: String,
    /// One-sentence imperative purpose: "Divide a by b".
    pub purpose: String,
    /// When this tool should be used.
    pub when_to_use: String,
    /// Inputs the tool rejects. Empty when every well-typed input is accepted.
    pub fails_when: String,
    /// Parameter JSON Schema.
    pub parameters: serde_json::Value,
    /// Usage examples as (call, result) pairs.
    pub examples: Vec<UsageExample>,
    /// Description of the output.
    pub output_format: String,
}

/// A usage example for a tool.
#[derive(Debug, Clone)]
pub struct UsageExample {
    pub input: String,
    pub output: String,
}

impl ToolSpec {
    /// Create a new ToolSpec builder.
    pub fn builder(name: impl Into<String>) -> ToolSpecBuilder {
        ToolSpecBuilder {
            name: name.into(),
            purpose: None,
            when_to_use: None,
            fails_when: None,
            parameters: None,
            examples: Vec::new(),
            output_format: None,
        }
    }

    /// Render the description string published in the catalogue.
    pub fn to_description(&self) -> String {
        let mut desc = format!("{}.", self.purpose);
        desc.push_str(&format!("\nWhen to use: {}", self.when_to_use));
        if !self.fails_when.is_empty() {
            desc.push_str(&format!("\nFails when: {}", self.fails_when));
        }

        if !self.examples.is_empty() {
            desc.push_str("\nExamples:");
            for ex in &self.examples {
                desc.push_str(&format!("\n  - {} → {}", ex.input, ex.output));
            }
        }

        desc.push_str(&format!("\nOutput: {}", self.output_format));
        desc
    }

    pub fn to_tool_def(&self) -> ToolDef {
        ToolDef::new(
            self.name.clone(),
            self.to_description(),
            self.parameters.clone(),
        )
    }
}

/// Builder for a [`ToolSpec`]. Panics on `build()` if required fields are
/// missing, so an incomplete catalogue entry fails at registration time.
pub struct ToolSpecBuilder {
    name: String,
    purpose: Option<String>,
    when_to_use: Option<String>,
    fails_when: Option<String>,
    parameters: Option<serde_json::Value>,
    examples: Vec<UsageExample>,
    output_format: Option<String>,
}

impl ToolSpecBuilder {
    pub fn purpose(mut self, purpose: impl Into<String>) -> Self {
        self.purpose = Some(purpose.into());
        self
    }

    pub fn when_to_use(mut self, when: impl Into<String>) -> Self {
        self.when_to_use = Some(when.into());
        self
    }

    pub fn fails_when(mut self, condition: impl Into<String>) -> Self {
        self.fails_when = Some(condition.into());
        self
    }

    pub fn parameters(mut self, params: serde_json::Value) -> Self {
        self.parameters = Some(params);
        self
    }

    /// Derive the parameter schema from the argument type the tool parses.
    pub fn parameters_for<T: schemars::JsonSchema>(self) -> Self {
        self.parameters(crate::json_schema_for::<T>())
    }

    pub fn example(mut self, input: impl Into<String>, output: impl Into<String>) -> Self {
        self.examples.push(UsageExample {
            input: input.into(),
            output: output.into(),
        });
        self
    }

    pub fn output_format(mut self, format: impl Into<String>) -> Self {
        self.output_format = Some(format.into());
        self
    }

    /// Shortcut for `.build().to_tool_def()`.
    pub fn to_tool_def(self) -> ToolDef {
        self.build().to_tool_def()
    }

    /// Build the `ToolSpec`. Panics if required fields are missing.
    pub fn build(self) -> ToolSpec {
        ToolSpec {
            name: self.name,
            purpose: self.purpose.expect("ToolSpec requires 'purpose'"),
            when_to_use: self.when_to_use.expect("ToolSpec requires 'when_to_use'"),
            fails_when: self.fails_when.unwrap_or_default(),
            parameters: self.parameters.expect("ToolSpec requires 'parameters'"),
            examples: self.examples,
            output_format: self.output_format.unwrap_or_else(|| "A number".into()),
        }
    }
}
