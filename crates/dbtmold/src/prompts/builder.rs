//! Block-structured instruction document builder.
//!
//! [`InstructionBuilder`] assembles the fixed document shape shared by every
//! generator kind: a preamble, bold-headed blocks (bulleted requirements, a
//! fenced reference artifact, free-form sections, numbered checklists), and a
//! closing instruction. Blocks are joined with blank lines in the order they
//! were added.

/// Builder for instruction documents.
///
/// Empty sections are skipped, with one exception: fenced blocks are always
/// emitted, since the reference artifact must appear even when its text is a
/// placeholder.
///
/// # Example
///
/// ```
/// use dbtmold::prompts::builder::InstructionBuilder;
///
/// let doc = InstructionBuilder::new("You are a dbt expert.")
///     .bullets("Requirements", &[("Model name", "fct_orders")])
///     .fenced("Reference template", "sql", "select 1")
///     .numbered("Guidelines", &["Use the source() macro"])
///     .closing("Produce the complete file.")
///     .build();
///
/// assert!(doc.contains("**Requirements:**\n- Model name: fct_orders"));
/// assert!(doc.contains("```sql\nselect 1\n```"));
/// assert!(doc.contains("**Guidelines:**\n1. Use the source() macro"));
/// assert!(doc.ends_with("Produce the complete file."));
/// ```
pub struct InstructionBuilder {
    blocks: Vec<String>,
}

impl InstructionBuilder {
    /// Start a document with a preamble, included as-is.
    pub fn new(preamble: impl Into<String>) -> Self {
        Self {
            blocks: vec![preamble.into()],
        }
    }

    /// Append a bulleted `Label: value` list under a bold heading.
    pub fn bullets(mut self, heading: &str, items: &[(&str, &str)]) -> Self {
        if items.is_empty() {
            return self;
        }
        let lines: Vec<String> = items
            .iter()
            .map(|(label, value)| format!("- {label}: {value}"))
            .collect();
        self.blocks
            .push(format!("**{heading}:**\n{}", lines.join("\n")));
        self
    }

    /// Append `content` verbatim inside a fenced code block.
    pub fn fenced(mut self, heading: &str, language: &str, content: &str) -> Self {
        self.blocks
            .push(format!("**{heading}:**\n```{language}\n{content}\n```"));
        self
    }

    /// Append free-form content under a bold heading. Skipped if empty.
    pub fn section(mut self, heading: &str, content: &str) -> Self {
        if !content.is_empty() {
            self.blocks.push(format!("**{heading}:**\n{content}"));
        }
        self
    }

    /// Append a numbered checklist under a bold heading, starting at 1.
    ///
    /// Items may span several lines; continuation lines are kept as written.
    pub fn numbered(mut self, heading: &str, items: &[&str]) -> Self {
        if items.is_empty() {
            return self;
        }
        let lines: Vec<String> = items
            .iter()
            .enumerate()
            .map(|(i, item)| format!("{}. {item}", i + 1))
            .collect();
        self.blocks
            .push(format!("**{heading}:**\n{}", lines.join("\n")));
        self
    }

    /// Append a closing paragraph with no heading. Skipped if empty.
    pub fn closing(mut self, text: &str) -> Self {
        if !text.is_empty() {
            self.blocks.push(text.to_string());
        }
        self
    }

    /// Join all blocks with blank lines.
    pub fn build(self) -> String {
        self.blocks.join("\n\n")
    }
}
