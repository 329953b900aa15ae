//! Tool catalogue and dispatch.
//!
//! Every callable operation is a [`Tool`] implementor. Tools are collected
//! into a [`ToolSet`], which resolves names, validates arguments against each
//! tool's JSON Schema, and returns a [`ToolResult`].
//!
//! # Submodules
//!
//! - [`core`]: [`Tool`] trait, [`ToolSet`] dispatcher, [`FnTool`], result types.
//! - [`arithmetic`]: the pure numeric catalogue (`sum`, `divide`, `lcm`, ...).
//!   Register all at once with [`ToolSet::with_arithmetic_tools()`].
//! - [`finalize`]: the terminal [`FinalAnswer`] tool.
//! - [`spec`]: [`ToolSpec`](spec::ToolSpec) builder for catalogue descriptions.

pub mod arithmetic;
pub mod core;
pub mod finalize;
pub mod spec;

pub use core::{
    FnTool, Tool, ToolFuture, ToolInvocation, ToolResult, ToolSet, ToolValue, log_tool_call,
    parse_tool_args, validate_tool_arguments,
};
pub use finalize::{FINAL_ANSWER, FinalAnswer};

impl ToolSet {
    /// The standard catalogue: every arithmetic tool plus `final_answer`.
    pub fn with_standard_tools(self) -> Self {
        self.with_arithmetic_tools().with(FinalAnswer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn standard_catalogue_has_twelve_tools() {
        let set = ToolSet::new().with_standard_tools();
        assert_eq!(set.len(), 12);
        assert!(set.contains(FINAL_ANSWER));
        assert!(set.is_terminal(FINAL_ANSWER));
        assert_eq!(set.definitions().len(), 12);
    }
}
