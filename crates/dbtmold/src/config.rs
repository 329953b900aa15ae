//! Process-level configuration.
//!
//! [`MoldConfig`] captures the settings shared by every front end (CLI and
//! HTTP server) and converts them into a ready [`ToolSet`] and
//! [`PromptAssembler`] via [`build_tool_set`](MoldConfig::build_tool_set) and
//! [`build_assembler`](MoldConfig::build_assembler).

use std::path::PathBuf;

use crate::artifacts::{ArtifactStore, DEFAULT_TEMPLATE_DIR};
use crate::prompts::PromptAssembler;
use crate::tools::ToolSet;

/// Environment variable overriding the template root.
pub const TEMPLATE_DIR_ENV: &str = "DBTMOLD_TEMPLATE_DIR";

/// Configuration for the tool registry and prompt assembler.
#[derive(Debug, Clone)]
pub struct MoldConfig {
    /// Directory holding the reference artifacts. Default: the shipped
    /// [`DEFAULT_TEMPLATE_DIR`].
    pub template_dir: PathBuf,
    /// Validate tool arguments against their JSON Schema. Default: `true`.
    pub validate_args: bool,
}

impl Default for MoldConfig {
    fn default() -> Self {
        Self {
            template_dir: PathBuf::from(DEFAULT_TEMPLATE_DIR),
            validate_args: true,
        }
    }
}

impl MoldConfig {
    pub fn with_template_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.template_dir = dir.into();
        self
    }

    pub fn with_arg_validation(mut self, enabled: bool) -> Self {
        self.validate_args = enabled;
        self
    }

    /// Build the standard [`ToolSet`]: arithmetic tools plus `final_answer`.
    pub fn build_tool_set(&self) -> ToolSet {
        ToolSet::new()
            .with_arg_validation(self.validate_args)
            .with_standard_tools()
    }

    /// Build a [`PromptAssembler`] reading artifacts from `template_dir`.
    pub fn build_assembler(&self) -> PromptAssembler {
        PromptAssembler::new(ArtifactStore::new(self.template_dir.clone()))
    }
}
