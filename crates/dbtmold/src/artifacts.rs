//! Reference artifacts embedded verbatim into assembled prompts.
//!
//! Each generator kind has exactly one reference artifact: a real dbt file
//! the downstream model should imitate. Artifacts are re-read on every
//! request (no caching) and a failed read never propagates. The
//! [`ArtifactStore`] converts it into [`ReferenceArtifact::Missing`], whose
//! [`content()`](ReferenceArtifact::content) is a fixed placeholder sentence.

use std::fmt;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Text embedded in place of an artifact that could not be read.
pub const ARTIFACT_NOT_FOUND: &str =
    "Template file not found. Please check the template directory.";

/// Default template root: the `template/` directory shipped at the workspace
/// root, resolved at compile time so it does not depend on the working
/// directory.
pub const DEFAULT_TEMPLATE_DIR: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/../../template");

/// The fixed set of reference artifacts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ArtifactId {
    /// Incremental append-type SQL model.
    SqlModel,
    /// `schema.yml` declaring the append-type model.
    Schema,
    /// Model- and column-level dbt test configuration.
    TestConfig,
}

impl ArtifactId {
    pub const ALL: [ArtifactId; 3] = [
        ArtifactId::SqlModel,
        ArtifactId::Schema,
        ArtifactId::TestConfig,
    ];

    /// Logical path of the artifact, relative to the template root.
    pub fn relative_path(self) -> &'static str {
        match self {
            ArtifactId::SqlModel => "type-append/egn_cmn_cdp_bal_rpt_byday.sql",
            ArtifactId::Schema => "type-append/schema.yml",
            ArtifactId::TestConfig => "type-append/dbt_test_example.yml",
        }
    }

    /// Info string for the fenced block the artifact is embedded in.
    pub fn fence_language(self) -> &'static str {
        match self {
            ArtifactId::SqlModel => "sql",
            ArtifactId::Schema | ArtifactId::TestConfig => "yaml",
        }
    }
}

impl fmt::Display for ArtifactId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.relative_path())
    }
}

/// Result of loading a reference artifact. Immutable once loaded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReferenceArtifact {
    Found { id: ArtifactId, content: String },
    Missing { id: ArtifactId, reason: String },
}

impl ReferenceArtifact {
    pub fn id(&self) -> ArtifactId {
        match self {
            ReferenceArtifact::Found { id, .. } | ReferenceArtifact::Missing { id, .. } => *id,
        }
    }

    pub fn is_found(&self) -> bool {
        matches!(self, ReferenceArtifact::Found { .. })
    }

    /// Text to embed: the file content, or [`ARTIFACT_NOT_FOUND`].
    pub fn content(&self) -> &str {
        match self {
            ReferenceArtifact::Found { content, .. } => content,
            ReferenceArtifact::Missing { .. } => ARTIFACT_NOT_FOUND,
        }
    }
}

/// Reads reference artifacts from a template root directory.
#[derive(Debug, Clone)]
pub struct ArtifactStore {
    root: PathBuf,
}

impl ArtifactStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Absolute (or root-relative) filesystem path of an artifact.
    pub fn path_of(&self, id: ArtifactId) -> PathBuf {
        self.root.join(id.relative_path())
    }

    /// Load an artifact. Never fails: read errors become
    /// [`ReferenceArtifact::Missing`] and are logged at `warn`.
    pub fn load(&self, id: ArtifactId) -> ReferenceArtifact {
        let path = self.path_of(id);
        match std::fs::read_to_string(&path) {
            Ok(content) => {
                debug!("Loaded artifact {id} ({} bytes)", content.len());
                ReferenceArtifact::Found { id, content }
            }
            Err(e) => {
                warn!("Artifact {} unavailable: {e}", path.display());
                ReferenceArtifact::Missing {
                    id,
                    reason: e.to_string(),
                }
            }
        }
    }
}

impl Default for ArtifactStore {
    fn default() -> Self {
        Self::new(DEFAULT_TEMPLATE_DIR)
    }
}
