//! Hard failures of bundle generation

use std::path::PathBuf;
use thiserror::Error;

/// Errors that stop `generate` outright
///
/// Everything else (missing or malformed optional inputs) is logged and
/// skipped.
#[derive(Debug, Error)]
pub enum PackageError {
    /// The required `index.json` is absent
    #[error("Required input {0:?} not found")]
    MissingIndex(PathBuf),

    /// `index.json` exists but cannot be parsed
    #[error("Invalid index {path:?}: {source}")]
    InvalidIndex {
        /// Path of the index file
        path: PathBuf,
        /// Underlying JSON error
        #[source]
        source: serde_json::Error,
    },
}

/// Why a SKILL.md header is unusable
#[derive(Debug, Error)]
pub enum FrontmatterError {
    #[error("SKILL.md must start with a '---' line")]
    Missing,

    #[error("Frontmatter is not closed by a '---' line")]
    Unterminated,

    #[error("Frontmatter is not valid YAML: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error(
        "Skill name '{0}' must be 1-{max} lowercase letters, digits or hyphens",
        max = MAX_NAME_LENGTH
    )]
    InvalidName(String),

    #[error(
        "Skill description must be 1-{max} characters (was {0})",
        max = MAX_DESCRIPTION_LENGTH
    )]
    InvalidDescription(usize),
}

pub(crate) const MAX_NAME_LENGTH: usize = 64;
pub(crate) const MAX_DESCRIPTION_LENGTH: usize = 1024;
