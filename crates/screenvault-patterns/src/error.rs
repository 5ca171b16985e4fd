//! Error types for pattern library loading

use thiserror::Error;

/// Pattern library errors
#[derive(Debug, Error)]
pub enum PatternError {
    /// A label pattern is not a valid regex
    #[error("Pattern '{slug}' has invalid label regex '{pattern}': {source}")]
    InvalidRegex {
        /// Pattern slug
        slug: String,
        /// Offending regex source
        pattern: String,
        /// Compilation error
        #[source]
        source: regex::Error,
    },

    /// Two definitions share a slug
    #[error("Duplicate pattern slug '{0}'")]
    DuplicateSlug(String),

    /// Library file could not be read
    #[error("Failed to read pattern library {path}: {source}")]
    Read {
        /// Path that was read
        path: String,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// Library document is not valid YAML
    #[error("Invalid pattern library: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

/// Convenient Result type alias
pub type Result<T> = std::result::Result<T, PatternError>;
