//! Error types for catalog loading

use thiserror::Error;

/// Catalog errors
#[derive(Debug, Error)]
pub enum CatalogError {
    /// Source file could not be read
    #[error("Failed to read catalog {path}: {source}")]
    Read {
        /// Path that was read
        path: String,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// Source file is not a valid catalog document
    #[error("Invalid catalog {path}: {source}")]
    Parse {
        /// Path that was parsed
        path: String,
        /// Underlying JSON error
        #[source]
        source: serde_json::Error,
    },

    /// Two apps share a slug, so their routes would collide
    #[error("Duplicate app slug '{0}'")]
    DuplicateSlug(String),
}

/// Convenient Result type alias
pub type Result<T> = std::result::Result<T, CatalogError>;
