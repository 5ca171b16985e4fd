//! Error types for the directory data layer

use thiserror::Error;

/// Document store and directory errors
#[derive(Debug, Error)]
pub enum StoreError {
    /// Database-level error (connection, SQL)
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// A stored document is not a JSON object
    #[error("Document '{collection}/{id}' is corrupt: {reason}")]
    CorruptDocument {
        /// Collection path
        collection: String,
        /// Document id
        id: String,
        /// What is wrong
        reason: String,
    },

    /// Email rejected by waitlist signup
    #[error("Invalid email address '{0}'")]
    InvalidEmail(String),

    /// Serialization/deserialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Convenient Result type alias
pub type Result<T> = std::result::Result<T, StoreError>;
