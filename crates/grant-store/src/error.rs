//! Error types for draft persistence

/// Errors from a key-value backend or from encoding a value for it
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// IO error while reading or writing a key
    #[error("io error on key '{key}': {source}")]
    Io {
        key: String,
        #[source]
        source: std::io::Error,
    },

    /// Value could not be encoded
    #[error("failed to serialize '{key}': {source}")]
    Serialize {
        key: String,
        #[source]
        source: serde_json::Error,
    },

    /// Backend-specific failure
    #[error("storage backend error: {0}")]
    Backend(String),
}

impl StoreError {
    /// Create IO error for key
    pub fn io(key: impl Into<String>, source: std::io::Error) -> Self {
        Self::Io {
            key: key.into(),
            source,
        }
    }

    /// Create serialization error for key
    pub fn serialize(key: impl Into<String>, source: serde_json::Error) -> Self {
        Self::Serialize {
            key: key.into(),
            source,
        }
    }
}

/// Result type alias for store operations
pub type StoreResult<T> = Result<T, StoreError>;
