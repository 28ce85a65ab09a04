use thiserror::Error;

/// Errors raised by the persistence layer
#[derive(Error, Debug)]
pub enum StorageError {
    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("Stored value under '{key}' is malformed: {source}")]
    CorruptValue {
        key: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("Failed to serialize value for '{key}': {source}")]
    Serialize {
        key: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Unknown AI config key: {0}")]
    UnknownConfigKey(String),

    #[error("Invalid value for '{key}': {value}")]
    InvalidConfigValue { key: String, value: String },
}

pub type Result<T> = std::result::Result<T, StorageError>;
