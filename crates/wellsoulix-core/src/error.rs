use thiserror::Error;
use wellsoulix_storage::StorageError;

/// Errors raised by session and widget operations
#[derive(Error, Debug)]
pub enum CoreError {
    #[error("Nickname must not be empty")]
    BlankNickname,

    #[error("Mood level must be between 1 and 10, got {0}")]
    InvalidMoodLevel(u8),

    #[error("Please provide a valid YouTube Playlist link (containing 'list=...'): {0}")]
    InvalidPlaylistUrl(String),

    #[error("{0}")]
    UnknownMode(String),

    #[error("Focus duration must be at least one minute")]
    InvalidFocusDuration,

    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Config error: {0}")]
    Config(String),
}

pub type Result<T> = std::result::Result<T, CoreError>;
