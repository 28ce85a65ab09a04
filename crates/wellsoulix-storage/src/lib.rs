pub mod db;
pub mod error;
pub mod migrations;
pub mod models;
pub mod modes;

pub use db::Database;
pub use error::StorageError;
pub use models::{
    AiConfig, Attachment, Message, Mode, QuizQuestion, Role, Song, Task, TrackSource, UserPlaylist,
    UserStats,
};
pub use modes::{ModeConfig, TRACKS_PER_MODE};
