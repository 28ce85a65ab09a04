pub mod attachments;
pub mod checkin;
pub mod config;
pub mod dispatcher;
pub mod error;
pub mod focus_timer;
pub mod gamification;
pub mod player;
pub mod playlists;
pub mod quiz;
pub mod session;
pub mod tasks;
pub mod ticker;

#[cfg(test)]
mod testing;

pub use checkin::{classify, CheckIn, CHECKIN_FALLBACK_REPLY};
pub use config::AppConfig;
pub use dispatcher::{MessageDispatcher, PendingDispatch, EMPTY_REPLY_FALLBACK};
pub use error::CoreError;
pub use focus_timer::{FocusCompleted, FocusTimer, FOCUS_PRESETS};
pub use gamification::{StatsAccumulator, QUIZ_REWARD_STARS};
pub use player::{PlaybackState, SkipDirection, TrackChanged, VibePlayer};
pub use playlists::PlaylistLibrary;
pub use quiz::{DailyQuiz, QuizOutcome};
pub use session::Session;
pub use tasks::MicroTasks;
pub use ticker::{spawn_ticker, TickerHandle, Tickable};

use wellsoulix_storage::Mode;

/// Parse a user-typed mode name
///
/// # Errors
///
/// Returns [`CoreError::UnknownMode`] if the name matches no mode
pub fn parse_mode(name: &str) -> error::Result<Mode> {
    name.parse().map_err(CoreError::UnknownMode)
}
