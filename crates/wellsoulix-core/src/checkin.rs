//! Mood check-in
//!
//! A check-in maps a 1-10 mood level to a mode, seeds that mode's
//! transcript with a greeting and the check-in text, then asks the
//! companion for a reply without any prior history.

use std::time::Duration;

use wellsoulix_ai::GenerationRequest;
use wellsoulix_storage::{Message, Mode};

use crate::dispatcher::{MessageDispatcher, PendingDispatch};
use crate::error::{CoreError, Result};
use crate::session::Session;

/// Reply used when the check-in response comes back empty
pub const CHECKIN_FALLBACK_REPLY: &str =
    "I'm here for you! Let's make today productive and positive \u{1f49c}.";

/// Pick a mode for a mood level
#[must_use]
pub const fn classify(mood_level: u8) -> Mode {
    if mood_level > 7 {
        Mode::Cheer
    } else if mood_level < 4 {
        Mode::Comfort
    } else {
        Mode::Calm
    }
}

/// Validated check-in submission
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckIn {
    level: u8,
    note: Option<String>,
}

impl CheckIn {
    /// # Errors
    ///
    /// Returns [`CoreError::InvalidMoodLevel`] unless `level` is within 1..=10
    pub fn new(level: u8, note: Option<String>) -> Result<Self> {
        if !(1..=10).contains(&level) {
            return Err(CoreError::InvalidMoodLevel(level));
        }
        let note = note.map(|n| n.trim().to_string()).filter(|n| !n.is_empty());
        Ok(Self { level, note })
    }

    #[must_use]
    pub const fn level(&self) -> u8 {
        self.level
    }

    #[must_use]
    pub const fn mode(&self) -> Mode {
        classify(self.level)
    }

    /// Text sent to the companion
    #[must_use]
    pub fn text(&self) -> String {
        format!(
            "[Check-in] Level: {}/10. Note: {}.",
            self.level,
            self.note.as_deref().unwrap_or("feeling good")
        )
    }
}

/// Greeting appended ahead of the check-in message
#[must_use]
pub fn check_in_welcome(nickname: &str, mode: Mode) -> String {
    format!(
        "Welcome back, {nickname}! \u{1f49c} Your mode is set to {mode} based on your mood check-in."
    )
}

impl MessageDispatcher {
    /// Seed the target transcript and switch to it.
    ///
    /// The greeting and check-in message are appended after anything the
    /// transcript already holds.
    pub fn begin_check_in(session: &mut Session, check_in: &CheckIn) -> PendingDispatch {
        let mode = check_in.mode();
        let text = check_in.text();
        log::info!("Check-in level {} -> {mode}", check_in.level());

        let welcome = Message::model(check_in_welcome(session.nickname(), mode), mode)
            .with_id_prefix("initial");
        session.append_message(mode, welcome);
        session.append_message(mode, Message::user(text.clone(), None).with_id_prefix("checkin"));
        session.set_active_mode(mode);

        PendingDispatch::new(
            GenerationRequest {
                prompt: text,
                mode,
                history: Vec::new(),
                attachment: None,
            },
            CHECKIN_FALLBACK_REPLY,
            Some("reply"),
        )
    }

    /// Run a full check-in, waiting `delay` before asking for the reply
    pub async fn check_in(
        &self,
        session: &mut Session,
        check_in: &CheckIn,
        delay: Duration,
    ) -> Message {
        let pending = Self::begin_check_in(session, check_in);
        tokio::time::sleep(delay).await;

        session.set_typing(true);
        let reply = self.generate(&pending).await;
        Self::complete(session, pending, &reply)
    }
}
