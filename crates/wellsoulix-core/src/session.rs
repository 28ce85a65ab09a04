//! Per-user session context
//!
//! A single owned struct holds everything the chat surface reads or
//! writes: identity, active mode, one append-only transcript per mode,
//! the typing flag, the input buffer, the pending attachment, stats and
//! the micro-task list.

use std::collections::BTreeMap;

use wellsoulix_storage::{Attachment, Message, Mode, UserStats};

use crate::error::{CoreError, Result};
use crate::tasks::MicroTasks;

/// Welcome line appended when the user switches mode
#[must_use]
pub fn welcome_text(mode: Mode) -> String {
    format!(
        "Hello friend! \u{1f49c} I've switched to {mode} mode to help you with {}. How are you feeling right now?",
        mode.config().description.to_lowercase()
    )
}

#[derive(Debug, Clone)]
pub struct Session {
    nickname: String,
    active_mode: Mode,
    transcripts: BTreeMap<Mode, Vec<Message>>,
    typing: bool,
    input: String,
    pending_attachment: Option<Attachment>,
    stats: UserStats,
    tasks: MicroTasks,
}

impl Session {
    /// Start a session for `nickname`. Every mode starts with an empty transcript.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::BlankNickname`] if the nickname is empty or whitespace
    pub fn login(nickname: &str) -> Result<Self> {
        let nickname = nickname.trim();
        if nickname.is_empty() {
            return Err(CoreError::BlankNickname);
        }
        log::info!("Session started for {nickname}");

        Ok(Self {
            nickname: nickname.to_string(),
            active_mode: Mode::default(),
            transcripts: Mode::ALL.iter().map(|m| (*m, Vec::new())).collect(),
            typing: false,
            input: String::new(),
            pending_attachment: None,
            stats: UserStats::default(),
            tasks: MicroTasks::new(),
        })
    }

    /// Wipe the session back to its just-logged-in state, keeping the nickname
    pub fn full_reset(&mut self) {
        log::info!("Resetting session for {}", self.nickname);
        self.active_mode = Mode::default();
        for transcript in self.transcripts.values_mut() {
            *transcript = Vec::new();
        }
        self.typing = false;
        self.input.clear();
        self.pending_attachment = None;
        self.stats = UserStats::default();
        self.tasks = MicroTasks::new();
    }

    #[must_use]
    pub fn nickname(&self) -> &str {
        &self.nickname
    }

    /// Rename the user
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::BlankNickname`] if the nickname is empty or whitespace
    pub fn set_nickname(&mut self, nickname: &str) -> Result<()> {
        let nickname = nickname.trim();
        if nickname.is_empty() {
            return Err(CoreError::BlankNickname);
        }
        self.nickname = nickname.to_string();
        Ok(())
    }

    #[must_use]
    pub const fn active_mode(&self) -> Mode {
        self.active_mode
    }

    /// Messages of `mode` in insertion order
    #[must_use]
    pub fn transcript(&self, mode: Mode) -> &[Message] {
        self.transcripts.get(&mode).map_or(&[], Vec::as_slice)
    }

    /// Messages of the active mode
    #[must_use]
    pub fn active_transcript(&self) -> &[Message] {
        self.transcript(self.active_mode)
    }

    /// Append to the transcript of `mode`. Transcripts only ever grow.
    pub fn append_message(&mut self, mode: Mode, message: Message) {
        log::debug!("Appending {} message {} to {mode}", message.role.as_str(), message.id);
        self.transcripts.entry(mode).or_default().push(message);
    }

    /// Make `mode` active and greet the user in it.
    ///
    /// Switching to the already-active mode still appends a welcome.
    pub fn switch_mode(&mut self, mode: Mode) -> &Message {
        log::info!("Switching mode {} -> {mode}", self.active_mode);
        self.active_mode = mode;
        let welcome = Message::model(welcome_text(mode), mode).with_id_prefix("welcome");
        let transcript = self.transcripts.entry(mode).or_default();
        transcript.push(welcome);
        &transcript[transcript.len() - 1]
    }

    /// Set the active mode without greeting
    pub(crate) fn set_active_mode(&mut self, mode: Mode) {
        self.active_mode = mode;
    }

    #[must_use]
    pub const fn is_typing(&self) -> bool {
        self.typing
    }

    pub(crate) fn set_typing(&mut self, typing: bool) {
        self.typing = typing;
    }

    #[must_use]
    pub fn input(&self) -> &str {
        &self.input
    }

    pub fn set_input(&mut self, input: impl Into<String>) {
        self.input = input.into();
    }

    /// Clear and return the input buffer
    pub fn take_input(&mut self) -> String {
        std::mem::take(&mut self.input)
    }

    #[must_use]
    pub fn pending_attachment(&self) -> Option<&Attachment> {
        self.pending_attachment.as_ref()
    }

    /// Stage an attachment for the next outgoing message, replacing any staged one
    pub fn set_pending_attachment(&mut self, attachment: Attachment) {
        log::debug!("Staged {} attachment: {}", attachment.kind(), attachment.label());
        self.pending_attachment = Some(attachment);
    }

    pub fn clear_pending_attachment(&mut self) -> Option<Attachment> {
        self.pending_attachment.take()
    }

    #[must_use]
    pub const fn stats(&self) -> &UserStats {
        &self.stats
    }

    pub fn stats_mut(&mut self) -> &mut UserStats {
        &mut self.stats
    }

    #[must_use]
    pub const fn tasks(&self) -> &MicroTasks {
        &self.tasks
    }

    pub fn tasks_mut(&mut self) -> &mut MicroTasks {
        &mut self.tasks
    }
}
