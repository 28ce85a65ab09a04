use crate::error::{CoreError, Result};
use crate::ticker::Tickable;

/// Preset session lengths in minutes
pub const FOCUS_PRESETS: [u32; 2] = [25, 45];

/// Emitted once when a focus session runs out
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FocusCompleted {
    pub minutes: u32,
}

/// Pomodoro-style countdown, one tick per second
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FocusTimer {
    minutes: u32,
    total_secs: u32,
    remaining_secs: u32,
    active: bool,
}

impl FocusTimer {
    /// # Errors
    ///
    /// Returns [`CoreError::InvalidFocusDuration`] for zero minutes or a
    /// length whose seconds do not fit in a `u32`
    pub fn new(minutes: u32) -> Result<Self> {
        if minutes == 0 {
            return Err(CoreError::InvalidFocusDuration);
        }
        let total_secs = minutes
            .checked_mul(60)
            .ok_or(CoreError::InvalidFocusDuration)?;
        Ok(Self {
            minutes,
            total_secs,
            remaining_secs: total_secs,
            active: false,
        })
    }

    /// Change the session length; resets and pauses the countdown
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::InvalidFocusDuration`] for zero or oversized minutes
    pub fn set_duration(&mut self, minutes: u32) -> Result<()> {
        *self = Self::new(minutes)?;
        Ok(())
    }

    /// Start or pause. Does nothing once the countdown has finished.
    pub fn toggle(&mut self) -> bool {
        if self.remaining_secs == 0 {
            return false;
        }
        self.active = !self.active;
        true
    }

    pub fn reset(&mut self) {
        self.remaining_secs = self.total_secs;
        self.active = false;
    }

    #[must_use]
    pub const fn minutes(&self) -> u32 {
        self.minutes
    }

    #[must_use]
    pub const fn remaining_secs(&self) -> u32 {
        self.remaining_secs
    }

    #[must_use]
    pub const fn is_active(&self) -> bool {
        self.active
    }

    /// Remaining time as `MM:SS`
    #[must_use]
    pub fn format(&self) -> String {
        format!(
            "{:02}:{:02}",
            self.remaining_secs / 60,
            self.remaining_secs % 60
        )
    }
}

impl Tickable for FocusTimer {
    type Event = FocusCompleted;

    fn tick(&mut self) -> Option<FocusCompleted> {
        if !self.active || self.remaining_secs == 0 {
            return None;
        }
        self.remaining_secs -= 1;
        if self.remaining_secs > 0 {
            return None;
        }

        self.active = false;
        log::info!("Focus session of {} min finished", self.minutes);
        Some(FocusCompleted {
            minutes: self.minutes,
        })
    }
}
