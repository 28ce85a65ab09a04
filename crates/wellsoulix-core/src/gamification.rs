//! Star and focus bookkeeping.
//!
//! Widgets credit the stats independently; nothing ties the counters to
//! transcript content. There are no caps and `level` is never recomputed.

use wellsoulix_storage::UserStats;

/// Stars granted for a correct quiz answer
pub const QUIZ_REWARD_STARS: u32 = 20;

/// Increment contracts for [`UserStats`]
pub trait StatsAccumulator {
    /// Credit a completed focus session
    fn record_focus(&mut self, minutes: u32);

    /// Credit a correct quiz answer
    fn award_quiz(&mut self);
}

impl StatsAccumulator for UserStats {
    fn record_focus(&mut self, minutes: u32) {
        self.focus_minutes = self.focus_minutes.saturating_add(minutes);
        log::info!("Focus session complete: +{minutes} min (total {})", self.focus_minutes);
    }

    fn award_quiz(&mut self) {
        self.stars = self.stars.saturating_add(QUIZ_REWARD_STARS);
        log::info!("Quiz solved: +{QUIZ_REWARD_STARS} stars (total {})", self.stars);
    }
}
