//! Vibe player playback simulator
//!
//! Playback is simulated: a once-per-second tick moves a cursor through
//! the current track and rolls over to the next one when it reaches the
//! track's declared length. [`PlaybackState`] holds the pure transition,
//! [`VibePlayer`] wraps it with a track list and user controls.

use wellsoulix_storage::{Mode, Song};

use crate::ticker::Tickable;

/// Length assumed for tracks whose `time` is not `mm:ss`
pub const DEFAULT_TRACK_SECONDS: u32 = 300;

/// Parse a `mm:ss` track length into seconds
#[must_use]
pub fn parse_duration(time: &str) -> u32 {
    let mut parts = time.split(':');
    match (parts.next(), parts.next(), parts.next()) {
        (Some(m), Some(s), None) => match (m.trim().parse::<u32>(), s.trim().parse::<u32>()) {
            (Ok(m), Ok(s)) => m * 60 + s,
            _ => DEFAULT_TRACK_SECONDS,
        },
        _ => DEFAULT_TRACK_SECONDS,
    }
}

/// Render seconds as `m:ss`
#[must_use]
pub fn format_seconds(seconds: u32) -> String {
    format!("{}:{:02}", seconds / 60, seconds % 60)
}

/// Cursor over a track list
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PlaybackState {
    pub index: Option<usize>,
    pub current_time: u32,
    pub duration: u32,
    pub playing: bool,
}

impl PlaybackState {
    /// Start `index` from the beginning
    #[must_use]
    pub fn at(tracks: &[Song], index: usize, playing: bool) -> Self {
        Self {
            index: Some(index),
            current_time: 0,
            duration: tracks.get(index).map_or(0, |t| parse_duration(&t.time)),
            playing,
        }
    }

    /// State one second later
    #[must_use]
    pub fn tick(self, tracks: &[Song]) -> Self {
        if tracks.is_empty() {
            return Self::default();
        }
        let Some(index) = self.index else {
            return self;
        };
        if !self.playing || self.duration == 0 {
            return self;
        }

        let current_time = self.current_time + 1;
        if current_time >= self.duration {
            Self::at(tracks, (index + 1) % tracks.len(), true)
        } else {
            Self {
                current_time,
                ..self
            }
        }
    }

    /// State after `ticks` seconds
    #[must_use]
    pub fn advance(self, tracks: &[Song], ticks: u32) -> Self {
        (0..ticks).fold(self, |state, _| state.tick(tracks))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipDirection {
    Next,
    Prev,
}

/// Emitted when playback rolls over to another track
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TrackChanged {
    pub index: usize,
}

#[derive(Debug, Clone)]
pub struct VibePlayer {
    mode: Option<Mode>,
    tracks: Vec<Song>,
    state: PlaybackState,
    volume: u8,
}

impl VibePlayer {
    /// Player loaded with `mode`'s tracks, first track cued but paused
    #[must_use]
    pub fn new(mode: Mode) -> Self {
        let mut player = Self::with_tracks(mode.config().vibe_tracks());
        player.mode = Some(mode);
        player
    }

    #[must_use]
    pub fn with_tracks(tracks: Vec<Song>) -> Self {
        let state = if tracks.is_empty() {
            PlaybackState::default()
        } else {
            PlaybackState::at(&tracks, 0, false)
        };
        Self {
            mode: None,
            tracks,
            state,
            volume: 80,
        }
    }

    /// Load `mode`'s tracks.
    ///
    /// Keeps the current song if the new list contains it, otherwise cues
    /// the first track without playing.
    pub fn set_mode(&mut self, mode: Mode) {
        if self.mode == Some(mode) {
            return;
        }
        let current_id = self.current_song().map(|s| s.id.clone());
        self.tracks = mode.config().vibe_tracks();
        self.mode = Some(mode);

        let kept = current_id.and_then(|id| self.tracks.iter().position(|t| t.id == id));
        match kept {
            Some(index) => self.state.index = Some(index),
            None if self.tracks.is_empty() => self.state = PlaybackState::default(),
            None => self.state = PlaybackState::at(&self.tracks, 0, false),
        }
        log::debug!("Player loaded {} tracks for {mode}", self.tracks.len());
    }

    /// Jump to `index` and start playing. Returns false if out of range.
    pub fn select_song(&mut self, index: usize) -> bool {
        if index >= self.tracks.len() {
            return false;
        }
        self.state = PlaybackState::at(&self.tracks, index, true);
        log::debug!("Now playing {}", self.tracks[index].name);
        true
    }

    /// Move to the neighbouring track, wrapping at both ends.
    ///
    /// With nothing cued the cursor counts as sitting before the first
    /// track, so `Next` picks the first and `Prev` the second to last.
    pub fn skip(&mut self, direction: SkipDirection) {
        let len = self.tracks.len();
        if len == 0 {
            return;
        }
        let next = match (direction, self.state.index) {
            (SkipDirection::Next, Some(i)) => (i + 1) % len,
            (SkipDirection::Next, None) => 0,
            (SkipDirection::Prev, Some(i)) => (i + len - 1) % len,
            (SkipDirection::Prev, None) => (2 * len - 2) % len,
        };
        self.select_song(next);
    }

    /// Flip play/pause; with nothing cued, starts the first track
    pub fn toggle_play(&mut self) {
        if self.state.index.is_none() {
            self.select_song(0);
        } else {
            self.state.playing = !self.state.playing;
        }
    }

    pub fn set_volume(&mut self, volume: u8) {
        self.volume = volume.min(100);
    }

    #[must_use]
    pub const fn volume(&self) -> u8 {
        self.volume
    }

    #[must_use]
    pub const fn mode(&self) -> Option<Mode> {
        self.mode
    }

    #[must_use]
    pub fn tracks(&self) -> &[Song] {
        &self.tracks
    }

    #[must_use]
    pub const fn state(&self) -> PlaybackState {
        self.state
    }

    #[must_use]
    pub fn current_song(&self) -> Option<&Song> {
        self.state.index.and_then(|i| self.tracks.get(i))
    }

    /// Completed fraction of the current track, 0.0 to 1.0
    #[must_use]
    pub fn progress(&self) -> f64 {
        if self.state.duration == 0 {
            0.0
        } else {
            f64::from(self.state.current_time) / f64::from(self.state.duration)
        }
    }
}

impl Tickable for VibePlayer {
    type Event = TrackChanged;

    fn tick(&mut self) -> Option<TrackChanged> {
        let before = self.state;
        self.state = before.tick(&self.tracks);

        let rolled_over = before.playing
            && before.index.is_some()
            && before.duration > 0
            && before.current_time + 1 >= before.duration;
        if rolled_over {
            self.state.index.map(|index| TrackChanged { index })
        } else {
            None
        }
    }
}
