//! Mode registry - static presentation metadata and vibe tracks per mode

use crate::models::{Mode, Song, TrackSource};

/// Every mode ships a playlist of this many tracks
pub const TRACKS_PER_MODE: usize = 20;

/// Seed entry for a mode playlist
#[derive(Debug, Clone, Copy)]
pub struct BaseTrack {
    pub name: &'static str,
    pub artist: &'static str,
    pub time: &'static str,
    pub video_id: &'static str,
}

/// Read-only configuration for a mode
#[derive(Debug, Clone, Copy)]
pub struct ModeConfig {
    pub mode: Mode,
    pub color: &'static str,
    pub emoji: &'static str,
    pub description: &'static str,
    pub banner: &'static str,
    base_tracks: &'static [BaseTrack],
}

const fn track(
    name: &'static str,
    artist: &'static str,
    time: &'static str,
    video_id: &'static str,
) -> BaseTrack {
    BaseTrack {
        name,
        artist,
        time,
        video_id,
    }
}

const COMFORT_TRACKS: &[BaseTrack] = &[
    track("Coffee Morning", "Lofi Girl", "03:45", "5qap5aO4i9A"),
    track("Rainy Night", "Rainy Day", "04:20", "lTRiuFIWV5M"),
    track("Soft Piano", "Classical Dreams", "05:10", "v_Ecl64YAnU"),
    track("Safe Haven", "Serenity", "02:55", "jfKfPfyJRdk"),
    track("Gentle Morning", "Sunlight", "03:15", "kgx4WGK0oNU"),
];

const CHEER_TRACKS: &[BaseTrack] = &[
    track("Upbeat Energy", "Vibe Master", "03:10", "rS00xWnqwvI"),
    track("Happy Day", "Sunshine Crew", "04:00", "9HDEHj2yzew"),
    track("Groovy Beats", "Dancefloor", "03:30", "ZbZSe6N_BXs"),
    track("Victory Lap", "Champion", "03:45", "K9p9u_O-hR0"),
];

const CALM_TRACKS: &[BaseTrack] = &[
    track("Deep Meditation", "Zen Garden", "10:00", "4BfVv0V4c-M"),
    track("Ocean Waves", "Nature Sounds", "15:00", "m6uMv9u0w_8"),
    track("Forest Mist", "Wilderness", "08:00", "eKFTSSKCzWA"),
];

const STUDY_BUDDY_TRACKS: &[BaseTrack] = &[
    track("Focus Alpha", "Brain Power", "60:00", "WPni755-Krg"),
    track("Library Ambience", "Study Girl", "24:00", "jfKfPfyJRdk"),
    track("Piano Focus", "Mozart Effect", "05:00", "v_Ecl64YAnU"),
];

const CAREER_COACH_TRACKS: &[BaseTrack] = &[
    track("Ambition", "Success Mindset", "03:50", "K9p9u_O-hR0"),
    track("Productive Flow", "Deep Work", "04:10", "mU_B28-f6I8"),
    track("Executive Suite", "Jazz Vibes", "04:45", "jfKfPfyJRdk"),
];

const SPIRIT_TRACKS: &[BaseTrack] = &[
    track("Rise Up", "Motivational Hero", "03:45", "6f52P2Y2L3I"),
    track("Uplifting Soul", "Spirituality", "04:30", "WJ3-F02-F_Y"),
];

const AI_MENTOR_TRACKS: &[BaseTrack] = &[
    track("Intelligent Design", "AI Beats", "04:00", "mU_B28-f6I8"),
    track("Classical Logic", "Baroque", "05:00", "v_Ecl64YAnU"),
];

const MODE_CONFIGS: [ModeConfig; 7] = [
    ModeConfig {
        mode: Mode::Comfort,
        color: "#C8A2C8",
        emoji: "\u{1f338}",
        description: "Empathy & emotional validation",
        banner: "https://images.unsplash.com/photo-1516589174184-c6852657d803?auto=format&fit=crop&q=80&w=800",
        base_tracks: COMFORT_TRACKS,
    },
    ModeConfig {
        mode: Mode::Cheer,
        color: "#FFD700",
        emoji: "\u{1f389}",
        description: "Humor, memes, and celebration",
        banner: "https://images.unsplash.com/photo-1492684223066-81342ee5ff30?auto=format&fit=crop&q=80&w=800",
        base_tracks: CHEER_TRACKS,
    },
    ModeConfig {
        mode: Mode::Calm,
        color: "#87CEEB",
        emoji: "\u{1f33f}",
        description: "Breathing & relaxation tips",
        banner: "https://images.unsplash.com/photo-1518241353330-0f7941c2d9b5?auto=format&fit=crop&q=80&w=800",
        base_tracks: CALM_TRACKS,
    },
    ModeConfig {
        mode: Mode::StudyBuddy,
        color: "#32CD32",
        emoji: "\u{1f4da}",
        description: "Focus help & academic support",
        banner: "https://images.unsplash.com/photo-1521714161819-155349685591?auto=format&fit=crop&q=80&w=800",
        base_tracks: STUDY_BUDDY_TRACKS,
    },
    ModeConfig {
        mode: Mode::CareerCoach,
        color: "#000080",
        emoji: "\u{1f4bc}",
        description: "Interview & resume guidance",
        banner: "https://images.unsplash.com/photo-1507679799987-c73779587ccf?auto=format&fit=crop&q=80&w=800",
        base_tracks: CAREER_COACH_TRACKS,
    },
    ModeConfig {
        mode: Mode::Spirit,
        color: "#FF8C00",
        emoji: "\u{2728}",
        description: "Resilience & motivation",
        banner: "https://images.unsplash.com/photo-1464822759023-fed622ff2c3b?auto=format&fit=crop&q=80&w=800",
        base_tracks: SPIRIT_TRACKS,
    },
    ModeConfig {
        mode: Mode::AiMentor,
        color: "#800080",
        emoji: "\u{1f9e0}",
        description: "Structured study plans & insights",
        banner: "https://images.unsplash.com/photo-1532012197267-da84d127e765?auto=format&fit=crop&q=80&w=800",
        base_tracks: AI_MENTOR_TRACKS,
    },
];

impl Mode {
    /// Registry entry for this mode
    #[must_use]
    pub fn config(self) -> &'static ModeConfig {
        let index = Self::ALL
            .iter()
            .position(|m| *m == self)
            .unwrap_or_default();
        &MODE_CONFIGS[index]
    }
}

impl ModeConfig {
    /// Playlist padded to [`TRACKS_PER_MODE`] entries.
    ///
    /// Missing entries cycle through the base tracks and are renamed
    /// `<name> Vol. N`, keeping the template's artist, length and video.
    #[must_use]
    pub fn vibe_tracks(&self) -> Vec<Song> {
        let base = self.base_tracks;
        let mut full: Vec<(String, BaseTrack)> =
            base.iter().map(|t| (t.name.to_string(), *t)).collect();

        while !base.is_empty() && full.len() < TRACKS_PER_MODE {
            let template = base[full.len() % base.len()];
            let volume = full.len() / base.len() + 1;
            full.push((format!("{} Vol. {volume}", template.name), template));
        }

        let prefix = self.mode.slug();
        full.into_iter()
            .enumerate()
            .map(|(i, (name, t))| Song {
                id: format!("{prefix}-{i}"),
                name,
                artist: t.artist.to_string(),
                time: t.time.to_string(),
                url: format!("https://www.youtube.com/embed/{}", t.video_id),
                source: TrackSource::Youtube,
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_mode_has_config() {
        for mode in Mode::ALL {
            assert_eq!(mode.config().mode, mode);
            assert!(!mode.config().description.is_empty());
        }
    }

    #[test]
    fn test_vibe_tracks_padded_to_twenty() {
        for mode in Mode::ALL {
            assert_eq!(mode.config().vibe_tracks().len(), TRACKS_PER_MODE);
        }
    }

    #[test]
    fn test_vibe_tracks_padding_names() {
        let tracks = Mode::Spirit.config().vibe_tracks();
        assert_eq!(tracks[0].name, "Rise Up");
        assert_eq!(tracks[1].name, "Uplifting Soul");
        assert_eq!(tracks[2].name, "Rise Up Vol. 2");
        assert_eq!(tracks[3].name, "Uplifting Soul Vol. 2");
        assert_eq!(tracks[19].name, "Uplifting Soul Vol. 10");
        assert_eq!(tracks[2].time, "03:45");
    }

    #[test]
    fn test_vibe_track_ids_and_urls() {
        let tracks = Mode::StudyBuddy.config().vibe_tracks();
        assert_eq!(tracks[0].id, "study buddy-0");
        assert_eq!(tracks[0].url, "https://www.youtube.com/embed/WPni755-Krg");
        assert_eq!(tracks[0].source, TrackSource::Youtube);
    }
}
