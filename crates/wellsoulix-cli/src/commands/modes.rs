use tabled::{Table, Tabled};
use wellsoulix_core::player::parse_duration;
use wellsoulix_storage::Mode;

use super::helpers::{rule, truncate_str};

#[derive(Tabled)]
struct ModeRow {
    #[tabled(rename = "Mode")]
    mode: String,
    #[tabled(rename = "Focus")]
    description: String,
    #[tabled(rename = "Color")]
    color: String,
    #[tabled(rename = "Tracks")]
    tracks: usize,
}

#[derive(Tabled)]
struct TrackRow {
    #[tabled(rename = "#")]
    number: usize,
    #[tabled(rename = "Track")]
    name: String,
    #[tabled(rename = "Artist")]
    artist: String,
    #[tabled(rename = "Time")]
    time: String,
}

pub fn handle_modes() {
    let rows: Vec<ModeRow> = Mode::ALL
        .iter()
        .map(|mode| {
            let config = mode.config();
            ModeRow {
                mode: format!("{} {mode}", config.emoji),
                description: config.description.to_string(),
                color: config.color.to_string(),
                tracks: config.vibe_tracks().len(),
            }
        })
        .collect();

    println!("{}", Table::new(rows));
}

pub fn handle_tracks(mode: Mode) {
    let tracks = mode.config().vibe_tracks();
    let total: u32 = tracks.iter().map(|t| parse_duration(&t.time)).sum();

    println!("{} {mode} vibe tracks", mode.config().emoji);
    println!("{}", rule(28));

    let rows: Vec<TrackRow> = tracks
        .iter()
        .enumerate()
        .map(|(i, t)| TrackRow {
            number: i + 1,
            name: truncate_str(&t.name, 32),
            artist: t.artist.clone(),
            time: t.time.clone(),
        })
        .collect();
    println!("\n{}", Table::new(rows));
    println!("\nTotal: {} tracks, {} minutes", tracks.len(), total / 60);
}
