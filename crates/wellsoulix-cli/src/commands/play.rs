use std::io::Write;
use std::sync::Arc;

use anyhow::Result;
use tokio::sync::Mutex;
use tokio::time::interval;
use wellsoulix_core::player::format_seconds;
use wellsoulix_core::{spawn_ticker, AppConfig, VibePlayer};
use wellsoulix_storage::Mode;

fn describe(player: &VibePlayer) -> String {
    let state = player.state();
    match player.current_song() {
        Some(song) => format!(
            "{} - {} [{} / {}]{}",
            song.name,
            song.artist,
            format_seconds(state.current_time),
            format_seconds(state.duration),
            if state.playing { "" } else { " (paused)" }
        ),
        None => "Nothing queued".to_string(),
    }
}

/// Play `mode`'s vibe tracks.
///
/// With `ticks`, fast-forwards that many seconds and prints the result;
/// otherwise plays live until Ctrl-C.
pub async fn handle_play(
    mode: Mode,
    track: Option<usize>,
    ticks: Option<u32>,
    app_config: &AppConfig,
) -> Result<()> {
    let mut player = VibePlayer::new(mode);
    match track {
        Some(n) if n >= 1 && player.select_song(n - 1) => {}
        Some(_) => anyhow::bail!("Track must be between 1 and {}", player.tracks().len()),
        None => player.toggle_play(),
    }

    if let Some(ticks) = ticks {
        let before = describe(&player);
        let after = player.state().advance(player.tracks(), ticks);
        let song = after.index.and_then(|i| player.tracks().get(i));
        println!("Start: {before}");
        println!(
            "After {ticks}s: {} [{} / {}]",
            song.map_or("nothing", |s| s.name.as_str()),
            format_seconds(after.current_time),
            format_seconds(after.duration)
        );
        return Ok(());
    }

    println!("{} {mode} vibes. Press Ctrl-C to stop.", mode.config().emoji);
    let player = Arc::new(Mutex::new(player));
    let (_ticker, mut changes) = spawn_ticker(app_config.player_tick(), Arc::clone(&player));
    let mut display = interval(app_config.player_tick());

    loop {
        tokio::select! {
            _ = display.tick() => {
                print!("\r  {}   ", describe(&*player.lock().await));
                std::io::stdout().flush()?;
            }
            Some(change) = changes.recv() => {
                let player = player.lock().await;
                if let Some(song) = player.tracks().get(change.index) {
                    println!("\rNow playing: {} by {}", song.name, song.artist);
                }
            }
            _ = tokio::signal::ctrl_c() => {
                println!();
                break;
            }
        }
    }

    Ok(())
}
