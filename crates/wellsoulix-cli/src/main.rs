mod commands;

use anyhow::Result;
use clap::{Parser, Subcommand};
use wellsoulix_core::{parse_mode, AppConfig};
use wellsoulix_storage::Mode;

#[derive(Parser)]
#[command(name = "wellsoulix")]
#[command(about = "Mood-aware wellness companion", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Chat with your companion
    Chat {
        /// What to call you
        #[arg(short, long, default_value = "friend")]
        nickname: String,
        /// Starting mode
        #[arg(short, long, value_parser = mode_arg, default_value = "comfort")]
        mode: Mode,
    },
    /// Mood check-in: picks a mode from your mood and replies
    Checkin {
        /// Mood level from 1 (low) to 10 (great)
        level: u8,
        /// How you are feeling
        #[arg(long)]
        note: Option<String>,
        /// What to call you
        #[arg(short, long)]
        nickname: String,
    },
    /// List companion modes
    Modes,
    /// List a mode's vibe tracks
    Tracks {
        #[arg(short, long, value_parser = mode_arg, default_value = "comfort")]
        mode: Mode,
    },
    /// Manage custom YouTube playlists
    Playlist {
        #[command(subcommand)]
        action: PlaylistAction,
    },
    /// Today's quiz question
    Quiz {
        /// Your answer (1-based option number)
        #[arg(short, long)]
        answer: Option<usize>,
    },
    /// Run a focus timer
    Focus {
        /// Session length in minutes (presets: 25, 45)
        #[arg(short, long)]
        minutes: Option<u32>,
    },
    /// Play a mode's vibe tracks
    Play {
        #[arg(short, long, value_parser = mode_arg, default_value = "comfort")]
        mode: Mode,
        /// Track number to start from
        #[arg(short, long)]
        track: Option<usize>,
        /// Fast-forward this many seconds and print the result instead of playing live
        #[arg(long)]
        ticks: Option<u32>,
    },
    /// Configuration management
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand, Debug)]
enum PlaylistAction {
    /// Add a playlist from its YouTube link
    Add {
        /// Playlist URL containing `list=...`
        url: String,
        #[arg(short, long)]
        name: Option<String>,
    },
    /// List saved playlists
    List,
    /// Remove a playlist by id
    Remove { id: String },
}

#[derive(Subcommand, Debug)]
enum ConfigAction {
    /// Get a configuration value
    Get {
        /// Configuration key (e.g., ai.model)
        key: String,
    },
    /// Set a configuration value (empty value clears it)
    Set {
        /// Configuration key (e.g., ai.api_key)
        key: String,
        /// Value to set
        value: String,
    },
    /// List all configuration
    List,
}

fn mode_arg(s: &str) -> Result<Mode, String> {
    parse_mode(s).map_err(|e| e.to_string())
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format_timestamp_secs()
        .init();

    let app_config = AppConfig::load_default()?;

    match cli.command {
        Commands::Chat { nickname, mode } => {
            commands::chat::handle_chat(&nickname, mode, &app_config).await
        }
        Commands::Checkin {
            level,
            note,
            nickname,
        } => commands::checkin::handle_checkin(level, note, &nickname, &app_config).await,
        Commands::Modes => {
            commands::modes::handle_modes();
            Ok(())
        }
        Commands::Tracks { mode } => {
            commands::modes::handle_tracks(mode);
            Ok(())
        }
        Commands::Playlist { action } => match action {
            PlaylistAction::Add { url, name } => {
                commands::playlist::handle_playlist_add(&url, name.as_deref())
            }
            PlaylistAction::List => commands::playlist::handle_playlist_list(),
            PlaylistAction::Remove { id } => commands::playlist::handle_playlist_remove(&id),
        },
        Commands::Quiz { answer } => commands::quiz::handle_quiz(answer),
        Commands::Focus { minutes } => {
            let minutes = minutes.unwrap_or(app_config.default_focus_minutes);
            commands::focus::handle_focus(minutes, &app_config).await
        }
        Commands::Play { mode, track, ticks } => {
            commands::play::handle_play(mode, track, ticks, &app_config).await
        }
        Commands::Config { action } => match action {
            ConfigAction::Get { key } => commands::config::handle_config_get(&key),
            ConfigAction::Set { key, value } => commands::config::handle_config_set(&key, &value),
            ConfigAction::List => commands::config::handle_config_list(&app_config),
        },
    }
}
