use std::sync::Arc;

use anyhow::Result;
use tabled::{Table, Tabled};
use wellsoulix_core::PlaylistLibrary;
use wellsoulix_storage::Database;

#[derive(Tabled)]
struct PlaylistRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Embed URL")]
    embed_url: String,
}

fn open_library() -> Result<PlaylistLibrary> {
    let db = Arc::new(Database::new(None)?);
    Ok(PlaylistLibrary::load(db)?)
}

pub fn handle_playlist_add(url: &str, name: Option<&str>) -> Result<()> {
    let mut library = open_library()?;
    let playlist = library.add(name.unwrap_or_default(), url)?;
    println!("Added \"{}\" ({})", playlist.name, playlist.youtube_id);
    println!("  {}", playlist.embed_url());
    Ok(())
}

pub fn handle_playlist_list() -> Result<()> {
    let library = open_library()?;
    if library.playlists().is_empty() {
        println!("No custom playlists yet. Add one with `wellsoulix playlist add <url>`");
        return Ok(());
    }

    let rows: Vec<PlaylistRow> = library
        .playlists()
        .iter()
        .map(|p| PlaylistRow {
            id: p.id.clone(),
            name: p.name.clone(),
            embed_url: p.embed_url(),
        })
        .collect();
    println!("{}", Table::new(rows));
    Ok(())
}

pub fn handle_playlist_remove(id: &str) -> Result<()> {
    let mut library = open_library()?;
    if library.remove(id)? {
        println!("Removed playlist {id}");
    } else {
        println!("No playlist with id {id}");
    }
    Ok(())
}
