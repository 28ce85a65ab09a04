//! Custom YouTube playlists, persisted in the key-value store

use std::sync::{Arc, OnceLock};

use regex::Regex;
use uuid::Uuid;
use wellsoulix_storage::{Database, UserPlaylist};

use crate::error::{CoreError, Result};

/// Storage key holding the JSON array of playlists
pub const PLAYLISTS_KEY: &str = "wellsoulix_playlists";

/// Name used when a playlist is added without one
pub const DEFAULT_PLAYLIST_NAME: &str = "My Vibe List";

fn list_pattern() -> Option<&'static Regex> {
    static PATTERN: OnceLock<Option<Regex>> = OnceLock::new();
    PATTERN
        .get_or_init(|| Regex::new(r"[?&]list=([^#&?]+)").ok())
        .as_ref()
}

/// Pull the `list=` id out of a YouTube playlist url
#[must_use]
pub fn extract_playlist_id(url: &str) -> Option<String> {
    list_pattern()?
        .captures(url)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().to_string())
}

pub struct PlaylistLibrary {
    db: Arc<Database>,
    playlists: Vec<UserPlaylist>,
}

impl PlaylistLibrary {
    /// Read the stored playlists once
    ///
    /// # Errors
    ///
    /// Returns an error if the stored value is not a valid playlist array
    pub fn load(db: Arc<Database>) -> Result<Self> {
        let playlists: Vec<UserPlaylist> = db.get_json(PLAYLISTS_KEY)?.unwrap_or_default();
        log::debug!("Loaded {} custom playlists", playlists.len());
        Ok(Self { db, playlists })
    }

    #[must_use]
    pub fn playlists(&self) -> &[UserPlaylist] {
        &self.playlists
    }

    /// Add a playlist from its share url
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::InvalidPlaylistUrl`] without changing anything if
    /// the url has no `list=` parameter, or a storage error if saving fails
    pub fn add(&mut self, name: &str, url: &str) -> Result<&UserPlaylist> {
        let youtube_id =
            extract_playlist_id(url).ok_or_else(|| CoreError::InvalidPlaylistUrl(url.to_string()))?;
        let name = match name.trim() {
            "" => DEFAULT_PLAYLIST_NAME,
            trimmed => trimmed,
        };

        self.playlists.push(UserPlaylist {
            id: Uuid::new_v4().to_string(),
            name: name.to_string(),
            youtube_id,
        });
        if let Err(e) = self.save() {
            self.playlists.pop();
            return Err(e);
        }

        log::info!("Added playlist {name}");
        Ok(&self.playlists[self.playlists.len() - 1])
    }

    /// Remove the playlist with `id`. Returns false if none matched.
    ///
    /// # Errors
    ///
    /// Returns a storage error if saving fails
    pub fn remove(&mut self, id: &str) -> Result<bool> {
        let before = self.playlists.len();
        self.playlists.retain(|p| p.id != id);
        if self.playlists.len() == before {
            return Ok(false);
        }
        self.save()?;
        log::info!("Removed playlist {id}");
        Ok(true)
    }

    fn save(&self) -> Result<()> {
        self.db.set_json(PLAYLISTS_KEY, &self.playlists)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wellsoulix_storage::StorageError;

    fn library() -> (Arc<Database>, PlaylistLibrary) {
        let db = Arc::new(Database::in_memory().unwrap());
        let library = PlaylistLibrary::load(Arc::clone(&db)).unwrap();
        (db, library)
    }

    #[test]
    fn test_extract_playlist_id() {
        assert_eq!(
            extract_playlist_id("https://www.youtube.com/playlist?list=PL123abc").as_deref(),
            Some("PL123abc")
        );
        assert_eq!(
            extract_playlist_id("https://youtube.com/watch?v=x&list=PLz-9_q&index=2").as_deref(),
            Some("PLz-9_q")
        );
        assert_eq!(extract_playlist_id("https://youtube.com/watch?v=x"), None);
        assert_eq!(extract_playlist_id("https://example.com/#list=abc"), None);
    }

    #[test]
    fn test_add_persists_and_defaults_name() {
        let (db, mut library) = library();
        let added = library
            .add("  ", "https://www.youtube.com/playlist?list=PLfocus")
            .unwrap()
            .clone();

        assert_eq!(added.name, DEFAULT_PLAYLIST_NAME);
        assert_eq!(added.youtube_id, "PLfocus");

        let reloaded = PlaylistLibrary::load(db).unwrap();
        assert_eq!(reloaded.playlists(), [added]);
    }

    #[test]
    fn test_invalid_url_rejected_without_mutation() {
        let (db, mut library) = library();
        let err = library.add("Mine", "https://youtube.com/watch?v=abc").unwrap_err();

        assert!(matches!(err, CoreError::InvalidPlaylistUrl(_)));
        assert!(library.playlists().is_empty());
        assert_eq!(db.get_value(PLAYLISTS_KEY).unwrap(), None);
    }

    #[test]
    fn test_remove() {
        let (db, mut library) = library();
        let id = library
            .add("Study", "https://youtube.com/playlist?list=PLstudy")
            .unwrap()
            .id
            .clone();

        assert!(!library.remove("missing").unwrap());
        assert!(library.remove(&id).unwrap());
        assert!(PlaylistLibrary::load(db).unwrap().playlists().is_empty());
    }

    #[test]
    fn test_corrupt_value_is_surfaced() {
        let db = Arc::new(Database::in_memory().unwrap());
        db.set_value(PLAYLISTS_KEY, "[{broken").unwrap();

        let result = PlaylistLibrary::load(db);
        assert!(matches!(
            result,
            Err(CoreError::Storage(StorageError::CorruptValue { .. }))
        ));
    }
}
