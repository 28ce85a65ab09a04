use rusqlite::Connection;

use crate::error::Result;

/// Initialize database schema
///
/// # Errors
///
/// Returns an error if table creation fails
pub fn init_schema(conn: &Connection) -> Result<()> {
    // Key-value store - browser-style local storage (playlists etc.)
    conn.execute(
        "CREATE TABLE IF NOT EXISTS kv_store (
            key TEXT PRIMARY KEY,
            value TEXT NOT NULL,
            updated_at TEXT NOT NULL DEFAULT (datetime('now'))
        )",
        [],
    )?;

    // AI config table - single row holding generation backend settings
    conn.execute(
        "CREATE TABLE IF NOT EXISTS ai_config (
            id INTEGER PRIMARY KEY CHECK (id = 1),
            model TEXT,
            api_key TEXT,
            base_url TEXT,
            temperature REAL NOT NULL DEFAULT 0.8,
            top_p REAL NOT NULL DEFAULT 0.95,
            enabled INTEGER NOT NULL DEFAULT 1,
            updated_at TEXT NOT NULL DEFAULT (datetime('now'))
        )",
        [],
    )?;

    log::debug!("Database schema initialized");
    Ok(())
}
