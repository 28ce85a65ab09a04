//! Database operations split into domain-specific modules.
//!
//! This module re-exports the main Database struct and all its operations.

mod ai_config;
mod kv;

use rusqlite::Connection;
use std::path::PathBuf;

use crate::error::Result;
use crate::migrations;

/// Database connection wrapper
pub struct Database {
    pub(crate) conn: Connection,
}

impl Database {
    /// Create a new database connection
    ///
    /// # Errors
    ///
    /// Returns an error if database directory creation, connection opening, or schema initialization fails
    pub fn new(db_path: Option<PathBuf>) -> Result<Self> {
        let path = db_path.unwrap_or_else(Self::default_db_path);

        // Ensure parent directory exists
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let conn = Connection::open(&path)?;
        migrations::init_schema(&conn)?;

        log::info!("Database initialized at: {}", path.display());

        Ok(Self { conn })
    }

    /// Open a throwaway in-memory database
    ///
    /// # Errors
    ///
    /// Returns an error if schema initialization fails
    pub fn in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        migrations::init_schema(&conn)?;
        Ok(Self { conn })
    }

    /// Get default database path
    fn default_db_path() -> PathBuf {
        let mut path = dirs::data_local_dir().unwrap_or_else(|| PathBuf::from("."));
        path.push("wellsoulix");
        path.push("wellsoulix.db");
        path
    }
}
