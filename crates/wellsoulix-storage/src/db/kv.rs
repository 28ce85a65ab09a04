use rusqlite::{params, OptionalExtension};
use serde::{de::DeserializeOwned, Serialize};

use crate::error::{Result, StorageError};

use super::Database;

impl Database {
    /// Read a raw value from the key-value store
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails
    pub fn get_value(&self, key: &str) -> Result<Option<String>> {
        let value = self
            .conn
            .query_row(
                "SELECT value FROM kv_store WHERE key = ?1",
                params![key],
                |row| row.get(0),
            )
            .optional()?;
        Ok(value)
    }

    /// Insert or replace a raw value
    ///
    /// # Errors
    ///
    /// Returns an error if the database write fails
    pub fn set_value(&self, key: &str, value: &str) -> Result<()> {
        self.conn.execute(
            "INSERT INTO kv_store (key, value, updated_at) VALUES (?1, ?2, datetime('now'))
             ON CONFLICT(key) DO UPDATE SET value = excluded.value, updated_at = excluded.updated_at",
            params![key, value],
        )?;
        Ok(())
    }

    /// Remove a key. Returns whether a row was deleted.
    ///
    /// # Errors
    ///
    /// Returns an error if the database write fails
    pub fn delete_value(&self, key: &str) -> Result<bool> {
        let deleted = self
            .conn
            .execute("DELETE FROM kv_store WHERE key = ?1", params![key])?;
        Ok(deleted > 0)
    }

    /// Read and deserialize a JSON value.
    ///
    /// There is no schema versioning: a value that no longer parses is
    /// reported as [`StorageError::CorruptValue`] and left untouched.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails or the stored JSON is malformed
    pub fn get_json<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>> {
        let Some(raw) = self.get_value(key)? else {
            return Ok(None);
        };
        serde_json::from_str(&raw)
            .map(Some)
            .map_err(|source| StorageError::CorruptValue {
                key: key.to_string(),
                source,
            })
    }

    /// Serialize a value as JSON and store it
    ///
    /// # Errors
    ///
    /// Returns an error if serialization or the database write fails
    pub fn set_json<T: Serialize + ?Sized>(&self, key: &str, value: &T) -> Result<()> {
        let raw = serde_json::to_string(value).map_err(|source| StorageError::Serialize {
            key: key.to_string(),
            source,
        })?;
        self.set_value(key, &raw)
    }
}
