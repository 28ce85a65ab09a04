//! AI Configuration database operations

use rusqlite::{params, OptionalExtension};

use crate::error::{Result, StorageError};
use crate::models::AiConfig;

use super::Database;

impl Database {
    /// Get AI configuration, or defaults if none has been saved
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails
    pub fn get_ai_config(&self) -> Result<AiConfig> {
        let config = self
            .conn
            .query_row(
                "SELECT model, api_key, base_url, temperature, top_p, enabled FROM ai_config WHERE id = 1",
                [],
                |row| {
                    Ok(AiConfig {
                        model: row.get(0)?,
                        api_key: row.get(1)?,
                        base_url: row.get(2)?,
                        temperature: row.get(3)?,
                        top_p: row.get(4)?,
                        enabled: row.get(5)?,
                    })
                },
            )
            .optional()?;

        Ok(config.unwrap_or_default())
    }

    /// Save AI configuration
    ///
    /// # Errors
    ///
    /// Returns an error if the database write fails
    pub fn save_ai_config(&self, config: &AiConfig) -> Result<()> {
        self.conn.execute(
            "INSERT INTO ai_config (id, model, api_key, base_url, temperature, top_p, enabled, updated_at)
             VALUES (1, ?1, ?2, ?3, ?4, ?5, ?6, datetime('now'))
             ON CONFLICT(id) DO UPDATE SET
                model = excluded.model,
                api_key = excluded.api_key,
                base_url = excluded.base_url,
                temperature = excluded.temperature,
                top_p = excluded.top_p,
                enabled = excluded.enabled,
                updated_at = excluded.updated_at",
            params![
                config.model,
                config.api_key,
                config.base_url,
                config.temperature,
                config.top_p,
                config.enabled,
            ],
        )?;

        Ok(())
    }

    /// Update a single AI config field. `None` clears optional fields.
    ///
    /// # Errors
    ///
    /// Returns an error for unknown keys, unparsable values or database failures
    pub fn update_ai_config_field(&self, key: &str, value: Option<&str>) -> Result<()> {
        let mut config = self.get_ai_config()?;
        let owned = value.map(str::to_string);

        match key {
            "model" => config.model = owned,
            "api_key" => config.api_key = owned,
            "base_url" => config.base_url = owned,
            "temperature" => config.temperature = parse_float(key, value)?,
            "top_p" => config.top_p = parse_float(key, value)?,
            "enabled" => {
                config.enabled = value.is_some_and(|v| v == "true" || v == "1");
            }
            _ => return Err(StorageError::UnknownConfigKey(key.to_string())),
        }

        self.save_ai_config(&config)
    }
}

fn parse_float(key: &str, value: Option<&str>) -> Result<f32> {
    let raw = value.unwrap_or_default();
    raw.trim()
        .parse()
        .map_err(|_| StorageError::InvalidConfigValue {
            key: key.to_string(),
            value: raw.to_string(),
        })
}
