pub mod chat;
pub mod checkin;
pub mod config;
pub mod focus;
pub mod helpers;
pub mod modes;
pub mod play;
pub mod playlist;
pub mod quiz;

use std::sync::Arc;

use anyhow::{Context, Result};
use wellsoulix_ai::CompanionService;
use wellsoulix_core::MessageDispatcher;
use wellsoulix_storage::Database;

/// Build a dispatcher from the stored AI configuration
pub fn dispatcher_from_config(db: &Database) -> Result<MessageDispatcher> {
    let ai_config = db.get_ai_config()?;
    let service = CompanionService::new(&ai_config).context(
        "Companion is not configured. Run `wellsoulix config set ai.api_key <KEY>` or export GEMINI_API_KEY",
    )?;
    Ok(MessageDispatcher::new(Arc::new(service)))
}
