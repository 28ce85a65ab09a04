/// Configuration management command handlers
use anyhow::Result;
use wellsoulix_core::AppConfig;
use wellsoulix_storage::{AiConfig, Database};

use super::helpers::{mask_secret, rule};

pub fn handle_config_get(key: &str) -> Result<()> {
    let db = Database::new(None)?;
    match get_config_value(&db.get_ai_config()?, key)? {
        Some(v) => println!("{key} = {v}"),
        None => println!("{key} is not set"),
    }
    Ok(())
}

pub fn handle_config_set(key: &str, value: &str) -> Result<()> {
    let db = Database::new(None)?;
    let field = ai_field(key)?;
    let value = Some(value.trim()).filter(|v| !v.is_empty());

    db.update_ai_config_field(field, value)?;
    match value {
        Some(v) if field == "api_key" => println!("Set {key} = {}", mask_secret(v)),
        Some(v) => println!("Set {key} = {v}"),
        None => println!("Cleared {key}"),
    }
    Ok(())
}

pub fn handle_config_list(app_config: &AppConfig) -> Result<()> {
    let db = Database::new(None)?;
    let config = db.get_ai_config()?;

    println!("Configuration:");
    println!("{}", rule(14));

    println!("\n[ai]");
    println!("  model = {}", config.effective_model());
    println!("  base_url = {}", config.effective_base_url());
    match config.effective_api_key() {
        Some(key) => println!("  api_key = {}", mask_secret(&key)),
        None => println!("  api_key = (not set, export GEMINI_API_KEY)"),
    }
    println!("  temperature = {}", config.temperature);
    println!("  top_p = {}", config.top_p);
    println!("  enabled = {}", config.enabled);

    println!("\n[app] (config.toml)");
    println!("  player_tick_ms = {}", app_config.player_tick_ms);
    println!("  focus_tick_ms = {}", app_config.focus_tick_ms);
    println!(
        "  checkin_reply_delay_ms = {}",
        app_config.checkin_reply_delay_ms
    );
    println!(
        "  default_focus_minutes = {}",
        app_config.default_focus_minutes
    );

    Ok(())
}

/// Map `ai.<field>` to a stored field name
fn ai_field(key: &str) -> Result<&str> {
    let Some(("ai", field)) = key.split_once('.') else {
        anyhow::bail!("Invalid key format. Use: ai.<key> (e.g., ai.api_key)");
    };
    match field {
        "model" | "api_key" | "base_url" | "temperature" | "top_p" | "enabled" => Ok(field),
        _ => anyhow::bail!(
            "Unknown key: {key}. Valid keys: ai.model, ai.api_key, ai.base_url, ai.temperature, ai.top_p, ai.enabled"
        ),
    }
}

fn get_config_value(config: &AiConfig, key: &str) -> Result<Option<String>> {
    let value = match ai_field(key)? {
        "model" => config.model.clone(),
        "api_key" => config.api_key.as_deref().map(mask_secret),
        "base_url" => config.base_url.clone(),
        "temperature" => Some(config.temperature.to_string()),
        "top_p" => Some(config.top_p.to_string()),
        _ => Some(config.enabled.to_string()),
    };
    Ok(value)
}
