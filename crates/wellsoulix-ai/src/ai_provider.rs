use anyhow::{Context, Result};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use wellsoulix_storage::{AiConfig, Attachment, Message, Mode, Role};

use crate::providers::google::GoogleGenAiProvider;

/// Text part of a history turn
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TextPart {
    pub text: String,
}

/// Prior transcript entry in the `{role, parts}` shape the backend expects
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryTurn {
    pub role: Role,
    pub parts: Vec<TextPart>,
}

impl HistoryTurn {
    /// Convert a transcript into history turns, one text part per message
    #[must_use]
    pub fn from_messages(messages: &[Message]) -> Vec<Self> {
        messages
            .iter()
            .map(|m| Self {
                role: m.role,
                parts: vec![TextPart {
                    text: m.text.clone(),
                }],
            })
            .collect()
    }
}

/// Everything a provider needs for one generation call
#[derive(Debug, Clone, PartialEq)]
pub struct GenerationRequest {
    pub prompt: String,
    pub mode: Mode,
    pub history: Vec<HistoryTurn>,
    pub attachment: Option<Attachment>,
}

/// Trait for AI providers
#[async_trait]
pub trait AiProviderTrait: Send + Sync {
    /// Generate a reply for the request. An empty string is a valid reply.
    async fn generate(&self, request: &GenerationRequest) -> Result<String>;

    /// Get the model name being used
    fn model_name(&self) -> &str;

    /// Check if the provider is available
    async fn is_available(&self) -> bool {
        true
    }
}

/// Create a provider instance based on configuration
///
/// # Errors
///
/// Returns an error if no API key is configured or exported
pub fn create_provider(config: &AiConfig) -> Result<Box<dyn AiProviderTrait>> {
    let api_key = config
        .effective_api_key()
        .context("API Key required for Google GenAI (set ai.api_key or GEMINI_API_KEY)")?;

    Ok(Box::new(GoogleGenAiProvider::new(
        &api_key,
        config.effective_model(),
        config.effective_base_url(),
        config.temperature,
        config.top_p,
    )))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_history_from_messages_keeps_order_and_roles() {
        let messages = vec![
            Message::model("welcome", Mode::Calm),
            Message::user("hi", None),
            Message::model("hello", Mode::Calm),
        ];
        let history = HistoryTurn::from_messages(&messages);

        assert_eq!(history.len(), 3);
        assert_eq!(history[0].role, Role::Model);
        assert_eq!(history[1].role, Role::User);
        assert_eq!(history[1].parts[0].text, "hi");
        assert_eq!(history[2].parts[0].text, "hello");
    }

    #[test]
    fn test_history_serializes_lowercase_roles() {
        let history = HistoryTurn::from_messages(&[Message::user("hey", None)]);
        let json = serde_json::to_value(&history).unwrap();
        assert_eq!(json[0]["role"], "user");
        assert_eq!(json[0]["parts"][0]["text"], "hey");
    }

    #[test]
    fn test_create_provider_uses_configured_model() {
        let config = AiConfig {
            api_key: Some("test-key".to_string()),
            model: Some("gemini-2.5-flash".to_string()),
            ..AiConfig::default()
        };
        let provider = create_provider(&config).unwrap();
        assert_eq!(provider.model_name(), "gemini-2.5-flash");
    }
}
