use anyhow::Result;
use wellsoulix_storage::AiConfig;

use crate::ai_provider::{create_provider, AiProviderTrait, GenerationRequest};

/// Reply used whenever the backend call fails
pub const ERROR_FALLBACK_REPLY: &str =
    "[Mode: Error] I'm having a little trouble connecting to the network. I'm still here for you \u{1f49c}.";

/// Companion service
///
/// Wraps the configured provider and never fails: backend errors are
/// logged and replaced with [`ERROR_FALLBACK_REPLY`].
pub struct CompanionService {
    provider: Box<dyn AiProviderTrait>,
    enabled: bool,
}

impl CompanionService {
    /// Create a new companion service from configuration
    ///
    /// # Errors
    ///
    /// Returns an error if the provider cannot be constructed (missing API key)
    pub fn new(config: &AiConfig) -> Result<Self> {
        let provider = create_provider(config)?;
        log::info!("Companion service using model {}", provider.model_name());
        Ok(Self {
            provider,
            enabled: config.enabled,
        })
    }

    /// Wrap an existing provider
    #[must_use]
    pub fn with_provider(provider: Box<dyn AiProviderTrait>) -> Self {
        Self {
            provider,
            enabled: true,
        }
    }

    /// Check if AI service is available/online
    pub async fn is_available(&self) -> bool {
        self.enabled && self.provider.is_available().await
    }

    /// Get the model name in use
    #[must_use]
    pub fn model_name(&self) -> &str {
        self.provider.model_name()
    }

    /// Generate a reply. The result may be empty if the backend returned no text.
    pub async fn respond(&self, request: &GenerationRequest) -> String {
        if !self.enabled {
            log::warn!("Generation disabled in config, replying with fallback");
            return ERROR_FALLBACK_REPLY.to_string();
        }

        match self.provider.generate(request).await {
            Ok(text) => text,
            Err(e) => {
                log::error!("Generation failed for {} mode: {e:#}", request.mode);
                ERROR_FALLBACK_REPLY.to_string()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use wellsoulix_storage::Mode;

    struct FixedProvider(Option<&'static str>);

    #[async_trait]
    impl AiProviderTrait for FixedProvider {
        async fn generate(&self, _request: &GenerationRequest) -> Result<String> {
            self.0
                .map(str::to_string)
                .ok_or_else(|| anyhow::anyhow!("network down"))
        }

        fn model_name(&self) -> &str {
            "fixed"
        }
    }

    fn request() -> GenerationRequest {
        GenerationRequest {
            prompt: "hi".to_string(),
            mode: Mode::Comfort,
            history: Vec::new(),
            attachment: None,
        }
    }

    #[tokio::test]
    async fn test_respond_passes_reply_through() {
        let service = CompanionService::with_provider(Box::new(FixedProvider(Some("[Mode: Comfort] hey"))));
        assert_eq!(service.respond(&request()).await, "[Mode: Comfort] hey");
        assert!(service.is_available().await);
        assert_eq!(service.model_name(), "fixed");
    }

    #[tokio::test]
    async fn test_respond_swallows_errors() {
        let service = CompanionService::with_provider(Box::new(FixedProvider(None)));
        assert_eq!(service.respond(&request()).await, ERROR_FALLBACK_REPLY);
    }

    #[tokio::test]
    async fn test_empty_reply_is_not_replaced() {
        let service = CompanionService::with_provider(Box::new(FixedProvider(Some(""))));
        assert_eq!(service.respond(&request()).await, "");
    }
}
