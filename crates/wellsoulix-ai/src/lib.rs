pub mod ai_provider;
pub mod ai_service;
pub mod prompt;
pub mod providers;

pub use ai_provider::{create_provider, AiProviderTrait, GenerationRequest, HistoryTurn, TextPart};
pub use ai_service::{CompanionService, ERROR_FALLBACK_REPLY};
pub use providers::google::GoogleGenAiProvider;
