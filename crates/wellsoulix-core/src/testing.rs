//! Scripted provider shared by dispatch tests

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use anyhow::Result;
use async_trait::async_trait;
use wellsoulix_ai::{AiProviderTrait, CompanionService, GenerationRequest};

pub type Calls = Arc<Mutex<Vec<GenerationRequest>>>;

/// Replies from a queue; `None` entries and an exhausted queue fail the call
pub struct ScriptedProvider {
    replies: Mutex<VecDeque<Option<String>>>,
    calls: Calls,
}

#[async_trait]
impl AiProviderTrait for ScriptedProvider {
    async fn generate(&self, request: &GenerationRequest) -> Result<String> {
        self.calls.lock().unwrap().push(request.clone());
        self.replies
            .lock()
            .unwrap()
            .pop_front()
            .flatten()
            .ok_or_else(|| anyhow::anyhow!("network unreachable"))
    }

    fn model_name(&self) -> &str {
        "scripted"
    }
}

pub fn scripted_service(replies: &[Option<&str>]) -> (Arc<CompanionService>, Calls) {
    let calls = Calls::default();
    let provider = ScriptedProvider {
        replies: Mutex::new(replies.iter().map(|r| r.map(str::to_string)).collect()),
        calls: Arc::clone(&calls),
    };
    (
        Arc::new(CompanionService::with_provider(Box::new(provider))),
        calls,
    )
}
