//! Send-and-receive cycle against the companion service
//!
//! A dispatch is split in two halves. [`MessageDispatcher::begin`] records
//! the user message and captures the active mode; [`MessageDispatcher::complete`]
//! writes the reply into that captured mode, even if the user has switched
//! modes in between.

use std::sync::Arc;

use wellsoulix_ai::{CompanionService, GenerationRequest, HistoryTurn};
use wellsoulix_storage::{Attachment, Message, Mode};

use crate::session::Session;

/// Reply used when the backend answers with no text
pub const EMPTY_REPLY_FALLBACK: &str = "I'm right here with you. How can I help further?";

/// A dispatch whose reply has not been recorded yet
#[derive(Debug, Clone)]
pub struct PendingDispatch {
    mode: Mode,
    request: GenerationRequest,
    fallback: &'static str,
    reply_id_prefix: Option<&'static str>,
}

impl PendingDispatch {
    pub(crate) fn new(
        request: GenerationRequest,
        fallback: &'static str,
        reply_id_prefix: Option<&'static str>,
    ) -> Self {
        Self {
            mode: request.mode,
            request,
            fallback,
            reply_id_prefix,
        }
    }

    /// Mode the reply will be written to
    #[must_use]
    pub const fn mode(&self) -> Mode {
        self.mode
    }

    #[must_use]
    pub const fn request(&self) -> &GenerationRequest {
        &self.request
    }
}

#[derive(Clone)]
pub struct MessageDispatcher {
    service: Arc<CompanionService>,
}

impl MessageDispatcher {
    #[must_use]
    pub fn new(service: Arc<CompanionService>) -> Self {
        Self { service }
    }

    #[must_use]
    pub fn service(&self) -> &CompanionService {
        &self.service
    }

    /// Record the user message and prepare the generation request.
    ///
    /// Returns `None` without touching the session when the text is blank
    /// and there is no attachment.
    pub fn begin(
        session: &mut Session,
        text: &str,
        attachment: Option<Attachment>,
    ) -> Option<PendingDispatch> {
        if text.trim().is_empty() && attachment.is_none() {
            log::debug!("Ignoring empty send");
            return None;
        }

        let mode = session.active_mode();
        let history = HistoryTurn::from_messages(session.transcript(mode));

        session.append_message(mode, Message::user(text, attachment.clone()));
        session.set_input(String::new());
        session.clear_pending_attachment();
        session.set_typing(true);

        Some(PendingDispatch::new(
            GenerationRequest {
                prompt: text.to_string(),
                mode,
                history,
                attachment,
            },
            EMPTY_REPLY_FALLBACK,
            None,
        ))
    }

    /// Call the backend. Never fails; errors become the error fallback reply.
    pub async fn generate(&self, pending: &PendingDispatch) -> String {
        log::debug!(
            "Dispatching to {} with {} prior turns",
            self.service.model_name(),
            pending.request.history.len()
        );
        self.service.respond(&pending.request).await
    }

    /// Append the reply to the dispatch-time mode and clear the typing flag
    pub fn complete(session: &mut Session, pending: PendingDispatch, reply: &str) -> Message {
        let text = if reply.is_empty() {
            pending.fallback
        } else {
            reply
        };
        let mut message = Message::model(text, pending.mode);
        if let Some(prefix) = pending.reply_id_prefix {
            message = message.with_id_prefix(prefix);
        }

        session.append_message(pending.mode, message.clone());
        session.set_typing(false);
        message
    }

    /// Send a message from the active mode and wait for the reply.
    ///
    /// Returns `None` if nothing was dispatched.
    pub async fn send(
        &self,
        session: &mut Session,
        text: &str,
        attachment: Option<Attachment>,
    ) -> Option<Message> {
        let pending = Self::begin(session, text, attachment)?;
        let reply = self.generate(&pending).await;
        Some(Self::complete(session, pending, &reply))
    }

    /// Send the session's input buffer with its pending attachment
    pub async fn send_pending(&self, session: &mut Session) -> Option<Message> {
        let text = session.input().to_string();
        let attachment = session.pending_attachment().cloned();
        self.send(session, &text, attachment).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::scripted_service;
    use wellsoulix_ai::ERROR_FALLBACK_REPLY;
    use wellsoulix_storage::Role;

    fn setup(replies: &[Option<&str>]) -> (MessageDispatcher, crate::testing::Calls, Session) {
        let (service, calls) = scripted_service(replies);
        (
            MessageDispatcher::new(service),
            calls,
            Session::login("Mina").unwrap(),
        )
    }

    #[tokio::test]
    async fn test_blank_send_is_noop() {
        let (dispatcher, calls, mut session) = setup(&[Some("unused")]);

        assert!(dispatcher.send(&mut session, "   ", None).await.is_none());
        assert!(dispatcher.send(&mut session, "", None).await.is_none());
        assert!(session.active_transcript().is_empty());
        assert!(calls.lock().unwrap().is_empty());
        assert!(!session.is_typing());
    }

    #[tokio::test]
    async fn test_send_appends_user_then_model() {
        let (dispatcher, _calls, mut session) = setup(&[Some("[Mode: Comfort] I hear you.")]);

        let reply = dispatcher.send(&mut session, "rough day", None).await.unwrap();

        let transcript = session.active_transcript();
        assert_eq!(transcript.len(), 2);
        assert_eq!(transcript[0].role, Role::User);
        assert_eq!(transcript[0].text, "rough day");
        assert_eq!(transcript[1], reply);
        assert_eq!(reply.text, "[Mode: Comfort] I hear you.");
        assert_eq!(reply.mode, Some(Mode::Comfort));
        assert!(!session.is_typing());
    }

    #[tokio::test]
    async fn test_history_excludes_new_message() {
        let (dispatcher, calls, mut session) = setup(&[Some("one"), Some("two")]);
        session.switch_mode(Mode::Calm);

        dispatcher.send(&mut session, "first", None).await;
        dispatcher.send(&mut session, "second", None).await;

        let calls = calls.lock().unwrap();
        assert_eq!(calls.len(), 2);
        assert_eq!(calls[0].history.len(), 1);
        assert_eq!(calls[0].history[0].role, Role::Model);
        assert_eq!(calls[1].prompt, "second");
        assert_eq!(calls[1].mode, Mode::Calm);
        let texts: Vec<&str> = calls[1]
            .history
            .iter()
            .map(|t| t.parts[0].text.as_str())
            .collect();
        assert_eq!(texts[1..], ["first", "one"]);
    }

    #[tokio::test]
    async fn test_empty_reply_uses_fallback() {
        let (dispatcher, _calls, mut session) = setup(&[Some("")]);

        let reply = dispatcher.send(&mut session, "hello?", None).await.unwrap();
        assert_eq!(reply.text, EMPTY_REPLY_FALLBACK);
    }

    #[tokio::test]
    async fn test_backend_failure_uses_error_fallback() {
        let (dispatcher, _calls, mut session) = setup(&[None]);

        let reply = dispatcher.send(&mut session, "hi", None).await.unwrap();
        assert_eq!(reply.text, ERROR_FALLBACK_REPLY);
        assert_eq!(session.active_transcript().len(), 2);
        assert!(!session.is_typing());
    }

    #[tokio::test]
    async fn test_attachment_only_send_dispatches() {
        let (dispatcher, calls, mut session) = setup(&[Some("nice link")]);
        let link = Attachment::Link {
            url: "https://example.com".to_string(),
        };

        dispatcher.send(&mut session, "", Some(link.clone())).await.unwrap();

        assert_eq!(session.active_transcript()[0].attachment, Some(link.clone()));
        assert_eq!(calls.lock().unwrap()[0].attachment, Some(link));
    }

    #[tokio::test]
    async fn test_send_pending_clears_input_and_attachment() {
        let (dispatcher, calls, mut session) = setup(&[Some("ok")]);
        session.set_input("look at this");
        session.set_pending_attachment(Attachment::Doc {
            data: "essay.pdf".to_string(),
            mime_type: None,
        });

        dispatcher.send_pending(&mut session).await.unwrap();

        assert!(session.input().is_empty());
        assert!(session.pending_attachment().is_none());
        assert_eq!(calls.lock().unwrap()[0].prompt, "look at this");
    }

    #[tokio::test]
    async fn test_reply_lands_in_dispatch_time_mode() {
        let (dispatcher, _calls, mut session) = setup(&[Some("[Mode: Calm] breathe")]);
        session.switch_mode(Mode::Calm);

        let pending = MessageDispatcher::begin(&mut session, "anxious", None).unwrap();
        assert!(session.is_typing());
        session.switch_mode(Mode::Cheer);
        let reply = dispatcher.generate(&pending).await;
        MessageDispatcher::complete(&mut session, pending, &reply);

        let calm = session.transcript(Mode::Calm);
        assert_eq!(calm.len(), 3);
        assert_eq!(calm[2].text, "[Mode: Calm] breathe");
        assert_eq!(session.transcript(Mode::Cheer).len(), 1);
        assert_eq!(session.active_mode(), Mode::Cheer);
    }
}
