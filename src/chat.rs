//! Conversation state for a front-end.
//!
//! [`ChatSession`] owns the transcript and turns each submitted line into a user message plus
//! either the assistant reply or a fixed fallback message. The transcript lives in memory only.

use crate::client::WebhookClient;
use crate::session::SessionId;
use crate::types::{ChatMessage, MessageRole};
use tracing::error;

pub const WELCOME_MESSAGE: &str = "Hey! I'm FlexAI, your personal fitness coach. I'm here to help you crush your fitness goals! What would you like to work on today?";

/// Shown in place of a reply when the call fails for any reason.
pub const FALLBACK_MESSAGE: &str =
    "Sorry, I'm having trouble connecting right now. Please try again in a moment.";

pub struct ChatSession {
    client: WebhookClient,
    session_id: SessionId,
    messages: Vec<ChatMessage>,
}

impl ChatSession {
    /// New transcript containing only the welcome message.
    pub fn new(client: WebhookClient, session_id: SessionId) -> Self {
        Self {
            client,
            session_id,
            messages: vec![ChatMessage::assistant(WELCOME_MESSAGE)],
        }
    }

    pub fn session_id(&self) -> &SessionId {
        &self.session_id
    }

    pub fn messages(&self) -> &[ChatMessage] {
        &self.messages
    }

    /// Submit one line of user input.
    ///
    /// Blank input is ignored and returns `None`. Otherwise the trimmed text is recorded,
    /// sent, and the appended assistant message is returned. Taking `&mut self` means one
    /// session never has two calls in flight.
    pub async fn submit(&mut self, input: &str) -> Option<&ChatMessage> {
        let text = input.trim();
        if text.is_empty() {
            return None;
        }

        self.messages.push(ChatMessage::user(text));

        let content = match self.client.send_message(&self.session_id, text).await {
            Ok(reply) => reply,
            Err(e) => {
                error!(error = %e, kind = %e.kind(), "error sending message");
                FALLBACK_MESSAGE.to_string()
            }
        };

        self.messages
            .push(ChatMessage::new(MessageRole::Assistant, content));
        self.messages.last()
    }
}
