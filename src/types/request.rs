//! Outbound request payload.

use crate::session::SessionId;
use reqwest::multipart::Form;
use serde::Serialize;

pub const SESSION_ID_FIELD: &str = "sessionId";
pub const MESSAGE_FIELD: &str = "message";

/// One call's payload. Sent as a multipart form, never as JSON.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WebhookRequest {
    pub session_id: String,
    pub message: String,
}

impl WebhookRequest {
    pub fn new(session_id: &SessionId, message: impl Into<String>) -> Self {
        Self {
            session_id: session_id.as_str().to_string(),
            message: message.into(),
        }
    }

    /// Exactly two text fields; the message is sent raw.
    pub fn into_form(self) -> Form {
        Form::new()
            .text(SESSION_ID_FIELD, self.session_id)
            .text(MESSAGE_FIELD, self.message)
    }
}
