use crate::client::builder::WebhookClientBuilder;
use crate::client::normalize::normalize_reply;
use crate::client::validation::{
    validate_config, ConfigValidation, MISSING_AUTH_KEY, MISSING_WEBHOOK_URL,
};
use crate::config::WebhookConfig;
use crate::session::SessionId;
use crate::transport::{HttpTransport, TransportError};
use crate::types::WebhookRequest;
use crate::{ClientError, Result};
use std::sync::Arc;
use tracing::{debug, error, instrument};

/// Body text used when a failed response cannot be read.
const UNREADABLE_BODY: &str = "Unknown error";

/// Client for the workflow webhook.
///
/// Holds only read-only configuration and a pooled HTTP client, so it can be cloned freely
/// and used from concurrent tasks without coordination.
#[derive(Clone)]
pub struct WebhookClient {
    pub(crate) config: Arc<WebhookConfig>,
    pub(crate) transport: HttpTransport,
}

impl WebhookClient {
    pub fn builder() -> WebhookClientBuilder {
        WebhookClientBuilder::new()
    }

    /// Missing values are not rejected here; they surface from [`Self::send_message`]
    /// and [`Self::validate_config`].
    pub fn new(config: WebhookConfig) -> Result<Self> {
        WebhookClientBuilder::new().config(config).build()
    }

    pub fn from_env() -> Result<Self> {
        Self::new(WebhookConfig::from_env())
    }

    pub fn config(&self) -> &WebhookConfig {
        &self.config
    }

    /// Which required values are missing. No network activity.
    pub fn validate_config(&self) -> ConfigValidation {
        validate_config(&self.config)
    }

    /// Send one user message and return the normalized assistant reply.
    ///
    /// Exactly one POST is attempted, and only when both the endpoint URL and the auth key are
    /// configured. Failures are classified:
    /// - missing URL or key: [`ClientError::Configuration`]
    /// - non-2xx status: [`ClientError::Transport`] with the status and body text
    /// - decoded body with no recognizable reply: [`ClientError::Format`]
    /// - anything else (connect, read, decode): [`ClientError::Unknown`]
    #[instrument(name = "send_message", skip_all, fields(session_id = %session_id))]
    pub async fn send_message(&self, session_id: &SessionId, message: &str) -> Result<String> {
        let webhook_url = self
            .config
            .webhook_url()
            .ok_or_else(|| ClientError::configuration(MISSING_WEBHOOK_URL))?;
        let auth_key = self
            .config
            .auth_key()
            .ok_or_else(|| ClientError::configuration(MISSING_AUTH_KEY))?;

        let request = WebhookRequest::new(session_id, message);
        let response = self
            .transport
            .post_form(webhook_url, auth_key, request)
            .await
            .map_err(ClientError::communication)?;

        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| UNREADABLE_BODY.to_string());
            return Err(ClientError::transport(status.as_u16(), &body));
        }

        let body = response
            .bytes()
            .await
            .map_err(|e| ClientError::communication(TransportError::Http(e)))?;
        let envelope: serde_json::Value =
            serde_json::from_slice(&body).map_err(ClientError::communication)?;
        debug!(payload = %envelope, "workflow response");

        match normalize_reply(&envelope) {
            Some(reply) => Ok(reply.to_owned()),
            None => {
                error!(payload = %envelope, "unexpected workflow response format");
                Err(ClientError::format(envelope))
            }
        }
    }
}
