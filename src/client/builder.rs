use crate::client::core::WebhookClient;
use crate::config::WebhookConfig;
use crate::transport::HttpTransport;
use crate::{ClientError, Result};
use std::sync::Arc;
use std::time::Duration;

/// Builder for creating clients with custom configuration.
///
/// Keep this surface area small and predictable.
#[derive(Default)]
pub struct WebhookClientBuilder {
    config: WebhookConfig,
}

impl WebhookClientBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start from an already-loaded configuration.
    pub fn config(mut self, config: WebhookConfig) -> Self {
        self.config = config;
        self
    }

    pub fn webhook_url(mut self, url: impl Into<String>) -> Self {
        self.config = self.config.with_webhook_url(url);
        self
    }

    pub fn auth_key(mut self, key: impl Into<String>) -> Self {
        self.config = self.config.with_auth_key(key);
        self
    }

    /// Opt-in request timeout. Without it a call runs until the transport gives up.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.config = self.config.with_timeout(timeout);
        self
    }

    /// Build the client. Only fails if the HTTP client itself cannot be created.
    pub fn build(self) -> Result<WebhookClient> {
        let transport = HttpTransport::new(self.config.timeout())
            .map_err(|e| ClientError::unknown("failed to create HTTP client", e))?;
        Ok(WebhookClient {
            config: Arc::new(self.config),
            transport,
        })
    }
}
