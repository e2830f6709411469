//! Webhook configuration.
//!
//! [`WebhookConfig`] is populated once at startup (usually through [`ConfigLoader`]) and is
//! read-only afterwards. Both values are optional here: a missing value is reported by
//! [`WebhookConfig::validate`] and turned into a configuration error at call time.

mod loader;

pub use loader::{
    ConfigError, ConfigLoader, AUTH_KEY_ENV, CONFIG_FILE_ENV, KEYRING_SERVICE, KEYRING_USER,
    PUBLIC_AUTH_KEY_ENV, PUBLIC_WEBHOOK_URL_ENV, TIMEOUT_ENV, WEBHOOK_URL_ENV,
};

use crate::client::validation::{validate_config, ConfigValidation};
use std::fmt;
use std::time::Duration;

#[derive(Clone, Default, PartialEq, Eq)]
pub struct WebhookConfig {
    webhook_url: Option<String>,
    auth_key: Option<String>,
    timeout: Option<Duration>,
}

impl WebhookConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Read the process environment (server variables over public ones). No file, no keyring.
    pub fn from_env() -> Self {
        ConfigLoader::new().load_env()
    }

    /// Set the endpoint URL. An empty string leaves it unset.
    pub fn with_webhook_url(mut self, url: impl Into<String>) -> Self {
        self.webhook_url = non_empty(url.into());
        self
    }

    /// Set the shared secret sent in the `key` header. An empty string leaves it unset.
    pub fn with_auth_key(mut self, key: impl Into<String>) -> Self {
        self.auth_key = non_empty(key.into());
        self
    }

    /// Bound the whole request. Unset means the transport default (no timeout).
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    pub fn webhook_url(&self) -> Option<&str> {
        self.webhook_url.as_deref()
    }

    pub fn auth_key(&self) -> Option<&str> {
        self.auth_key.as_deref()
    }

    pub fn timeout(&self) -> Option<Duration> {
        self.timeout
    }

    pub fn validate(&self) -> ConfigValidation {
        validate_config(self)
    }
}

// The key is a shared secret; keep it out of logs.
impl fmt::Debug for WebhookConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WebhookConfig")
            .field("webhook_url", &self.webhook_url)
            .field("auth_key", &self.auth_key.as_ref().map(|_| "<redacted>"))
            .field("timeout", &self.timeout)
            .finish()
    }
}

pub(crate) fn non_empty(value: String) -> Option<String> {
    if value.is_empty() {
        None
    } else {
        Some(value)
    }
}
