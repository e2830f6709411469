//! Startup configuration checks.
//!
//! These never touch the network; they only report which required values are missing.

use crate::config::WebhookConfig;
use serde::Serialize;

pub const MISSING_WEBHOOK_URL: &str = "endpoint URL is not configured";
pub const MISSING_AUTH_KEY: &str = "authentication key is not configured";

/// Outcome of [`validate_config`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ConfigValidation {
    pub is_valid: bool,
    /// Missing values, URL first, key second.
    pub errors: Vec<String>,
}

/// Report which of the two required values are absent.
pub fn validate_config(config: &WebhookConfig) -> ConfigValidation {
    let mut errors = Vec::new();

    if config.webhook_url().is_none() {
        errors.push(MISSING_WEBHOOK_URL.to_string());
    }

    if config.auth_key().is_none() {
        errors.push(MISSING_AUTH_KEY.to_string());
    }

    ConfigValidation {
        is_valid: errors.is_empty(),
        errors,
    }
}
