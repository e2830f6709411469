//! Webhook chat client.
//!
//! Keep the public surface small: build a [`WebhookClient`], call
//! [`WebhookClient::send_message`], branch on the returned [`crate::ClientError`].
//! Implementation details are split into submodules under `src/client/`.

pub mod builder;
pub mod core;
pub mod normalize;
pub mod validation;

pub use builder::WebhookClientBuilder;
pub use self::core::WebhookClient;
pub use normalize::{normalize_reply, Candidate, REPLY_FIELDS};
pub use validation::{validate_config, ConfigValidation, MISSING_AUTH_KEY, MISSING_WEBHOOK_URL};
