//! # flexai-chat
//!
//! Client for the FlexAI coaching workflow: relays chat messages to an n8n webhook and turns
//! whatever the workflow answers into a single reply string or a classified error.
//!
//! ## Overview
//!
//! - **One call per message**: a multipart `POST` with `sessionId` and `message`, the shared
//!   secret in the `key` header, no retries.
//! - **Shape-tolerant replies**: objects or one-element arrays, with the text under `output`,
//!   `message` or `response`, or a bare JSON string.
//! - **Typed failures**: every failure is exactly one [`ClientError`] variant.
//! - **Stable sessions**: [`session::SessionIdentityProvider`] persists one id per installation.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use flexai_chat::session::{FileSessionStore, SessionIdentityProvider};
//! use flexai_chat::WebhookClient;
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = WebhookClient::from_env()?;
//!     let sessions = SessionIdentityProvider::new(Arc::new(FileSessionStore::open_default()?));
//!     let session_id = sessions.get_or_create_session_id();
//!
//!     match client.send_message(&session_id, "Plan my next workout").await {
//!         Ok(reply) => println!("{reply}"),
//!         Err(e) => eprintln!("{} ({})", e, e.kind()),
//!     }
//!     Ok(())
//! }
//! ```
//!
//! ## Module Organization
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`client`] | Webhook client, builder, reply normalization, config validation |
//! | [`config`] | Configuration struct and layered loader |
//! | [`session`] | Session identifiers and their stores |
//! | [`chat`] | In-memory transcript with fallback handling |
//! | [`transport`] | HTTP plumbing |
//! | [`types`] | Request and transcript types |

pub mod chat;
pub mod client;
pub mod config;
pub mod session;
pub mod transport;
pub mod types;

pub use chat::ChatSession;
pub use client::{ConfigValidation, WebhookClient, WebhookClientBuilder};
pub use config::{ConfigLoader, WebhookConfig};
pub use session::{SessionId, SessionIdentityProvider};

/// Result type alias for the library
pub type Result<T> = std::result::Result<T, ClientError>;

/// Error type for the library
pub mod error;
pub use error::{ClientError, ErrorKind};
