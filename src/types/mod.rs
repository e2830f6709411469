//! # Types Module
//!
//! Wire and transcript types shared by the client and the chat session.
//!
//! ## Key Types
//!
//! | Type | Description |
//! |------|-------------|
//! | [`WebhookRequest`] | The two form fields sent to the workflow |
//! | [`ChatMessage`] | One transcript entry with role and timestamp |
//! | [`MessageRole`] | Who wrote a transcript entry |
//!
//! ## Example
//!
//! ```rust
//! use flexai_chat::types::{ChatMessage, MessageRole};
//!
//! let question = ChatMessage::user("How many sets for hypertrophy?");
//! assert_eq!(question.role, MessageRole::User);
//! ```

pub mod message;
pub mod request;

pub use message::{ChatMessage, MessageRole};
pub use request::WebhookRequest;
