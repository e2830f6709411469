//! HTTP plumbing for the workflow webhook.

mod http;

pub use http::{HttpTransport, TransportError, AUTH_HEADER};
