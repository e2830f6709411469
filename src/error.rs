use std::fmt;
use thiserror::Error;

/// Boxed cause attached to [`ClientError::Unknown`].
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Fixed message carried by every [`ClientError::Unknown`] raised while talking to the endpoint.
pub const COMMUNICATION_FAILURE: &str = "failed to communicate with the workflow endpoint";

/// Coarse error category, stable across releases.
///
/// UI layers should branch on this rather than on message text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// Endpoint URL or authentication key missing.
    Configuration,
    /// The endpoint answered with a non-success HTTP status.
    Transport,
    /// The endpoint answered, but with no recognizable reply.
    Format,
    /// Anything else: network failures, undecodable bodies.
    Unknown,
}

impl ErrorKind {
    /// Returns the canonical code string (e.g., `"transport"`).
    #[inline]
    pub fn code(&self) -> &'static str {
        match self {
            Self::Configuration => "configuration",
            Self::Transport => "transport",
            Self::Format => "format",
            Self::Unknown => "unknown",
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// Classified failure of a single webhook call.
///
/// Every failing path of [`crate::WebhookClient::send_message`] yields exactly one of these.
#[derive(Debug, Error)]
pub enum ClientError {
    #[error("Configuration error: {message}")]
    Configuration { message: String },

    #[error("Transport error: {message}")]
    Transport { status: u16, message: String },

    #[error("Format error: {message}")]
    Format {
        message: String,
        payload: serde_json::Value,
    },

    #[error("Unknown error: {message}")]
    Unknown {
        message: String,
        #[source]
        source: BoxError,
    },
}

impl ClientError {
    pub fn configuration(msg: impl Into<String>) -> Self {
        ClientError::Configuration {
            message: msg.into(),
        }
    }

    /// Non-success HTTP status; `body` is the response text (or a placeholder when unreadable).
    pub fn transport(status: u16, body: &str) -> Self {
        ClientError::Transport {
            status,
            message: format!("workflow endpoint returned {}: {}", status, body),
        }
    }

    /// Decoded payload that matched no known reply shape. The full payload is embedded in the message.
    pub fn format(payload: serde_json::Value) -> Self {
        ClientError::Format {
            message: format!("invalid response from workflow endpoint: {}", payload),
            payload,
        }
    }

    /// Wrap an unclassified failure raised while talking to the endpoint.
    pub fn communication(cause: impl Into<BoxError>) -> Self {
        Self::unknown(COMMUNICATION_FAILURE, cause)
    }

    pub fn unknown(msg: impl Into<String>, cause: impl Into<BoxError>) -> Self {
        ClientError::Unknown {
            message: msg.into(),
            source: cause.into(),
        }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            ClientError::Configuration { .. } => ErrorKind::Configuration,
            ClientError::Transport { .. } => ErrorKind::Transport,
            ClientError::Format { .. } => ErrorKind::Format,
            ClientError::Unknown { .. } => ErrorKind::Unknown,
        }
    }

    /// Human-readable message without the category prefix used by `Display`.
    pub fn message(&self) -> &str {
        match self {
            ClientError::Configuration { message }
            | ClientError::Transport { message, .. }
            | ClientError::Format { message, .. }
            | ClientError::Unknown { message, .. } => message,
        }
    }

    /// HTTP status, present only for transport failures.
    pub fn status_code(&self) -> Option<u16> {
        match self {
            ClientError::Transport { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Wrapped cause, present only for unknown failures.
    pub fn cause(&self) -> Option<&(dyn std::error::Error + Send + Sync + 'static)> {
        match self {
            ClientError::Unknown { source, .. } => Some(source.as_ref()),
            _ => None,
        }
    }

    /// Payload that failed normalization, present only for format failures.
    pub fn payload(&self) -> Option<&serde_json::Value> {
        match self {
            ClientError::Format { payload, .. } => Some(payload),
            _ => None,
        }
    }
}
