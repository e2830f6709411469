use crate::types::WebhookRequest;
use std::time::Duration;
use tracing::debug;
use url::Url;

/// Header carrying the shared secret.
pub const AUTH_HEADER: &str = "key";

/// Thin wrapper over a pooled `reqwest::Client`. Cheap to clone.
#[derive(Clone)]
pub struct HttpTransport {
    client: reqwest::Client,
}

impl HttpTransport {
    /// `timeout: None` keeps the reqwest default, which never times out.
    pub fn new(timeout: Option<Duration>) -> Result<Self, TransportError> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder.build().map_err(TransportError::Http)?;
        Ok(Self { client })
    }

    /// Single POST attempt; the caller classifies the response.
    pub async fn post_form(
        &self,
        webhook_url: &str,
        auth_key: &str,
        request: WebhookRequest,
    ) -> Result<reqwest::Response, TransportError> {
        let url = Url::parse(webhook_url).map_err(|e| TransportError::InvalidUrl {
            url: webhook_url.to_string(),
            source: e,
        })?;
        debug!(url = %url, "posting to workflow webhook");

        self.client
            .post(url)
            .header(AUTH_HEADER, auth_key)
            .multipart(request.into_form())
            .send()
            .await
            .map_err(TransportError::Http)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("invalid webhook URL {url}: {source}")]
    InvalidUrl {
        url: String,
        #[source]
        source: url::ParseError,
    },
}
