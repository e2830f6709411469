//! Mock webhook server setup for integration tests

use flexai_chat::WebhookClient;
use mockito::{Matcher, Mock, Server, ServerGuard};

pub const WEBHOOK_PATH: &str = "/webhook/flexai-coach";
pub const AUTH_KEY: &str = "test-shared-secret";

/// Test fixture that manages a mock workflow endpoint
pub struct MockWebhook {
    pub server: ServerGuard,
}

impl MockWebhook {
    pub async fn new() -> Self {
        Self {
            server: Server::new_async().await,
        }
    }

    pub fn url(&self) -> String {
        format!("{}{}", self.server.url(), WEBHOOK_PATH)
    }

    /// Client pointed at the mock with both values configured
    pub fn client(&self) -> WebhookClient {
        WebhookClient::builder()
            .webhook_url(self.url())
            .auth_key(AUTH_KEY)
            .build()
            .expect("Failed to build client")
    }

    /// Authenticated POST answered with a JSON body
    pub async fn reply_json(&mut self, status: usize, body: &str) -> Mock {
        self.server
            .mock("POST", WEBHOOK_PATH)
            .match_header("key", AUTH_KEY)
            .with_status(status)
            .with_header("content-type", "application/json")
            .with_body(body)
            .create_async()
            .await
    }

    /// Authenticated POST answered with a plain-text body
    pub async fn reply_text(&mut self, status: usize, body: &str) -> Mock {
        self.server
            .mock("POST", WEBHOOK_PATH)
            .match_header("key", AUTH_KEY)
            .with_status(status)
            .with_header("content-type", "text/plain")
            .with_body(body)
            .create_async()
            .await
    }

    /// Catch-all that fails `assert_async` if any request arrives
    pub async fn expect_no_requests(&mut self) -> Mock {
        self.server
            .mock("POST", Matcher::Any)
            .expect(0)
            .create_async()
            .await
    }
}

/// Address nothing is listening on.
pub fn refused_url() -> String {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").expect("bind");
    let port = listener.local_addr().expect("local addr").port();
    drop(listener);
    format!("http://127.0.0.1:{}{}", port, WEBHOOK_PATH)
}
