//! Integration tests for request construction, reply normalization and error classification

use crate::integration::mock_server::{refused_url, MockWebhook, AUTH_KEY, WEBHOOK_PATH};
use flexai_chat::client::{MISSING_AUTH_KEY, MISSING_WEBHOOK_URL};
use flexai_chat::error::COMMUNICATION_FAILURE;
use flexai_chat::{ClientError, ErrorKind, SessionId, WebhookClient};
use mockito::Matcher;
use serde_json::json;

fn session() -> SessionId {
    SessionId::from("user-lx3k9a-q8w2e4r")
}

#[tokio::test]
async fn test_missing_url_makes_no_request() {
    let mut webhook = MockWebhook::new().await;
    let guard = webhook.expect_no_requests().await;

    let client = WebhookClient::builder().auth_key(AUTH_KEY).build().unwrap();
    let err = client.send_message(&session(), "hi").await.unwrap_err();

    assert_eq!(err.kind(), ErrorKind::Configuration);
    assert_eq!(err.message(), MISSING_WEBHOOK_URL);
    assert_eq!(err.status_code(), None);
    guard.assert_async().await;
}

#[tokio::test]
async fn test_missing_key_makes_no_request() {
    let mut webhook = MockWebhook::new().await;
    let guard = webhook.expect_no_requests().await;

    let client = WebhookClient::builder()
        .webhook_url(webhook.url())
        .build()
        .unwrap();
    let err = client.send_message(&session(), "hi").await.unwrap_err();

    assert!(matches!(err, ClientError::Configuration { .. }));
    assert_eq!(err.message(), MISSING_AUTH_KEY);
    guard.assert_async().await;
}

#[tokio::test]
async fn test_both_missing_reports_url_and_validates_in_order() {
    let mut webhook = MockWebhook::new().await;
    let guard = webhook.expect_no_requests().await;

    let client = WebhookClient::builder().build().unwrap();
    let err = client.send_message(&session(), "hi").await.unwrap_err();
    assert_eq!(err.message(), MISSING_WEBHOOK_URL);

    let report = client.validate_config();
    assert!(!report.is_valid);
    assert_eq!(report.errors, vec![MISSING_WEBHOOK_URL, MISSING_AUTH_KEY]);
    guard.assert_async().await;
}

#[tokio::test]
async fn test_request_carries_key_header_and_form_fields() {
    let mut webhook = MockWebhook::new().await;
    let mock = webhook
        .server
        .mock("POST", WEBHOOK_PATH)
        .match_header("key", AUTH_KEY)
        .match_header(
            "content-type",
            Matcher::Regex("^multipart/form-data; boundary=".to_string()),
        )
        .match_body(Matcher::AllOf(vec![
            Matcher::Regex(r#"name="sessionId"\s+user-lx3k9a-q8w2e4r\s"#.to_string()),
            Matcher::Regex(r#"name="message"\s+Plan my leg day & cardio\s"#.to_string()),
        ]))
        .expect(1)
        .with_status(200)
        .with_body(r#"{"output":"Let's go"}"#)
        .create_async()
        .await;

    let reply = webhook
        .client()
        .send_message(&session(), "Plan my leg day & cardio")
        .await
        .unwrap();

    assert_eq!(reply, "Let's go");
    mock.assert_async().await;
}

#[tokio::test]
async fn test_server_error_is_transport_error() {
    let mut webhook = MockWebhook::new().await;
    let _mock = webhook.reply_text(500, "boom").await;

    let err = webhook
        .client()
        .send_message(&session(), "hi")
        .await
        .unwrap_err();

    assert_eq!(err.kind(), ErrorKind::Transport);
    assert_eq!(err.status_code(), Some(500));
    assert!(err.message().contains("500"));
    assert!(err.message().contains("boom"));
    assert!(err.cause().is_none());
}

#[tokio::test]
async fn test_not_found_with_json_body_is_transport_error() {
    let mut webhook = MockWebhook::new().await;
    let _mock = webhook
        .reply_json(404, r#"{"code":404,"message":"webhook not registered"}"#)
        .await;

    let err = webhook
        .client()
        .send_message(&session(), "hi")
        .await
        .unwrap_err();

    // A non-2xx body is never normalized, even when it has a `message` field.
    assert_eq!(err.status_code(), Some(404));
    assert!(err.message().contains("webhook not registered"));
}

#[tokio::test]
async fn test_output_field() {
    let mut webhook = MockWebhook::new().await;
    let _mock = webhook.reply_json(200, r#"{"output": "hello"}"#).await;

    let reply = webhook.client().send_message(&session(), "hi").await.unwrap();
    assert_eq!(reply, "hello");
}

#[tokio::test]
async fn test_array_envelope_uses_first_element() {
    let mut webhook = MockWebhook::new().await;
    let _mock = webhook.reply_json(200, r#"[{"message": "hi"}]"#).await;

    let reply = webhook.client().send_message(&session(), "hello").await.unwrap();
    assert_eq!(reply, "hi");
}

#[tokio::test]
async fn test_output_beats_message() {
    let mut webhook = MockWebhook::new().await;
    let _mock = webhook
        .reply_json(200, r#"{"output": "A", "message": "B"}"#)
        .await;

    let reply = webhook.client().send_message(&session(), "hi").await.unwrap();
    assert_eq!(reply, "A");
}

#[tokio::test]
async fn test_response_field() {
    let mut webhook = MockWebhook::new().await;
    let _mock = webhook
        .reply_json(200, r#"[{"response": "Rest 90 seconds"}]"#)
        .await;

    let reply = webhook.client().send_message(&session(), "hi").await.unwrap();
    assert_eq!(reply, "Rest 90 seconds");
}

#[tokio::test]
async fn test_bare_string_body() {
    let mut webhook = MockWebhook::new().await;
    let _mock = webhook.reply_json(200, r#""plain text""#).await;

    let reply = webhook.client().send_message(&session(), "hi").await.unwrap();
    assert_eq!(reply, "plain text");
}

#[tokio::test]
async fn test_unrecognized_shape_is_format_error() {
    let mut webhook = MockWebhook::new().await;
    let _mock = webhook.reply_json(200, r#"{"foo": "bar"}"#).await;

    let err = webhook
        .client()
        .send_message(&session(), "hi")
        .await
        .unwrap_err();

    assert_eq!(err.kind(), ErrorKind::Format);
    assert!(err.message().contains(r#"{"foo":"bar"}"#));
    assert_eq!(err.payload(), Some(&json!({"foo": "bar"})));
    assert_eq!(err.status_code(), None);
}

#[tokio::test]
async fn test_empty_array_is_format_error() {
    let mut webhook = MockWebhook::new().await;
    let _mock = webhook.reply_json(200, "[]").await;

    let err = webhook
        .client()
        .send_message(&session(), "hi")
        .await
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Format);
}

#[tokio::test]
async fn test_undecodable_body_is_unknown_error() {
    let mut webhook = MockWebhook::new().await;
    let _mock = webhook.reply_text(200, "<html>not json</html>").await;

    let err = webhook
        .client()
        .send_message(&session(), "hi")
        .await
        .unwrap_err();

    assert_eq!(err.kind(), ErrorKind::Unknown);
    assert_eq!(err.message(), COMMUNICATION_FAILURE);
    assert!(err.cause().is_some());
}

#[tokio::test]
async fn test_connection_refused_is_unknown_error() {
    let client = WebhookClient::builder()
        .webhook_url(refused_url())
        .auth_key(AUTH_KEY)
        .build()
        .unwrap();

    let err = client.send_message(&session(), "hi").await.unwrap_err();

    assert!(matches!(err, ClientError::Unknown { .. }));
    assert_eq!(err.message(), COMMUNICATION_FAILURE);
    assert_eq!(err.status_code(), None);
    assert!(std::error::Error::source(&err).is_some());
}

#[tokio::test]
async fn test_concurrent_calls_are_independent() {
    let mut webhook = MockWebhook::new().await;
    let mock = webhook
        .server
        .mock("POST", WEBHOOK_PATH)
        .match_header("key", AUTH_KEY)
        .with_status(200)
        .with_body(r#"{"output":"ok"}"#)
        .expect(2)
        .create_async()
        .await;

    let client = webhook.client();
    let other = client.clone();
    let first_session = session();
    let second_session = SessionId::from("user-other-1234567");
    let (a, b) = tokio::join!(
        client.send_message(&first_session, "one"),
        other.send_message(&second_session, "two"),
    );

    assert_eq!(a.unwrap(), "ok");
    assert_eq!(b.unwrap(), "ok");
    mock.assert_async().await;
}
