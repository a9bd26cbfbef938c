//! HTTP client against a mock analysis service.
//!
//! The client is blocking, so each call runs on a blocking task.

use serde_json::json;
use wiremock::matchers::{body_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use feedlens_core::remote::ANALYZE_PATH;
use feedlens_core::{AnalysisResult, AnalysisService, HttpAnalysisService, RemoteError};

async fn analyze(server: &MockServer, text: &'static str) -> Result<AnalysisResult, RemoteError> {
    let endpoint = format!("{}{}", server.uri(), ANALYZE_PATH);
    tokio::task::spawn_blocking(move || {
        let service = HttpAnalysisService::new(endpoint)?;
        service.analyze(text)
    })
    .await
    .expect("blocking task panicked")
}

#[tokio::test(flavor = "multi_thread")]
async fn success_decodes_result() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(ANALYZE_PATH))
        .and(body_json(json!({"text": "fast shipping\nbroken box"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "total_feedbacks": 2,
            "sentiment_counts": {"positive": 1, "negative": 1, "neutral": 0},
            "theme_frequency": {"shipping": 1, "product": 1},
            "top_words": [{"word": "fast", "count": 1}],
            "positive_examples": ["fast shipping"],
            "negative_examples": ["broken box"]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let result = analyze(&server, "fast shipping\nbroken box").await.unwrap();
    assert_eq!(result.total_feedbacks, Some(2));
    assert_eq!(result.sentiment_counts.total(), 2);
    let themes: Vec<&str> = result.theme_frequency.iter().map(|(t, _)| t).collect();
    assert_eq!(themes, vec!["shipping", "product"]);
}

#[tokio::test(flavor = "multi_thread")]
async fn status_without_body_mentions_code() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let err = analyze(&server, "anything").await.unwrap_err();
    assert_eq!(err.status(), Some(500));
    assert!(err.to_string().contains("500"));
}

#[tokio::test(flavor = "multi_thread")]
async fn error_body_message_is_used() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(
            ResponseTemplate::new(400).set_body_json(json!({"error": "No text provided."})),
        )
        .mount(&server)
        .await;

    let err = analyze(&server, " ").await.unwrap_err();
    assert_eq!(err.status(), Some(400));
    assert_eq!(err.to_string(), "No text provided.");
}

#[tokio::test(flavor = "multi_thread")]
async fn malformed_success_body_is_a_decode_error() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>oops</html>"))
        .mount(&server)
        .await;

    let err = analyze(&server, "text").await.unwrap_err();
    assert!(matches!(err, RemoteError::Decode(_)));
}

#[test]
fn unreachable_service_is_a_transport_error() {
    // Nothing listens on port 1.
    let service = HttpAnalysisService::new(format!("http://127.0.0.1:1{ANALYZE_PATH}")).unwrap();
    let err = service.analyze("text").unwrap_err();
    assert!(matches!(err, RemoteError::Transport(_)));
}
