// tests/validation_gate.rs
//
// The strict configuration: the letters-and-spaces gate short-circuits
// before classification, on both the form flow and the JSON API.

use axum::{
    body::{to_bytes, Body},
    http::{Request, StatusCode},
    Router,
};
use serde_json::Value;
use tower::ServiceExt; // for `oneshot`

use sentiment_meter::api::{create_router, AppState};
use sentiment_meter::config::{AnalyzerConfig, ConfigHandle};
use sentiment_meter::scorer::LexiconScorer;
use sentiment_meter::validate::REJECT_MESSAGE;

fn strict_app() -> Router {
    let cfg = AnalyzerConfig::from_toml_str("[validation]\nenabled = true\n")
        .expect("strict config parses");
    let state = AppState::new(LexiconScorer::new(), ConfigHandle::new(cfg));
    create_router(state)
}

async fn post_form(app: &Router, sentence: &str) -> (StatusCode, String) {
    let body = format!("sentence={}", sentence.replace(' ', "+"));
    let req = Request::builder()
        .method("POST")
        .uri("/")
        .header("content-type", "application/x-www-form-urlencoded")
        .body(Body::from(body))
        .unwrap();
    let resp = app.clone().oneshot(req).await.unwrap();
    let status = resp.status();
    let bytes = to_bytes(resp.into_body(), usize::MAX).await.unwrap();
    (status, String::from_utf8(bytes.to_vec()).unwrap())
}

async fn post_analyze(app: &Router, text: &str) -> (StatusCode, Value) {
    let payload = serde_json::json!({ "text": text });
    let req = Request::builder()
        .method("POST")
        .uri("/analyze")
        .header("content-type", "application/json")
        .body(Body::from(serde_json::to_vec(&payload).unwrap()))
        .unwrap();
    let resp = app.clone().oneshot(req).await.unwrap();
    let status = resp.status();
    let bytes = to_bytes(resp.into_body(), usize::MAX).await.unwrap();
    (status, serde_json::from_slice(&bytes).unwrap())
}

#[tokio::test]
async fn form_rejects_digits_with_fixed_message() {
    let app = strict_app();
    let (status, html) = post_form(&app, "Hello123").await;
    // Form flow keeps HTTP 200; the page carries the rejection.
    assert_eq!(status, StatusCode::OK);
    assert!(html.contains(REJECT_MESSAGE));
    assert!(!html.contains("class=\"result\""));
}

#[tokio::test]
async fn analyze_rejects_punctuation_with_422() {
    let app = strict_app();
    let (status, v) = post_analyze(&app, "Hello!").await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(v["error"], serde_json::json!(REJECT_MESSAGE));
}

#[tokio::test]
async fn gate_blocks_comma_lists_entirely() {
    // In the strict variant the comma itself is a forbidden character, so
    // word-list mode is unreachable.
    let app = strict_app();
    let (status, v) = post_analyze(&app, "love, hate").await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(v["error"], serde_json::json!(REJECT_MESSAGE));
}

#[tokio::test]
async fn plain_words_pass_the_gate() {
    let app = strict_app();
    let (status, v) = post_analyze(&app, "I love sunny mornings").await;
    assert_eq!(status, StatusCode::OK);
    let label = v["label"].as_str().unwrap();
    assert!(label.ends_with("Positive"), "got label {label}");
}

#[tokio::test]
async fn outer_whitespace_is_trimmed_before_the_gate() {
    let app = strict_app();
    let (status, v) = post_analyze(&app, "   I love sunny mornings   ").await;
    assert_eq!(status, StatusCode::OK);
    assert!(v["label"].as_str().unwrap().ends_with("Positive"));
}

#[tokio::test]
async fn empty_input_is_rejected() {
    let app = strict_app();
    let (status, v) = post_analyze(&app, "").await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(v["error"], serde_json::json!(REJECT_MESSAGE));

    let (status, html) = post_form(&app, "   ").await;
    assert_eq!(status, StatusCode::OK);
    assert!(html.contains(REJECT_MESSAGE));
}
