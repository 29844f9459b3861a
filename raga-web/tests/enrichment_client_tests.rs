//! GeminiClient tests against a local mock of the generateContent API

use std::net::SocketAddr;
use std::sync::{Arc, Mutex};

use axum::{
    extract::State,
    http::{HeaderMap, StatusCode, Uri},
    response::{IntoResponse, Response},
    Json, Router,
};
use raga_web::services::{EnrichmentFailure, GeminiClient, TextGenerator};
use serde_json::{json, Value};

/// What the mock saw, and what it should answer
#[derive(Clone)]
struct MockState {
    status: StatusCode,
    reply: Value,
    seen: Arc<Mutex<Vec<(String, Option<String>, Value)>>>,
}

async fn mock_generate(
    State(state): State<MockState>,
    uri: Uri,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> Response {
    let key = headers
        .get("x-goog-api-key")
        .and_then(|v| v.to_str().ok())
        .map(str::to_string);
    state
        .seen
        .lock()
        .unwrap()
        .push((uri.path().to_string(), key, body));

    (state.status, Json(state.reply.clone())).into_response()
}

/// Start the mock on an ephemeral port, returning its base URL
async fn start_mock(status: StatusCode, reply: Value) -> (String, MockState) {
    let state = MockState {
        status,
        reply,
        seen: Arc::new(Mutex::new(Vec::new())),
    };
    let app = Router::new()
        .fallback(mock_generate)
        .with_state(state.clone());

    let listener = tokio::net::TcpListener::bind(SocketAddr::from(([127, 0, 0, 1], 0)))
        .await
        .unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    (format!("http://{}/v1beta", addr), state)
}

#[tokio::test]
async fn test_generate_sends_single_turn_and_sanitizes() {
    let (base_url, state) = start_mock(
        StatusCode::OK,
        json!({
            "candidates": [{
                "content": {
                    "role": "model",
                    "parts": [{ "text": "\n  **Bhairavi** is a *morning* raga.  \n" }]
                }
            }]
        }),
    )
    .await;

    let client = GeminiClient::new("test-key".to_string(), "gemini-2.0-flash", &base_url).unwrap();
    let text = client
        .generate("Provide a detailed description of the raga Bhairavi.")
        .await
        .unwrap();

    assert_eq!(text, "Bhairavi is a morning raga.");

    let seen = state.seen.lock().unwrap();
    assert_eq!(seen.len(), 1);
    let (path, key, body) = &seen[0];
    assert_eq!(path, "/v1beta/models/gemini-2.0-flash:generateContent");
    assert_eq!(key.as_deref(), Some("test-key"));
    assert_eq!(body["contents"].as_array().unwrap().len(), 1);
    assert_eq!(
        body["contents"][0]["parts"][0]["text"],
        "Provide a detailed description of the raga Bhairavi."
    );
    assert_eq!(body["generationConfig"]["temperature"], 1.0);
}

#[tokio::test]
async fn test_empty_candidates_is_empty_text() {
    let (base_url, _state) = start_mock(StatusCode::OK, json!({ "candidates": [] })).await;

    let client = GeminiClient::new("k".to_string(), "m", &base_url).unwrap();
    assert_eq!(client.generate("prompt").await.unwrap(), "");
}

#[tokio::test]
async fn test_error_status_is_api_failure() {
    let (base_url, _state) = start_mock(
        StatusCode::TOO_MANY_REQUESTS,
        json!({ "error": { "code": 429, "message": "Resource exhausted" } }),
    )
    .await;

    let client = GeminiClient::new("k".to_string(), "m", &base_url).unwrap();
    match client.generate("prompt").await {
        Err(EnrichmentFailure::ApiError(status, body)) => {
            assert_eq!(status, 429);
            assert!(body.contains("Resource exhausted"));
        }
        other => panic!("Expected API error, got {:?}", other),
    }
}

#[tokio::test]
async fn test_no_caching_between_identical_prompts() {
    let (base_url, state) = start_mock(
        StatusCode::OK,
        json!({ "candidates": [{ "content": { "parts": [{ "text": "ok" }] } }] }),
    )
    .await;

    let client = GeminiClient::new("k".to_string(), "m", &base_url).unwrap();
    client.generate("same").await.unwrap();
    client.generate("same").await.unwrap();

    assert_eq!(state.seen.lock().unwrap().len(), 2);
}

#[tokio::test]
async fn test_unreachable_service_is_network_failure() {
    // Bind then drop to get a port with nothing listening
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let client = GeminiClient::new("k".to_string(), "m", &format!("http://{}", addr)).unwrap();
    let result = client.generate("prompt").await;

    assert!(matches!(result, Err(EnrichmentFailure::NetworkError(_))));
}
