//! Shared test helpers for raga-web integration tests

#![allow(dead_code)]

use std::collections::HashSet;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{header, Request};
use axum::Router;
use http_body_util::BodyExt;
use raga_common::TaxonomyStore;
use raga_web::services::{sanitize, EnrichmentFailure, TextGenerator};
use raga_web::{build_router, AppState};
use serde_json::Value;

/// Text generator double
///
/// Records every prompt. Calls whose zero-based index is in `fail_calls`
/// return an API error; others return marked-up text run through the same
/// sanitizer as the real client.
#[derive(Default)]
pub struct ScriptedGenerator {
    pub prompts: Mutex<Vec<String>>,
    pub fail_calls: HashSet<usize>,
}

impl ScriptedGenerator {
    pub fn failing_on(calls: &[usize]) -> Self {
        Self {
            prompts: Mutex::new(Vec::new()),
            fail_calls: calls.iter().copied().collect(),
        }
    }

    pub fn prompts(&self) -> Vec<String> {
        self.prompts.lock().unwrap().clone()
    }
}

#[async_trait]
impl TextGenerator for ScriptedGenerator {
    async fn generate(&self, prompt: &str) -> Result<String, EnrichmentFailure> {
        let call = {
            let mut prompts = self.prompts.lock().unwrap();
            prompts.push(prompt.to_string());
            prompts.len() - 1
        };

        if self.fail_calls.contains(&call) {
            return Err(EnrichmentFailure::ApiError(
                503,
                "service unavailable".to_string(),
            ));
        }

        Ok(sanitize(&format!("  **Insight** for: {}\n", prompt)))
    }
}

/// Router over the built-in taxonomy and the given generator
pub fn setup_app(generator: Arc<ScriptedGenerator>) -> Router {
    let taxonomy = Arc::new(TaxonomyStore::builtin().expect("Built-in taxonomy should load"));
    build_router(AppState::new(taxonomy, generator))
}

pub fn get_request(uri: &str) -> Request<Body> {
    Request::builder()
        .method("GET")
        .uri(uri)
        .body(Body::empty())
        .unwrap()
}

/// POST with an `application/x-www-form-urlencoded` body
pub fn form_request(uri: &str, body: &str) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
        .body(Body::from(body.to_string()))
        .unwrap()
}

/// POST with an empty body and no Content-Type
pub fn bare_post_request(uri: &str) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .body(Body::empty())
        .unwrap()
}

pub fn json_request(uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

/// Collect a response body as JSON
pub async fn extract_json(body: Body) -> Value {
    let bytes = body
        .collect()
        .await
        .expect("Should read body")
        .to_bytes();
    serde_json::from_slice(&bytes).expect("Should parse JSON")
}
