//! Raga description endpoint
//!
//! The only purely machine-readable endpoint. Accepts a JSON or
//! form-encoded body naming a raga and returns `{raga, description}`.

use axum::{
    extract::{FromRequest, Request, State},
    http::header::CONTENT_TYPE,
    routing::post,
    Form, Json, Router,
};
use serde::Deserialize;

use crate::error::{ApiError, ApiResult};
use crate::services::RagaDescription;
use crate::AppState;

/// Request body; `selected_raga` takes precedence over `raga`
#[derive(Debug, Default, Deserialize)]
pub struct DescriptionRequest {
    pub selected_raga: Option<String>,
    pub raga: Option<String>,
}

impl DescriptionRequest {
    /// First non-empty raga field
    pub fn raga_name(&self) -> Option<&str> {
        [&self.selected_raga, &self.raga]
            .into_iter()
            .flatten()
            .map(String::as_str)
            .find(|name| !name.is_empty())
    }
}

fn is_json_request(request: &Request) -> bool {
    request
        .headers()
        .get(CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.split(';').next())
        .map(|mime| {
            let mime = mime.trim();
            mime == "application/json" || mime.ends_with("+json")
        })
        .unwrap_or(false)
}

/// POST /api/raga_description
///
/// Missing raga field → 400, including a request with no Content-Type.
/// Enrichment failures still return 200 with the failure message as the
/// description.
pub async fn raga_description(
    State(state): State<AppState>,
    request: Request,
) -> ApiResult<Json<RagaDescription>> {
    let body = if !request.headers().contains_key(CONTENT_TYPE) {
        DescriptionRequest::default()
    } else if is_json_request(&request) {
        let Json(body) = Json::<DescriptionRequest>::from_request(request, &state).await?;
        body
    } else {
        let Form(body) = Form::<DescriptionRequest>::from_request(request, &state).await?;
        body
    };

    let description = state
        .resolver
        .describe(body.raga_name())
        .await
        .ok_or_else(|| ApiError::BadRequest("No raga provided".to_string()))?;

    Ok(Json(description))
}

/// Build description routes
pub fn description_routes() -> Router<AppState> {
    Router::new().route("/api/raga_description", post(raga_description))
}
