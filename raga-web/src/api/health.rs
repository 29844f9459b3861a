//! Health check endpoint

use axum::{extract::State, routing::get, Json, Router};
use chrono::Utc;
use raga_common::TaxonomyStore;
use serde::Serialize;

use crate::AppState;

/// Sizes of the loaded taxonomy tables
#[derive(Debug, Serialize)]
pub struct TaxonomySummary {
    pub families: usize,
    pub general_ragas: usize,
    pub moods: usize,
    pub thaat_ragas: usize,
    /// Size of the unified raga name index
    pub known_ragas: usize,
}

impl TaxonomySummary {
    fn of(taxonomy: &TaxonomyStore) -> Self {
        Self {
            families: taxonomy.all_family_names().len(),
            general_ragas: taxonomy.general_raga_names().len(),
            moods: taxonomy.all_mood_labels().len(),
            thaat_ragas: taxonomy.all_thaat_raga_names().len(),
            known_ragas: taxonomy.unified_raga_names().len(),
        }
    }
}

/// Health check response
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    /// Service status ("ok")
    pub status: String,
    pub module: String,
    pub version: String,
    /// Build identifier from build.rs
    pub git_hash: String,
    pub uptime_seconds: u64,
    pub taxonomy: TaxonomySummary,
}

/// GET /health
///
/// Never calls the generative-text service.
pub async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    let uptime = Utc::now().signed_duration_since(state.startup_time);

    Json(HealthResponse {
        status: "ok".to_string(),
        module: "raga-web".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        git_hash: env!("GIT_HASH").to_string(),
        uptime_seconds: uptime.num_seconds().max(0) as u64,
        taxonomy: TaxonomySummary::of(state.resolver.taxonomy()),
    })
}

/// Build health check routes
pub fn health_routes() -> Router<AppState> {
    Router::new().route("/health", get(health_check))
}
