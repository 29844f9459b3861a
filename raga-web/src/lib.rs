//! raga-web library interface
//!
//! Raga knowledge service: static taxonomy lookups enriched with generated
//! commentary. Exposed as a library so the router can be driven in tests.

pub mod api;
pub mod error;
pub mod services;

pub use crate::error::{ApiError, ApiResult};

use std::sync::Arc;

use axum::Router;
use chrono::{DateTime, Utc};
use raga_common::TaxonomyStore;
use tower_http::trace::TraceLayer;

use crate::services::{QueryResolver, TextGenerator};

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    /// Selection resolvers over the shared taxonomy and text generator
    pub resolver: QueryResolver,
    /// Service startup timestamp for uptime reporting
    pub startup_time: DateTime<Utc>,
}

impl AppState {
    pub fn new(taxonomy: Arc<TaxonomyStore>, generator: Arc<dyn TextGenerator>) -> Self {
        Self {
            resolver: QueryResolver::new(taxonomy, generator),
            startup_time: Utc::now(),
        }
    }
}

/// Build application router
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .merge(api::selection_routes())
        .merge(api::description_routes())
        .merge(api::health_routes())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
