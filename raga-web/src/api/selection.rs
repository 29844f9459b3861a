//! Selection pages
//!
//! Each page answers GET with its selector scaffold and POST (form-encoded)
//! with the resolved selection. An absent or unknown selection returns the
//! scaffold unchanged, and so does a body that is not a form at all.

use axum::{
    extract::{rejection::FormRejection, State},
    routing::get,
    Form, Json, Router,
};
use serde::Deserialize;

use crate::services::{FamilyView, MoodView, NameFinderView, RagaInfoView, ThaatView};
use crate::AppState;

/// Form body for the family page
#[derive(Debug, Default, Deserialize)]
pub struct FamilyForm {
    pub selected_family: Option<String>,
}

/// Form body for pages selecting a single raga
#[derive(Debug, Default, Deserialize)]
pub struct RagaForm {
    pub selected_raga: Option<String>,
}

/// Form body for the mood page
#[derive(Debug, Default, Deserialize)]
pub struct MoodForm {
    pub selected_mood: Option<String>,
}

/// Form body, or the empty selection when the request carries no usable form
fn form_or_default<T: Default>(form: Result<Form<T>, FormRejection>) -> T {
    match form {
        Ok(Form(form)) => form,
        Err(rejection) => {
            tracing::debug!(error = %rejection, "No form selection in request");
            T::default()
        }
    }
}

/// GET /family_insights
pub async fn family_page(State(state): State<AppState>) -> Json<FamilyView> {
    Json(state.resolver.family(None).await)
}

/// POST /family_insights
pub async fn family_select(
    State(state): State<AppState>,
    form: Result<Form<FamilyForm>, FormRejection>,
) -> Json<FamilyView> {
    let form = form_or_default(form);
    Json(state.resolver.family(form.selected_family.as_deref()).await)
}

/// GET /raga_info
pub async fn raga_info_page(State(state): State<AppState>) -> Json<RagaInfoView> {
    Json(state.resolver.raga_info(None))
}

/// POST /raga_info
pub async fn raga_info_select(
    State(state): State<AppState>,
    form: Result<Form<RagaForm>, FormRejection>,
) -> Json<RagaInfoView> {
    let form = form_or_default(form);
    Json(state.resolver.raga_info(form.selected_raga.as_deref()))
}

/// GET /mood_recommendation
pub async fn mood_page(State(state): State<AppState>) -> Json<MoodView> {
    Json(state.resolver.mood(None).await)
}

/// POST /mood_recommendation
///
/// Slowest page: one generated-text call per recommended raga.
pub async fn mood_select(
    State(state): State<AppState>,
    form: Result<Form<MoodForm>, FormRejection>,
) -> Json<MoodView> {
    let form = form_or_default(form);
    Json(state.resolver.mood(form.selected_mood.as_deref()).await)
}

/// GET /raga_finder_by_name
pub async fn name_finder_page(State(state): State<AppState>) -> Json<NameFinderView> {
    Json(state.resolver.name_finder(None))
}

/// POST /raga_finder_by_name
///
/// Echoes the selection only. The description itself is requested
/// separately from `/api/raga_description`.
pub async fn name_finder_select(
    State(state): State<AppState>,
    form: Result<Form<RagaForm>, FormRejection>,
) -> Json<NameFinderView> {
    let form = form_or_default(form);
    Json(state.resolver.name_finder(form.selected_raga.as_deref()))
}

/// GET /thaat_mapping
pub async fn thaat_page(State(state): State<AppState>) -> Json<ThaatView> {
    Json(state.resolver.thaat(None).await)
}

/// POST /thaat_mapping
pub async fn thaat_select(
    State(state): State<AppState>,
    form: Result<Form<RagaForm>, FormRejection>,
) -> Json<ThaatView> {
    let form = form_or_default(form);
    Json(state.resolver.thaat(form.selected_raga.as_deref()).await)
}

/// Build selection page routes
pub fn selection_routes() -> Router<AppState> {
    Router::new()
        .route("/family_insights", get(family_page).post(family_select))
        .route("/raga_info", get(raga_info_page).post(raga_info_select))
        .route("/mood_recommendation", get(mood_page).post(mood_select))
        .route(
            "/raga_finder_by_name",
            get(name_finder_page).post(name_finder_select),
        )
        .route("/thaat_mapping", get(thaat_page).post(thaat_select))
}
