//! Read-only player progress routes.

use axum::extract::{Path, State};
use axum::{Json, Router, routing::get};
use tracing::instrument;

use hustle_narrative::application::query_handlers::{self, PlayerProgressView};

use crate::error::ApiError;
use crate::state::AppState;

/// GET /{phone_number}
#[instrument(skip(state))]
async fn get_progress(
    State(state): State<AppState>,
    Path(phone_number): Path<String>,
) -> Result<Json<PlayerProgressView>, ApiError> {
    let view =
        query_handlers::get_progress_by_phone(&phone_number, &*state.progress_repository).await?;
    Ok(Json(view))
}

/// Returns the router for player progress queries.
pub fn router() -> Router<AppState> {
    Router::new().route("/{phone_number}", get(get_progress))
}
