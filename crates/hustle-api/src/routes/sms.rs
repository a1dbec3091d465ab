//! Inbound SMS webhook.

use axum::extract::State;
use axum::{Form, Json, Router, routing::post};
use serde::{Deserialize, Serialize};
use tracing::{info, instrument};
use uuid::Uuid;

use hustle_narrative::application::command_handlers;
use hustle_narrative::domain::commands;

use crate::error::ApiError;
use crate::state::AppState;

/// Form body posted by the SMS provider for each inbound message. Fields the
/// game does not use (`to`, `date`, `id`) are ignored.
#[derive(Debug, Deserialize)]
pub struct InboundSmsForm {
    /// Sender phone number.
    pub from: Option<String>,
    /// Message body.
    pub text: Option<String>,
    /// Provider link ID for premium replies.
    #[serde(rename = "linkId")]
    pub link_id: Option<String>,
}

/// Acknowledgement returned once a turn has been processed.
#[derive(Debug, Serialize)]
pub struct TurnResponse {
    /// Which branch of the turn handled the message.
    pub message: &'static str,
}

/// POST /inbound
#[instrument(skip(state, form), fields(link_id = form.link_id.as_deref()))]
async fn inbound_sms(
    State(state): State<AppState>,
    Form(form): Form<InboundSmsForm>,
) -> Result<Json<TurnResponse>, ApiError> {
    let command =
        commands::PlayTurn::new(Uuid::new_v4(), form.from.as_deref(), form.text.as_deref())?;

    info!(
        correlation_id = %command.correlation_id,
        from = %command.sender,
        text = %command.text,
        "handling inbound sms"
    );

    let acknowledgement = command_handlers::handle_play_turn(
        &command,
        state.script,
        state.clock.as_ref(),
        &*state.progress_repository,
        &*state.gateway,
    )
    .await;

    Ok(Json(TurnResponse {
        message: acknowledgement.message(),
    }))
}

/// Returns the router for the SMS webhook.
pub fn router() -> Router<AppState> {
    Router::new().route("/inbound", post(inbound_sms))
}
