use std::sync::Arc;

use axum::extract::State;
use axum::Json;

use crate::errors::AppError;
use crate::models::{DialogResponse, IntentRequest};
use crate::services::fulfillment;
use crate::state::AppState;

/// Code hook called by the bot once per user turn.
pub async fn lex_webhook(
    State(state): State<Arc<AppState>>,
    Json(request): Json<IntentRequest>,
) -> Result<Json<DialogResponse>, AppError> {
    tracing::debug!(bot_name = %request.bot.name, "event.bot.name");

    match fulfillment::dispatch(&state, &request).await {
        Ok(response) => {
            tracing::info!(
                intent = %request.intent_name(),
                action = response.dialog_action.kind(),
                "intent handled"
            );
            Ok(Json(response))
        }
        Err(e) => {
            tracing::error!(error = %e, intent = %request.intent_name(), "intent fulfillment failed");
            Err(e)
        }
    }
}
