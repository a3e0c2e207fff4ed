use crate::errors::AppError;
use crate::models::{DialogResponse, FulfillmentState, IntentRequest, Reservation};
use crate::services::dialog::{close, elicit_invalid_slot, plain_text};
use crate::services::queue::MessageAttribute;
use crate::services::validation::{today_in, validate_order_dinner};
use crate::state::AppState;

pub const ORDER_DINING_INTENT: &str = "dinningsuggestion";
pub const GREETING_INTENT: &str = "Greeting";
pub const THANKS_INTENT: &str = "Thanks";

pub const LAST_CONFIRMED_RESERVATION: &str = "lastConfirmedReservation";
pub const CURRENT_RESERVATION: &str = "currentReservation";

pub const GREETING_MESSAGE: &str = "Hi there. May I help you? ex I want to make a reservation ";
pub const THANKS_MESSAGE: &str = "You are welcome!";
pub const RESERVATION_PLACED_MESSAGE: &str =
    "Thanks, I have placed your reservation,you will receive a text on your phone";

/// Route an intent request to its handler.
pub async fn dispatch(state: &AppState, request: &IntentRequest) -> Result<DialogResponse, AppError> {
    tracing::debug!(
        user_id = %request.user_id,
        intent_name = %request.intent_name(),
        "dispatch"
    );

    match request.intent_name() {
        ORDER_DINING_INTENT => order_dining(state, request).await,
        GREETING_INTENT => Ok(greeting(request)),
        THANKS_INTENT => Ok(thanks(request)),
        other => Err(AppError::UnsupportedIntent(other.to_string())),
    }
}

pub fn greeting(request: &IntentRequest) -> DialogResponse {
    close(
        request.session_attributes(),
        FulfillmentState::Fulfilled,
        plain_text(GREETING_MESSAGE),
    )
}

pub fn thanks(request: &IntentRequest) -> DialogResponse {
    close(
        request.session_attributes(),
        FulfillmentState::Fulfilled,
        plain_text(THANKS_MESSAGE),
    )
}

/// Record the reservation in the session and hand it to the queue.
pub async fn order_dining(state: &AppState, request: &IntentRequest) -> Result<DialogResponse, AppError> {
    let mut session = request.session_attributes();
    let confirmation_status = request.current_intent.confirmation_status;

    let previous = match session.get(LAST_CONFIRMED_RESERVATION) {
        Some(raw) => match Reservation::from_json(raw) {
            Ok(r) => Some(r),
            Err(e) => {
                tracing::warn!(error = %e, "ignoring malformed {LAST_CONFIRMED_RESERVATION}");
                None
            }
        },
        None => None,
    };

    let reservation = Reservation::from_request(request);

    if state.config.validate_reservations {
        let today = today_in(state.config.timezone()?);
        let result = validate_order_dinner(&reservation, today);
        if let Some(reprompt) = elicit_invalid_slot(
            session.clone(),
            request.intent_name(),
            request.current_intent.slots.clone(),
            &result,
        ) {
            tracing::info!(
                slot = result.violated_slot.map(|s| s.as_str()).unwrap_or_default(),
                "reservation failed validation, re-prompting"
            );
            return Ok(reprompt);
        }
    }

    let serialized = reservation.to_json()?;
    tracing::debug!(
        reservation = %serialized,
        previous = ?previous,
        confirmation_status = confirmation_status.as_str(),
        "bookDinner"
    );

    // Only the confirmed copy survives the turn.
    session.remove(CURRENT_RESERVATION);
    session.insert(LAST_CONFIRMED_RESERVATION.to_string(), serialized.clone());

    let message_id = state
        .queue
        .send_message(&serialized, &[MessageAttribute::new("Title", "The Whistler")])
        .await
        .map_err(|e| AppError::Queue(format!("{e:#}")))?;
    tracing::info!(message_id = %message_id, "reservation enqueued");

    Ok(close(
        session,
        FulfillmentState::Fulfilled,
        plain_text(RESERVATION_PLACED_MESSAGE),
    ))
}
