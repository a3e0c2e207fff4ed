use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::routing::{get, post};
use axum::Router;
use tower::ServiceExt;

use dinner_concierge::config::AppConfig;
use dinner_concierge::handlers;
use dinner_concierge::services::queue::{MessageAttribute, QueueProvider};
use dinner_concierge::state::AppState;

// ── Mock Queue ──

type Published = Arc<Mutex<Vec<(String, Vec<MessageAttribute>)>>>;

struct MockQueue {
    published: Published,
    fail: bool,
}

#[async_trait]
impl QueueProvider for MockQueue {
    async fn send_message(&self, body: &str, attributes: &[MessageAttribute]) -> anyhow::Result<String> {
        if self.fail {
            anyhow::bail!("queue unavailable");
        }
        let mut published = self.published.lock().unwrap();
        published.push((body.to_string(), attributes.to_vec()));
        Ok(format!("msg-{}", published.len()))
    }
}

// ── Helpers ──

fn test_config() -> AppConfig {
    AppConfig {
        port: 3000,
        queue_url: "https://sqs.us-east-1.amazonaws.com/000000000000/test".to_string(),
        aws_region: "us-east-1".to_string(),
        sqs_endpoint: "https://sqs.us-east-1.amazonaws.com/".to_string(),
        aws_access_key_id: "".to_string(),
        aws_secret_access_key: "".to_string(),
        aws_session_token: None,
        reservation_timezone: "America/New_York".to_string(),
        validate_reservations: false,
    }
}

fn test_state_with(config: AppConfig, fail: bool) -> (Arc<AppState>, Published) {
    let published: Published = Arc::new(Mutex::new(vec![]));
    let state = Arc::new(AppState {
        config,
        queue: Box::new(MockQueue {
            published: Arc::clone(&published),
            fail,
        }),
    });
    (state, published)
}

fn test_state() -> (Arc<AppState>, Published) {
    test_state_with(test_config(), false)
}

fn test_app(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/health", get(handlers::health::health))
        .route("/webhook/lex", post(handlers::webhook::lex_webhook))
        .with_state(state)
}

fn lex_event(intent: &str, slots: serde_json::Value, session: serde_json::Value) -> serde_json::Value {
    serde_json::json!({
        "messageVersion": "1.0",
        "invocationSource": "FulfillmentCodeHook",
        "userId": "user-42",
        "inputTranscript": "book a table",
        "outputDialogMode": "Text",
        "bot": {"name": "DinnerBot", "alias": "$LATEST", "version": "$LATEST"},
        "currentIntent": {
            "name": intent,
            "slots": slots,
            "confirmationStatus": "None"
        },
        "sessionAttributes": session
    })
}

async fn post_event(app: Router, event: &serde_json::Value) -> (StatusCode, serde_json::Value) {
    let res = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/webhook/lex")
                .header("Content-Type", "application/json")
                .body(Body::from(event.to_string()))
                .unwrap(),
        )
        .await
        .unwrap();
    let status = res.status();
    let body = axum::body::to_bytes(res.into_body(), usize::MAX)
        .await
        .unwrap();
    let json = serde_json::from_slice(&body).unwrap_or(serde_json::Value::Null);
    (status, json)
}

fn sample_slots() -> serde_json::Value {
    serde_json::json!({
        "location": null,
        "cuisine": "mexican",
        "time": "11:30",
        "date": "2999-01-01",
        "numberOfPeople": "4",
        "phoneNumber": "5551234567"
    })
}

// ── Health ──

#[tokio::test]
async fn test_health() {
    let (state, _) = test_state();
    let res = test_app(state)
        .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
}

// ── Greeting / Thanks ──

#[tokio::test]
async fn test_greeting_closes_with_fixed_message() {
    let (state, published) = test_state();
    let event = lex_event("Greeting", serde_json::json!({}), serde_json::json!({"visits": "3"}));
    let (status, json) = post_event(test_app(state), &event).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["sessionAttributes"], serde_json::json!({"visits": "3"}));
    assert_eq!(json["dialogAction"]["type"], "Close");
    assert_eq!(json["dialogAction"]["fulfillmentState"], "Fulfilled");
    assert_eq!(json["dialogAction"]["message"]["contentType"], "PlainText");
    assert_eq!(
        json["dialogAction"]["message"]["content"],
        "Hi there. May I help you? ex I want to make a reservation "
    );
    assert!(published.lock().unwrap().is_empty());
}

#[tokio::test]
async fn test_thanks_with_null_session() {
    let (state, _) = test_state();
    let event = lex_event("Thanks", serde_json::json!({}), serde_json::Value::Null);
    let (status, json) = post_event(test_app(state), &event).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["sessionAttributes"], serde_json::json!({}));
    assert_eq!(json["dialogAction"]["type"], "Close");
    assert_eq!(json["dialogAction"]["message"]["content"], "You are welcome!");
}

// ── Unsupported intent ──

#[tokio::test]
async fn test_unknown_intent_is_an_error() {
    let (state, published) = test_state();
    let event = lex_event("OrderFlowers", serde_json::json!({}), serde_json::Value::Null);
    let (status, json) = post_event(test_app(state), &event).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["error"], "Intent with name OrderFlowers not supported");
    assert!(published.lock().unwrap().is_empty());
}

#[tokio::test]
async fn test_malformed_event_is_rejected() {
    let (state, _) = test_state();
    let (status, _) = post_event(test_app(state), &serde_json::json!({"hello": "world"})).await;
    assert!(status.is_client_error());
}

// ── Reservation ──

#[tokio::test]
async fn test_reservation_is_enqueued_without_validation() {
    let (state, published) = test_state();
    let event = lex_event("dinningsuggestion", sample_slots(), serde_json::Value::Null);
    let (status, json) = post_event(test_app(state), &event).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["dialogAction"]["type"], "Close");
    assert_eq!(json["dialogAction"]["fulfillmentState"], "Fulfilled");
    assert_eq!(
        json["dialogAction"]["message"]["content"],
        "Thanks, I have placed your reservation,you will receive a text on your phone"
    );

    let published = published.lock().unwrap();
    assert_eq!(published.len(), 1);
    let (body, attributes) = &published[0];
    let reservation: serde_json::Value = serde_json::from_str(body).unwrap();
    assert_eq!(
        reservation,
        serde_json::json!({
            "Location": null,
            "Cuisine": "mexican",
            "DiningTime": "11:30",
            "DiningDate": "2999-01-01",
            "NumberOfPeople": "4",
            "PhoneNumber": "5551234567"
        })
    );
    assert_eq!(attributes, &vec![MessageAttribute::new("Title", "The Whistler")]);

    assert_eq!(
        json["sessionAttributes"]["lastConfirmedReservation"].as_str(),
        Some(body.as_str())
    );
}

#[tokio::test]
async fn test_reservation_replaces_previous_and_drops_current() {
    let (state, published) = test_state();
    let previous = r#"{"Location":"Brooklyn","Cuisine":"french","DiningTime":"12:00","DiningDate":"2999-01-01","NumberOfPeople":"2","PhoneNumber":"5550000000"}"#;
    let event = lex_event(
        "dinningsuggestion",
        serde_json::json!({"cuisine": "italian"}),
        serde_json::json!({
            "lastConfirmedReservation": previous,
            "currentReservation": "stale",
            "visits": "1"
        }),
    );
    let (status, json) = post_event(test_app(state), &event).await;

    assert_eq!(status, StatusCode::OK);
    let session = &json["sessionAttributes"];
    assert!(session.get("currentReservation").is_none());
    assert_eq!(session["visits"], "1");

    let last: serde_json::Value =
        serde_json::from_str(session["lastConfirmedReservation"].as_str().unwrap()).unwrap();
    assert_eq!(last["Cuisine"], "italian");
    assert_eq!(last["Location"], serde_json::Value::Null);
    assert_eq!(last["PhoneNumber"], serde_json::Value::Null);
    assert_eq!(published.lock().unwrap().len(), 1);
}

#[tokio::test]
async fn test_malformed_previous_reservation_is_ignored() {
    let (state, published) = test_state();
    let event = lex_event(
        "dinningsuggestion",
        sample_slots(),
        serde_json::json!({"lastConfirmedReservation": "{not json"}),
    );
    let (status, json) = post_event(test_app(state), &event).await;

    assert_eq!(status, StatusCode::OK);
    assert_ne!(json["sessionAttributes"]["lastConfirmedReservation"], "{not json");
    assert_eq!(published.lock().unwrap().len(), 1);
}

#[tokio::test]
async fn test_queue_failure_surfaces_as_bad_gateway() {
    let (state, _) = test_state_with(test_config(), true);
    let event = lex_event("dinningsuggestion", sample_slots(), serde_json::Value::Null);
    let (status, json) = post_event(test_app(state), &event).await;

    assert_eq!(status, StatusCode::BAD_GATEWAY);
    assert!(json["error"].as_str().unwrap().contains("queue unavailable"));
}

// ── Opt-in validation ──

#[tokio::test]
async fn test_validation_reprompts_for_invalid_cuisine() {
    let config = AppConfig {
        validate_reservations: true,
        ..test_config()
    };
    let (state, published) = test_state_with(config, false);
    let event = lex_event("dinningsuggestion", sample_slots(), serde_json::json!({"visits": "2"}));
    let (status, json) = post_event(test_app(state), &event).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["dialogAction"]["type"], "ElicitSlot");
    assert_eq!(json["dialogAction"]["intentName"], "dinningsuggestion");
    assert_eq!(json["dialogAction"]["slotToElicit"], "cuisine");
    assert_eq!(json["dialogAction"]["slots"]["cuisine"], serde_json::Value::Null);
    assert_eq!(json["dialogAction"]["slots"]["time"], "11:30");
    assert!(json["dialogAction"]["message"]["content"]
        .as_str()
        .unwrap()
        .starts_with("We do not have mexican"));
    assert_eq!(json["sessionAttributes"], serde_json::json!({"visits": "2"}));
    assert!(published.lock().unwrap().is_empty());
}

#[tokio::test]
async fn test_validation_reprompt_without_message_for_malformed_time() {
    let config = AppConfig {
        validate_reservations: true,
        ..test_config()
    };
    let (state, _) = test_state_with(config, false);
    let event = lex_event(
        "dinningsuggestion",
        serde_json::json!({"cuisine": "french", "time": "noon"}),
        serde_json::Value::Null,
    );
    let (_, json) = post_event(test_app(state), &event).await;

    assert_eq!(json["dialogAction"]["type"], "ElicitSlot");
    assert_eq!(json["dialogAction"]["slotToElicit"], "time");
    assert!(json["dialogAction"].get("message").is_none());
}

#[tokio::test]
async fn test_validation_passes_valid_reservation_through() {
    let config = AppConfig {
        validate_reservations: true,
        ..test_config()
    };
    let (state, published) = test_state_with(config, false);
    let event = lex_event(
        "dinningsuggestion",
        serde_json::json!({
            "location": "Manhattan",
            "cuisine": "Japanese",
            "time": "13:00",
            "date": "2999-01-01",
            "numberOfPeople": "6",
            "phoneNumber": "5551234567"
        }),
        serde_json::Value::Null,
    );
    let (status, json) = post_event(test_app(state), &event).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["dialogAction"]["type"], "Close");
    assert_eq!(published.lock().unwrap().len(), 1);
}

#[tokio::test]
async fn test_validation_with_bad_timezone_is_config_error() {
    let config = AppConfig {
        validate_reservations: true,
        reservation_timezone: "Nowhere/Special".to_string(),
        ..test_config()
    };
    let (state, published) = test_state_with(config, false);
    let event = lex_event("dinningsuggestion", sample_slots(), serde_json::Value::Null);
    let (status, _) = post_event(test_app(state), &event).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert!(published.lock().unwrap().is_empty());
}
