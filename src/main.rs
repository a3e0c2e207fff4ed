use std::sync::Arc;

use axum::routing::{get, post};
use axum::Router;
use tower_http::trace::TraceLayer;
use tracing_subscriber::EnvFilter;

use dinner_concierge::config::AppConfig;
use dinner_concierge::handlers;
use dinner_concierge::services::queue::sigv4::Credentials;
use dinner_concierge::services::queue::sqs::SqsQueueProvider;
use dinner_concierge::state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let config = AppConfig::from_env();
    let tz = config.timezone()?;

    if config.aws_access_key_id.is_empty() || config.aws_secret_access_key.is_empty() {
        tracing::warn!("AWS credentials not configured, reservations cannot be enqueued");
    }

    let queue = SqsQueueProvider::new(
        config.queue_url.clone(),
        &config.sqs_endpoint,
        config.aws_region.clone(),
        Credentials {
            access_key_id: config.aws_access_key_id.clone(),
            secret_access_key: config.aws_secret_access_key.clone(),
            session_token: config.aws_session_token.clone(),
        },
    )?;
    tracing::info!(
        queue_url = %config.queue_url,
        timezone = %tz,
        validate_reservations = config.validate_reservations,
        "using SQS queue"
    );

    let state = Arc::new(AppState {
        config: config.clone(),
        queue: Box::new(queue),
    });

    let app = Router::new()
        .route("/health", get(handlers::health::health))
        .route("/webhook/lex", post(handlers::webhook::lex_webhook))
        .layer(TraceLayer::new_for_http())
        .with_state(state);

    let addr = format!("0.0.0.0:{}", config.port);
    tracing::info!("starting server on {addr}");

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
