use std::env;

use chrono_tz::Tz;

use crate::errors::AppError;

const DEFAULT_QUEUE_URL: &str = "https://sqs.us-east-1.amazonaws.com/257949749828/chat";

#[derive(Clone, Debug)]
pub struct AppConfig {
    pub port: u16,
    pub queue_url: String,
    pub aws_region: String,
    pub sqs_endpoint: String,
    pub aws_access_key_id: String,
    pub aws_secret_access_key: String,
    pub aws_session_token: Option<String>,
    pub reservation_timezone: String,
    pub validate_reservations: bool,
}

impl AppConfig {
    pub fn from_env() -> Self {
        let aws_region = env::var("AWS_REGION").unwrap_or_else(|_| "us-east-1".to_string());
        Self {
            port: env::var("PORT")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(3000),
            queue_url: env::var("SQS_QUEUE_URL").unwrap_or_else(|_| DEFAULT_QUEUE_URL.to_string()),
            sqs_endpoint: env::var("SQS_ENDPOINT")
                .unwrap_or_else(|_| format!("https://sqs.{aws_region}.amazonaws.com/")),
            aws_region,
            aws_access_key_id: env::var("AWS_ACCESS_KEY_ID").unwrap_or_default(),
            aws_secret_access_key: env::var("AWS_SECRET_ACCESS_KEY").unwrap_or_default(),
            aws_session_token: env::var("AWS_SESSION_TOKEN").ok().filter(|v| !v.is_empty()),
            reservation_timezone: env::var("RESERVATION_TIMEZONE")
                .unwrap_or_else(|_| "America/New_York".to_string()),
            validate_reservations: env::var("VALIDATE_RESERVATIONS")
                .map(|v| matches!(v.to_lowercase().as_str(), "1" | "true" | "yes"))
                .unwrap_or(false),
        }
    }

    /// Reference timezone used to decide what "today" means for a diner.
    pub fn timezone(&self) -> Result<Tz, AppError> {
        self.reservation_timezone
            .parse::<Tz>()
            .map_err(|e| AppError::Config(format!("invalid RESERVATION_TIMEZONE: {e}")))
    }
}
