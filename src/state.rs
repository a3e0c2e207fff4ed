use crate::config::AppConfig;
use crate::services::queue::QueueProvider;

pub struct AppState {
    pub config: AppConfig,
    pub queue: Box<dyn QueueProvider>,
}
