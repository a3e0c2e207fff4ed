pub mod sigv4;
pub mod sqs;

use async_trait::async_trait;

/// A string attribute sent alongside a queue message.
#[derive(Debug, Clone, PartialEq)]
pub struct MessageAttribute {
    pub name: String,
    pub value: String,
}

impl MessageAttribute {
    pub fn new(name: &str, value: &str) -> Self {
        Self {
            name: name.to_string(),
            value: value.to_string(),
        }
    }
}

#[async_trait]
pub trait QueueProvider: Send + Sync {
    /// Publish `body` and return the id the queue assigned to it.
    async fn send_message(&self, body: &str, attributes: &[MessageAttribute]) -> anyhow::Result<String>;
}
