use std::collections::BTreeMap;

use anyhow::Context;
use async_trait::async_trait;
use chrono::Utc;
use serde::{Deserialize, Serialize};

use super::sigv4::{self, Credentials, RequestToSign};
use super::{MessageAttribute, QueueProvider};

const CONTENT_TYPE: &str = "application/x-amz-json-1.0";
const SEND_MESSAGE_TARGET: &str = "AmazonSQS.SendMessage";

pub struct SqsQueueProvider {
    queue_url: String,
    endpoint: reqwest::Url,
    region: String,
    credentials: Credentials,
    client: reqwest::Client,
}

impl SqsQueueProvider {
    pub fn new(
        queue_url: String,
        endpoint: &str,
        region: String,
        credentials: Credentials,
    ) -> anyhow::Result<Self> {
        let endpoint = reqwest::Url::parse(endpoint)
            .with_context(|| format!("invalid SQS endpoint: {endpoint}"))?;
        anyhow::ensure!(endpoint.host_str().is_some(), "SQS endpoint has no host: {endpoint}");
        Ok(Self {
            queue_url,
            endpoint,
            region,
            credentials,
            client: reqwest::Client::new(),
        })
    }

    fn host(&self) -> String {
        let host = self.endpoint.host_str().unwrap_or_default();
        match self.endpoint.port() {
            Some(port) => format!("{host}:{port}"),
            None => host.to_string(),
        }
    }
}

#[derive(Serialize)]
#[serde(rename_all = "PascalCase")]
struct SendMessageRequest<'a> {
    queue_url: &'a str,
    message_body: &'a str,
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    message_attributes: BTreeMap<&'a str, AttributeValue<'a>>,
}

#[derive(Serialize)]
#[serde(rename_all = "PascalCase")]
struct AttributeValue<'a> {
    data_type: &'static str,
    string_value: &'a str,
}

#[derive(Deserialize)]
#[serde(rename_all = "PascalCase")]
struct SendMessageResponse {
    message_id: String,
}

fn send_message_body(
    queue_url: &str,
    body: &str,
    attributes: &[MessageAttribute],
) -> serde_json::Result<Vec<u8>> {
    let request = SendMessageRequest {
        queue_url,
        message_body: body,
        message_attributes: attributes
            .iter()
            .map(|a| {
                (
                    a.name.as_str(),
                    AttributeValue {
                        data_type: "String",
                        string_value: a.value.as_str(),
                    },
                )
            })
            .collect(),
    };
    serde_json::to_vec(&request)
}

#[async_trait]
impl QueueProvider for SqsQueueProvider {
    async fn send_message(&self, body: &str, attributes: &[MessageAttribute]) -> anyhow::Result<String> {
        anyhow::ensure!(
            !self.credentials.access_key_id.is_empty(),
            "AWS credentials are not configured"
        );

        let payload = send_message_body(&self.queue_url, body, attributes)
            .context("failed to encode SQS request")?;
        let host = self.host();
        let signed = sigv4::sign(
            &RequestToSign {
                host: &host,
                path: self.endpoint.path(),
                region: &self.region,
                service: "sqs",
                content_type: CONTENT_TYPE,
                target: SEND_MESSAGE_TARGET,
                body: &payload,
            },
            &self.credentials,
            Utc::now(),
        )?;

        let mut request = self
            .client
            .post(self.endpoint.clone())
            .header("authorization", signed.authorization);
        for (name, value) in signed.headers {
            request = request.header(name, value);
        }

        let response: SendMessageResponse = request
            .body(payload)
            .send()
            .await
            .context("failed to send SQS message")?
            .error_for_status()
            .context("SQS API returned error")?
            .json()
            .await
            .context("failed to decode SQS response")?;

        Ok(response.message_id)
    }
}
