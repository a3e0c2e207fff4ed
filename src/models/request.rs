use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Slot name to collected value. A `null` value means the bot has not filled it yet.
pub type Slots = BTreeMap<String, Option<String>>;

/// String attributes the bot carries between turns of a session.
pub type SessionAttributes = BTreeMap<String, String>;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IntentRequest {
    pub bot: Bot,
    pub user_id: String,
    pub current_intent: CurrentIntent,
    #[serde(default)]
    pub session_attributes: Option<SessionAttributes>,
    #[serde(default)]
    pub request_attributes: Option<BTreeMap<String, String>>,
    #[serde(default)]
    pub input_transcript: Option<String>,
    #[serde(default)]
    pub invocation_source: Option<InvocationSource>,
    #[serde(default)]
    pub output_dialog_mode: Option<String>,
    #[serde(default)]
    pub message_version: Option<String>,
}

impl IntentRequest {
    pub fn intent_name(&self) -> &str {
        &self.current_intent.name
    }

    /// Value of a slot, treating both a missing key and a `null` value as absent.
    pub fn slot(&self, name: &str) -> Option<&str> {
        self.current_intent
            .slots
            .get(name)
            .and_then(|v| v.as_deref())
    }

    /// Incoming session attributes, empty when the bot sent none.
    pub fn session_attributes(&self) -> SessionAttributes {
        self.session_attributes.clone().unwrap_or_default()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Bot {
    pub name: String,
    #[serde(default)]
    pub alias: Option<String>,
    #[serde(default)]
    pub version: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CurrentIntent {
    pub name: String,
    #[serde(default)]
    pub slots: Slots,
    #[serde(default)]
    pub confirmation_status: ConfirmationStatus,
}

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq)]
pub enum ConfirmationStatus {
    #[default]
    None,
    Confirmed,
    Denied,
}

impl ConfirmationStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ConfirmationStatus::None => "None",
            ConfirmationStatus::Confirmed => "Confirmed",
            ConfirmationStatus::Denied => "Denied",
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub enum InvocationSource {
    DialogCodeHook,
    FulfillmentCodeHook,
}
