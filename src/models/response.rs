use serde::{Deserialize, Serialize};

use super::request::{SessionAttributes, Slots};

/// What the bot host should do next, plus the session it should carry forward.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct DialogResponse {
    pub session_attributes: SessionAttributes,
    pub dialog_action: DialogAction,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", rename_all_fields = "camelCase")]
pub enum DialogAction {
    ElicitSlot {
        intent_name: String,
        slots: Slots,
        slot_to_elicit: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        message: Option<Message>,
    },
    ConfirmIntent {
        intent_name: String,
        slots: Slots,
        message: Message,
    },
    Close {
        fulfillment_state: FulfillmentState,
        message: Message,
    },
    Delegate {
        slots: Slots,
    },
}

impl DialogAction {
    pub fn kind(&self) -> &'static str {
        match self {
            DialogAction::ElicitSlot { .. } => "ElicitSlot",
            DialogAction::ConfirmIntent { .. } => "ConfirmIntent",
            DialogAction::Close { .. } => "Close",
            DialogAction::Delegate { .. } => "Delegate",
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub enum FulfillmentState {
    Fulfilled,
    Failed,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Message {
    pub content_type: ContentType,
    pub content: String,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub enum ContentType {
    PlainText,
    #[serde(rename = "SSML")]
    Ssml,
    CustomPayload,
}
