use crate::models::{
    ContentType, DialogAction, DialogResponse, FulfillmentState, Message, SessionAttributes, Slots,
    ValidationResult,
};

pub fn plain_text(content: impl Into<String>) -> Message {
    Message {
        content_type: ContentType::PlainText,
        content: content.into(),
    }
}

pub fn elicit_slot(
    session_attributes: SessionAttributes,
    intent_name: &str,
    slots: Slots,
    slot_to_elicit: &str,
    message: Option<Message>,
) -> DialogResponse {
    DialogResponse {
        session_attributes,
        dialog_action: DialogAction::ElicitSlot {
            intent_name: intent_name.to_string(),
            slots,
            slot_to_elicit: slot_to_elicit.to_string(),
            message,
        },
    }
}

pub fn confirm_intent(
    session_attributes: SessionAttributes,
    intent_name: &str,
    slots: Slots,
    message: Message,
) -> DialogResponse {
    DialogResponse {
        session_attributes,
        dialog_action: DialogAction::ConfirmIntent {
            intent_name: intent_name.to_string(),
            slots,
            message,
        },
    }
}

pub fn close(
    session_attributes: SessionAttributes,
    fulfillment_state: FulfillmentState,
    message: Message,
) -> DialogResponse {
    DialogResponse {
        session_attributes,
        dialog_action: DialogAction::Close {
            fulfillment_state,
            message,
        },
    }
}

pub fn delegate(session_attributes: SessionAttributes, slots: Slots) -> DialogResponse {
    DialogResponse {
        session_attributes,
        dialog_action: DialogAction::Delegate { slots },
    }
}

/// Re-prompt for the field a failed validation points at.
///
/// The violated slot is cleared so the bot does not keep the rejected value.
pub fn elicit_invalid_slot(
    session_attributes: SessionAttributes,
    intent_name: &str,
    mut slots: Slots,
    result: &ValidationResult,
) -> Option<DialogResponse> {
    let slot = result.violated_slot?;
    slots.insert(slot.slot_key().to_string(), None);
    Some(elicit_slot(
        session_attributes,
        intent_name,
        slots,
        slot.slot_key(),
        result.message.clone().map(plain_text),
    ))
}
