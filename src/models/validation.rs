use super::reservation::ReservationSlot;

#[derive(Debug, Clone, PartialEq)]
pub struct ValidationResult {
    pub is_valid: bool,
    pub violated_slot: Option<ReservationSlot>,
    /// `None` lets the bot fall back to the prompt defined on its model.
    pub message: Option<String>,
}

impl ValidationResult {
    pub fn valid() -> Self {
        Self {
            is_valid: true,
            violated_slot: None,
            message: None,
        }
    }

    pub fn invalid(slot: ReservationSlot, message: Option<String>) -> Self {
        Self {
            is_valid: false,
            violated_slot: Some(slot),
            message,
        }
    }
}
