pub mod dialog;
pub mod fulfillment;
pub mod queue;
pub mod validation;
