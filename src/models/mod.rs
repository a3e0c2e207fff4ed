pub mod request;
pub mod reservation;
pub mod response;
pub mod validation;

pub use request::{Bot, ConfirmationStatus, CurrentIntent, IntentRequest, InvocationSource, SessionAttributes, Slots};
pub use reservation::{Reservation, ReservationSlot};
pub use response::{ContentType, DialogAction, DialogResponse, FulfillmentState, Message};
pub use validation::ValidationResult;
