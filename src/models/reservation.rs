use serde::{Deserialize, Serialize};

use super::request::IntentRequest;

/// A dinner reservation as published to the queue and remembered in the session.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "PascalCase")]
pub struct Reservation {
    pub location: Option<String>,
    pub cuisine: Option<String>,
    pub dining_time: Option<String>,
    pub dining_date: Option<String>,
    pub number_of_people: Option<String>,
    pub phone_number: Option<String>,
}

impl Reservation {
    pub fn from_request(request: &IntentRequest) -> Self {
        let slot = |s: ReservationSlot| request.slot(s.slot_key()).map(str::to_string);
        Self {
            location: slot(ReservationSlot::Location),
            cuisine: slot(ReservationSlot::Cuisine),
            dining_time: slot(ReservationSlot::DiningTime),
            dining_date: slot(ReservationSlot::DiningDate),
            number_of_people: slot(ReservationSlot::NumberOfPeople),
            phone_number: slot(ReservationSlot::PhoneNumber),
        }
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }

    pub fn from_json(s: &str) -> serde_json::Result<Self> {
        serde_json::from_str(s)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReservationSlot {
    Location,
    Cuisine,
    DiningTime,
    DiningDate,
    NumberOfPeople,
    PhoneNumber,
}

impl ReservationSlot {
    /// Name reported when validation rejects this field.
    pub fn as_str(&self) -> &'static str {
        match self {
            ReservationSlot::Location => "Location",
            ReservationSlot::Cuisine => "Cuisine",
            ReservationSlot::DiningTime => "DiningTime",
            ReservationSlot::DiningDate => "DiningDate",
            ReservationSlot::NumberOfPeople => "NumberOfPeople",
            ReservationSlot::PhoneNumber => "PhoneNumber",
        }
    }

    /// Key of this field in the bot's slot map.
    pub fn slot_key(&self) -> &'static str {
        match self {
            ReservationSlot::Location => "location",
            ReservationSlot::Cuisine => "cuisine",
            ReservationSlot::DiningTime => "time",
            ReservationSlot::DiningDate => "date",
            ReservationSlot::NumberOfPeople => "numberOfPeople",
            ReservationSlot::PhoneNumber => "phoneNumber",
        }
    }
}
