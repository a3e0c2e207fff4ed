use std::num::IntErrorKind;

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use chrono_tz::Tz;

use crate::models::{Reservation, ReservationSlot, ValidationResult};

const CUISINES: [&str; 5] = ["french", "italian", "chinese", "thailand", "japanese"];

const OPENING_HOUR: i32 = 10;
const LAST_SEATING_HOUR: i32 = 17;
const MAX_PARTY_SIZE: i64 = 50;

const DATE_FORMATS: &[&str] = &[
    "%Y-%m-%d",
    "%Y/%m/%d",
    "%Y.%m.%d",
    "%Y%m%d",
    "%m/%d/%Y",
    "%m-%d-%Y",
    "%B %d %Y",
    "%B %d, %Y",
    "%d %B %Y",
    "%d %B, %Y",
    "%a %B %d %Y",
    "%A, %B %d, %Y",
];

const DATETIME_FORMATS: &[&str] = &["%Y-%m-%dT%H:%M:%S", "%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M"];

/// Today's date as seen by a diner in `tz`.
pub fn today_in(tz: Tz) -> NaiveDate {
    Utc::now().with_timezone(&tz).date_naive()
}

/// Check the filled-in reservation fields, reporting the first one that fails.
///
/// Fields that are still empty are skipped; asking for them is the bot's job.
pub fn validate_order_dinner(reservation: &Reservation, today: NaiveDate) -> ValidationResult {
    if let Some(cuisine) = reservation.cuisine.as_deref() {
        if !CUISINES.contains(&cuisine.to_lowercase().as_str()) {
            return ValidationResult::invalid(
                ReservationSlot::Cuisine,
                Some(format!(
                    "We do not have {cuisine}, would you like a different type of dinner?  \
                     Our most popular cuisine are Chinese"
                )),
            );
        }
    }

    if let Some(date) = reservation.dining_date.as_deref() {
        match parse_date(date) {
            None => {
                return ValidationResult::invalid(
                    ReservationSlot::DiningDate,
                    Some("Sorry. We don't recognize the date you entered. Can you enter again?".to_string()),
                );
            }
            Some(d) if d < today => {
                return ValidationResult::invalid(
                    ReservationSlot::DiningDate,
                    Some(
                        "You can reserve a seat from tomorrow onwards.  What day would you like to choose?"
                            .to_string(),
                    ),
                );
            }
            Some(_) => {}
        }
    }

    if let Some(time) = reservation.dining_time.as_deref() {
        let Some(hour) = parse_hour(time) else {
            return ValidationResult::invalid(ReservationSlot::DiningTime, None);
        };
        if !(OPENING_HOUR..=LAST_SEATING_HOUR).contains(&hour) {
            return ValidationResult::invalid(
                ReservationSlot::DiningTime,
                Some(
                    "Our business hours are from ten a m. to five pm. Can you specify a time during this range?"
                        .to_string(),
                ),
            );
        }
    }

    if let Some(phone) = reservation.phone_number.as_deref() {
        if phone.chars().count() != 10 || !phone.chars().all(|c| c.is_ascii_digit()) {
            return ValidationResult::invalid(
                ReservationSlot::PhoneNumber,
                Some("Please input a valid phone number!".to_string()),
            );
        }
    }

    if let Some(people) = reservation.number_of_people.as_deref() {
        // `None` when the value is not a positive integer; overflow still counts as too many.
        let too_many = match people.trim().parse::<i64>() {
            Ok(n) if n > MAX_PARTY_SIZE => Some(true),
            Ok(n) if n > 0 => Some(false),
            Err(e) if *e.kind() == IntErrorKind::PosOverflow => Some(true),
            _ => None,
        };
        match too_many {
            Some(true) => {
                return ValidationResult::invalid(
                    ReservationSlot::NumberOfPeople,
                    Some("Sorry we only provide restaurant recommendations less than 50 people.".to_string()),
                );
            }
            Some(false) => {}
            None => {
                return ValidationResult::invalid(
                    ReservationSlot::NumberOfPeople,
                    Some("Please input a valid integer number larger than zero!".to_string()),
                );
            }
        }
    }

    ValidationResult::valid()
}

/// Lenient calendar-date parsing over the spellings the bot passes through.
pub fn parse_date(s: &str) -> Option<NaiveDate> {
    let s = s.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.date_naive());
    }
    DATETIME_FORMATS
        .iter()
        .find_map(|f| NaiveDateTime::parse_from_str(s, f).ok().map(|dt| dt.date()))
        .or_else(|| {
            DATE_FORMATS
                .iter()
                .find_map(|f| NaiveDate::parse_from_str(s, f).ok())
        })
}

/// Hour of an `HH:MM` string, or `None` when it is not in that shape.
fn parse_hour(time: &str) -> Option<i32> {
    if time.chars().count() != 5 {
        return None;
    }
    let (hour, minute) = time.split_once(':')?;
    let hour = hour.trim().parse::<i32>().ok()?;
    minute.trim().parse::<i32>().ok()?;
    Some(hour)
}
