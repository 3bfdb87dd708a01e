use std::collections::HashSet;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use thiserror::Error;
use travelog_logging::travel_debug;

pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Stays of at least this many days are treated as long stays.
pub const LONG_STAY_DAYS: u32 = 5;

/// One trip or destination entry, parsed and validated.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TravelRecord {
    pub location: String,
    pub country: String,
    pub travel_time_to_here: String,
    pub time_zone: String,
    pub arrival_date: NaiveDate,
    pub departure_date: NaiveDate,
    pub days_at_place: u32,
    pub booked: bool,
    pub residing: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub coordinates: Option<Coordinates>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub vacation_start: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub vacation_end: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Coordinates {
    pub lat: f64,
    pub lon: f64,
}

/// How strictly fetched rows are checked before parsing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ValidationMode {
    /// Loosely-typed spreadsheet cells are normalized.
    #[default]
    Lenient,
    /// Rows must already carry the exact primitive kinds.
    Strict,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RecordError {
    #[error("row is not an object")]
    NotAnObject,
    #[error("row does not match the record shape")]
    Malformed,
    #[error("missing field `{0}`")]
    MissingField(&'static str),
    #[error("field `{field}` should be {expected}")]
    WrongType {
        field: &'static str,
        expected: &'static str,
    },
    #[error("field `{field}` is not a YYYY-MM-DD date: {value:?}")]
    InvalidDate { field: &'static str, value: String },
    #[error("departure {departure} is before arrival {arrival}")]
    DepartureBeforeArrival {
        arrival: NaiveDate,
        departure: NaiveDate,
    },
    #[error("daysAtPlace must be a non-negative integer: {0}")]
    InvalidDays(String),
}

/// Identity used for list rendering and deduplication.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RecordKey {
    pub location: String,
    pub arrival_date: NaiveDate,
}

/// Normalizes a loosely-typed spreadsheet flag.
///
/// `true`, `yes`, `1`, `y` and `t` (any case, surrounding whitespace ignored)
/// are true. Anything else, including an absent value, is false.
pub fn normalize_flag(value: Option<&Value>) -> bool {
    match value {
        Some(Value::Bool(flag)) => *flag,
        Some(Value::String(text)) => matches!(
            text.trim().to_ascii_lowercase().as_str(),
            "true" | "yes" | "1" | "y" | "t"
        ),
        Some(Value::Number(number)) => number.as_f64().is_some_and(|n| n != 0.0),
        _ => false,
    }
}

/// Structural predicate: every required field is present with the right primitive kind.
///
/// Never fails; dates are only checked for being strings here.
pub fn is_travel_record(value: &Value) -> bool {
    let Some(object) = value.as_object() else {
        return false;
    };
    let is_str = |key: &str| object.get(key).is_some_and(Value::is_string);
    let is_bool = |key: &str| object.get(key).is_some_and(Value::is_boolean);

    ["location", "country", "travelTimeToHere", "timeZone", "arrivalDate", "departureDate"]
        .into_iter()
        .all(is_str)
        && object.get("daysAtPlace").is_some_and(Value::is_number)
        && is_bool("booked")
        && is_bool("residing")
}

impl TravelRecord {
    /// Parses one raw row, rejecting anything that cannot become a valid record.
    pub fn from_value(value: &Value, mode: ValidationMode) -> Result<Self, RecordError> {
        let object = value.as_object().ok_or(RecordError::NotAnObject)?;
        if mode == ValidationMode::Strict && !is_travel_record(value) {
            return Err(RecordError::Malformed);
        }

        let arrival_date = date_field(object, "arrivalDate")?;
        let departure_date = date_field(object, "departureDate")?;
        if departure_date < arrival_date {
            return Err(RecordError::DepartureBeforeArrival {
                arrival: arrival_date,
                departure: departure_date,
            });
        }

        let record = Self {
            location: required_text(object, "location")?,
            country: required_text(object, "country")?,
            travel_time_to_here: optional_text(object, "travelTimeToHere").unwrap_or_default(),
            time_zone: optional_text(object, "timeZone").unwrap_or_default(),
            arrival_date,
            departure_date,
            days_at_place: days_field(object)?,
            booked: normalize_flag(object.get("booked")),
            residing: normalize_flag(object.get("residing")),
            coordinates: coordinates_field(object),
            vacation_start: optional_text(object, "vacationStart"),
            vacation_end: optional_text(object, "vacationEnd"),
        };

        if record.days_at_place != record.inclusive_day_count() {
            travel_debug!(
                "daysAtPlace {} for {} differs from the {} days between its dates",
                record.days_at_place,
                record.location,
                record.inclusive_day_count()
            );
        }
        Ok(record)
    }

    /// Days from arrival to departure, counting both ends.
    pub fn inclusive_day_count(&self) -> u32 {
        let span = (self.departure_date - self.arrival_date).num_days() + 1;
        u32::try_from(span).unwrap_or(u32::MAX)
    }

    pub fn is_long_stay(&self) -> bool {
        self.days_at_place >= LONG_STAY_DAYS
    }

    pub fn key(&self) -> RecordKey {
        RecordKey {
            location: self.location.clone(),
            arrival_date: self.arrival_date,
        }
    }
}

/// Keeps the first record for each `(location, arrivalDate)` pair.
pub fn dedupe_by_key(records: Vec<TravelRecord>) -> Vec<TravelRecord> {
    let mut seen = HashSet::new();
    records
        .into_iter()
        .filter(|record| seen.insert(record.key()))
        .collect()
}

fn optional_text(object: &Map<String, Value>, field: &'static str) -> Option<String> {
    match object.get(field)? {
        Value::String(text) => {
            let trimmed = text.trim();
            (!trimmed.is_empty()).then(|| trimmed.to_string())
        }
        Value::Number(number) => Some(number.to_string()),
        _ => None,
    }
}

fn required_text(object: &Map<String, Value>, field: &'static str) -> Result<String, RecordError> {
    match object.get(field) {
        None | Some(Value::Null) => Err(RecordError::MissingField(field)),
        Some(Value::String(_) | Value::Number(_)) => {
            optional_text(object, field).ok_or(RecordError::MissingField(field))
        }
        Some(_) => Err(RecordError::WrongType {
            field,
            expected: "a string",
        }),
    }
}

fn date_field(object: &Map<String, Value>, field: &'static str) -> Result<NaiveDate, RecordError> {
    let raw = match object.get(field) {
        None | Some(Value::Null) => return Err(RecordError::MissingField(field)),
        Some(Value::String(text)) => text.trim(),
        Some(_) => {
            return Err(RecordError::WrongType {
                field,
                expected: "a date string",
            })
        }
    };
    NaiveDate::parse_from_str(raw, DATE_FORMAT).map_err(|_| RecordError::InvalidDate {
        field,
        value: raw.to_string(),
    })
}

fn days_field(object: &Map<String, Value>) -> Result<u32, RecordError> {
    match object.get("daysAtPlace") {
        None | Some(Value::Null) => Ok(0),
        Some(Value::Number(number)) => number
            .as_u64()
            .and_then(|days| u32::try_from(days).ok())
            .or_else(|| number.as_f64().and_then(whole_days))
            .ok_or_else(|| RecordError::InvalidDays(number.to_string())),
        Some(Value::String(text)) if text.trim().is_empty() => Ok(0),
        Some(Value::String(text)) => {
            let trimmed = text.trim();
            trimmed
                .parse::<u32>()
                .ok()
                .or_else(|| trimmed.parse::<f64>().ok().and_then(whole_days))
                .ok_or_else(|| RecordError::InvalidDays(text.clone()))
        }
        Some(_) => Err(RecordError::WrongType {
            field: "daysAtPlace",
            expected: "a number",
        }),
    }
}

/// Integral, non-negative floats such as `16.0` count as whole days.
fn whole_days(value: f64) -> Option<u32> {
    let in_range = value.is_finite() && value >= 0.0 && value <= f64::from(u32::MAX);
    (in_range && value.fract() == 0.0).then_some(value as u32)
}

fn coordinates_field(object: &Map<String, Value>) -> Option<Coordinates> {
    let (lat, lon) = match object.get("coordinates").and_then(Value::as_object) {
        Some(nested) => (nested.get("lat"), nested.get("lon")),
        None => (object.get("lat"), object.get("lon")),
    };
    let lat = number_like(lat?)?;
    let lon = number_like(lon?)?;
    Some(Coordinates { lat, lon })
}

fn number_like(value: &Value) -> Option<f64> {
    let number = match value {
        Value::Number(number) => number.as_f64()?,
        Value::String(text) => text.trim().parse::<f64>().ok()?,
        _ => return None,
    };
    number.is_finite().then_some(number)
}
