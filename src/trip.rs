//! Trip records as read from CSV, and the derived in-memory table.

use chrono::{Datelike, NaiveDateTime, Timelike, Weekday};
use serde::Deserialize;

use crate::selection::City;

/// A single row deserialized from a city's trip file.
///
/// Columns not named here (the unnamed index column, `End Time` in some
/// exports) are ignored.
#[derive(Debug, Clone, Deserialize)]
pub struct TripRecord {
    #[serde(rename = "Start Time")]
    pub start_time: String,
    #[serde(rename = "Trip Duration")]
    pub trip_duration: f64,
    #[serde(rename = "Start Station")]
    pub start_station: String,
    #[serde(rename = "End Station")]
    pub end_station: String,
    #[serde(rename = "User Type", default)]
    pub user_type: Option<String>,
    #[serde(rename = "Gender", default)]
    pub gender: Option<String>,
    #[serde(rename = "Birth Year", default)]
    pub birth_year: Option<f64>,
}

/// A trip with its timestamp parsed and calendar fields derived.
#[derive(Debug, Clone, PartialEq)]
pub struct Trip {
    pub start_time: NaiveDateTime,
    pub month: u32,
    pub weekday: Weekday,
    pub hour: u32,
    pub duration_secs: f64,
    pub start_station: String,
    pub end_station: String,
    pub user_type: Option<String>,
    pub gender: Option<String>,
    pub birth_year: Option<i32>,
}

impl Trip {
    pub fn new(record: TripRecord, start_time: NaiveDateTime) -> Self {
        Trip {
            start_time,
            month: start_time.month(),
            weekday: start_time.weekday(),
            hour: start_time.hour(),
            duration_secs: record.trip_duration,
            start_station: record.start_station,
            end_station: record.end_station,
            user_type: non_empty(record.user_type),
            gender: non_empty(record.gender),
            birth_year: record.birth_year.map(|y| y as i32),
        }
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

/// Column names the loader requires in every trip file.
pub const REQUIRED_COLUMNS: [&str; 5] = [
    "Start Time",
    "Trip Duration",
    "Start Station",
    "End Station",
    "User Type",
];

/// Which optional columns a trip file carries.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Schema {
    pub has_gender: bool,
    pub has_birth_year: bool,
}

impl Schema {
    pub fn from_headers(headers: &csv::StringRecord) -> Self {
        let has = |name: &str| headers.iter().any(|h| h == name);
        Schema {
            has_gender: has("Gender"),
            has_birth_year: has("Birth Year"),
        }
    }

    pub fn missing_required(headers: &csv::StringRecord) -> Option<&'static str> {
        REQUIRED_COLUMNS
            .iter()
            .copied()
            .find(|col| !headers.iter().any(|h| h == *col))
    }
}

/// An ordered set of trips for one city, with the schema they came from.
#[derive(Debug, Clone, PartialEq)]
pub struct TripTable {
    pub city: City,
    pub schema: Schema,
    pub trips: Vec<Trip>,
}

impl TripTable {
    pub fn new(city: City, schema: Schema, trips: Vec<Trip>) -> Self {
        Self {
            city,
            schema,
            trips,
        }
    }

    pub fn len(&self) -> usize {
        self.trips.len()
    }

    pub fn is_empty(&self) -> bool {
        self.trips.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Trip> {
        self.trips.iter()
    }
}

#[cfg(test)]
pub(crate) mod fixtures {
    use super::*;

    /// Builds a trip starting at `ts` (`%Y-%m-%d %H:%M:%S`).
    pub fn trip(ts: &str, start: &str, end: &str, duration_secs: f64) -> Trip {
        let start_time = NaiveDateTime::parse_from_str(ts, "%Y-%m-%d %H:%M:%S").unwrap();
        let record = TripRecord {
            start_time: ts.to_string(),
            trip_duration: duration_secs,
            start_station: start.to_string(),
            end_station: end.to_string(),
            user_type: Some("Subscriber".to_string()),
            gender: None,
            birth_year: None,
        };
        Trip::new(record, start_time)
    }

    pub fn table(schema: Schema, trips: Vec<Trip>) -> TripTable {
        TripTable::new(City::Chicago, schema, trips)
    }
}
