//! Enumerated user selections: city, month filter, day filter and yes/no.

use std::fmt;
use std::str::FromStr;

use chrono::Weekday;
use serde::Serialize;

use crate::error::{InputError, title_case};

/// Supported cities.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub enum City {
    Chicago,
    NewYorkCity,
    Washington,
}

impl City {
    pub const ALL: [City; 3] = [City::Chicago, City::NewYorkCity, City::Washington];

    pub fn name(self) -> &'static str {
        match self {
            City::Chicago => "Chicago",
            City::NewYorkCity => "New York City",
            City::Washington => "Washington",
        }
    }

    /// File name of the city's trip data inside the data directory.
    pub fn file_name(self) -> &'static str {
        match self {
            City::Chicago => "chicago.csv",
            City::NewYorkCity => "new_york_city.csv",
            City::Washington => "washington.csv",
        }
    }
}

impl fmt::Display for City {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for City {
    type Err = InputError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.split_whitespace().collect::<Vec<_>>().join(" ").to_lowercase();
        match normalized.as_str() {
            "chicago" => Ok(City::Chicago),
            "new york city" | "new york" | "nyc" => Ok(City::NewYorkCity),
            "washington" => Ok(City::Washington),
            _ => Err(InputError::City(title_case(s))),
        }
    }
}

/// Months offered as filters. The datasets cover January through June.
pub const FILTER_MONTHS: [&str; 6] = ["January", "February", "March", "April", "May", "June"];

/// Month restriction: everything, or one month number in `1..=6`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum MonthFilter {
    All,
    Month(u32),
}

impl MonthFilter {
    pub fn matches(self, month: u32) -> bool {
        match self {
            MonthFilter::All => true,
            MonthFilter::Month(m) => m == month,
        }
    }
}

impl fmt::Display for MonthFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MonthFilter::All => f.write_str("All"),
            MonthFilter::Month(m) => f.write_str(month_name(*m)),
        }
    }
}

impl FromStr for MonthFilter {
    type Err = InputError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let needle = s.trim().to_lowercase();
        if needle == "all" {
            return Ok(MonthFilter::All);
        }
        FILTER_MONTHS
            .iter()
            .position(|m| m.to_lowercase() == needle)
            .map(|i| MonthFilter::Month(i as u32 + 1))
            .ok_or_else(|| InputError::Month(title_case(s)))
    }
}

/// Day-of-week restriction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum DayFilter {
    All,
    Day(#[serde(serialize_with = "serialize_weekday")] Weekday),
}

impl DayFilter {
    pub fn matches(self, weekday: Weekday) -> bool {
        match self {
            DayFilter::All => true,
            DayFilter::Day(d) => d == weekday,
        }
    }
}

impl fmt::Display for DayFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DayFilter::All => f.write_str("All"),
            DayFilter::Day(d) => f.write_str(weekday_name(*d)),
        }
    }
}

impl FromStr for DayFilter {
    type Err = InputError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let needle = s.trim().to_lowercase();
        if needle == "all" {
            return Ok(DayFilter::All);
        }
        WEEKDAYS
            .iter()
            .find(|d| weekday_name(**d).to_lowercase() == needle)
            .map(|d| DayFilter::Day(*d))
            .ok_or_else(|| InputError::Day(title_case(s)))
    }
}

/// The (month, day) pair restricting which trips are aggregated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Selection {
    pub month: MonthFilter,
    pub day: DayFilter,
}

impl Selection {
    pub const ALL: Selection = Selection {
        month: MonthFilter::All,
        day: DayFilter::All,
    };
}

/// Answer to a yes/no prompt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Answer {
    Yes,
    No,
}

impl FromStr for Answer {
    type Err = InputError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "yes" | "y" => Ok(Answer::Yes),
            "no" | "n" => Ok(Answer::No),
            _ => Err(InputError::Answer(title_case(s))),
        }
    }
}

pub const WEEKDAYS: [Weekday; 7] = [
    Weekday::Mon,
    Weekday::Tue,
    Weekday::Wed,
    Weekday::Thu,
    Weekday::Fri,
    Weekday::Sat,
    Weekday::Sun,
];

/// Full English weekday name, independent of locale.
pub fn weekday_name(day: Weekday) -> &'static str {
    match day {
        Weekday::Mon => "Monday",
        Weekday::Tue => "Tuesday",
        Weekday::Wed => "Wednesday",
        Weekday::Thu => "Thursday",
        Weekday::Fri => "Friday",
        Weekday::Sat => "Saturday",
        Weekday::Sun => "Sunday",
    }
}

/// Full English month name for `1..=12`, `"Unknown"` otherwise.
pub fn month_name(month: u32) -> &'static str {
    u8::try_from(month)
        .ok()
        .and_then(|m| chrono::Month::try_from(m).ok())
        .map(|m| m.name())
        .unwrap_or("Unknown")
}

fn serialize_weekday<S: serde::Serializer>(day: &Weekday, s: S) -> Result<S::Ok, S::Error> {
    s.serialize_str(weekday_name(*day))
}
