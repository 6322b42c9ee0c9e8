//! Summary statistics over a filtered [`TripTable`](crate::trip::TripTable).
//!
//! Each aggregator is a pure function returning a serializable report.
//! "Most frequent" values break ties toward the smallest key: lowest month
//! or hour, earliest weekday from Monday, lexicographically first station.

pub mod duration;
pub mod station;
pub mod time;
pub mod user;
pub mod utility;

use serde::Serialize;

pub use duration::{DurationStats, duration_stats};
pub use station::{StationStats, station_stats};
pub use time::{TimeStats, time_stats};
pub use user::{BirthYearStats, GenderStats, UserStats, user_stats};

/// A most-frequent value together with how many trips had it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Popular<T> {
    pub value: T,
    pub count: usize,
}

impl<T> From<(T, usize)> for Popular<T> {
    fn from((value, count): (T, usize)) -> Self {
        Popular { value, count }
    }
}
