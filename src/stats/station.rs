use serde::Serialize;

use crate::stats::Popular;
use crate::stats::utility::mode;
use crate::trip::TripTable;

/// Most popular stations and station pair.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StationStats {
    pub popular_start: Option<Popular<String>>,
    pub popular_end: Option<Popular<String>>,
    /// (start, end) pair.
    pub popular_trip: Option<Popular<(String, String)>>,
}

#[tracing::instrument(skip_all, fields(trips = table.len()))]
pub fn station_stats(table: &TripTable) -> StationStats {
    let owned = |(s, n): (&String, usize)| Popular {
        value: s.clone(),
        count: n,
    };

    StationStats {
        popular_start: mode(table.iter().map(|t| &t.start_station)).map(owned),
        popular_end: mode(table.iter().map(|t| &t.end_station)).map(owned),
        popular_trip: mode(table.iter().map(|t| (&t.start_station, &t.end_station))).map(
            |((s, e), n)| Popular {
                value: (s.clone(), e.clone()),
                count: n,
            },
        ),
    }
}
