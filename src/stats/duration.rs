use serde::Serialize;

use crate::trip::TripTable;

/// Total and average trip duration, in seconds.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DurationStats {
    pub trips: usize,
    pub total_seconds: f64,
    /// `None` when there are no trips.
    pub mean_seconds: Option<f64>,
}

#[tracing::instrument(skip_all, fields(trips = table.len()))]
pub fn duration_stats(table: &TripTable) -> DurationStats {
    let trips = table.len();
    let total_seconds: f64 = table.iter().map(|t| t.duration_secs).sum();
    let mean_seconds = (trips > 0).then(|| total_seconds / trips as f64);

    DurationStats {
        trips,
        total_seconds,
        mean_seconds,
    }
}

/// Splits a number of seconds into whole days, hours, minutes and the
/// remaining seconds.
pub fn breakdown(seconds: f64) -> (u64, u64, u64, f64) {
    let whole = seconds.max(0.0).trunc() as u64;
    let frac = seconds.max(0.0) - whole as f64;
    let days = whole / 86_400;
    let hours = whole % 86_400 / 3_600;
    let minutes = whole % 3_600 / 60;
    (days, hours, minutes, (whole % 60) as f64 + frac)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::trip::Schema;
    use crate::trip::fixtures::{table, trip};

    #[test]
    fn test_duration_empty_has_no_mean() {
        let stats = duration_stats(&table(Schema::default(), vec![]));
        assert_eq!(stats.trips, 0);
        assert_eq!(stats.total_seconds, 0.0);
        assert_eq!(stats.mean_seconds, None);
    }

    #[test]
    fn test_duration_sum_and_mean() {
        let ts = "2017-01-02 08:00:00";
        let t = table(
            Schema::default(),
            vec![
                trip(ts, "A", "B", 100.0),
                trip(ts, "A", "B", 250.5),
                trip(ts, "A", "B", 49.5),
            ],
        );
        let stats = duration_stats(&t);

        assert_eq!(stats.total_seconds, 400.0);
        assert!(stats.total_seconds >= 0.0);
        assert_eq!(stats.mean_seconds, Some(400.0 / 3.0));
    }

    #[test]
    fn test_breakdown() {
        assert_eq!(breakdown(0.0), (0, 0, 0, 0.0));
        assert_eq!(breakdown(90_061.5), (1, 1, 1, 1.5));
        assert_eq!(breakdown(-5.0), (0, 0, 0, 0.0));
    }
}
