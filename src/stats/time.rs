use serde::Serialize;

use crate::selection::{WEEKDAYS, month_name, weekday_name};
use crate::stats::Popular;
use crate::stats::utility::mode;
use crate::trip::TripTable;

/// Most frequent times of travel.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TimeStats {
    /// Month number, January = 1.
    pub popular_month: Option<Popular<u32>>,
    pub popular_day: Option<Popular<&'static str>>,
    pub popular_hour: Option<Popular<u32>>,
}

impl TimeStats {
    pub fn popular_month_name(&self) -> Option<&'static str> {
        self.popular_month.as_ref().map(|p| month_name(p.value))
    }
}

#[tracing::instrument(skip_all, fields(trips = table.len()))]
pub fn time_stats(table: &TripTable) -> TimeStats {
    // weekdays are counted by position so Monday wins ties
    let popular_day = mode(table.iter().map(|t| t.weekday.num_days_from_monday()))
        .map(|(i, n)| Popular {
            value: weekday_name(WEEKDAYS[i as usize]),
            count: n,
        });

    TimeStats {
        popular_month: mode(table.iter().map(|t| t.month)).map(Popular::from),
        popular_day,
        popular_hour: mode(table.iter().map(|t| t.hour)).map(Popular::from),
    }
}
