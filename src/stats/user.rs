use serde::Serialize;

use crate::stats::Popular;
use crate::stats::utility::{distribution, mode};
use crate::trip::TripTable;

/// Demographic breakdown of the riders in a table.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UserStats {
    pub user_types: Vec<(String, usize)>,
    pub user_types_missing: usize,
    /// `None` when the city's file has no gender column.
    pub gender: Option<GenderStats>,
    /// `None` when the city's file has no birth year column.
    pub birth_year: Option<BirthYearStats>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GenderStats {
    pub breakdown: Vec<(String, usize)>,
    pub missing: usize,
}

/// Earliest, latest and most common birth year. The first three are `None`
/// when every value is missing.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BirthYearStats {
    pub earliest: Option<i32>,
    pub latest: Option<i32>,
    pub most_common: Option<Popular<i32>>,
    pub missing: usize,
}

#[tracing::instrument(skip_all, fields(trips = table.len()))]
pub fn user_stats(table: &TripTable) -> UserStats {
    let user_types = distribution(table.iter().filter_map(|t| t.user_type.clone()));
    let user_types_missing = table.iter().filter(|t| t.user_type.is_none()).count();

    let gender = table.schema.has_gender.then(|| GenderStats {
        breakdown: distribution(table.iter().filter_map(|t| t.gender.clone())),
        missing: table.iter().filter(|t| t.gender.is_none()).count(),
    });

    let birth_year = table.schema.has_birth_year.then(|| {
        let years = || table.iter().filter_map(|t| t.birth_year);
        BirthYearStats {
            earliest: years().min(),
            latest: years().max(),
            most_common: mode(years()).map(Popular::from),
            missing: table.iter().filter(|t| t.birth_year.is_none()).count(),
        }
    });

    UserStats {
        user_types,
        user_types_missing,
        gender,
        birth_year,
    }
}
