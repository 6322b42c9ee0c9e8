//! Reads a city's trip file into a [`TripTable`].

use std::fs::File;
use std::io::Read;
use std::path::Path;

use chrono::NaiveDateTime;
use tracing::{debug, info, warn};

use crate::config::{BadRowPolicy, CityTable};
use crate::error::DataError;
use crate::selection::{City, FILTER_MONTHS};
use crate::trip::{Schema, Trip, TripRecord, TripTable};

const TIMESTAMP_FORMATS: [&str; 3] = [
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S",
];

/// Parses a start-time cell using the formats seen in the trip exports.
pub fn parse_timestamp(value: &str) -> Option<NaiveDateTime> {
    let value = value.trim();
    TIMESTAMP_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(value, fmt).ok())
}

/// Counters describing a finished load.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LoadSummary {
    pub loaded: usize,
    pub skipped: usize,
    pub outside_filter_months: usize,
}

/// Loads the full, unfiltered trip table for `city`.
#[tracing::instrument(skip_all, fields(city = %city, ?policy))]
pub fn load(
    cities: &CityTable,
    city: City,
    policy: BadRowPolicy,
) -> Result<(TripTable, LoadSummary), DataError> {
    let path = cities
        .path(city)
        .ok_or(DataError::Unconfigured(city.name()))?;
    let file = File::open(path).map_err(|source| DataError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    load_from_reader(file, path, city, policy)
}

/// Loads trips from any reader; `path` is only used in error messages.
pub fn load_from_reader<R: Read>(
    reader: R,
    path: &Path,
    city: City,
    policy: BadRowPolicy,
) -> Result<(TripTable, LoadSummary), DataError> {
    let csv_err = |source| DataError::Csv {
        path: path.to_path_buf(),
        source,
    };

    // headers are trimmed so the schema check and serde see the same names
    let mut rdr = csv::ReaderBuilder::new()
        .trim(csv::Trim::Headers)
        .from_reader(reader);
    let headers = rdr.headers().map_err(csv_err)?.clone();

    if let Some(column) = Schema::missing_required(&headers) {
        return Err(DataError::MissingColumn {
            path: path.to_path_buf(),
            column,
        });
    }
    let schema = Schema::from_headers(&headers);
    debug!(?schema, "Trip file schema");

    let mut trips = Vec::new();
    let mut summary = LoadSummary::default();

    for result in rdr.records() {
        let parsed = result
            .map_err(|source| {
                let line = source.position().map_or(0, |p| p.line());
                DataError::Row {
                    path: path.to_path_buf(),
                    line,
                    source,
                }
            })
            .and_then(|raw| parse_row(&raw, &headers, path));

        match parsed {
            Ok(trip) => {
                if !(1..=FILTER_MONTHS.len() as u32).contains(&trip.month) {
                    summary.outside_filter_months += 1;
                }
                trips.push(trip);
            }
            Err(e) if policy == BadRowPolicy::Skip => {
                warn!(error = %e, "Skipping bad trip row");
                summary.skipped += 1;
            }
            Err(e) => return Err(e),
        }
    }

    summary.loaded = trips.len();
    if summary.outside_filter_months > 0 {
        warn!(
            rows = summary.outside_filter_months,
            "Trips outside January-June cannot be selected by month"
        );
    }
    info!(
        loaded = summary.loaded,
        skipped = summary.skipped,
        "Trip file loaded"
    );

    Ok((TripTable::new(city, schema, trips), summary))
}

fn parse_row(
    raw: &csv::StringRecord,
    headers: &csv::StringRecord,
    path: &Path,
) -> Result<Trip, DataError> {
    let line = raw.position().map_or(0, |p| p.line());
    let record: TripRecord = raw
        .deserialize(Some(headers))
        .map_err(|source| DataError::Row {
            path: path.to_path_buf(),
            line,
            source,
        })?;
    if let Some(year) = record.birth_year {
        if !is_whole_year(year) {
            return Err(DataError::BirthYear {
                path: path.to_path_buf(),
                line,
                value: year,
            });
        }
    }
    let ts = parse_timestamp(&record.start_time).ok_or_else(|| DataError::Timestamp {
        path: path.to_path_buf(),
        line,
        value: record.start_time.clone(),
    })?;
    Ok(Trip::new(record, ts))
}

fn is_whole_year(year: f64) -> bool {
    year.is_finite() && year.fract() == 0.0 && (0.0..=i32::MAX as f64).contains(&year)
}
