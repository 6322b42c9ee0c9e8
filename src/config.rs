use std::collections::BTreeMap;
use std::num::NonZeroUsize;
use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::selection::City;

/// Maps each supported [`City`] to the CSV file holding its trips.
///
/// Built once at startup and handed to the loader; never mutated.
#[derive(Debug, Clone)]
pub struct CityTable {
    entries: BTreeMap<City, PathBuf>,
}

impl CityTable {
    /// Standard file names rooted at `data_dir`.
    pub fn new(data_dir: impl AsRef<Path>) -> Self {
        let data_dir = data_dir.as_ref();
        let entries = City::ALL
            .iter()
            .map(|city| (*city, data_dir.join(city.file_name())))
            .collect();
        Self { entries }
    }

    /// Explicit mapping, e.g. for tests pointing at fixtures.
    pub fn from_entries(entries: impl IntoIterator<Item = (City, PathBuf)>) -> Self {
        Self {
            entries: entries.into_iter().collect(),
        }
    }

    /// Returns the file configured for `city`, if any.
    pub fn path(&self, city: City) -> Option<&Path> {
        self.entries.get(&city).map(PathBuf::as_path)
    }

    /// Iterates over all `(city, path)` pairs.
    pub fn iter(&self) -> impl Iterator<Item = (City, &Path)> {
        self.entries.iter().map(|(k, v)| (*k, v.as_path()))
    }
}

/// What the loader does with a row it cannot interpret.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum BadRowPolicy {
    /// Fail the whole load on the first bad row.
    #[default]
    Abort,
    /// Log and drop the row, keep loading.
    Skip,
}

/// Session-wide settings.
#[derive(Debug, Clone)]
pub struct Config {
    pub cities: CityTable,
    pub bad_rows: BadRowPolicy,
    pub batch_size: NonZeroUsize,
}

pub const DEFAULT_BATCH_SIZE: NonZeroUsize = match NonZeroUsize::new(10) {
    Some(n) => n,
    None => unreachable!(),
};

impl Config {
    pub fn new(cities: CityTable) -> Self {
        Self {
            cities,
            bad_rows: BadRowPolicy::default(),
            batch_size: DEFAULT_BATCH_SIZE,
        }
    }

    pub fn with_bad_rows(mut self, policy: BadRowPolicy) -> Self {
        self.bad_rows = policy;
        self
    }

    pub fn with_batch_size(mut self, batch_size: NonZeroUsize) -> Self {
        self.batch_size = batch_size;
        self
    }
}
