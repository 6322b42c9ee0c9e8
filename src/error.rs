//! Error types for selection parsing and dataset loading.

use std::path::PathBuf;

use thiserror::Error;

/// Rejected user input. Always recovered by asking again.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum InputError {
    #[error("{0} is not a valid city.")]
    City(String),
    #[error("{0} is not a valid month.")]
    Month(String),
    #[error("{0} is not a valid day.")]
    Day(String),
    #[error("{0} is not a valid answer.")]
    Answer(String),
}

/// A problem reading or interpreting a city's trip file.
#[derive(Debug, Error)]
pub enum DataError {
    #[error("no data file is configured for {0}")]
    Unconfigured(&'static str),
    #[error("could not read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("malformed CSV in {path}: {source}")]
    Csv {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },
    #[error("{path} has no '{column}' column")]
    MissingColumn {
        path: PathBuf,
        column: &'static str,
    },
    #[error("{path} line {line}: unparseable start time '{value}'")]
    Timestamp {
        path: PathBuf,
        line: u64,
        value: String,
    },
    #[error("{path} line {line}: birth year {value} is not a whole year")]
    BirthYear {
        path: PathBuf,
        line: u64,
        value: f64,
    },
    #[error("{path} line {line}: {source}")]
    Row {
        path: PathBuf,
        line: u64,
        #[source]
        source: csv::Error,
    },
}

/// Title-cases free text for echoing it back in error messages.
pub(crate) fn title_case(s: &str) -> String {
    s.split_whitespace()
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first
                    .to_uppercase()
                    .chain(chars.flat_map(char::to_lowercase))
                    .collect(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}
