//! Failures while acquiring match histories and deriving rates from them.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

use crate::domain::{League, Origin, Season};

/// Aborts the run.
#[derive(Debug, Error)]
pub enum HistoryError {
    #[error("{0}")]
    Fetch(#[from] FetchError),

    #[error("{0}")]
    ScheduleFormat(#[from] ScheduleFormatError),
}

#[derive(Debug, Error)]
pub enum FetchError {
    #[error("could not build HTTP client: {0}")]
    Client(#[source] reqwest::Error),

    #[error("request for {league} {season} failed: {source}")]
    Transport {
        league: League,
        season: Season,
        #[source]
        source: reqwest::Error,
    },

    #[error("request for {league} {season} to {url} returned {status}")]
    Status {
        league: League,
        season: Season,
        url: String,
        status: reqwest::StatusCode,
    },

    #[error("no file supplied for {league} {season}")]
    NoFile { league: League, season: Season },

    #[error("could not read {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

#[derive(Debug, Error)]
pub enum ScheduleFormatError {
    #[error("malformed CSV from {origin}: {source}")]
    Csv {
        origin: Origin,
        #[source]
        source: csv::Error,
    },

    #[error("missing column '{column}' in data from {origin}")]
    MissingColumn { column: String, origin: Origin },

    #[error("missing column '{column}' in an empty table")]
    EmptyTable { column: String },
}

/// Rejects a single row; other rows are unaffected.
#[derive(Debug, Error, PartialEq)]
#[error("invalid odds in column '{column}': {defect}")]
pub struct InvalidOdds {
    pub column: String,
    pub defect: OddsDefect,
}

#[derive(Debug, Error, PartialEq)]
pub enum OddsDefect {
    #[error("no value")]
    Missing,

    #[error("'{0}' is not a number")]
    Unparseable(String),

    #[error("{0} is not a positive price")]
    NonPositive(f64),

    #[error("value is not finite")]
    NonFinite,
}
