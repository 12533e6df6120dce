//! Error types for tinycal-holiday.

use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur while syncing holidays into calendar files.
#[derive(Error, Debug)]
pub enum HolidayError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Could not fetch holiday data for {year}: {source}")]
    Fetch {
        year: i32,
        #[source]
        source: reqwest::Error,
    },

    #[error("Holiday data request for {year} failed with HTTP status {status}")]
    HttpStatus { year: i32, status: u16 },

    #[error("No holiday data published for {0} (404 Not Found). Check that the year is correct")]
    NotFound(i32),

    #[error("Malformed holiday data: {0}")]
    Parse(String),

    #[error("Holiday data for {0} contains no usable days")]
    NoHolidayData(i32),

    #[error("Calendar directory '{}' is not readable: {source}", dir.display())]
    Locate {
        dir: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Calendar file '{}' is unreadable: {reason}", path.display())]
    CorruptFile { path: PathBuf, reason: String },

    #[error("Could not save calendar file '{}': {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl HolidayError {
    /// Fatal errors abort the whole run. The rest only affect a single file.
    pub fn is_fatal(&self) -> bool {
        !matches!(
            self,
            HolidayError::CorruptFile { .. } | HolidayError::Write { .. }
        )
    }
}

/// Result type alias for tinycal-holiday operations.
pub type HolidayResult<T> = Result<T, HolidayError>;
