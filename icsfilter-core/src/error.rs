//! Error types for icsfilter.

use thiserror::Error;

/// Reasons a piece of text could not be decoded as a calendar.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    #[error("document is empty")]
    Empty,

    #[error("line {line}: not a content line: {reason}")]
    InvalidLine { line: usize, reason: &'static str },

    #[error("line {line}: expected BEGIN:VCALENDAR, found {found}")]
    MissingCalendar { line: usize, found: String },

    #[error("line {line}: END:{found} does not close BEGIN:{expected}")]
    MismatchedEnd {
        line: usize,
        expected: String,
        found: String,
    },

    #[error("line {line}: END:{found} without a matching BEGIN")]
    UnexpectedEnd { line: usize, found: String },

    #[error("BEGIN:{0} is never closed")]
    Unclosed(String),

    #[error("line {line}: content after END:VCALENDAR")]
    TrailingContent { line: usize },
}

/// Classified failure of a calendar fetch.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FetchError {
    #[error("calendar URL is not valid")]
    InvalidAddress,

    #[error("calendar was not found")]
    NotFound,

    #[error("response is not a calendar: {0}")]
    InvalidContent(#[from] ParseError),

    #[error("upstream responded with {status} {reason}")]
    Upstream { status: u16, reason: String },
}

/// Errors raised while setting up icsfilter components.
#[derive(Error, Debug)]
pub enum Error {
    #[error("HTTP client error: {0}")]
    Http(#[from] reqwest::Error),
}

/// Result type alias for icsfilter operations.
pub type Result<T> = std::result::Result<T, Error>;
