//! Core of the icsfilter proxy.
//!
//! This crate provides everything between a calendar URL and the filtered
//! calendar text:
//! - `fetch` downloads a remote calendar and classifies failures
//! - `ics` parses and generates the iCalendar text format
//! - `filter` drops events whose title is in an [`ExclusionSet`]

pub mod document;
pub mod error;
pub mod fetch;
pub mod filter;
pub mod ics;

pub use document::{CalendarDocument, Component, ComponentKind, Parameter, Property};
pub use error::{Error, FetchError, ParseError, Result};
pub use fetch::{FetchOutcome, Fetcher, FetcherBuilder};
pub use filter::{ExclusionSet, filter_and_serialize, filter_calendar};
