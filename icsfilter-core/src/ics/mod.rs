//! ICS reading and writing.
//!
//! This module handles the RFC 5545 text format: content lines, line folding
//! and nested BEGIN/END blocks.

mod generate;
mod parse;

pub use generate::generate_calendar;
pub use parse::parse_calendar;
