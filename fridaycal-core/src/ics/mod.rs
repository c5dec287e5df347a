//! ICS document generation and parsing.
//!
//! This module handles reading and writing .ics files according to RFC 5545.

mod generate;
mod parse;
pub mod text;

pub use generate::{CalendarOptions, PRODID, generate, generate_with, validate};
pub use parse::parse_calendar;
