//! Core types for the fridaycal calendar publisher.
//!
//! This crate holds every pure operation behind the published calendar:
//! - `event` for the `CalendarEvent` record and its derived UID
//! - `ics` for generating and reading iCalendar documents
//! - `date_list` for loading the curated list of dates
//! - `merge` for folding a previously published calendar into a new run

pub mod date_list;
pub mod error;
pub mod event;
pub mod ics;
pub mod merge;

pub use date_list::DateList;
pub use error::{FridayCalError, FridayCalResult, ValidationError};
pub use event::CalendarEvent;
pub use ics::{CalendarOptions, generate, generate_with, parse_calendar, validate};
pub use merge::{MergeOutcome, merge};
