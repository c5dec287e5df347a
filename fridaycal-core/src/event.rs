//! The calendar event record.
//!
//! A `CalendarEvent` is one Bandcamp Friday: a whole day, a title and some
//! optional text. Its UID is never stored; it is derived from the date so a
//! regenerated calendar always carries the same identifiers.

use std::fmt;

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

/// Title used when neither the entry nor the defaults provide one.
pub const DEFAULT_TITLE: &str = "Bandcamp Friday";

/// Namespace prefix of every event UID.
pub const UID_NAMESPACE: &str = "bandcamp-friday";

/// Domain suffix of every event UID.
pub const UID_DOMAIN: &str = "github.com";

/// Years an iCalendar DATE value can express (four digits, basic format).
const MIN_YEAR: i32 = 1;
const MAX_YEAR: i32 = 9999;

/// One all-day event in the published calendar
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CalendarEvent {
    pub date: NaiveDate,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
}

impl CalendarEvent {
    pub fn new(date: NaiveDate, title: impl Into<String>) -> Self {
        CalendarEvent {
            date,
            title: title.into(),
            description: None,
            url: None,
        }
    }

    /// Build an event from raw date parts, rejecting dates that don't exist.
    pub fn from_ymd(
        year: i32,
        month: u32,
        day: u32,
        title: impl Into<String>,
    ) -> Result<Self, ValidationError> {
        let date =
            NaiveDate::from_ymd_opt(year, month, day).ok_or_else(|| ValidationError::InvalidDate {
                value: format!("{year:04}-{month:02}-{day:02}"),
                reason: "no such calendar date".into(),
            })?;
        Ok(Self::new(date, title))
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_url(mut self, url: impl Into<String>) -> Self {
        self.url = Some(url.into());
        self
    }

    /// Stable identifier for this event, see [`event_uid`].
    pub fn uid(&self) -> String {
        event_uid(self.date)
    }
}

impl fmt::Display for CalendarEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.date.format("%Y-%m-%d"), self.title)
    }
}

/// UID for the event on `date`, e.g. `bandcamp-friday-20251003@github.com`.
pub fn event_uid(date: NaiveDate) -> String {
    format!("{}-{}@{}", UID_NAMESPACE, date.format("%Y%m%d"), UID_DOMAIN)
}

/// Parse a date as written in the date list.
///
/// Accepts `YYYY-MM-DD` and the compact `YYYYMMDD` form used in UIDs and
/// iCalendar DATE values.
pub fn parse_date(value: &str) -> Result<NaiveDate, ValidationError> {
    let trimmed = value.trim();
    let format = if trimmed.contains('-') { "%Y-%m-%d" } else { "%Y%m%d" };

    let date = NaiveDate::parse_from_str(trimmed, format).map_err(|e| {
        ValidationError::InvalidDate {
            value: value.to_string(),
            reason: e.to_string(),
        }
    })?;
    check_date_range(date)?;
    Ok(date)
}

/// Reject dates outside the range an iCalendar DATE value can carry.
pub fn check_date_range(date: NaiveDate) -> Result<(), ValidationError> {
    if (MIN_YEAR..=MAX_YEAR).contains(&date.year()) {
        Ok(())
    } else {
        Err(ValidationError::InvalidDate {
            value: date.to_string(),
            reason: format!("year must be between {MIN_YEAR} and {MAX_YEAR}"),
        })
    }
}
