//! The curated date list.
//!
//! The list of Bandcamp Fridays is maintained by hand in a TOML file:
//!
//! ```toml
//! [calendar]
//! name = "Bandcamp Friday"
//! refresh_interval_hours = 12
//!
//! [defaults]
//! description = "Bandcamp waives its revenue share on this day."
//! url = "https://isitbandcampfriday.com/"
//!
//! [[events]]
//! date = "2025-10-03"
//! ```
//!
//! Scalar settings can be overridden from the environment, e.g.
//! `FRIDAYCAL_CALENDAR__NAME`.

use std::path::Path;

use config::{Config, Environment, File, FileFormat};
use serde::Deserialize;
use tracing::debug;

use crate::error::{FridayCalError, FridayCalResult, ValidationError};
use crate::event::{CalendarEvent, DEFAULT_TITLE, parse_date};
use crate::ics::CalendarOptions;

/// Prefix of environment variables that override date list settings.
pub const ENV_PREFIX: &str = "FRIDAYCAL";

fn default_calendar_name() -> String {
    DEFAULT_TITLE.to_string()
}

/// A parsed date list file
#[derive(Debug, Clone, Default, Deserialize)]
pub struct DateList {
    #[serde(default)]
    pub calendar: CalendarSection,

    #[serde(default)]
    pub defaults: EventDefaults,

    #[serde(default)]
    pub events: Vec<DateEntry>,
}

/// `[calendar]`: document-level settings
#[derive(Debug, Clone, Deserialize)]
pub struct CalendarSection {
    #[serde(default = "default_calendar_name")]
    pub name: String,

    pub description: Option<String>,

    pub refresh_interval_hours: Option<u32>,
}

impl Default for CalendarSection {
    fn default() -> Self {
        CalendarSection {
            name: default_calendar_name(),
            description: None,
            refresh_interval_hours: None,
        }
    }
}

/// `[defaults]`: fields applied to every entry that leaves them out
#[derive(Debug, Clone, Default, Deserialize)]
pub struct EventDefaults {
    pub title: Option<String>,
    pub description: Option<String>,
    pub url: Option<String>,
}

/// One `[[events]]` entry
#[derive(Debug, Clone, Deserialize)]
pub struct DateEntry {
    /// `YYYY-MM-DD` (or `YYYYMMDD`)
    pub date: String,
    pub title: Option<String>,
    pub description: Option<String>,
    pub url: Option<String>,
}

impl DateEntry {
    fn resolve(&self, defaults: &EventDefaults) -> Result<CalendarEvent, ValidationError> {
        let date = parse_date(&self.date)?;
        let title = self
            .title
            .as_ref()
            .or(defaults.title.as_ref())
            .map(String::as_str)
            .unwrap_or(DEFAULT_TITLE);

        Ok(CalendarEvent {
            date,
            title: title.to_string(),
            description: self.description.clone().or_else(|| defaults.description.clone()),
            url: self.url.clone().or_else(|| defaults.url.clone()),
        })
    }
}

impl DateList {
    /// Load a date list file, applying `FRIDAYCAL_*` environment overrides.
    pub fn load(path: &Path) -> FridayCalResult<Self> {
        Self::load_with_env(path, None)
    }

    /// Like [`DateList::load`], reading overrides from `env` instead of the
    /// process environment when given.
    fn load_with_env(
        path: &Path,
        env: Option<config::Map<String, String>>,
    ) -> FridayCalResult<Self> {
        if !path.exists() {
            return Err(FridayCalError::Config(format!(
                "Date list not found at {}",
                path.display()
            )));
        }

        let list: DateList = Config::builder()
            .add_source(File::from(path).format(FileFormat::Toml).required(true))
            .add_source(
                Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true)
                    .source(env),
            )
            .build()
            .map_err(|e| FridayCalError::Config(e.to_string()))?
            .try_deserialize()
            .map_err(|e| FridayCalError::Config(e.to_string()))?;

        debug!(path = %path.display(), entries = list.events.len(), "Loaded date list");
        Ok(list)
    }

    /// Parse a date list from TOML text (no environment overrides).
    pub fn from_toml_str(content: &str) -> FridayCalResult<Self> {
        toml::from_str(content).map_err(|e| FridayCalError::Config(e.to_string()))
    }

    /// Resolve every entry into an event, in file order.
    pub fn events(&self) -> Result<Vec<CalendarEvent>, ValidationError> {
        self.events
            .iter()
            .map(|entry| entry.resolve(&self.defaults))
            .collect()
    }

    pub fn options(&self) -> CalendarOptions {
        CalendarOptions {
            name: self.calendar.name.clone(),
            description: self.calendar.description.clone(),
            refresh_interval_hours: self.calendar.refresh_interval_hours,
        }
    }
}
