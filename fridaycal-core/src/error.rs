//! Error types for fridaycal.

use chrono::NaiveDate;
use thiserror::Error;

/// Rejected generator input. Raised before any output is built.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Invalid date '{value}': {reason}")]
    InvalidDate { value: String, reason: String },

    #[error("Duplicate date: {0}")]
    DuplicateDate(NaiveDate),

    #[error("Calendar name must not be empty")]
    EmptyCalendarName,

    #[error("Event on {0} has an empty title")]
    EmptyTitle(NaiveDate),
}

/// Errors that can occur in fridaycal operations.
#[derive(Error, Debug)]
pub enum FridayCalError {
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("ICS parse error: {0}")]
    IcsParse(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias for fridaycal operations.
pub type FridayCalResult<T> = Result<T, FridayCalError>;
