//! Folding newly curated dates into a previously published calendar.

use std::collections::HashSet;

use chrono::NaiveDate;
use tracing::debug;

use crate::event::CalendarEvent;

/// Result of [`merge`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MergeOutcome {
    /// Every event to publish, sorted chronologically
    pub events: Vec<CalendarEvent>,
    /// Dates that were not published before, sorted
    pub added: Vec<NaiveDate>,
}

impl MergeOutcome {
    pub fn has_new_dates(&self) -> bool {
        !self.added.is_empty()
    }
}

/// Merge `incoming` events into the `existing` published ones.
///
/// Existing events are kept as published, even when `incoming` has an entry
/// for the same date. Within each list the first entry for a date wins.
pub fn merge(existing: Vec<CalendarEvent>, incoming: Vec<CalendarEvent>) -> MergeOutcome {
    let mut known: HashSet<NaiveDate> = HashSet::with_capacity(existing.len() + incoming.len());
    let mut events = Vec::with_capacity(existing.len() + incoming.len());

    for event in existing {
        if known.insert(event.date) {
            events.push(event);
        }
    }

    let mut added = Vec::new();
    for event in incoming {
        if known.insert(event.date) {
            added.push(event.date);
            events.push(event);
        }
    }

    events.sort_by_key(|e| e.date);
    added.sort();

    debug!(total = events.len(), added = added.len(), "Merged events");
    MergeOutcome { events, added }
}
