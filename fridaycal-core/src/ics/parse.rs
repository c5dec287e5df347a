//! Reading a previously published calendar back into events.

use chrono::NaiveDate;
use icalendar::{
    CalendarDateTime, DatePerhapsTime,
    parser::{read_calendar, unfold},
};
use tracing::{debug, warn};

use super::text::normalize_line_endings;
use crate::error::{FridayCalError, FridayCalResult};
use crate::event::{CalendarEvent, DEFAULT_TITLE};

/// Parse ICS content into the events it publishes, in document order.
///
/// Events without a usable DTSTART are skipped. UIDs are not read back: they
/// are derived from the date again when the calendar is regenerated.
pub fn parse_calendar(content: &str) -> FridayCalResult<Vec<CalendarEvent>> {
    let normalized = normalize_line_endings(content);
    if !normalized.trim_start().starts_with("BEGIN:VCALENDAR") {
        return Err(FridayCalError::IcsParse(
            "content does not start with BEGIN:VCALENDAR".into(),
        ));
    }

    let unfolded = unfold(&normalized);
    let calendar =
        read_calendar(&unfolded).map_err(|e| FridayCalError::IcsParse(e.to_string()))?;

    let events: Vec<CalendarEvent> = calendar
        .components
        .iter()
        .filter(|c| c.name == "VEVENT")
        .filter_map(|vevent| {
            let Some(dtstart) = vevent.find_prop("DTSTART") else {
                warn!("Skipping VEVENT without DTSTART");
                return None;
            };
            let Ok(start) = DatePerhapsTime::try_from(dtstart) else {
                warn!(value = %dtstart.val, "Skipping VEVENT with unreadable DTSTART");
                return None;
            };

            // the icalendar parser already unescapes TEXT values
            let title = vevent
                .find_prop("SUMMARY")
                .map(|p| p.val.to_string())
                .filter(|s| !s.trim().is_empty())
                .unwrap_or_else(|| DEFAULT_TITLE.to_string());

            Some(CalendarEvent {
                date: to_date(start),
                title,
                description: vevent
                    .find_prop("DESCRIPTION")
                    .map(|p| p.val.to_string()),
                url: vevent.find_prop("URL").map(|p| p.val.to_string()),
            })
        })
        .collect();

    debug!(events = events.len(), "Parsed published calendar");
    Ok(events)
}

/// Day of an event start. Timed starts (written by older versions of the
/// calendar) keep the date as written, without timezone conversion.
fn to_date(dpt: DatePerhapsTime) -> NaiveDate {
    match dpt {
        DatePerhapsTime::Date(d) => d,
        DatePerhapsTime::DateTime(cal_dt) => match cal_dt {
            CalendarDateTime::Utc(dt) => dt.date_naive(),
            CalendarDateTime::Floating(naive) => naive.date(),
            CalendarDateTime::WithTimezone { date_time, .. } => date_time.date(),
        },
    }
}
