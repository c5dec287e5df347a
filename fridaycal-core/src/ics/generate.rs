//! ICS document generation.

use std::collections::HashSet;

use icalendar::{Calendar, Component, Property, ValueType};
use tracing::debug;

use super::text::{normalize_newlines, push_folded_line};
use crate::error::ValidationError;
use crate::event::{CalendarEvent, check_date_range};

/// Product identifier written into every generated document.
pub const PRODID: &str = "-//fridaycal//Bandcamp Friday Calendar//EN";

/// Document-level settings for a generated calendar
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CalendarOptions {
    /// Display name (X-WR-CALNAME)
    pub name: String,
    /// Calendar description (X-WR-CALDESC)
    pub description: Option<String>,
    /// Suggested polling interval for subscribers, in hours
    pub refresh_interval_hours: Option<u32>,
}

impl CalendarOptions {
    pub fn new(name: impl Into<String>) -> Self {
        CalendarOptions {
            name: name.into(),
            description: None,
            refresh_interval_hours: None,
        }
    }
}

/// Generate a calendar document named `calendar_name` with one all-day
/// event per entry of `events`, in input order.
pub fn generate(events: &[CalendarEvent], calendar_name: &str) -> Result<String, ValidationError> {
    generate_with(events, &CalendarOptions::new(calendar_name))
}

/// Generate a calendar document with full document-level options.
///
/// Everything is validated before the document is built, so an error never
/// comes with partial output. Identical input gives byte-identical output.
pub fn generate_with(
    events: &[CalendarEvent],
    options: &CalendarOptions,
) -> Result<String, ValidationError> {
    validate(events, options)?;

    let mut cal = Calendar::new();
    // icalendar escapes TEXT values (every X- property included) on output
    cal.append_property(Property::new("X-WR-CALNAME", normalize_newlines(&options.name)));
    if let Some(ref desc) = options.description {
        cal.append_property(Property::new("X-WR-CALDESC", normalize_newlines(desc)));
    }
    cal.append_property(Property::new("METHOD", "PUBLISH"));

    if let Some(hours) = options.refresh_interval_hours {
        let duration = format!("PT{hours}H");
        let mut refresh = Property::new("REFRESH-INTERVAL", duration.clone());
        refresh.append_parameter(ValueType::Duration);
        cal.append_property(refresh);
        cal.append_property(Property::new("X-PUBLISHED-TTL", duration));
    }

    for event in events {
        cal.push(build_vevent(event));
    }
    let cal = cal.done();

    let output = finalize(&cal.to_string());
    debug!(
        events = events.len(),
        bytes = output.len(),
        "Generated calendar '{}'",
        options.name
    );

    Ok(output)
}

/// Check `events` and `options` against every rule [`generate_with`] enforces.
pub fn validate(events: &[CalendarEvent], options: &CalendarOptions) -> Result<(), ValidationError> {
    if options.name.trim().is_empty() {
        return Err(ValidationError::EmptyCalendarName);
    }

    let mut seen = HashSet::with_capacity(events.len());
    for event in events {
        check_date_range(event.date)?;
        // DTEND is the following day and needs a four-digit year as well
        if !event.date.succ_opt().is_some_and(|end| check_date_range(end).is_ok()) {
            return Err(ValidationError::InvalidDate {
                value: event.date.to_string(),
                reason: "the following day is past year 9999".into(),
            });
        }
        if event.title.trim().is_empty() {
            return Err(ValidationError::EmptyTitle(event.date));
        }
        if !seen.insert(event.date) {
            return Err(ValidationError::DuplicateDate(event.date));
        }
    }

    Ok(())
}

/// Build the VEVENT for a single all-day event
fn build_vevent(event: &CalendarEvent) -> icalendar::Event {
    let mut ics_event = icalendar::Event::new();
    ics_event.uid(&event.uid());
    ics_event.summary(&normalize_newlines(&event.title));

    // DTSTAMP is required by RFC 5545. Pinned to the event date so that
    // regenerating never changes the document.
    let dtstamp = event.date.format("%Y%m%dT000000Z").to_string();
    ics_event.add_property("DTSTAMP", &dtstamp);

    // DTEND is exclusive, so a one-day event ends on the following day
    add_date_property(&mut ics_event, "DTSTART", event.date);
    add_date_property(&mut ics_event, "DTEND", event.date.succ_opt().unwrap_or(event.date));

    if let Some(ref desc) = event.description {
        ics_event.description(&normalize_newlines(desc));
    }

    if let Some(ref url) = event.url {
        ics_event.add_property("URL", url);
    }

    // The day is informational, it shouldn't show as busy
    ics_event.add_property("TRANSP", "TRANSPARENT");

    ics_event.done()
}

/// Add a DATE-valued property (`NAME;VALUE=DATE:YYYYMMDD`)
fn add_date_property(ics_event: &mut icalendar::Event, name: &str, date: chrono::NaiveDate) {
    let mut prop = Property::new(name, date.format("%Y%m%d").to_string());
    prop.append_parameter(ValueType::Date);
    ics_event.append_property(prop);
}

/// Clean up ICS output from the icalendar crate
/// - Replace its PRODID with ours
/// - Re-emit every line with CRLF, folded at 75 octets
fn finalize(ics: &str) -> String {
    let mut result = String::with_capacity(ics.len() + PRODID.len());

    for line in ics.lines() {
        if line.is_empty() {
            continue;
        }
        if line.starts_with("PRODID:") {
            push_folded_line(&mut result, &format!("PRODID:{PRODID}"));
            continue;
        }
        push_folded_line(&mut result, line);
    }

    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn friday(year: i32, month: u32, day: u32) -> CalendarEvent {
        CalendarEvent::new(NaiveDate::from_ymd_opt(year, month, day).unwrap(), "Bandcamp Friday")
    }

    fn scenario_events() -> Vec<CalendarEvent> {
        vec![friday(2025, 10, 3), friday(2025, 12, 5)]
    }

    /// Split a document into its VEVENT blocks, markers included
    fn event_blocks(ics: &str) -> Vec<String> {
        ics.split("BEGIN:VEVENT\r\n")
            .skip(1)
            .map(|rest| {
                let end = rest.find("END:VEVENT\r\n").expect("Unterminated VEVENT");
                format!("BEGIN:VEVENT\r\n{}END:VEVENT\r\n", &rest[..end])
            })
            .collect()
    }

    #[test]
    fn test_generate_two_fridays() {
        let ics = generate(&scenario_events(), "Bandcamp Friday").unwrap();

        assert!(ics.starts_with("BEGIN:VCALENDAR\r\n"), "ICS:\n{ics}");
        assert!(ics.ends_with("END:VCALENDAR\r\n"), "ICS:\n{ics}");
        assert!(ics.contains("VERSION:2.0\r\n"));
        assert!(ics.contains(&format!("PRODID:{PRODID}\r\n")), "ICS:\n{ics}");
        assert!(ics.contains("X-WR-CALNAME:Bandcamp Friday\r\n"), "ICS:\n{ics}");
        assert!(ics.contains("METHOD:PUBLISH\r\n"), "ICS:\n{ics}");

        let blocks = event_blocks(&ics);
        assert_eq!(blocks.len(), 2, "ICS:\n{ics}");

        assert!(blocks[0].contains("UID:bandcamp-friday-20251003@github.com\r\n"));
        assert!(blocks[0].contains("DTSTART;VALUE=DATE:20251003\r\n"), "Block:\n{}", blocks[0]);
        assert!(blocks[0].contains("DTEND;VALUE=DATE:20251004\r\n"), "Block:\n{}", blocks[0]);
        assert!(blocks[0].contains("SUMMARY:Bandcamp Friday\r\n"));

        assert!(blocks[1].contains("UID:bandcamp-friday-20251205@github.com\r\n"));
        assert!(blocks[1].contains("DTSTART;VALUE=DATE:20251205\r\n"));
    }

    #[test]
    fn test_generate_is_deterministic() {
        let events = vec![
            friday(2025, 10, 3)
                .with_description("Bandcamp waives its revenue share on this day. Support artists directly!")
                .with_url("https://isitbandcampfriday.com/"),
            friday(2025, 11, 7),
        ];
        let mut options = CalendarOptions::new("Bandcamp Friday");
        options.description = Some("When Bandcamp waives its revenue share".into());
        options.refresh_interval_hours = Some(12);

        let first = generate_with(&events, &options).unwrap();
        let second = generate_with(&events, &options).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_generate_no_wall_clock_timestamps() {
        let ics = generate(&[friday(2025, 10, 3)], "Bandcamp Friday").unwrap();
        let dtstamp = ics
            .lines()
            .find(|l| l.starts_with("DTSTAMP"))
            .expect("Should have DTSTAMP line");
        assert_eq!(dtstamp, "DTSTAMP:20251003T000000Z");
    }

    #[test]
    fn test_generate_empty_calendar() {
        let ics = generate(&[], "Bandcamp Friday").unwrap();

        assert!(ics.starts_with("BEGIN:VCALENDAR\r\n"));
        assert!(ics.ends_with("END:VCALENDAR\r\n"));
        assert!(ics.contains("X-WR-CALNAME:Bandcamp Friday\r\n"));
        assert!(!ics.contains("BEGIN:VEVENT"), "ICS:\n{ics}");
    }

    #[test]
    fn test_generate_preserves_input_order() {
        // Deliberately not chronological: the generator must not sort
        let events = vec![friday(2026, 3, 6), friday(2025, 10, 3), friday(2025, 12, 5)];
        let ics = generate(&events, "Bandcamp Friday").unwrap();

        let uids: Vec<&str> = ics
            .lines()
            .filter_map(|l| l.strip_prefix("UID:"))
            .collect();
        assert_eq!(
            uids,
            vec![
                "bandcamp-friday-20260306@github.com",
                "bandcamp-friday-20251003@github.com",
                "bandcamp-friday-20251205@github.com",
            ]
        );
    }

    #[test]
    fn test_appending_a_date_keeps_existing_blocks() {
        let before = generate(&scenario_events(), "Bandcamp Friday").unwrap();

        let mut events = scenario_events();
        events.push(friday(2026, 3, 6));
        let after = generate(&events, "Bandcamp Friday").unwrap();

        let before_blocks = event_blocks(&before);
        let after_blocks = event_blocks(&after);
        assert_eq!(after_blocks.len(), 3);
        assert_eq!(&after_blocks[..2], &before_blocks[..]);
        assert!(after_blocks[2].contains("DTSTART;VALUE=DATE:20260306\r\n"));

        // Everything outside the event blocks is unchanged too
        let header = |ics: &str| ics[..ics.find("BEGIN:VEVENT").unwrap()].to_string();
        assert_eq!(header(&before), header(&after));
        assert!(after.ends_with(&format!("{}END:VCALENDAR\r\n", after_blocks[2])));
    }

    #[test]
    fn test_generate_rejects_duplicate_dates() {
        let events = vec![friday(2025, 10, 3), friday(2025, 11, 7), friday(2025, 10, 3)];
        let err = generate(&events, "Bandcamp Friday").unwrap_err();
        assert_eq!(
            err,
            ValidationError::DuplicateDate(NaiveDate::from_ymd_opt(2025, 10, 3).unwrap())
        );
    }

    #[test]
    fn test_generate_rejects_empty_name() {
        assert_eq!(
            generate(&scenario_events(), "").unwrap_err(),
            ValidationError::EmptyCalendarName
        );
        assert_eq!(
            generate(&[], "   ").unwrap_err(),
            ValidationError::EmptyCalendarName
        );
    }

    #[test]
    fn test_generate_rejects_unrepresentable_year() {
        let events = vec![friday(2025, 10, 3), friday(10000, 1, 7)];
        let err = generate(&events, "Bandcamp Friday").unwrap_err();
        assert!(matches!(err, ValidationError::InvalidDate { .. }), "Got {err:?}");
    }

    #[test]
    fn test_generate_rejects_last_representable_day() {
        // 9999-12-31 itself is a valid DTSTART, but DTEND would be in year 10000
        let err = generate(&[friday(9999, 12, 31)], "Bandcamp Friday").unwrap_err();
        assert!(matches!(err, ValidationError::InvalidDate { .. }), "Got {err:?}");

        let ics = generate(&[friday(9999, 12, 30)], "Bandcamp Friday").unwrap();
        assert!(ics.contains("DTEND;VALUE=DATE:99991231\r\n"), "ICS:\n{ics}");
    }

    #[test]
    fn test_generate_rejects_empty_title() {
        let event = CalendarEvent::new(NaiveDate::from_ymd_opt(2025, 10, 3).unwrap(), " ");
        let err = generate(&[event], "Bandcamp Friday").unwrap_err();
        assert!(matches!(err, ValidationError::EmptyTitle(_)));
    }

    #[test]
    fn test_generate_optional_fields() {
        let events = vec![
            friday(2025, 10, 3)
                .with_description("Support artists, directly!")
                .with_url("https://isitbandcampfriday.com/"),
            friday(2025, 11, 7),
        ];
        let ics = generate(&events, "Bandcamp Friday").unwrap();
        let blocks = event_blocks(&ics);

        assert!(
            blocks[0].contains("DESCRIPTION:Support artists\\, directly!\r\n"),
            "Block:\n{}",
            blocks[0]
        );
        assert!(blocks[0].contains("URL:https://isitbandcampfriday.com/\r\n"));
        assert!(blocks[0].contains("TRANSP:TRANSPARENT\r\n"));

        assert!(!blocks[1].contains("DESCRIPTION"), "Block:\n{}", blocks[1]);
        assert!(!blocks[1].contains("URL:"), "Block:\n{}", blocks[1]);
    }

    #[test]
    fn test_generate_refresh_interval() {
        let mut options = CalendarOptions::new("Bandcamp Friday");
        options.refresh_interval_hours = Some(12);
        let ics = generate_with(&[], &options).unwrap();

        assert!(ics.contains("REFRESH-INTERVAL;VALUE=DURATION:PT12H\r\n"), "ICS:\n{ics}");
        assert!(ics.contains("X-PUBLISHED-TTL:PT12H\r\n"), "ICS:\n{ics}");
    }

    #[test]
    fn test_generate_lines_are_crlf_and_folded() {
        let long = "Bandcamp waives its revenue share on this day. ".repeat(5);
        let events = vec![friday(2025, 10, 3).with_description(long)];
        let ics = generate(&events, "Bandcamp Friday").unwrap();

        assert!(!ics.replace("\r\n", "").contains('\n'), "Bare LF in output");
        for line in ics.split_terminator("\r\n") {
            assert!(line.len() <= 75, "Line too long ({}): {line:?}", line.len());
        }
        assert!(ics.contains("\r\n "), "Expected a folded continuation line");
    }

    #[test]
    fn test_text_values_are_escaped_once() {
        let events = vec![
            CalendarEvent::new(NaiveDate::from_ymd_opt(2025, 10, 3).unwrap(), r"A, B; C\D")
                .with_description("line one\r\nline two"),
        ];
        let mut options = CalendarOptions::new("Name, with; punct");
        options.description = Some("first\nsecond".into());
        let ics = generate_with(&events, &options).unwrap();

        assert!(ics.contains("SUMMARY:A\\, B\\; C\\\\D\r\n"), "ICS:\n{ics}");
        assert!(ics.contains("DESCRIPTION:line one\\nline two\r\n"), "ICS:\n{ics}");
        assert!(ics.contains("X-WR-CALNAME:Name\\, with\\; punct\r\n"), "ICS:\n{ics}");
        assert!(ics.contains("X-WR-CALDESC:first\\nsecond\r\n"), "ICS:\n{ics}");
    }

    #[test]
    fn test_generate_has_no_name_property() {
        let ics = generate(&scenario_events(), "Bandcamp Friday").unwrap();
        assert!(
            !ics.split_terminator("\r\n").any(|l| l.starts_with("NAME:") || l.starts_with("NAME;")),
            "ICS:\n{ics}"
        );
    }
}
