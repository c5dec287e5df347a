use std::path::Path;

use anyhow::{Context, Result};
use chrono::{Local, NaiveDate};
use fridaycal_core::{CalendarEvent, parse_calendar};
use serde::Serialize;

use crate::render::render_event_list;

/// JSON shape of a listed event, UID included
#[derive(Serialize)]
struct ListedEvent<'a> {
    uid: String,
    date: NaiveDate,
    title: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    description: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    url: Option<&'a str>,
}

impl<'a> From<&'a CalendarEvent> for ListedEvent<'a> {
    fn from(event: &'a CalendarEvent) -> Self {
        ListedEvent {
            uid: event.uid(),
            date: event.date,
            title: &event.title,
            description: event.description.as_deref(),
            url: event.url.as_deref(),
        }
    }
}

pub fn run(file: &Path, json: bool) -> Result<()> {
    let content = std::fs::read_to_string(file)
        .with_context(|| format!("Failed to read calendar at {}", file.display()))?;
    let events = parse_calendar(&content)
        .with_context(|| format!("Failed to parse calendar at {}", file.display()))?;

    if json {
        println!("{}", to_json(&events)?);
    } else {
        println!("{}", render_event_list(&events, &[], Local::now().date_naive()));
    }

    Ok(())
}

fn to_json(events: &[CalendarEvent]) -> Result<String> {
    let listed: Vec<ListedEvent> = events.iter().map(ListedEvent::from).collect();
    serde_json::to_string_pretty(&listed).context("Failed to serialize events")
}
