use std::path::Path;

use anyhow::{Context, Result};
use chrono::{Local, NaiveDate};
use fridaycal_core::{CalendarEvent, DateList, generate_with, merge, parse_calendar, validate};
use owo_colors::OwoColorize;
use tracing::{debug, info};

use crate::publish::{self, WriteOutcome};
use crate::render::{pluralize, render_event_list};

/// A generated calendar, not yet written anywhere
pub struct Build {
    pub content: String,
    pub events: Vec<CalendarEvent>,
    /// Dates that were not in the published file (only with `--merge-existing`)
    pub added: Vec<NaiveDate>,
}

pub fn run(dates: &Path, output: &Path, merge_existing: bool, stdout: bool) -> Result<()> {
    let build = build(dates, output, merge_existing)?;

    if stdout {
        print!("{}", build.content);
        return Ok(());
    }

    match publish::write_if_changed(output, &build.content)? {
        WriteOutcome::Written => {
            info!(path = %output.display(), events = build.events.len(), "Wrote calendar");
            println!(
                "{} Wrote {} {} to {}",
                "✓".green(),
                build.events.len(),
                pluralize("event", build.events.len()),
                output.display()
            );
            if !build.added.is_empty() {
                println!(
                    "{}",
                    render_event_list(&build.events, &build.added, Local::now().date_naive())
                );
            }
        }
        WriteOutcome::Unchanged => {
            info!(path = %output.display(), "Calendar unchanged");
            println!("{}", "   No changes".dimmed());
        }
    }

    Ok(())
}

/// Load the date list, fold in the published file if asked to, and generate.
///
/// Nothing is written here, so a failure leaves the published file as it was.
pub fn build(dates: &Path, output: &Path, merge_existing: bool) -> Result<Build> {
    let list = DateList::load(dates)
        .with_context(|| format!("Failed to load date list at {}", dates.display()))?;
    let options = list.options();
    let curated = list.events().context("Invalid date list")?;
    // Checked before merging, which would otherwise drop curated duplicates
    validate(&curated, &options).context("Invalid date list")?;

    let existing = if merge_existing {
        publish::read_existing(output)?
    } else {
        None
    };

    let (events, added) = match existing {
        Some(content) => {
            let published = parse_calendar(&content).with_context(|| {
                format!("Failed to parse published calendar at {}", output.display())
            })?;
            debug!(published = published.len(), curated = curated.len(), "Merging");

            let outcome = merge(published, curated);
            if outcome.has_new_dates() {
                info!(added = ?outcome.added, "Adding new dates");
            } else {
                info!("No new dates to add");
            }
            (outcome.events, outcome.added)
        }
        None => (curated, Vec::new()),
    };

    let content = generate_with(&events, &options).context("Failed to generate calendar")?;

    Ok(Build {
        content,
        events,
        added,
    })
}
