use std::path::Path;

use anyhow::{Context, Result};
use chrono::Local;
use fridaycal_core::{DateList, generate_with};
use owo_colors::OwoColorize;

use crate::render::{pluralize, render_event_list};

pub fn run(dates: &Path) -> Result<()> {
    let list = DateList::load(dates)
        .with_context(|| format!("Failed to load date list at {}", dates.display()))?;
    let events = list.events().context("Invalid date list")?;

    // Running the generator is the full validation (duplicates, name, ranges)
    generate_with(&events, &list.options()).context("Invalid date list")?;

    let today = Local::now().date_naive();
    let upcoming = events.iter().filter(|e| e.date >= today).count();

    println!(
        "{} {} ({} {}, {} upcoming)",
        "✓".green(),
        list.options().name.bold(),
        events.len(),
        pluralize("date", events.len()),
        upcoming
    );
    println!("{}", render_event_list(&events, &[], today));

    Ok(())
}
