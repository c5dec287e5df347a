//! TUI rendering for fridaycal types.
//!
//! Extension traits that add colored terminal rendering to fridaycal-core
//! types using owo_colors.

use chrono::NaiveDate;
use fridaycal_core::CalendarEvent;
use owo_colors::OwoColorize;

/// Extension trait for TUI rendering with colors.
pub trait Render {
    fn render(&self) -> String;
}

impl Render for CalendarEvent {
    fn render(&self) -> String {
        format!(
            "{} {} {}",
            self.date.format("%a %Y-%m-%d").bold(),
            self.title,
            self.uid().dimmed()
        )
    }
}

/// Render events one per line. Dates in `added` get a green `+`, dates
/// before `today` are dimmed.
pub fn render_event_list(events: &[CalendarEvent], added: &[NaiveDate], today: NaiveDate) -> String {
    if events.is_empty() {
        return "   No events".dimmed().to_string();
    }

    events
        .iter()
        .map(|event| {
            let marker = if added.contains(&event.date) {
                "+".green().to_string()
            } else {
                " ".to_string()
            };
            let line = event.render();
            if event.date < today {
                format!(" {} {}", marker, line.dimmed())
            } else {
                format!(" {} {}", marker, line)
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Simple pluralization helper
pub fn pluralize(word: &str, count: usize) -> String {
    if count == 1 {
        word.to_string()
    } else {
        format!("{word}s")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Drop ANSI color sequences
    fn plain(s: &str) -> String {
        let mut out = String::with_capacity(s.len());
        let mut chars = s.chars();
        while let Some(c) = chars.next() {
            if c == '\x1b' {
                for c in chars.by_ref() {
                    if c == 'm' {
                        break;
                    }
                }
            } else {
                out.push(c);
            }
        }
        out
    }

    #[test]
    fn test_render_event_list_marks_added_dates() {
        let oct = NaiveDate::from_ymd_opt(2025, 10, 3).unwrap();
        let dec = NaiveDate::from_ymd_opt(2025, 12, 5).unwrap();
        let events = vec![
            CalendarEvent::new(oct, "Bandcamp Friday"),
            CalendarEvent::new(dec, "Bandcamp Friday"),
        ];

        let rendered = plain(&render_event_list(&events, &[dec], oct));
        let lines: Vec<&str> = rendered.lines().collect();

        assert_eq!(lines.len(), 2);
        assert!(lines[0].starts_with("   Fri 2025-10-03 Bandcamp Friday"), "Got {:?}", lines[0]);
        assert!(lines[1].starts_with(" + Fri 2025-12-05"), "Got {:?}", lines[1]);
        assert!(lines[1].ends_with("bandcamp-friday-20251205@github.com"));
    }

    #[test]
    fn test_pluralize() {
        assert_eq!(pluralize("event", 1), "event");
        assert_eq!(pluralize("event", 0), "events");
        assert_eq!(pluralize("date", 3), "dates");
    }
}
