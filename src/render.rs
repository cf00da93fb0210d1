//! Colored agenda listing of mapped events.

use celcat_core::OutputEvent;
use chrono::NaiveDate;
use owo_colors::OwoColorize;

/// Render events grouped by day, in chronological order
pub fn agenda(name: &str, events: &[OutputEvent]) -> String {
    let mut lines = vec![format!("📅 {}", name.bold())];

    if events.is_empty() {
        lines.push(format!("{}", "No events found".dimmed()));
        return lines.join("\n") + "\n";
    }

    let mut sorted: Vec<&OutputEvent> = events.iter().collect();
    sorted.sort_by_key(|e| (e.start, e.end));

    let mut current_date: Option<NaiveDate> = None;

    for event in sorted {
        let date = event.start.date();
        if current_date != Some(date) {
            lines.push(String::new());
            lines.push(format_date_label(date).bold().to_string());
            current_date = Some(date);
        }

        let time = format!("{}-{}", event.start.format("%H:%M"), event.end.format("%H:%M"));
        let mut line = format!("  {} {}", time, event.summary);
        if !event.location.is_empty() {
            line.push_str(&format!(" {}", format!("[{}]", event.location).dimmed()));
        }
        lines.push(line);
    }

    lines.join("\n") + "\n"
}

/// e.g. "Thu 11/09/2025"
fn format_date_label(date: NaiveDate) -> String {
    date.format("%a %d/%m/%Y").to_string()
}
