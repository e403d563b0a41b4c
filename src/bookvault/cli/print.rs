use bookvault::api::{CmdMessage, MessageLevel};
use bookvault::commands::stats::goal_percent;
use bookvault::model::{Record, Stats};
use bookvault::search::{highlight_matches, SearchOptions};
use bookvault::settings::Settings;
use chrono::{DateTime, Utc};
use colored::Colorize;
use timeago::Formatter;
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

const LINE_WIDTH: usize = 100;
const TIME_WIDTH: usize = 16;
const ID_WIDTH: usize = 10;
const PROGRESS_WIDTH: usize = 12;
const BAR_WIDTH: usize = 20;

/// Active search, used to highlight matches in listings.
pub(super) struct Highlight<'a> {
    pub query: &'a str,
    pub options: SearchOptions,
}

pub(super) fn print_messages(messages: &[CmdMessage]) {
    for message in messages {
        match message.level {
            MessageLevel::Info => println!("{}", message.content.dimmed()),
            MessageLevel::Success => println!("{}", message.content.green()),
            MessageLevel::Warning => println!("{}", message.content.yellow()),
            MessageLevel::Error => println!("{}", message.content.red()),
        }
    }
}

pub(super) fn print_records(records: &[Record], highlight: Option<&Highlight>) {
    if records.is_empty() {
        println!("No records found.");
        return;
    }

    for record in records {
        let id = format!("{:<width$}", record.id, width = ID_WIDTH);
        let progress = format!(
            "{:>width$}",
            format!("{}/{}", record.pages_read, record.pages),
            width = PROGRESS_WIDTH
        );
        let time_ago = format_time_ago(record.updated_at);

        let label = if record.author.is_empty() {
            record.title.clone()
        } else {
            format!("{} · {}", record.title, record.author)
        };
        let label = if record.tag.is_empty() {
            label
        } else {
            format!("{} [{}]", label, record.tag)
        };

        let available = LINE_WIDTH.saturating_sub(ID_WIDTH + PROGRESS_WIDTH + TIME_WIDTH + 2);
        let label_display = truncate_to_width(&label, available);
        let padding = available.saturating_sub(label_display.width());

        let label_display = match highlight {
            Some(h) => highlight_matches(&label_display, h.query, h.options, |m| {
                m.bold().yellow().to_string()
            }),
            None => label_display,
        };

        let progress_colored = if record.is_finished() {
            progress.green()
        } else if record.pages_read > 0 {
            progress.cyan()
        } else {
            progress.normal()
        };

        println!(
            "{}  {}{}{}{}",
            id.yellow(),
            label_display,
            " ".repeat(padding),
            progress_colored,
            time_ago.dimmed()
        );
    }
}

pub(super) fn print_full_records(records: &[Record]) {
    for (i, record) in records.iter().enumerate() {
        if i > 0 {
            println!("\n================================\n");
        }
        println!("{} {}", record.id.yellow(), record.title.bold());
        println!("--------------------------------");
        println!("Author:   {}", record.author);
        println!("Tag:      {}", record.tag);
        println!("Added:    {}", record.date_added);
        println!(
            "Progress: {} {}/{} pages ({:.0}%)",
            progress_bar(record.progress_percent()),
            record.pages_read,
            record.pages,
            record.progress_percent()
        );
        println!("Updated:  {}", format_time_ago(record.updated_at).trim());

        if record.read_history.is_empty() {
            println!("\n{}", "No reading sessions logged.".dimmed());
            continue;
        }
        println!("\nReading history:");
        for entry in &record.read_history {
            let delta = format!("{:+}", entry.delta_pages);
            let delta = if entry.delta_pages < 0 {
                delta.red()
            } else {
                delta.green()
            };
            let note = if entry.note.is_empty() {
                String::new()
            } else {
                format!("  {}", entry.note.dimmed())
            };
            println!(
                "  {}  {:>6} pages{}",
                entry.date_iso.format("%Y-%m-%d %H:%M"),
                delta,
                note
            );
        }
    }
}

pub(super) fn print_stats(stats: &Stats, settings: Option<&Settings>) {
    println!("{:<20}{}", "Books:", stats.total);
    println!("{:<20}{}", "Pages:", stats.total_pages);
    println!("{:<20}{}", "Pages read:", stats.total_pages_read);
    println!("{:<20}{}", "Favorite category:", stats.favorite_category);

    if let Some(settings) = settings {
        let percent = goal_percent(stats.total_pages_read, settings.goal);
        println!(
            "{:<20}{} {}/{} pages ({:.0}%)",
            "Reading goal:",
            progress_bar(percent),
            stats.total_pages_read,
            settings.goal,
            percent
        );
    }

    if !stats.last_interacted.is_empty() {
        println!("\nRecently updated:");
        print_records(&stats.last_interacted, None);
    }
}

pub(super) fn print_settings(settings: &Settings) {
    for (key, value) in settings.entries() {
        println!("{} = {}", key, value);
    }
}

fn progress_bar(percent: f64) -> String {
    let filled = ((percent / 100.0) * BAR_WIDTH as f64).round() as usize;
    let filled = filled.min(BAR_WIDTH);
    format!(
        "[{}{}]",
        "#".repeat(filled).green(),
        "-".repeat(BAR_WIDTH - filled).dimmed()
    )
}

fn truncate_to_width(s: &str, max_width: usize) -> String {
    if s.width() <= max_width {
        return s.to_string();
    }

    let mut result = String::new();
    let mut current_width = 0;
    for c in s.chars() {
        let char_width = c.width().unwrap_or(0);
        if current_width + char_width > max_width.saturating_sub(1) {
            result.push('…');
            return result;
        }
        result.push(c);
        current_width += char_width;
    }
    result
}

fn format_time_ago(timestamp: DateTime<Utc>) -> String {
    let duration = Utc::now().signed_duration_since(timestamp);
    let time_str = Formatter::new().convert(duration.to_std().unwrap_or_default());
    format!("{:>width$}", time_str, width = TIME_WIDTH)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn truncate_keeps_short_text() {
        assert_eq!(truncate_to_width("Dune", 10), "Dune");
    }

    #[test]
    fn truncate_adds_ellipsis() {
        assert_eq!(truncate_to_width("The Left Hand of Darkness", 10), "The Left …");
    }

    #[test]
    fn truncate_counts_wide_chars() {
        let truncated = truncate_to_width("三体三体三体", 7);
        assert!(truncated.width() <= 7);
        assert!(truncated.ends_with('…'));
    }

    #[test]
    fn progress_bar_bounds() {
        colored::control::set_override(false);
        assert_eq!(progress_bar(0.0), format!("[{}]", "-".repeat(BAR_WIDTH)));
        assert_eq!(progress_bar(100.0), format!("[{}]", "#".repeat(BAR_WIDTH)));
        assert_eq!(progress_bar(150.0), format!("[{}]", "#".repeat(BAR_WIDTH)));
    }
}
