//! Common helper functions for output formatting.

use chrono::{DateTime, Duration, Utc};
use owo_colors::OwoColorize;
use taskwave_query::filter::TaskStatus;
use taskwave_query::{Priority, Task};

/// Due dates at most this many days out are shown as a countdown.
const UPCOMING_DAYS: i64 = 7;

/// Truncates an ID to 8 characters for display.
pub fn truncate_id(id: &str) -> String {
    id.chars().take(8).collect()
}

/// Truncates a string to a maximum length in characters.
pub fn truncate_str(s: &str, max_len: usize) -> String {
    if s.chars().count() > max_len {
        let head: String = s.chars().take(max_len.saturating_sub(3)).collect();
        format!("{head}...")
    } else {
        s.to_string()
    }
}

/// Pads `s` to `width` visible characters.
///
/// Colored strings carry escape codes, so `{:<width$}` would count those too.
pub fn pad(s: &str, visible_len: usize, width: usize) -> String {
    format!("{s}{}", " ".repeat(width.saturating_sub(visible_len)))
}

/// Formats priority for display. Returns the text and its visible length.
pub fn format_priority(priority: Option<Priority>, use_colors: bool) -> (String, usize) {
    let Some(priority) = priority else {
        return (String::new(), 0);
    };
    let label = priority.as_str();

    let text = if use_colors {
        match priority {
            Priority::High => label.red().to_string(),
            Priority::Medium => label.yellow().to_string(),
            Priority::Low => label.blue().to_string(),
        }
    } else {
        label.to_string()
    };
    (text, label.len())
}

/// Formats a task's due date relative to `now`. Returns the text and its visible length.
///
/// Dates up to a week out read "in N days"; older dates show whole days overdue.
pub fn format_due(task: &Task, now: DateTime<Utc>, use_colors: bool) -> (String, usize) {
    let (Some(due), Some(days)) = (task.due_date, task.days_until_due(now)) else {
        return (String::new(), 0);
    };

    let date = due.date_naive();
    let today = now.date_naive();

    let display = if date == today {
        "Today".to_string()
    } else if date == today + Duration::days(1) {
        "Tomorrow".to_string()
    } else if date == today - Duration::days(1) {
        "Yesterday".to_string()
    } else if date < today {
        format!("{}d overdue", -days)
    } else if days <= UPCOMING_DAYS {
        format!("in {days} days")
    } else {
        date.format("%b %d").to_string()
    };
    let len = display.chars().count();

    let text = if use_colors {
        if date < today {
            display.red().to_string()
        } else if date == today {
            display.yellow().to_string()
        } else {
            display
        }
    } else {
        display
    };
    (text, len)
}

/// Formats a task status marker.
pub fn format_status(status: TaskStatus, use_colors: bool) -> (String, usize) {
    let label = match status {
        TaskStatus::Completed => "done",
        TaskStatus::Overdue => "late",
        TaskStatus::Pending => "",
    };

    let text = match status {
        TaskStatus::Completed if use_colors => label.green().to_string(),
        TaskStatus::Overdue if use_colors => label.red().to_string(),
        _ => label.to_string(),
    };
    (text, label.len())
}

/// Formats tags for display.
pub fn format_tags(tags: &[String], max_len: usize) -> String {
    if tags.is_empty() {
        return String::new();
    }

    let formatted: Vec<String> = tags.iter().map(|t| format!("#{t}")).collect();
    truncate_str(&formatted.join(" "), max_len)
}
