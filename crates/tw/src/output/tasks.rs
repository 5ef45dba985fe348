//! Task output formatting.

use chrono::{DateTime, Utc};
use owo_colors::OwoColorize;
use serde::Serialize;
use taskwave_query::filter::{FilterContext, FilterOutput, TaskStatus};
use taskwave_query::Task;

use super::helpers::{format_due, format_priority, format_status, format_tags, pad, truncate_id, truncate_str};

const ID_WIDTH: usize = 8;
const PRIORITY_WIDTH: usize = 6;
const DUE_WIDTH: usize = 12;
const STATUS_WIDTH: usize = 4;
const CATEGORY_WIDTH: usize = 12;
const TAGS_WIDTH: usize = 15;

/// JSON output structure for the list command.
#[derive(Serialize)]
pub struct ListOutput<'o, 'a> {
    /// An array of tasks, or an object of arrays keyed by group label.
    pub tasks: &'o FilterOutput<'a>,
    /// Number of tasks that matched before the limit.
    pub total: usize,
    pub has_more: bool,
}

/// Formats list output as JSON.
pub fn format_tasks_json(output: &FilterOutput<'_>, total: usize) -> Result<String, serde_json::Error> {
    let list = ListOutput {
        tasks: output,
        total,
        has_more: total > output.len(),
    };
    serde_json::to_string_pretty(&list)
}

/// Formats list output as a table, one section per group when grouped.
pub fn format_tasks_table(
    output: &FilterOutput<'_>,
    total: usize,
    context: &FilterContext<'_>,
    now: DateTime<Utc>,
    use_colors: bool,
) -> String {
    if output.is_empty() {
        return "No tasks found.\n".to_string();
    }

    let mut out = String::new();
    match output {
        FilterOutput::List(tasks) => {
            push_header(&mut out, use_colors);
            for task in tasks {
                push_row(&mut out, task, context, now, use_colors);
            }
        }
        FilterOutput::Grouped(groups) => {
            for (i, group) in groups.iter().enumerate() {
                if i > 0 {
                    out.push('\n');
                }
                let title = format!("{} ({})", group.label, group.tasks.len());
                if use_colors {
                    out.push_str(&format!("{}\n", title.bold()));
                } else {
                    out.push_str(&title);
                    out.push('\n');
                }
                push_header(&mut out, use_colors);
                for task in &group.tasks {
                    push_row(&mut out, task, context, now, use_colors);
                }
            }
        }
    }

    if total > output.len() {
        let more = format!(
            "\nShowing {} of {} tasks. Use --all to show everything.\n",
            output.len(),
            total
        );
        if use_colors {
            out.push_str(&more.dimmed().to_string());
        } else {
            out.push_str(&more);
        }
    }

    out
}

fn push_header(out: &mut String, use_colors: bool) {
    let header = format!(
        "{:<id$} {:<pri$} {:<due$} {:<st$} {:<cat$} {:<tags$} {}",
        "ID",
        "Pri",
        "Due",
        "",
        "Category",
        "Tags",
        "Title",
        id = ID_WIDTH,
        pri = PRIORITY_WIDTH,
        due = DUE_WIDTH,
        st = STATUS_WIDTH,
        cat = CATEGORY_WIDTH,
        tags = TAGS_WIDTH,
    );
    if use_colors {
        out.push_str(&format!("{}\n", header.dimmed()));
    } else {
        out.push_str(&header);
        out.push('\n');
    }
}

fn push_row(
    out: &mut String,
    task: &Task,
    context: &FilterContext<'_>,
    now: DateTime<Utc>,
    use_colors: bool,
) {
    let (priority, priority_len) = format_priority(task.priority, use_colors);
    let (due, due_len) = format_due(task, now, use_colors);
    let (status, status_len) = format_status(TaskStatus::of(task, now), use_colors);
    let category = task
        .category_id
        .as_deref()
        .and_then(|id| context.find_category(id))
        .map(|c| truncate_str(&c.name, CATEGORY_WIDTH))
        .unwrap_or_default();

    out.push_str(&format!(
        "{:<id$} {} {} {} {:<cat$} {:<tags$} {}\n",
        truncate_id(&task.id),
        pad(&priority, priority_len, PRIORITY_WIDTH),
        pad(&due, due_len, DUE_WIDTH),
        pad(&status, status_len, STATUS_WIDTH),
        category,
        format_tags(&task.tags, TAGS_WIDTH),
        task.title,
        id = ID_WIDTH,
        cat = CATEGORY_WIDTH,
        tags = TAGS_WIDTH,
    ));
}
