//! Preset output formatting.

use owo_colors::OwoColorize;
use serde::Serialize;
use taskwave_query::filter::{AssigneeFilter, FilterCriteria, FilterPreset, StatusFilter};

/// JSON output structure for a preset.
#[derive(Serialize)]
pub struct PresetOutput<'a> {
    pub id: &'a str,
    pub name: &'a str,
    pub criteria: &'a FilterCriteria,
}

/// Formats presets as JSON.
pub fn format_presets_json(presets: &[FilterPreset]) -> Result<String, serde_json::Error> {
    let output: Vec<PresetOutput> = presets
        .iter()
        .map(|p| PresetOutput {
            id: p.id,
            name: p.name,
            criteria: &p.criteria,
        })
        .collect();
    serde_json::to_string_pretty(&output)
}

/// Formats presets as a table.
pub fn format_presets_table(presets: &[FilterPreset], use_colors: bool) -> String {
    let mut output = String::new();

    let header = format!("{:<16} {:<16} {}", "ID", "Name", "Criteria");
    if use_colors {
        output.push_str(&format!("{}\n", header.dimmed()));
    } else {
        output.push_str(&header);
        output.push('\n');
    }

    for preset in presets {
        output.push_str(&format!(
            "{:<16} {:<16} {}\n",
            preset.id,
            preset.name,
            summarize_criteria(&preset.criteria)
        ));
    }

    output
}

/// One-line description of the constraints a criteria value applies.
pub fn summarize_criteria(criteria: &FilterCriteria) -> String {
    let mut parts = Vec::new();

    if !criteria.search.is_empty() {
        parts.push(format!("search \"{}\"", criteria.search));
    }
    if criteria.status != StatusFilter::All {
        parts.push(format!("status {}", criteria.status));
    }
    if let Some(priority) = criteria.priority.value() {
        parts.push(format!("priority {priority}"));
    }
    if let Some(category) = criteria.category.value() {
        parts.push(format!("category {category}"));
    }
    if criteria.assignee != AssigneeFilter::All {
        parts.push(format!("assignee {}", criteria.assignee));
    }
    let range = &criteria.date_range;
    if range.is_active() {
        let bound = |d: Option<chrono::NaiveDate>| d.map_or_else(|| "..".to_string(), |d| d.to_string());
        if range.start == range.end {
            parts.push(format!("{} on {}", range.field, bound(range.start)));
        } else {
            parts.push(format!("{} {} to {}", range.field, bound(range.start), bound(range.end)));
        }
    }
    if !criteria.tags.is_empty() {
        parts.push(format!("tags {}", criteria.tags.join(",")));
    }
    if criteria.has_attachments {
        parts.push("has attachments".to_string());
    }
    if criteria.is_shared {
        parts.push("shared".to_string());
    }

    if parts.is_empty() {
        "everything".to_string()
    } else {
        parts.join(", ")
    }
}
