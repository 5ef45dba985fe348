//! Named, ready-made filter criteria.

use chrono::{Datelike, Duration, NaiveDate};
use serde::Serialize;

use super::criteria::{DateField, DateRange, FilterCriteria, Selector, StatusFilter};
use super::error::{FilterError, FilterResult};
use crate::models::Priority;

/// A named criteria value offered for one-click selection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FilterPreset {
    pub id: &'static str,
    pub name: &'static str,
    pub criteria: FilterCriteria,
}

/// Ids of the preset catalog, in display order.
pub const PRESET_IDS: [&str; 5] = ["today", "overdue", "high-priority", "this-week", "shared-with-me"];

/// The most recent Sunday at or before `date`.
pub fn week_start(date: NaiveDate) -> NaiveDate {
    date - Duration::days(i64::from(date.weekday().num_days_from_sunday()))
}

/// The Saturday closing the week that contains `date`.
pub fn week_end(date: NaiveDate) -> NaiveDate {
    week_start(date) + Duration::days(6)
}

/// Builds the preset catalog relative to `today`.
pub fn presets(today: NaiveDate) -> Vec<FilterPreset> {
    PRESET_IDS
        .iter()
        .filter_map(|id| build(id, today))
        .collect()
}

/// Looks up one preset by id.
pub fn find_preset(id: &str, today: NaiveDate) -> FilterResult<FilterPreset> {
    build(id, today).ok_or_else(|| FilterError::unknown_preset(id))
}

fn build(id: &str, today: NaiveDate) -> Option<FilterPreset> {
    let preset = match id {
        "today" => FilterPreset {
            id: "today",
            name: "Due Today",
            criteria: FilterCriteria {
                status: StatusFilter::Pending,
                date_range: DateRange::new(Some(today), Some(today), DateField::DueDate),
                ..FilterCriteria::new()
            },
        },
        "overdue" => FilterPreset {
            id: "overdue",
            name: "Overdue Tasks",
            criteria: FilterCriteria {
                status: StatusFilter::Overdue,
                ..FilterCriteria::new()
            },
        },
        "high-priority" => FilterPreset {
            id: "high-priority",
            name: "High Priority",
            criteria: FilterCriteria {
                priority: Selector::Only(Priority::High),
                status: StatusFilter::Pending,
                ..FilterCriteria::new()
            },
        },
        "this-week" => FilterPreset {
            id: "this-week",
            name: "This Week",
            criteria: FilterCriteria {
                date_range: DateRange::new(
                    Some(week_start(today)),
                    Some(week_end(today)),
                    DateField::DueDate,
                ),
                ..FilterCriteria::new()
            },
        },
        "shared-with-me" => FilterPreset {
            id: "shared-with-me",
            name: "Shared with Me",
            criteria: FilterCriteria {
                is_shared: true,
                ..FilterCriteria::new()
            },
        },
        _ => return None,
    };
    Some(preset)
}
