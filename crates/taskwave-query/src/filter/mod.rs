//! Filtering, sorting and grouping of tasks.
//!
//! A [`FilterCriteria`] value describes one view over a task list: text
//! search, status/priority/category/assignee selectors, a date range, required
//! tags, attachment and sharing flags, a sort key and an optional grouping.
//! [`FilterEngine::apply`] turns a task slice plus criteria into either a
//! sorted list or ordered groups.
//!
//! # Stages
//!
//! 1. Search - case-insensitive substring of title, description or any tag
//! 2. Status - `pending`, `completed`, `overdue`
//! 3. Priority - exact match
//! 4. Category - exact id match
//! 5. Assignee - exact id match, or `unassigned`
//! 6. Date range - inclusive day bounds over due/created/completed date
//! 7. Tags - every required tag present
//! 8. Attachments, 9. Shared - non-empty lists
//!
//! Then a stable sort, then optional grouping.
//!
//! # Example
//!
//! ```
//! use taskwave_query::filter::{apply_filters, create_filter_criteria, GroupBy};
//! use taskwave_query::Task;
//!
//! let tasks: Vec<Task> = vec![];
//! let mut criteria = create_filter_criteria();
//! criteria.group_by = GroupBy::Status;
//!
//! let output = apply_filters(&tasks, &criteria, &[], &[]);
//! assert!(output.is_empty());
//! ```

mod criteria;
mod error;
mod evaluator;
mod group;
pub mod presets;
mod sort;

pub use criteria::{
    create_filter_criteria, parse_date_bound, AssigneeFilter, DateField, DateRange,
    FilterCriteria, GroupBy, Selector, SortKey, SortOrder, StatusFilter,
};
pub use error::{FilterError, FilterResult};
pub use evaluator::{apply_filters, FilterContext, FilterEngine, FilterOutput};
pub use group::{
    group_label, group_tasks, TaskGroup, TaskGroups, TaskStatus, ALL_TASKS, NO_PRIORITY,
    UNASSIGNED, UNCATEGORIZED,
};
pub use presets::{find_preset, week_end, week_start, FilterPreset, PRESET_IDS};
pub use sort::{compare, sort_tasks};

use crate::clock::{Clock, SystemClock};

/// The preset catalog for today (UTC).
pub fn list_presets() -> Vec<FilterPreset> {
    presets::presets(SystemClock.today())
}
