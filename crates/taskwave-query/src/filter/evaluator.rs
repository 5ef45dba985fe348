//! Applying filter criteria to a task list.
//!
//! [`FilterEngine`] runs the predicate stages in a fixed order (search, status,
//! priority, category, assignee, date range, tags, attachments, sharing),
//! sorts the survivors and optionally groups them. Stages at their disabled
//! value are skipped.
//!
//! # Example
//!
//! ```
//! use chrono::{TimeZone, Utc};
//! use taskwave_query::filter::{FilterContext, FilterCriteria, FilterEngine, StatusFilter};
//! use taskwave_query::{FixedClock, Task};
//!
//! let created = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
//! let mut done = Task::new("2", "Email", created);
//! done.completed = true;
//! let tasks = vec![Task::new("1", "Report", created), done];
//!
//! let engine = FilterEngine::with_clock(FixedClock::new(created));
//! let mut criteria = FilterCriteria::new();
//! criteria.status = StatusFilter::Pending;
//!
//! let output = engine.apply(&tasks, &criteria, &FilterContext::new(&[], &[]));
//! assert_eq!(output.len(), 1);
//! ```

use chrono::{DateTime, Utc};
use serde::{Serialize, Serializer};
use tracing::{debug, trace};

use super::criteria::{AssigneeFilter, FilterCriteria, GroupBy, StatusFilter};
use super::group::{group_tasks, TaskGroups};
use super::presets::{presets, FilterPreset};
use super::sort::sort_tasks;
use crate::clock::{Clock, SystemClock};
use crate::models::{Category, Task, TeamMember};
use crate::stats::TaskStats;

/// Reference data used to resolve display labels while grouping.
#[derive(Debug, Clone, Copy)]
pub struct FilterContext<'a> {
    categories: &'a [Category],
    team_members: &'a [TeamMember],
}

impl<'a> FilterContext<'a> {
    /// Creates a new filter context.
    ///
    /// # Arguments
    ///
    /// * `categories` - All categories of the workspace
    /// * `team_members` - All team members of the workspace
    pub fn new(categories: &'a [Category], team_members: &'a [TeamMember]) -> Self {
        Self {
            categories,
            team_members,
        }
    }

    pub fn categories(&self) -> &'a [Category] {
        self.categories
    }

    pub fn team_members(&self) -> &'a [TeamMember] {
        self.team_members
    }

    /// Finds a category by id.
    pub fn find_category(&self, id: &str) -> Option<&'a Category> {
        self.categories.iter().find(|c| c.id == id)
    }

    /// Finds a category by id, or by name (case-insensitive).
    pub fn find_category_by_id_or_name(&self, query: &str) -> Option<&'a Category> {
        let query_lower = query.to_lowercase();
        self.find_category(query).or_else(|| {
            self.categories
                .iter()
                .find(|c| c.name.to_lowercase() == query_lower)
        })
    }

    /// Finds a team member by id.
    pub fn find_member(&self, id: &str) -> Option<&'a TeamMember> {
        self.team_members.iter().find(|m| m.id == id)
    }

    /// Finds a team member by id, or by name (case-insensitive).
    pub fn find_member_by_id_or_name(&self, query: &str) -> Option<&'a TeamMember> {
        let query_lower = query.to_lowercase();
        self.find_member(query).or_else(|| {
            self.team_members
                .iter()
                .find(|m| m.name.to_lowercase() == query_lower)
        })
    }
}

/// Result of applying criteria: a flat list, or labelled groups when
/// grouping is enabled.
#[derive(Debug, Clone, PartialEq)]
pub enum FilterOutput<'a> {
    List(Vec<&'a Task>),
    Grouped(TaskGroups<'a>),
}

impl<'a> FilterOutput<'a> {
    /// Number of tasks in the output.
    pub fn len(&self) -> usize {
        match self {
            FilterOutput::List(tasks) => tasks.len(),
            FilterOutput::Grouped(groups) => groups.task_count(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns the flat list, if ungrouped.
    pub fn as_list(&self) -> Option<&[&'a Task]> {
        match self {
            FilterOutput::List(tasks) => Some(tasks),
            FilterOutput::Grouped(_) => None,
        }
    }

    /// Returns the groups, if grouped.
    pub fn as_groups(&self) -> Option<&TaskGroups<'a>> {
        match self {
            FilterOutput::List(_) => None,
            FilterOutput::Grouped(groups) => Some(groups),
        }
    }

    /// Flattens the output into one sequence, groups concatenated in order.
    pub fn into_tasks(self) -> Vec<&'a Task> {
        match self {
            FilterOutput::List(tasks) => tasks,
            FilterOutput::Grouped(groups) => groups.into_tasks(),
        }
    }
}

/// Serializes as a JSON array, or an object of arrays when grouped.
impl Serialize for FilterOutput<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            FilterOutput::List(tasks) => tasks.serialize(serializer),
            FilterOutput::Grouped(groups) => groups.serialize(serializer),
        }
    }
}

/// Evaluates filter criteria against tasks.
///
/// The engine holds no state besides its [`Clock`]; one engine can serve any
/// number of views.
#[derive(Debug, Clone, Default)]
pub struct FilterEngine<C = SystemClock> {
    clock: C,
}

impl FilterEngine<SystemClock> {
    /// Creates an engine that reads the system clock.
    pub fn new() -> Self {
        Self { clock: SystemClock }
    }
}

impl<C: Clock> FilterEngine<C> {
    /// Creates an engine with a custom time source.
    pub fn with_clock(clock: C) -> Self {
        Self { clock }
    }

    pub fn clock(&self) -> &C {
        &self.clock
    }

    /// Applies `criteria` to `tasks`.
    ///
    /// The clock is read once, so every stage of one call agrees on "now".
    /// Inputs are never modified.
    pub fn apply<'a>(
        &self,
        tasks: &'a [Task],
        criteria: &FilterCriteria,
        context: &FilterContext<'_>,
    ) -> FilterOutput<'a> {
        let now = self.clock.now();
        let mut matched = filter_tasks(tasks, criteria, now);
        sort_tasks(&mut matched, criteria.sort_by, criteria.sort_order);

        debug!(
            total = tasks.len(),
            matched = matched.len(),
            sort_by = %criteria.sort_by,
            sort_order = %criteria.sort_order,
            group_by = %criteria.group_by,
            "applied filter criteria"
        );

        match criteria.group_by {
            GroupBy::None => FilterOutput::List(matched),
            group_by => FilterOutput::Grouped(group_tasks(matched, group_by, context, now)),
        }
    }

    /// Returns true if a single task passes every predicate stage.
    pub fn matches(&self, task: &Task, criteria: &FilterCriteria) -> bool {
        let now = self.clock.now();
        Stage::ALL
            .iter()
            .all(|stage| !stage.is_active(criteria) || stage.keeps(task, criteria, now))
    }

    /// The preset catalog for the clock's current day.
    pub fn presets(&self) -> Vec<FilterPreset> {
        presets(self.clock.today())
    }

    /// Aggregate statistics at the clock's current time.
    pub fn stats(&self, tasks: &[Task]) -> TaskStats {
        TaskStats::compute(tasks, self.clock.now())
    }
}

/// Applies criteria with the system clock.
///
/// Convenience wrapper over [`FilterEngine::apply`] for callers that hold
/// plain slices of reference data.
pub fn apply_filters<'a>(
    tasks: &'a [Task],
    criteria: &FilterCriteria,
    categories: &[Category],
    team_members: &[TeamMember],
) -> FilterOutput<'a> {
    FilterEngine::new().apply(tasks, criteria, &FilterContext::new(categories, team_members))
}

/// Runs every active predicate stage in order and returns the survivors in
/// input order.
fn filter_tasks<'a>(tasks: &'a [Task], criteria: &FilterCriteria, now: DateTime<Utc>) -> Vec<&'a Task> {
    let mut remaining: Vec<&Task> = tasks.iter().collect();
    if criteria.is_unfiltered() {
        return remaining;
    }

    for stage in Stage::ALL {
        if !stage.is_active(criteria) {
            continue;
        }
        remaining.retain(|task| stage.keeps(task, criteria, now));
        trace!(stage = ?stage, remaining = remaining.len(), "filter stage");
    }

    remaining
}

/// One predicate stage of the pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Stage {
    Search,
    Status,
    Priority,
    Category,
    Assignee,
    DateRange,
    Tags,
    Attachments,
    Shared,
}

impl Stage {
    const ALL: [Stage; 9] = [
        Stage::Search,
        Stage::Status,
        Stage::Priority,
        Stage::Category,
        Stage::Assignee,
        Stage::DateRange,
        Stage::Tags,
        Stage::Attachments,
        Stage::Shared,
    ];

    /// Returns false when the criterion is at its disabled value.
    fn is_active(self, criteria: &FilterCriteria) -> bool {
        match self {
            Stage::Search => !criteria.search.is_empty(),
            Stage::Status => criteria.status != StatusFilter::All,
            Stage::Priority => !criteria.priority.is_any(),
            Stage::Category => !criteria.category.is_any(),
            Stage::Assignee => criteria.assignee != AssigneeFilter::All,
            Stage::DateRange => criteria.date_range.is_active(),
            Stage::Tags => !criteria.tags.is_empty(),
            Stage::Attachments => criteria.has_attachments,
            Stage::Shared => criteria.is_shared,
        }
    }

    fn keeps(self, task: &Task, criteria: &FilterCriteria, now: DateTime<Utc>) -> bool {
        match self {
            Stage::Search => matches_search(task, &criteria.search),
            Stage::Status => match criteria.status {
                StatusFilter::All => true,
                StatusFilter::Completed => task.completed,
                StatusFilter::Pending => !task.completed,
                StatusFilter::Overdue => task.is_overdue_at(now),
            },
            Stage::Priority => criteria.priority.accepts(task.priority.as_ref()),
            Stage::Category => criteria.category.accepts(task.category_id.as_ref()),
            Stage::Assignee => criteria.assignee.accepts(task.assigned_to.as_deref()),
            Stage::DateRange => task
                .date_for(criteria.date_range.field)
                .is_some_and(|at| criteria.date_range.contains(at)),
            Stage::Tags => criteria.tags.iter().all(|tag| task.tags.contains(tag)),
            Stage::Attachments => !task.attachments.is_empty(),
            Stage::Shared => !task.shared_with.is_empty(),
        }
    }
}

/// Case-insensitive substring match over title, description and tags.
fn matches_search(task: &Task, search: &str) -> bool {
    let needle = search.to_lowercase();
    task.title.to_lowercase().contains(&needle)
        || task
            .description
            .as_deref()
            .is_some_and(|d| d.to_lowercase().contains(&needle))
        || task.tags.iter().any(|tag| tag.to_lowercase().contains(&needle))
}

#[cfg(test)]
#[path = "evaluator_tests.rs"]
mod tests;
