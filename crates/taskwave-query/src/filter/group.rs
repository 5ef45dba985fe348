//! Partitioning sorted tasks into labelled groups.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};

use super::criteria::GroupBy;
use super::evaluator::FilterContext;
use crate::models::Task;

/// Label for tasks whose category id resolves to nothing.
pub const UNCATEGORIZED: &str = "Uncategorized";
/// Label for tasks without a priority.
pub const NO_PRIORITY: &str = "No Priority";
/// Label for tasks whose assignee resolves to nothing.
pub const UNASSIGNED: &str = "Unassigned";
/// Label of the single group produced by [`GroupBy::Single`].
pub const ALL_TASKS: &str = "All Tasks";

/// Completion state of a task at a given instant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TaskStatus {
    Completed,
    Overdue,
    Pending,
}

impl TaskStatus {
    /// Classifies a task: completed first, then overdue, otherwise pending.
    pub fn of(task: &Task, now: DateTime<Utc>) -> Self {
        if task.completed {
            TaskStatus::Completed
        } else if task.is_overdue_at(now) {
            TaskStatus::Overdue
        } else {
            TaskStatus::Pending
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            TaskStatus::Completed => "Completed",
            TaskStatus::Overdue => "Overdue",
            TaskStatus::Pending => "Pending",
        }
    }
}

/// Computes the group label of a task.
pub fn group_label<'c>(
    task: &Task,
    group_by: GroupBy,
    context: &FilterContext<'c>,
    now: DateTime<Utc>,
) -> &'c str {
    match group_by {
        GroupBy::Category => task
            .category_id
            .as_deref()
            .and_then(|id| context.find_category(id))
            .map_or(UNCATEGORIZED, |c| c.name.as_str()),
        GroupBy::Priority => task.priority.map_or(NO_PRIORITY, |p| p.label()),
        GroupBy::Assignee => task
            .assigned_to
            .as_deref()
            .and_then(|id| context.find_member(id))
            .map_or(UNASSIGNED, |m| m.name.as_str()),
        GroupBy::Status => TaskStatus::of(task, now).label(),
        GroupBy::None | GroupBy::Single => ALL_TASKS,
    }
}

/// Groups already-sorted tasks, keeping their order within each group.
pub fn group_tasks<'a>(
    tasks: Vec<&'a Task>,
    group_by: GroupBy,
    context: &FilterContext<'_>,
    now: DateTime<Utc>,
) -> TaskGroups<'a> {
    let mut groups = TaskGroups::new();
    for task in tasks {
        groups.push(group_label(task, group_by, context, now), task);
    }
    groups
}

/// One labelled group of tasks.
#[derive(Debug, Clone, PartialEq)]
pub struct TaskGroup<'a> {
    pub label: String,
    pub tasks: Vec<&'a Task>,
}

/// Groups in the order their labels were first seen.
#[derive(Debug, Clone, Default)]
pub struct TaskGroups<'a> {
    groups: Vec<TaskGroup<'a>>,
    index: HashMap<String, usize>,
}

impl<'a> TaskGroups<'a> {
    /// Creates an empty grouping.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a task to the group with `label`, creating the group if needed.
    pub fn push(&mut self, label: &str, task: &'a Task) {
        let slot = match self.index.get(label) {
            Some(&slot) => slot,
            None => {
                self.groups.push(TaskGroup {
                    label: label.to_string(),
                    tasks: Vec::new(),
                });
                self.index.insert(label.to_string(), self.groups.len() - 1);
                self.groups.len() - 1
            }
        };
        self.groups[slot].tasks.push(task);
    }

    /// Returns the tasks under `label`.
    pub fn get(&self, label: &str) -> Option<&[&'a Task]> {
        self.index
            .get(label)
            .map(|&slot| self.groups[slot].tasks.as_slice())
    }

    /// Group labels in insertion order.
    pub fn labels(&self) -> impl Iterator<Item = &str> {
        self.groups.iter().map(|g| g.label.as_str())
    }

    pub fn iter(&self) -> std::slice::Iter<'_, TaskGroup<'a>> {
        self.groups.iter()
    }

    /// Number of groups.
    pub fn len(&self) -> usize {
        self.groups.len()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    /// Total number of tasks across all groups.
    pub fn task_count(&self) -> usize {
        self.groups.iter().map(|g| g.tasks.len()).sum()
    }

    /// Concatenates the groups back into one sequence.
    pub fn into_tasks(self) -> Vec<&'a Task> {
        self.groups.into_iter().flat_map(|g| g.tasks).collect()
    }
}

impl PartialEq for TaskGroups<'_> {
    fn eq(&self, other: &Self) -> bool {
        self.groups == other.groups
    }
}

impl<'a> IntoIterator for TaskGroups<'a> {
    type Item = TaskGroup<'a>;
    type IntoIter = std::vec::IntoIter<TaskGroup<'a>>;

    fn into_iter(self) -> Self::IntoIter {
        self.groups.into_iter()
    }
}

impl<'g, 'a> IntoIterator for &'g TaskGroups<'a> {
    type Item = &'g TaskGroup<'a>;
    type IntoIter = std::slice::Iter<'g, TaskGroup<'a>>;

    fn into_iter(self) -> Self::IntoIter {
        self.groups.iter()
    }
}

/// Serializes as a JSON object keyed by label, in insertion order.
impl Serialize for TaskGroups<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.groups.len()))?;
        for group in &self.groups {
            map.serialize_entry(&group.label, &group.tasks)?;
        }
        map.end()
    }
}
