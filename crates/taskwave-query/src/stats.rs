//! Aggregate task statistics.

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::models::{Priority, Task};

/// Task counts per priority.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct PriorityCounts {
    pub high: usize,
    pub medium: usize,
    pub low: usize,
}

/// Summary counts over a task list.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskStats {
    pub total: usize,
    pub completed: usize,
    pub pending: usize,
    /// Pending tasks whose due date is before `now`.
    pub overdue: usize,
    /// Completed share in whole percent, rounded; 0 for an empty list.
    pub completion_rate: u8,
    #[serde(rename = "priorityStats")]
    pub by_priority: PriorityCounts,
}

impl TaskStats {
    pub fn compute(tasks: &[Task], now: DateTime<Utc>) -> Self {
        let mut stats = TaskStats {
            total: tasks.len(),
            ..TaskStats::default()
        };

        for task in tasks {
            if task.completed {
                stats.completed += 1;
            } else if task.is_overdue_at(now) {
                stats.overdue += 1;
            }
            match task.priority {
                Some(Priority::High) => stats.by_priority.high += 1,
                Some(Priority::Medium) => stats.by_priority.medium += 1,
                Some(Priority::Low) => stats.by_priority.low += 1,
                None => {}
            }
        }

        stats.pending = stats.total - stats.completed;
        stats.completion_rate = completion_rate(stats.completed, stats.total);
        stats
    }
}

fn completion_rate(completed: usize, total: usize) -> u8 {
    if total == 0 {
        return 0;
    }
    // Integer round-half-up of completed * 100 / total.
    ((completed * 200 + total) / (total * 2)) as u8
}
