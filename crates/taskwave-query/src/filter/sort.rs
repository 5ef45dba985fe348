//! Task ordering.

use std::cmp::Ordering;

use super::criteria::{SortKey, SortOrder};
use crate::models::Task;

/// Compares two tasks by `key` in ascending order.
///
/// Missing values map to fixed sentinels: no due date sorts after every real
/// date, no priority ranks 0, no category compares as the empty string.
pub fn compare(a: &Task, b: &Task, key: SortKey) -> Ordering {
    match key {
        SortKey::Title => a.title.to_lowercase().cmp(&b.title.to_lowercase()),
        SortKey::DueDate => match (a.due_date, b.due_date) {
            (None, None) => Ordering::Equal,
            (None, Some(_)) => Ordering::Greater,
            (Some(_), None) => Ordering::Less,
            (Some(a), Some(b)) => a.cmp(&b),
        },
        SortKey::Priority => a.priority_rank().cmp(&b.priority_rank()),
        SortKey::Category => a
            .category_id
            .as_deref()
            .unwrap_or("")
            .cmp(b.category_id.as_deref().unwrap_or("")),
        SortKey::CreatedAt => a.created_at.cmp(&b.created_at),
    }
}

/// Sorts tasks in place. Tasks with equal keys keep their relative order in
/// both directions.
pub fn sort_tasks(tasks: &mut [&Task], key: SortKey, order: SortOrder) {
    // slice::sort_by is stable
    tasks.sort_by(|a, b| {
        let ordering = compare(a, b, key);
        match order {
            SortOrder::Asc => ordering,
            SortOrder::Desc => ordering.reverse(),
        }
    });
}
