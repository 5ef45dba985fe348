//! Task query engine for TaskWave.
//!
//! This crate filters, sorts and groups a user's tasks for list, calendar and
//! reminder views, computes summary statistics, and stores a user's workspace
//! (tasks plus the categories and team members used to label them) on disk.

pub mod clock;
pub mod filter;
pub mod models;
pub mod stats;
mod store;

use serde::{Deserialize, Serialize};

pub use clock::{Clock, FixedClock, SystemClock};
pub use filter::{apply_filters, create_filter_criteria, list_presets, FilterCriteria, FilterEngine};
pub use models::{Attachment, Category, Priority, Task, TeamMember};
pub use stats::{PriorityCounts, TaskStats};
pub use store::{StoreError, WorkspaceStore};

/// One user's task data.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Workspace {
    #[serde(default)]
    pub tasks: Vec<Task>,

    #[serde(default)]
    pub categories: Vec<Category>,

    #[serde(default)]
    pub team_members: Vec<TeamMember>,
}

impl Default for Workspace {
    fn default() -> Self {
        Self::new()
    }
}

impl Workspace {
    /// Creates an empty workspace seeded with the default categories.
    pub fn new() -> Self {
        Self {
            tasks: Vec::new(),
            categories: Category::defaults(),
            team_members: Vec::new(),
        }
    }

    /// Reference data for label resolution.
    pub fn context(&self) -> filter::FilterContext<'_> {
        filter::FilterContext::new(&self.categories, &self.team_members)
    }

    /// Finds a task by id.
    pub fn find_task(&self, id: &str) -> Option<&Task> {
        self.tasks.iter().find(|t| t.id == id)
    }
}
