//! Output formatting utilities for the tw CLI.
//!
//! This module provides functions for formatting data as tables or JSON.
//! It is organized into submodules by entity type:
//!
//! - [`tasks`] - Task list output, flat or grouped
//! - [`presets`] - Filter preset catalog
//! - [`stats`] - Task statistics
//! - [`helpers`] - Common formatting utilities (truncation, priority, due dates)

pub mod helpers;
mod presets;
mod stats;
mod tasks;

pub use presets::{format_presets_json, format_presets_table, summarize_criteria};
pub use stats::{format_stats_json, format_stats_table};
pub use tasks::{format_tasks_json, format_tasks_table};
