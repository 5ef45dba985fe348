//! Command implementations for the tw CLI.
//!
//! This module contains the actual command handlers that are invoked by the CLI.

pub mod completions;
pub mod config;
pub mod list;
mod lookups;
pub mod presets;
pub mod stats;

use std::env;

use taskwave_query::filter::FilterError;
use taskwave_query::{StoreError, Workspace, WorkspaceStore};
use tracing::debug;

use crate::cli::Cli;
use config::Config;

/// User id used when neither the flag, the environment nor the config names one.
pub const DEFAULT_USER: &str = "default";

/// Error type for command execution.
#[derive(Debug, thiserror::Error)]
pub enum CommandError {
    /// Invalid filter criteria or argument value.
    #[error("filter error: {0}")]
    Filter(#[from] FilterError),

    /// A category or team member named on the command line does not exist.
    #[error("{}", lookups::format_not_found_error(resource_type, identifier, suggestion.as_deref()))]
    NotFound {
        /// The type of resource that was not found (e.g., "Category").
        resource_type: &'static str,
        /// The name or ID that was searched for.
        identifier: String,
        /// Optional suggestion for similar names.
        suggestion: Option<String>,
    },

    /// Workspace store error.
    #[error("store error: {0}")]
    Store(#[from] StoreError),

    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(String),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization error.
    #[error("serialization error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type for command execution.
pub type Result<T> = std::result::Result<T, CommandError>;

/// Context for command execution, containing common dependencies.
pub struct CommandContext {
    /// Whether to output JSON.
    pub json_output: bool,
    /// Whether to use colors.
    pub use_colors: bool,
    /// Whether to be quiet (errors only).
    pub quiet: bool,
}

impl CommandContext {
    /// Creates a new command context from CLI arguments and the loaded config.
    ///
    /// Colors are on unless `--no-color`, `output.color = false` or `NO_COLOR`
    /// turns them off.
    pub fn from_cli(cli: &Cli, config: &Config) -> Self {
        let use_colors = !cli.no_color
            && config.output.color.unwrap_or(true)
            && env::var_os("NO_COLOR").is_none();
        Self {
            json_output: cli.json,
            use_colors,
            quiet: cli.quiet,
        }
    }
}

/// Resolves the workspace store.
///
/// The file comes from `--file`/`TASKWAVE_FILE`, then `data_file` in the
/// config. Otherwise the store is the default data file of the user named by
/// `--user`/`TASKWAVE_USER`, then `user` in the config, then [`DEFAULT_USER`].
pub fn resolve_store(cli: &Cli, config: &Config) -> Result<WorkspaceStore> {
    if let Some(path) = cli.file.as_ref().or(config.data_file.as_ref()) {
        return Ok(WorkspaceStore::with_path(path.clone()));
    }

    let user = cli
        .user
        .as_deref()
        .or(config.user.as_deref())
        .unwrap_or(DEFAULT_USER);
    Ok(WorkspaceStore::for_user(user)?)
}

/// Loads the workspace, falling back to a fresh one if no file exists yet.
pub async fn load_workspace(cli: &Cli, config: &Config) -> Result<Workspace> {
    let store = resolve_store(cli, config)?;
    debug!(path = %store.path().display(), "resolved workspace file");
    Ok(store.load_or_default_async().await?)
}
