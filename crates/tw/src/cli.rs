//! CLI argument parsing using clap derive macros.
//!
//! This module defines the command-line interface for the tw CLI.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

/// tw - Query TaskWave tasks from the command line
#[derive(Parser, Debug)]
#[command(name = "tw")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Verbose output (show debug information)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Quiet mode (errors only)
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Force JSON output
    #[arg(long, global = true)]
    pub json: bool,

    /// Disable colors in output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// User whose workspace to read (default: from config, or "default")
    #[arg(long, global = true, env = "TASKWAVE_USER")]
    pub user: Option<String>,

    /// Read the workspace from this file instead of the user's data file
    #[arg(long, global = true, env = "TASKWAVE_FILE")]
    pub file: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// List tasks matching filter criteria
    #[command(alias = "l")]
    List {
        /// Case-insensitive text in title, description or tags
        #[arg(short, long)]
        search: Option<String>,

        /// Completion state: all, pending, completed, overdue
        #[arg(long)]
        status: Option<String>,

        /// Priority: all, high, medium, low
        #[arg(short = 'P', long)]
        priority: Option<String>,

        /// Category id or name
        #[arg(short, long)]
        category: Option<String>,

        /// Team member id or name, or "unassigned"
        #[arg(short, long)]
        assignee: Option<String>,

        /// Date the --from/--to range applies to: dueDate, createdAt, completedAt
        #[arg(long)]
        date_field: Option<String>,

        /// First day of the date range (YYYY-MM-DD, inclusive)
        #[arg(long)]
        from: Option<String>,

        /// Last day of the date range (YYYY-MM-DD, inclusive)
        #[arg(long)]
        to: Option<String>,

        /// Required tag (repeatable, all must be present)
        #[arg(short, long, action = clap::ArgAction::Append)]
        tag: Vec<String>,

        /// Only tasks with attachments
        #[arg(long)]
        has_attachments: bool,

        /// Only tasks shared with someone
        #[arg(long)]
        shared: bool,

        /// Sort key: createdAt, dueDate, title, priority, category
        #[arg(long)]
        sort: Option<String>,

        /// Sort direction: asc, desc
        #[arg(long)]
        order: Option<String>,

        /// Grouping: none, category, priority, status, assignee, all
        #[arg(short, long)]
        group_by: Option<String>,

        /// Start from a preset (see `tw presets`); other flags override it
        #[arg(long)]
        preset: Option<String>,

        /// Limit results (default: 50)
        #[arg(long)]
        limit: Option<u32>,

        /// Show all tasks (no limit)
        #[arg(long)]
        all: bool,
    },

    /// List the built-in filter presets
    Presets,

    /// Show task statistics
    Stats,

    /// View configuration
    Config {
        #[command(subcommand)]
        command: Option<ConfigCommands>,
    },

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        shell: Shell,
    },
}

/// Shell types for completions
#[derive(ValueEnum, Clone, Debug)]
pub enum Shell {
    Bash,
    Zsh,
    Fish,
    Powershell,
}

/// Config subcommands
#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Show current configuration
    Show,

    /// Print config file path
    Path,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn verify_cli() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_global_flags() {
        let cli = Cli::parse_from(["tw", "--verbose", "list"]);
        assert!(cli.verbose);
        assert!(!cli.quiet);
        assert!(!cli.json);

        let cli = Cli::parse_from(["tw", "--quiet", "--json", "list"]);
        assert!(!cli.verbose);
        assert!(cli.quiet);
        assert!(cli.json);
    }

    #[test]
    fn test_verbose_conflicts_with_quiet() {
        assert!(Cli::try_parse_from(["tw", "-v", "-q", "list"]).is_err());
    }

    #[test]
    fn test_user_and_file_flags() {
        let cli = Cli::parse_from(["tw", "--user", "alice", "--file", "/tmp/ws.json", "stats"]);
        assert_eq!(cli.user.as_deref(), Some("alice"));
        assert_eq!(cli.file, Some(PathBuf::from("/tmp/ws.json")));
        assert!(matches!(cli.command, Some(Commands::Stats)));
    }

    #[test]
    fn test_list_alias() {
        let cli = Cli::parse_from(["tw", "l"]);
        assert!(matches!(cli.command, Some(Commands::List { .. })));
    }

    #[test]
    fn test_list_filters() {
        let cli = Cli::parse_from([
            "tw", "list", "--search", "report", "--status", "pending", "-P", "high", "--tag", "a",
            "--tag", "b", "--from", "2024-01-01", "--to", "2024-01-31", "--group-by", "status",
            "--shared",
        ]);

        let Some(Commands::List {
            search,
            status,
            priority,
            tag,
            from,
            to,
            group_by,
            shared,
            has_attachments,
            limit,
            all,
            ..
        }) = cli.command
        else {
            panic!("Expected List command");
        };
        assert_eq!(search.as_deref(), Some("report"));
        assert_eq!(status.as_deref(), Some("pending"));
        assert_eq!(priority.as_deref(), Some("high"));
        assert_eq!(tag, vec!["a", "b"]);
        assert_eq!(from.as_deref(), Some("2024-01-01"));
        assert_eq!(to.as_deref(), Some("2024-01-31"));
        assert_eq!(group_by.as_deref(), Some("status"));
        assert!(shared);
        assert!(!has_attachments);
        assert_eq!(limit, None);
        assert!(!all);
    }

    #[test]
    fn test_list_preset_and_limit() {
        let cli = Cli::parse_from(["tw", "list", "--preset", "today", "--limit", "5"]);
        if let Some(Commands::List { preset, limit, .. }) = cli.command {
            assert_eq!(preset.as_deref(), Some("today"));
            assert_eq!(limit, Some(5));
        } else {
            panic!("Expected List command");
        }
    }

    #[test]
    fn test_config_subcommands() {
        let cli = Cli::parse_from(["tw", "config", "path"]);
        assert!(matches!(
            cli.command,
            Some(Commands::Config {
                command: Some(ConfigCommands::Path)
            })
        ));

        let cli = Cli::parse_from(["tw", "config"]);
        assert!(matches!(cli.command, Some(Commands::Config { command: None })));
    }

    #[test]
    fn test_completions_command() {
        let cli = Cli::parse_from(["tw", "completions", "zsh"]);
        if let Some(Commands::Completions { shell }) = cli.command {
            assert!(matches!(shell, Shell::Zsh));
        } else {
            panic!("Expected Completions command");
        }
    }
}
