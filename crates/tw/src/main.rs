use clap::Parser;
use std::process::ExitCode;
use taskwave_query::FilterEngine;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

mod cli;
mod commands;
mod output;

use cli::{Cli, Commands, ConfigCommands};
use commands::config::{load_config, Config};
use commands::list::ListOptions;
use commands::{CommandContext, CommandError};

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(&cli);

    match run(&cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            if cli.json {
                let error_json = serde_json::json!({
                    "error": {
                        "code": error_code(&e),
                        "message": e.to_string(),
                    }
                });
                eprintln!("{error_json:#}");
            } else {
                eprintln!("Error: {e}");
            }
            ExitCode::from(exit_status(&e))
        }
    }
}

/// Installs the stderr log subscriber.
///
/// `RUST_LOG` wins when set; otherwise `--verbose` selects debug, `--quiet`
/// selects error, and the default is warn.
fn init_tracing(cli: &Cli) {
    let default_level = if cli.verbose {
        "debug"
    } else if cli.quiet {
        "error"
    } else {
        "warn"
    };
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr),
        )
        .init();
}

async fn run(cli: &Cli) -> commands::Result<()> {
    // These work even when the config file is broken.
    match &cli.command {
        Some(Commands::Completions { shell }) => {
            return commands::completions::execute(shell).map_err(CommandError::Io);
        }
        Some(Commands::Config {
            command: Some(ConfigCommands::Path),
        }) => {
            let ctx = CommandContext::from_cli(cli, &Config::default());
            return commands::config::execute_path(&ctx);
        }
        _ => {}
    }

    let config = load_config()?;
    let ctx = CommandContext::from_cli(cli, &config);
    let engine = FilterEngine::new();

    match &cli.command {
        Some(Commands::List {
            search,
            status,
            priority,
            category,
            assignee,
            date_field,
            from,
            to,
            tag,
            has_attachments,
            shared,
            sort,
            order,
            group_by,
            preset,
            limit,
            all,
        }) => {
            let opts = ListOptions {
                search: search.clone(),
                status: status.clone(),
                priority: priority.clone(),
                category: category.clone(),
                assignee: assignee.clone(),
                date_field: date_field.clone(),
                from: from.clone(),
                to: to.clone(),
                tags: tag.clone(),
                has_attachments: *has_attachments,
                shared: *shared,
                sort: sort.clone(),
                order: order.clone(),
                group_by: group_by.clone(),
                preset: preset.clone(),
                limit: *limit,
                all: *all,
            };
            let workspace = commands::load_workspace(cli, &config).await?;
            commands::list::execute(&ctx, &opts, &workspace, &config.list, &engine)
        }
        Some(Commands::Presets) => commands::presets::execute(&ctx, &engine),
        Some(Commands::Stats) => {
            let workspace = commands::load_workspace(cli, &config).await?;
            commands::stats::execute(&ctx, &workspace, &engine)
        }
        Some(Commands::Config { .. }) => commands::config::execute_show(&ctx),
        Some(Commands::Completions { .. }) => Ok(()),
        None => {
            if !ctx.quiet {
                println!("tw - TaskWave task queries");
                println!("Use --help for usage information");
            }
            Ok(())
        }
    }
}

/// Returns the error code string for JSON output.
fn error_code(e: &CommandError) -> &'static str {
    match e {
        CommandError::Filter(_) => "FILTER_ERROR",
        CommandError::NotFound { .. } => "NOT_FOUND",
        CommandError::Store(_) => "STORE_ERROR",
        CommandError::Config(_) => "CONFIG_ERROR",
        CommandError::Io(_) => "IO_ERROR",
        CommandError::Json(_) => "JSON_ERROR",
    }
}

/// Returns the process exit status for an error.
fn exit_status(e: &CommandError) -> u8 {
    match e {
        CommandError::Filter(_) | CommandError::NotFound { .. } | CommandError::Json(_) => 1,
        CommandError::Io(_) => 3,
        CommandError::Config(_) | CommandError::Store(_) => 5,
    }
}
