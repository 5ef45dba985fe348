//! Stats command implementation.
//!
//! Prints completion and priority counts for the workspace.

use taskwave_query::{Clock, FilterEngine, Workspace};

use super::{CommandContext, Result};
use crate::output::{format_stats_json, format_stats_table};

/// Executes the stats command.
pub fn execute<C: Clock>(
    ctx: &CommandContext,
    workspace: &Workspace,
    engine: &FilterEngine<C>,
) -> Result<()> {
    let stats = engine.stats(&workspace.tasks);

    if ctx.json_output {
        println!("{}", format_stats_json(&stats)?);
    } else if !ctx.quiet {
        print!("{}", format_stats_table(&stats, ctx.use_colors));
    }

    Ok(())
}
