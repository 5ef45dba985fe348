//! Presets command implementation.
//!
//! Lists the built-in filter presets, evaluated for today.

use taskwave_query::{Clock, FilterEngine};

use super::{CommandContext, Result};
use crate::output::{format_presets_json, format_presets_table};

/// Executes the presets command.
pub fn execute<C: Clock>(ctx: &CommandContext, engine: &FilterEngine<C>) -> Result<()> {
    let presets = engine.presets();

    if ctx.json_output {
        println!("{}", format_presets_json(&presets)?);
    } else if !ctx.quiet {
        print!("{}", format_presets_table(&presets, ctx.use_colors));
    }

    Ok(())
}
