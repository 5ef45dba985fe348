//! List command implementation.
//!
//! Lists tasks from the workspace file, filtered, sorted and optionally
//! grouped by the given criteria.

use chrono::NaiveDate;
use taskwave_query::filter::{
    create_filter_criteria, find_preset, parse_date_bound, FilterContext, FilterCriteria,
    FilterEngine, FilterOutput, TaskGroups,
};
use taskwave_query::{Clock, Workspace};
use tracing::debug;

use super::config::ListConfig;
use super::lookups::{resolve_assignee, resolve_category};
use super::{CommandContext, Result};
use crate::output::{format_tasks_json, format_tasks_table, summarize_criteria};

/// Number of tasks printed when neither `--limit` nor the config sets one.
pub const DEFAULT_LIMIT: u32 = 50;

/// Options for the list command.
#[derive(Debug, Default)]
pub struct ListOptions {
    /// Text search.
    pub search: Option<String>,
    /// Status selector.
    pub status: Option<String>,
    /// Priority selector.
    pub priority: Option<String>,
    /// Category id or name.
    pub category: Option<String>,
    /// Team member id or name, or "unassigned".
    pub assignee: Option<String>,
    /// Date field the range applies to.
    pub date_field: Option<String>,
    /// Range start (YYYY-MM-DD).
    pub from: Option<String>,
    /// Range end (YYYY-MM-DD).
    pub to: Option<String>,
    /// Required tags.
    pub tags: Vec<String>,
    /// Only tasks with attachments.
    pub has_attachments: bool,
    /// Only shared tasks.
    pub shared: bool,
    /// Sort key.
    pub sort: Option<String>,
    /// Sort direction.
    pub order: Option<String>,
    /// Grouping key.
    pub group_by: Option<String>,
    /// Preset used as the base criteria.
    pub preset: Option<String>,
    /// Limit results.
    pub limit: Option<u32>,
    /// Show all tasks (no limit).
    pub all: bool,
}

/// Executes the list command.
///
/// # Arguments
///
/// * `ctx` - Command context with output settings
/// * `opts` - List command options
/// * `workspace` - The loaded workspace
/// * `defaults` - `[list]` section of the config
/// * `engine` - Filter engine (its clock defines "today" and "now")
///
/// # Errors
///
/// Returns an error if an option value is invalid or names an unknown
/// category, team member or preset.
pub fn execute<C: Clock>(
    ctx: &CommandContext,
    opts: &ListOptions,
    workspace: &Workspace,
    defaults: &ListConfig,
    engine: &FilterEngine<C>,
) -> Result<()> {
    if ctx.quiet && !ctx.json_output {
        // Still validate the options so errors surface.
        build_criteria(opts, defaults, &workspace.context(), engine.clock().today())?;
        return Ok(());
    }

    print!("{}", render(ctx, opts, workspace, defaults, engine)?);
    Ok(())
}

/// Runs the query and formats the result.
fn render<C: Clock>(
    ctx: &CommandContext,
    opts: &ListOptions,
    workspace: &Workspace,
    defaults: &ListConfig,
    engine: &FilterEngine<C>,
) -> Result<String> {
    let context = workspace.context();
    let criteria = build_criteria(opts, defaults, &context, engine.clock().today())?;
    debug!(criteria = %summarize_criteria(&criteria), "list criteria");

    let output = engine.apply(&workspace.tasks, &criteria, &context);
    let total = output.len();
    let output = apply_limit(output, resolve_limit(opts, defaults));

    if ctx.json_output {
        Ok(format!("{}\n", format_tasks_json(&output, total)?))
    } else {
        Ok(format_tasks_table(
            &output,
            total,
            &context,
            engine.clock().now(),
            ctx.use_colors,
        ))
    }
}

/// Builds criteria from, in increasing precedence: defaults or a preset,
/// the `[list]` config section, then explicit options.
pub fn build_criteria(
    opts: &ListOptions,
    defaults: &ListConfig,
    context: &FilterContext<'_>,
    today: NaiveDate,
) -> Result<FilterCriteria> {
    let mut criteria = match &opts.preset {
        Some(id) => find_preset(id, today)?.criteria,
        None => create_filter_criteria(),
    };

    if let Some(sort_by) = defaults.sort_by {
        criteria.sort_by = sort_by;
    }
    if let Some(sort_order) = defaults.sort_order {
        criteria.sort_order = sort_order;
    }
    if let Some(group_by) = defaults.group_by {
        criteria.group_by = group_by;
    }

    if let Some(search) = &opts.search {
        criteria.search = search.clone();
    }
    if let Some(status) = &opts.status {
        criteria.status = status.parse()?;
    }
    if let Some(priority) = &opts.priority {
        criteria.priority = priority.parse()?;
    }
    if let Some(category) = &opts.category {
        criteria.category = resolve_category(category, context)?;
    }
    if let Some(assignee) = &opts.assignee {
        criteria.assignee = resolve_assignee(assignee, context)?;
    }
    if let Some(field) = &opts.date_field {
        criteria.date_range.field = field.parse()?;
    }
    if let Some(from) = &opts.from {
        criteria.date_range.start = Some(parse_date_bound(from)?);
    }
    if let Some(to) = &opts.to {
        criteria.date_range.end = Some(parse_date_bound(to)?);
    }
    if !opts.tags.is_empty() {
        criteria.tags = opts.tags.clone();
    }
    if opts.has_attachments {
        criteria.has_attachments = true;
    }
    if opts.shared {
        criteria.is_shared = true;
    }
    if let Some(sort) = &opts.sort {
        criteria.sort_by = sort.parse()?;
    }
    if let Some(order) = &opts.order {
        criteria.sort_order = order.parse()?;
    }
    if let Some(group_by) = &opts.group_by {
        criteria.group_by = group_by.parse()?;
    }

    Ok(criteria)
}

/// Returns the number of tasks to print, or `None` for no limit.
fn resolve_limit(opts: &ListOptions, defaults: &ListConfig) -> Option<usize> {
    if opts.all {
        None
    } else {
        Some(opts.limit.or(defaults.limit).unwrap_or(DEFAULT_LIMIT) as usize)
    }
}

/// Keeps the first `limit` tasks as displayed: earlier groups are kept
/// whole before later groups are cut.
fn apply_limit(output: FilterOutput<'_>, limit: Option<usize>) -> FilterOutput<'_> {
    let Some(limit) = limit else {
        return output;
    };

    match output {
        FilterOutput::List(tasks) => FilterOutput::List(tasks.into_iter().take(limit).collect()),
        FilterOutput::Grouped(groups) => {
            let mut limited = TaskGroups::new();
            let mut remaining = limit;
            for group in groups {
                for task in group.tasks {
                    if remaining == 0 {
                        return FilterOutput::Grouped(limited);
                    }
                    limited.push(&group.label, task);
                    remaining -= 1;
                }
            }
            FilterOutput::Grouped(limited)
        }
    }
}
