//! Resolving category and team member names given on the command line.

use strsim::levenshtein;
use taskwave_query::filter::{AssigneeFilter, FilterContext, Selector};

use super::{CommandError, Result};

/// Maximum Levenshtein distance for a name to be offered as a suggestion.
const MAX_SUGGESTION_DISTANCE: usize = 3;

/// Wire value accepted for "no constraint".
const ANY: &str = "all";

/// Formats the "not found" error message, optionally including a suggestion.
pub(crate) fn format_not_found_error(
    resource_type: &str,
    identifier: &str,
    suggestion: Option<&str>,
) -> String {
    let base = format!("{} '{}' not found.", resource_type, identifier);
    match suggestion {
        Some(s) => format!("{} Did you mean '{}'?", base, s),
        None => base,
    }
}

/// Finds the best matching name from a list of candidates using Levenshtein distance.
///
/// Returns the best match if its edit distance is within the threshold,
/// otherwise returns `None`.
pub(crate) fn find_similar_name<'a>(
    query: &str,
    candidates: impl Iterator<Item = &'a str>,
) -> Option<String> {
    let query_lower = query.to_lowercase();

    let (best_match, best_distance) = candidates
        .filter(|name| !name.is_empty())
        .map(|name| {
            let distance = levenshtein(&query_lower, &name.to_lowercase());
            (name.to_string(), distance)
        })
        .min_by_key(|(_, d)| *d)?;

    if best_distance > 0 && best_distance <= MAX_SUGGESTION_DISTANCE {
        Some(best_match)
    } else {
        None
    }
}

/// Resolves `--category`: `all`, a category id, or a category name (case-insensitive).
pub(crate) fn resolve_category(query: &str, context: &FilterContext<'_>) -> Result<Selector<String>> {
    if query.eq_ignore_ascii_case(ANY) {
        return Ok(Selector::Any);
    }

    match context.find_category_by_id_or_name(query) {
        Some(category) => Ok(Selector::Only(category.id.clone())),
        None => Err(CommandError::NotFound {
            resource_type: "Category",
            identifier: query.to_string(),
            suggestion: find_similar_name(query, context.categories().iter().map(|c| c.name.as_str())),
        }),
    }
}

/// Resolves `--assignee`: `all`, `unassigned`, a member id, or a member name (case-insensitive).
pub(crate) fn resolve_assignee(query: &str, context: &FilterContext<'_>) -> Result<AssigneeFilter> {
    if let Ok(filter @ (AssigneeFilter::All | AssigneeFilter::Unassigned)) = query.parse() {
        return Ok(filter);
    }

    match context.find_member_by_id_or_name(query) {
        Some(member) => Ok(AssigneeFilter::Member(member.id.clone())),
        None => Err(CommandError::NotFound {
            resource_type: "Team member",
            identifier: query.to_string(),
            suggestion: find_similar_name(
                query,
                context.team_members().iter().map(|m| m.name.as_str()),
            ),
        }),
    }
}
