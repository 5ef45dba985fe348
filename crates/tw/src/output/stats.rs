//! Statistics output formatting.

use owo_colors::OwoColorize;
use taskwave_query::TaskStats;

/// Formats statistics as JSON.
pub fn format_stats_json(stats: &TaskStats) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(stats)
}

/// Formats statistics as aligned text.
pub fn format_stats_table(stats: &TaskStats, use_colors: bool) -> String {
    let mut output = String::new();

    let header = "Task statistics";
    if use_colors {
        output.push_str(&format!("{}\n\n", header.green().bold()));
    } else {
        output.push_str(&format!("{header}\n\n"));
    }

    let overdue = stats.overdue.to_string();
    let overdue = if use_colors && stats.overdue > 0 {
        overdue.red().to_string()
    } else {
        overdue
    };

    output.push_str(&format!("  Total:      {}\n", stats.total));
    output.push_str(&format!(
        "  Completed:  {} ({}%)\n",
        stats.completed, stats.completion_rate
    ));
    output.push_str(&format!("  Pending:    {}\n", stats.pending));
    output.push_str(&format!("  Overdue:    {}\n", overdue));
    output.push_str("\n  By priority:\n");
    output.push_str(&format!("    high:     {}\n", stats.by_priority.high));
    output.push_str(&format!("    medium:   {}\n", stats.by_priority.medium));
    output.push_str(&format!("    low:      {}\n", stats.by_priority.low));

    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use taskwave_query::PriorityCounts;

    fn sample() -> TaskStats {
        TaskStats {
            total: 4,
            completed: 1,
            pending: 3,
            overdue: 1,
            completion_rate: 25,
            by_priority: PriorityCounts {
                high: 2,
                medium: 0,
                low: 1,
            },
        }
    }

    #[test]
    fn test_stats_table() {
        let table = format_stats_table(&sample(), false);
        assert!(table.starts_with("Task statistics\n"));
        assert!(table.contains("Completed:  1 (25%)"));
        assert!(table.contains("Overdue:    1"));
        assert!(table.contains("high:     2"));
    }

    #[test]
    fn test_stats_json() {
        let json: serde_json::Value = serde_json::from_str(&format_stats_json(&sample()).unwrap()).unwrap();
        assert_eq!(json["completionRate"], 25);
        assert_eq!(json["priorityStats"]["low"], 1);
    }
}
