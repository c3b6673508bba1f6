// Human-readable comparison summary.

use crate::runner::ModelSummary;

const RULE_WIDTH: usize = 50;

/// Render the end-of-run summary table. Pure string so the formatting is
/// testable; the caller decides where it goes.
pub fn render(summaries: &[ModelSummary]) -> String {
    let rule = "=".repeat(RULE_WIDTH);
    let mut out = String::new();

    out.push_str(&rule);
    out.push('\n');
    out.push_str("PERFORMANCE COMPARISON\n");
    out.push_str(&rule);
    out.push('\n');

    for summary in summaries {
        out.push('\n');
        out.push_str(&format!("Model: {}\n", summary.model));
        out.push_str(&format!(
            "Successful requests: {}/{}\n",
            summary.successes, summary.attempts
        ));
        match summary.average {
            Some(average) => {
                out.push_str(&format!(
                    "Average response time: {:.2} seconds\n",
                    average.as_secs_f64()
                ));
            }
            None => {
                out.push_str("Average response time: N/A (no successful requests)\n");
            }
        }
    }

    out
}
