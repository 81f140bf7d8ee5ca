/// Output formatter for reports
///
/// This module handles rendering and exporting reports: pretty JSON for
/// stdout, a colored text view for people, and JSON/CSV file exports.

use std::fs::File;
use std::io::Write;
use std::path::Path;

use anyhow::{Context, Result};
use colored::Colorize;

use crate::core::report::Report;

/// Render a report as pretty-printed JSON with sorted keys.
///
/// # Arguments
///
/// * `report` - The report to render
///
/// # Returns
///
/// JSON text, two-space indented, non-ASCII characters kept as-is
pub fn to_pretty_json(report: &Report) -> Result<String> {
    serde_json::to_string_pretty(report).context("Failed to serialize report")
}

/// Wrap text in a markdown code block
pub fn wrap_markdown(text: &str) -> String {
    let mut output = String::with_capacity(text.len() + 8);
    output.push_str("```\n");
    output.push_str(text);
    if !text.ends_with('\n') {
        output.push('\n');
    }
    output.push_str("```\n");
    output
}

/// Format a report for console output
///
/// # Arguments
///
/// * `report` - The report to format
/// * `limit` - Maximum number of error codes to list
/// * `use_markdown` - Whether to wrap the output in triple backticks
///
/// # Returns
///
/// Formatted string for console output
pub fn format_report(report: &Report, limit: usize, use_markdown: bool) -> String {
    let mut output = String::new();

    if let Some(message) = &report.message {
        output.push_str(&format!("{} {}\n\n", "Status:".bold(), message.green()));
    }

    if !report.top_errors.is_empty() {
        let ranked = report.ranked_errors();
        output.push_str(&format!(
            "{} ({} failures, {} codes)\n",
            "Top Errors".yellow().bold(),
            report.total_failures(),
            ranked.len()
        ));

        for (i, (code, count)) in ranked.iter().take(limit).enumerate() {
            output.push_str(&format!("  {}. {}: {}\n", i + 1, code.red().bold(), count));
        }

        if ranked.len() > limit {
            output.push_str(&format!("  ... {} more\n", ranked.len() - limit));
        }

        output.push('\n');
    }

    if !report.etc.is_empty() {
        output.push_str(&format!("{}\n", "Other Tokens".yellow().bold()));
        for (label, count) in &report.etc {
            output.push_str(&format!("  - {}: {}\n", label.cyan(), count));
        }
        output.push('\n');
    }

    if output.is_empty() {
        output.push_str("No findings detected.\n");
    }

    if use_markdown {
        wrap_markdown(&output)
    } else {
        output
    }
}

/// Export a report to a JSON file
///
/// # Arguments
///
/// * `report` - The report to export
/// * `output_path` - Path where the JSON file will be written
///
/// # Returns
///
/// Result indicating success or failure
pub fn export_report_json(report: &Report, output_path: &Path) -> Result<()> {
    let mut file = File::create(output_path).context(format!(
        "Failed to create JSON output file: {}",
        output_path.display()
    ))?;

    let json = to_pretty_json(report)?;
    writeln!(file, "{}", json).context("Failed to write JSON data")?;

    Ok(())
}

/// Create a CSV report
///
/// One row per tallied entry, error codes first, then residual tokens.
///
/// # Arguments
///
/// * `report` - The report to export
/// * `output_path` - Path where the CSV file will be written
///
/// # Returns
///
/// Result indicating success or failure
pub fn create_csv_report(report: &Report, output_path: &Path) -> Result<()> {
    let file = File::create(output_path).context(format!(
        "Failed to create CSV output file: {}",
        output_path.display()
    ))?;

    let mut writer = csv::Writer::from_writer(file);

    writer
        .write_record(["Category", "Label", "Count"])
        .context("Failed to write CSV header")?;

    let rows = report
        .top_errors
        .iter()
        .map(|entry| ("top_errors", entry))
        .chain(report.etc.iter().map(|entry| ("etc", entry)));

    for (category, (label, count)) in rows {
        let count = count.to_string();
        writer
            .write_record([category, label.as_str(), count.as_str()])
            .context("Failed to write CSV record")?;
    }

    writer.flush().context("Failed to flush CSV writer")?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::aggregator::aggregate;

    #[test]
    fn test_pretty_json_layout() {
        let report = aggregate(&["PASS", "FAIL_err1", "FAIL_err9", "FAIL_err1", "weirdtoken"]);
        let json = to_pretty_json(&report).unwrap();
        let expected = "{\n  \"etc\": {\n    \"weirdtoken\": 1\n  },\n  \"top_errors\": {\n    \"err1\": 2,\n    \"err9\": 1\n  }\n}";
        assert_eq!(json, expected);
    }

    #[test]
    fn test_pretty_json_keeps_non_ascii() {
        let report = aggregate(&["통과"]);
        let json = to_pretty_json(&report).unwrap();
        assert!(json.contains("\"통과\": 1"));
    }

    #[test]
    fn test_format_report_limits_rows() {
        colored::control::set_override(false);
        let report = aggregate(&["FAIL_a", "FAIL_a", "FAIL_b", "FAIL_c"]);
        let text = format_report(&report, 2, false);
        assert!(text.contains("1. a: 2"));
        assert!(text.contains("2. b: 1"));
        assert!(!text.contains("3. c: 1"));
        assert!(text.contains("... 1 more"));
    }

    #[test]
    fn test_format_report_markdown() {
        colored::control::set_override(false);
        let report = aggregate(&["PASS"]);
        let text = format_report(&report, 10, true);
        assert!(text.starts_with("```\n"));
        assert!(text.ends_with("```\n"));
        assert!(text.contains("Status: all PASS"));
    }

    #[test]
    fn test_csv_export() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("report.csv");
        let report = aggregate(&["FAIL_x", "FAIL_", "noise"]);

        create_csv_report(&report, &path).unwrap();

        let csv = std::fs::read_to_string(&path).unwrap();
        let lines: Vec<_> = csv.lines().collect();
        assert_eq!(
            lines,
            vec![
                "Category,Label,Count",
                "top_errors,x,1",
                "etc,UNKNOWN,1",
                "etc,noise,1",
            ]
        );
    }
}
