//! Text rendering of bundles and validation reports.

use serde_json::Value;
use validatehound_loader::Bundle;
use validatehound_schema::{ValidationReport, ValidationResult};

const NAME_WIDTH: usize = 40;

/// One row per file: name, content kind and element/key count.
pub fn render_summary(bundle: &Bundle) -> String {
    let rule = format!("{:-<60}", "");
    let mut lines = vec![
        format!("{:<NAME_WIDTH$} {:>8} {:>10}", "File", "Kind", "Items"),
        rule.clone(),
    ];

    for file in bundle.files() {
        let count = file
            .item_count()
            .map(|n| n.to_string())
            .unwrap_or_else(|| "-".to_string());
        lines.push(format!(
            "{:<NAME_WIDTH$} {:>8} {:>10}",
            file.name,
            file.kind(),
            count
        ));
    }

    lines.push(rule);
    lines.push(format!("{} JSON files", bundle.len()));
    finish(lines)
}

/// Per-file counts followed by up to `max_errors` example errors per file.
pub fn render_validation(report: &ValidationReport, max_errors: usize) -> String {
    let rule = format!("{:-<80}", "");
    let mut lines = vec![
        format!(
            "{:<NAME_WIDTH$} {:>12} {:>10} {:>10}",
            "File", "Schema", "Valid", "Invalid"
        ),
        rule.clone(),
    ];

    for result in report.results() {
        lines.push(format!(
            "{:<NAME_WIDTH$} {:>12} {:>10} {:>10}",
            result.filename,
            result.schema.as_deref().unwrap_or("-"),
            result.valid_count,
            result.invalid_count
        ));
    }

    lines.push(rule);
    lines.push(format!(
        "Total: {} valid, {} invalid",
        report.total_valid(),
        report.total_invalid()
    ));

    let failing: Vec<&ValidationResult> = report
        .results()
        .iter()
        .filter(|r| !r.errors.is_empty())
        .collect();
    if !failing.is_empty() {
        lines.push(String::new());
        lines.push("Errors:".to_string());
        for result in failing {
            lines.push(format!("  {}:", result.filename));
            for error in result.errors.iter().take(max_errors) {
                lines.push(format!("    - {}", error));
            }
            if result.errors.len() > max_errors {
                lines.push(format!(
                    "    ... and {} more",
                    result.errors.len() - max_errors
                ));
            }
        }
    }

    finish(lines)
}

/// File names available for `inspect`.
pub fn render_file_list(bundle: &Bundle) -> String {
    let mut lines = vec!["Available files:".to_string()];
    for file in bundle.files() {
        match file.item_count() {
            Some(n) => lines.push(format!("  {} ({}, {})", file.name, file.kind(), n)),
            None => lines.push(format!("  {} ({})", file.name, file.kind())),
        }
    }
    finish(lines)
}

/// Pretty-print the first `limit` records of a list, or the whole value
/// otherwise.
pub fn render_samples(name: &str, content: &Value, limit: usize) -> serde_json::Result<String> {
    match content {
        Value::Array(items) => {
            let shown: Vec<&Value> = items.iter().take(limit).collect();
            let body = serde_json::to_string_pretty(&shown)?;
            Ok(format!(
                "{}\n({} of {} records from {})",
                body,
                shown.len(),
                items.len(),
                name
            ))
        }
        other => serde_json::to_string_pretty(other),
    }
}

fn finish(lines: Vec<String>) -> String {
    let mut out = lines.join("\n");
    out.push('\n');
    out
}
