//! Plain-text report over a batch of evaluations.

use std::fmt::Write;

use secrecy::ExposeSecret;

use crate::classify::AttackScenario;
use crate::evaluator::EvaluationResult;

pub const REPORT_TITLE: &str = "Password Security Assessment";

const HEADERS: [&str; 6] = ["Password", "Score", "Strength", "Crack Time", "Status", "Issues"];
const NO_ISSUES: &str = "No policy violations";

/// Scenario whose crack time is shown in the report.
const REPORTED_SCENARIO: AttackScenario = AttackScenario::OfflineSlowHash;

fn row(result: &EvaluationResult) -> [String; 6] {
    let crack_time = result
        .crack_time(REPORTED_SCENARIO)
        .map(|t| t.display.clone())
        .unwrap_or_default();
    let issues = if result.policy_issues.is_empty() {
        NO_ISSUES.to_string()
    } else {
        result
            .policy_issues
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join(", ")
    };
    [
        result.password.expose_secret().to_string(),
        result.normalized_score().to_string(),
        result.strength().to_string(),
        crack_time,
        if result.valid { "PASS" } else { "FAIL" }.to_string(),
        issues,
    ]
}

/// Renders one row per result under a title and a header line.
///
/// The password column shows the plaintext: only feed this sample or test
/// passwords.
pub fn render_table(results: &[EvaluationResult]) -> String {
    let rows: Vec<[String; 6]> = results.iter().map(row).collect();

    let mut widths = HEADERS.map(|h| h.chars().count());
    for cells in &rows {
        for (width, cell) in widths.iter_mut().zip(cells) {
            *width = (*width).max(cell.chars().count());
        }
    }

    let mut out = String::new();
    let _ = writeln!(out, "{}", REPORT_TITLE);
    write_line(&mut out, &HEADERS.map(String::from), &widths);
    let separator = widths.map(|w| "-".repeat(w));
    write_line(&mut out, &separator, &widths);
    for cells in &rows {
        write_line(&mut out, cells, &widths);
    }
    out
}

fn write_line(out: &mut String, cells: &[String; 6], widths: &[usize; 6]) {
    let line = cells
        .iter()
        .zip(widths)
        .map(|(cell, &width)| format!("{:<width$}", cell, width = width))
        .collect::<Vec<_>>()
        .join(" | ");
    let _ = writeln!(out, "{}", line.trim_end());
}
