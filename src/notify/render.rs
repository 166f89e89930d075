//! Rendering findings and reports into message cards.

use std::fmt::Write as _;

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

use super::card::{Fact, MessageCard, THEME_ALERT, THEME_OK};
use crate::compat::{CheckStatus, CompatibilityReport};
use crate::resources::ResourceSnapshot;

/// How a compatibility report is laid out in the card.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum ReportStyle {
    /// One fact per finding.
    #[default]
    Facts,
    /// Markdown table with one row per requirement.
    Table,
}

/// Render a compatibility report.
pub fn compatibility_card(report: &CompatibilityReport, style: ReportStyle) -> MessageCard {
    let findings = report.findings();

    if findings.is_empty() {
        return MessageCard::new(THEME_OK, "Package Compatibility Report").with_text(
            format!("Environment {}:", report.environment),
            "No incompatibilities found.",
        );
    }

    let card = MessageCard::new(THEME_ALERT, "Package Compatibility Alert");
    match style {
        ReportStyle::Facts => {
            let facts = findings
                .iter()
                .enumerate()
                .map(|(i, f)| Fact::new(format!("Error {}:", i + 1), f.message.clone()))
                .collect();
            card.with_facts("Incompatibilities Found:", facts)
        }
        ReportStyle::Table => card.with_text("Incompatibilities Found:", report_table(report)),
    }
}

/// Markdown table of every requirement, preceded by the runtime line if any.
pub fn report_table(report: &CompatibilityReport) -> String {
    let mut out = String::new();

    if report.runtime.is_mismatch() {
        let _ = writeln!(
            out,
            "**CRITICAL: Python major version {} is required, but you are using {}.**\n",
            report.runtime.required, report.runtime.actual
        );
    }

    out.push_str("| Package | Installed | Required | Mismatch |\n");
    out.push_str("| ------- | --------- | -------- | -------- |");
    for check in &report.packages {
        let required = if check.constraint.is_empty() {
            "any"
        } else {
            check.constraint.as_str()
        };
        let mismatch = match check.status {
            CheckStatus::Satisfied => "No",
            CheckStatus::Mismatch => "Yes",
            CheckStatus::Missing => "Missing",
        };
        let _ = write!(
            out,
            "\n| {} | {} | {} | {} |",
            check.name,
            check.installed.as_deref().unwrap_or("-"),
            escape_cell(required),
            mismatch
        );
    }
    out
}

/// Pipes inside a cell would split the row.
fn escape_cell(cell: &str) -> String {
    cell.replace('|', "\\|")
}

/// Alert sent when an environment cannot be activated.
pub fn failure_card(env: &str, error: &str) -> MessageCard {
    MessageCard::new(THEME_ALERT, "High-Priority Alert").with_facts(
        "Environment Activation Failed:",
        vec![
            Fact::new("Environment Name:", env),
            Fact::new("Error Message:", error),
        ],
    )
}

/// Single package version report.
pub fn package_version_card(package: &str, version: &str) -> MessageCard {
    let title = format!("Package Version Check: {package}");
    MessageCard::new(THEME_OK, title.clone()).with_text(
        title,
        format!("| Package | Version |\n| ------- | ------- |\n| {package} | {version} |"),
    )
}

/// Host utilization report.
pub fn resource_card(snapshot: &ResourceSnapshot) -> MessageCard {
    let table = format!(
        "| Metric | Usage |\n\
         | ------- | ----- |\n\
         | Machine | {} |\n\
         | CPU | {:.1}% |\n\
         | Memory | {:.1}% |\n\
         | Swap | {:.1}% |",
        snapshot.host_name, snapshot.cpu_percent, snapshot.memory_percent, snapshot.swap_percent
    );
    MessageCard::new(THEME_OK, "System Resource Usage").with_text("System Resource Usage", table)
}
