/*!
 * Reporting functionality for overview
 *
 * Renders an end-of-run summary of both reporters with the tabled library.
 */

use std::time::Duration;

use tabled::{
    settings::{object::Columns, Alignment, Modify, Padding, Style},
    Table, Tabled,
};

use crate::content::ContentSummary;
use crate::tree::TreeSummary;
use crate::utils::format_number;

/// Everything a run produced
#[derive(Debug, Clone, Default)]
pub struct RunReport {
    /// Time taken by the reporters
    pub duration: Duration,
    /// Content reporter result, if it ran
    pub content: Option<ContentSummary>,
    /// Tree reporter result, if it ran
    pub tree: Option<TreeSummary>,
    /// Whether descriptions were requested
    pub descriptions: bool,
}

#[derive(Tabled)]
struct SummaryRow {
    #[tabled(rename = "Metric")]
    key: String,

    #[tabled(rename = "Value")]
    value: String,
}

impl SummaryRow {
    fn new(key: &str, value: impl Into<String>) -> Self {
        Self {
            key: key.to_string(),
            value: value.into(),
        }
    }
}

/// Report generator for run results
pub struct Reporter;

impl Reporter {
    /// Print the report to stdout
    pub fn print_report(report: &RunReport) {
        println!("\n{}", Self::generate_report(report));
    }

    /// Generate the report text
    pub fn generate_report(report: &RunReport) -> String {
        let mut sections = Vec::new();

        if let Some(content) = &report.content {
            sections.push(format!(
                "📄  PYTHON FILES\n{}",
                render(Self::content_rows(content, report.descriptions))
            ));
        }

        if let Some(tree) = &report.tree {
            sections.push(format!("🌳  DIRECTORY TREE\n{}", render(Self::tree_rows(tree))));
        }

        sections.push(format!(
            "✅  OVERVIEW COMPLETE\n{}",
            render(vec![SummaryRow::new(
                "⏱️ Process Time",
                format!("{:.4?}", report.duration)
            )])
        ));

        sections.join("\n\n")
    }

    fn content_rows(summary: &ContentSummary, descriptions: bool) -> Vec<SummaryRow> {
        let stats = &summary.statistics;
        let mut rows = vec![
            SummaryRow::new("📂 Transcript", summary.paths.text.display().to_string()),
            SummaryRow::new("🗂️ JSON", summary.paths.json.display().to_string()),
            SummaryRow::new("📄 Files Written", format_number(stats.files_written)),
            SummaryRow::new("⚠️ Read Failures", format_number(stats.read_failures)),
        ];

        if descriptions {
            rows.push(SummaryRow::new(
                "📝 Descriptions",
                format!(
                    "{} generated / {} unavailable",
                    format_number(stats.descriptions_generated),
                    format_number(stats.descriptions_failed)
                ),
            ));
            rows.push(SummaryRow::new(
                "📦 LLM Tokens",
                format!(
                    "{} prompt / {} completion / {} total",
                    format_number(stats.usage.prompt_tokens),
                    format_number(stats.usage.completion_tokens),
                    format_number(stats.usage.total_tokens)
                ),
            ));
        }

        rows
    }

    fn tree_rows(summary: &TreeSummary) -> Vec<SummaryRow> {
        let stats = &summary.statistics;
        vec![
            SummaryRow::new("📂 Tree", summary.paths.text.display().to_string()),
            SummaryRow::new("🗂️ JSON", summary.paths.json.display().to_string()),
            SummaryRow::new("📁 Directories", format_number(stats.directories)),
            SummaryRow::new("📄 Entries", format_number(stats.entries)),
            SummaryRow::new("⚠️ Stat Failures", format_number(stats.stat_failures)),
        ]
    }
}

fn render(rows: Vec<SummaryRow>) -> String {
    let mut table = Table::new(rows);
    table
        .with(Style::rounded())
        .with(Padding::new(1, 1, 0, 0))
        .with(Modify::new(Columns::new(..)).with(Alignment::left()));

    table.to_string()
}
