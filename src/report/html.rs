//! HTML report generation.
//!
//! Renders the summary table as a standalone page that links the copied
//! stylesheet and the devicon font for the language icons.

use super::ReportMetadata;
use crate::models::{Cell, Column, SuiteRow, SummaryTable};

const DEVICON_STYLESHEET: &str =
    "https://cdn.jsdelivr.net/gh/devicons/devicon@latest/devicon.min.css";

/// Escape text for use in HTML content and attribute values.
pub fn escape(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

/// Generate a complete HTML report.
pub fn generate_html_report(
    table: &SummaryTable,
    metadata: &ReportMetadata,
    stylesheet: &str,
) -> String {
    let mut output = String::new();

    output.push_str(&generate_head(&metadata.title, stylesheet));
    output.push_str("<body>\n<main>\n");
    output.push_str(&generate_header(metadata));
    output.push_str(&generate_table(table));
    output.push_str("</main>\n</body>\n</html>\n");

    output
}

fn generate_head(title: &str, stylesheet: &str) -> String {
    let mut head = String::new();

    head.push_str("<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n");
    head.push_str("<meta charset=\"utf-8\">\n");
    head.push_str(
        "<meta name=\"viewport\" content=\"width=device-width, initial-scale=1\">\n",
    );
    head.push_str(&format!("<title>{}</title>\n", escape(title)));
    head.push_str(&format!(
        "<link rel=\"stylesheet\" href=\"{}\">\n",
        DEVICON_STYLESHEET
    ));
    head.push_str(&format!(
        "<link rel=\"stylesheet\" href=\"{}\">\n",
        escape(stylesheet)
    ));
    head.push_str("</head>\n");

    head
}

fn generate_header(metadata: &ReportMetadata) -> String {
    format!(
        "<header>\n<h1>{}</h1>\n<p class=\"generated\">Generated: {}</p>\n</header>\n",
        escape(&metadata.title),
        metadata.generated_at.format("%Y-%m-%d %H:%M:%S")
    )
}

fn generate_table(table: &SummaryTable) -> String {
    let mut section = String::new();

    section.push_str("<table class=\"results\">\n<thead>\n<tr>\n");
    section.push_str("<th class=\"suite\">Test Suite</th>\n");
    for column in &table.columns {
        section.push_str(&generate_column_header(column));
    }
    section.push_str("</tr>\n</thead>\n<tbody>\n");

    for row in &table.rows {
        section.push_str(&generate_row(row));
    }

    section.push_str("</tbody>\n<tfoot>\n");
    section.push_str(&generate_summary_row("Total", &table.totals));
    section.push_str(&generate_summary_row("Success Rate", &table.success_rates));
    section.push_str("</tfoot>\n</table>\n");

    section
}

fn generate_column_header(column: &Column) -> String {
    if column.icon_hint.is_empty() {
        format!("<th>{}</th>\n", escape(&column.name))
    } else {
        format!(
            "<th><i class=\"{}\"></i> {}</th>\n",
            escape(&column.icon_hint),
            escape(&column.name)
        )
    }
}

fn generate_row(row: &SuiteRow) -> String {
    let mut tr = String::new();

    tr.push_str("<tr>\n");
    tr.push_str(&format!(
        "<td class=\"suite\">{} <span class=\"total-cases\">({})</span></td>\n",
        escape(&row.name),
        row.total_cases
    ));
    for cell in &row.cells {
        tr.push_str(&generate_cell(cell));
    }
    tr.push_str("</tr>\n");

    tr
}

fn generate_summary_row(label: &str, cells: &[Cell]) -> String {
    let mut tr = String::new();

    tr.push_str("<tr class=\"summary\">\n");
    tr.push_str(&format!("<th class=\"suite\">{}</th>\n", escape(label)));
    for cell in cells {
        tr.push_str(&generate_cell(cell));
    }
    tr.push_str("</tr>\n");

    tr
}

fn generate_cell(cell: &Cell) -> String {
    format!(
        "<td class=\"{}\">{}</td>\n",
        cell.tier.css_class(),
        escape(&cell.value)
    )
}
