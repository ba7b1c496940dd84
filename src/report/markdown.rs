//! Markdown report generation.

use super::ReportMetadata;
use crate::models::{Cell, SummaryTable};

/// Generate the summary table as a Markdown document.
pub fn generate_markdown_report(table: &SummaryTable, metadata: &ReportMetadata) -> String {
    let mut output = String::new();

    output.push_str(&format!("# {}\n\n", metadata.title));
    output.push_str(&format!(
        "*Generated: {}*\n\n",
        metadata.generated_at.format("%Y-%m-%d %H:%M:%S")
    ));

    if table.columns.is_empty() {
        output.push_str("No test results were found.\n");
        return output;
    }

    // Header
    output.push_str("| Test Suite |");
    for column in &table.columns {
        output.push_str(&format!(" {} |", escape_cell(&column.name)));
    }
    output.push('\n');

    output.push_str("|:---|");
    for _ in &table.columns {
        output.push_str("---:|");
    }
    output.push('\n');

    for row in &table.rows {
        output.push_str(&format!(
            "| {} ({}) |",
            escape_cell(&row.name),
            row.total_cases
        ));
        push_cells(&mut output, &row.cells);
    }

    output.push_str("| **Total** |");
    push_cells(&mut output, &table.totals);
    output.push_str("| **Success Rate** |");
    push_cells(&mut output, &table.success_rates);

    output.push_str("\nLegend: 🟢 all passed | 🟡 partial | 🟠 none passed | ⚪ no data\n");

    output
}

fn push_cells(output: &mut String, cells: &[Cell]) {
    for cell in cells {
        output.push_str(&format!(" {} {} |", cell.tier.emoji(), cell.value.trim()));
    }
    output.push('\n');
}

/// Pipes would split the cell.
fn escape_cell(text: &str) -> String {
    text.replace('|', "\\|")
}
