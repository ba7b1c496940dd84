//! Report rendering and output.
//!
//! Turns the summary table into HTML, Markdown or JSON and writes it, with
//! the stylesheet for HTML, into the output directory.

pub mod html;
pub mod markdown;

pub use html::generate_html_report;
pub use markdown::generate_markdown_report;

use crate::models::SummaryTable;
use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Stylesheet shipped with the binary, used when none is configured.
pub const DEFAULT_STYLESHEET: &str = include_str!("../../assets/styles.css");

/// File name of the stylesheet next to the HTML report.
pub const STYLESHEET_NAME: &str = "styles.css";

/// Output format for the report.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Standalone HTML page (default)
    #[default]
    Html,
    /// Markdown table
    Markdown,
    /// The table model as JSON
    Json,
}

impl OutputFormat {
    /// File name of the report within the output directory.
    pub fn file_name(&self) -> &'static str {
        match self {
            OutputFormat::Html => "index.html",
            OutputFormat::Markdown => "index.md",
            OutputFormat::Json => "report.json",
        }
    }
}

/// Title and generation time shown alongside the table.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportMetadata {
    pub title: String,
    pub generated_at: DateTime<Utc>,
}

impl ReportMetadata {
    /// Metadata stamped with the current time.
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            generated_at: Utc::now(),
        }
    }
}

/// JSON output: the metadata next to the table model.
#[derive(Serialize)]
struct JsonReport<'a> {
    metadata: &'a ReportMetadata,
    #[serde(flatten)]
    table: &'a SummaryTable,
}

/// Where and how to write the report.
#[derive(Debug, Clone)]
pub struct ReportOptions {
    pub output_dir: PathBuf,
    pub format: OutputFormat,
    pub title: String,
    /// Custom stylesheet to copy; the bundled one is written when `None`.
    pub stylesheet: Option<PathBuf>,
}

/// Generate a JSON report.
pub fn generate_json_report(table: &SummaryTable, metadata: &ReportMetadata) -> Result<String> {
    serde_json::to_string_pretty(&JsonReport { metadata, table }).map_err(Into::into)
}

/// Render the table in the requested format.
pub fn render(
    table: &SummaryTable,
    metadata: &ReportMetadata,
    format: OutputFormat,
) -> Result<String> {
    Ok(match format {
        OutputFormat::Html => generate_html_report(table, metadata, STYLESHEET_NAME),
        OutputFormat::Markdown => generate_markdown_report(table, metadata),
        OutputFormat::Json => generate_json_report(table, metadata)?,
    })
}

/// Place the stylesheet next to the HTML report.
pub fn copy_stylesheet(source: Option<&Path>, output_dir: &Path) -> Result<PathBuf> {
    let dest = output_dir.join(STYLESHEET_NAME);

    match source {
        Some(source) => {
            debug!("Copying stylesheet {} -> {}", source.display(), dest.display());
            fs::copy(source, &dest).with_context(|| {
                format!("Failed to copy stylesheet from {}", source.display())
            })?;
        }
        None => {
            debug!("Writing bundled stylesheet to {}", dest.display());
            fs::write(&dest, DEFAULT_STYLESHEET)
                .with_context(|| format!("Failed to write {}", dest.display()))?;
        }
    }

    Ok(dest)
}

/// Render and write the report. Returns the report path.
pub fn write_report(table: &SummaryTable, options: &ReportOptions) -> Result<PathBuf> {
    fs::create_dir_all(&options.output_dir).with_context(|| {
        format!(
            "Failed to create output directory {}",
            options.output_dir.display()
        )
    })?;

    let metadata = ReportMetadata::new(options.title.clone());
    let content = render(table, &metadata, options.format)?;
    let report_path = options.output_dir.join(options.format.file_name());

    fs::write(&report_path, content)
        .with_context(|| format!("Failed to write report to {}", report_path.display()))?;

    if options.format == OutputFormat::Html {
        copy_stylesheet(options.stylesheet.as_deref(), &options.output_dir)?;
    }

    info!("Wrote {:?} report to {}", options.format, report_path.display());
    Ok(report_path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::build_summary_table;
    use crate::models::{ResultDocument, ResultSet};
    use tempfile::TempDir;

    fn create_test_table() -> SummaryTable {
        let mut php = ResultDocument::default();
        php.record("arithmetic", "jwadhams/json-logic-php", 12, 12);
        let mut documents = ResultSet::new();
        documents.insert("php".to_string(), php);
        build_summary_table(&documents)
    }

    fn options(dir: &Path, format: OutputFormat) -> ReportOptions {
        ReportOptions {
            output_dir: dir.join("docs"),
            format,
            title: "Compatibility".to_string(),
            stylesheet: None,
        }
    }

    #[test]
    fn test_write_html_report_with_bundled_stylesheet() {
        let dir = TempDir::new().unwrap();
        let opts = options(dir.path(), OutputFormat::Html);

        let path = write_report(&create_test_table(), &opts).unwrap();

        assert_eq!(path, opts.output_dir.join("index.html"));
        let html = fs::read_to_string(&path).unwrap();
        assert!(html.contains("jwadhams/json-logic-php"));
        let css = fs::read_to_string(opts.output_dir.join(STYLESHEET_NAME)).unwrap();
        assert_eq!(css, DEFAULT_STYLESHEET);
    }

    #[test]
    fn test_write_html_report_with_custom_stylesheet() {
        let dir = TempDir::new().unwrap();
        let custom = dir.path().join("custom.css");
        fs::write(&custom, "body { color: red; }").unwrap();

        let mut opts = options(dir.path(), OutputFormat::Html);
        opts.stylesheet = Some(custom);

        write_report(&create_test_table(), &opts).unwrap();

        let css = fs::read_to_string(opts.output_dir.join(STYLESHEET_NAME)).unwrap();
        assert_eq!(css, "body { color: red; }");
    }

    #[test]
    fn test_missing_custom_stylesheet_fails() {
        let dir = TempDir::new().unwrap();
        let mut opts = options(dir.path(), OutputFormat::Html);
        opts.stylesheet = Some(dir.path().join("missing.css"));

        assert!(write_report(&create_test_table(), &opts).is_err());
    }

    #[test]
    fn test_write_json_report() {
        let dir = TempDir::new().unwrap();
        let opts = options(dir.path(), OutputFormat::Json);

        let path = write_report(&create_test_table(), &opts).unwrap();

        assert_eq!(path.file_name().unwrap(), "report.json");
        let json = fs::read_to_string(&path).unwrap();
        assert!(json.contains("\"metadata\""));
        assert!(json.contains("\"title\": \"Compatibility\""));
        assert!(json.contains("\"columns\""));
        assert!(json.contains("\"success_rates\""));
        assert!(json.contains("\"tier\": \"high\""));
        assert!(!opts.output_dir.join(STYLESHEET_NAME).exists());
    }

    #[test]
    fn test_render_markdown() {
        let metadata = ReportMetadata::new("Compatibility");

        let markdown = render(&create_test_table(), &metadata, OutputFormat::Markdown).unwrap();
        assert!(markdown.starts_with("# Compatibility"));
    }
}
