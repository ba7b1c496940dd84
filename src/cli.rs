//! Command-line interface argument parsing.
//!
//! This module handles all CLI argument parsing using clap,
//! including validation.

use crate::report::OutputFormat;
use clap::Parser;
use std::path::PathBuf;

/// compat-report - cross-language test-engine compatibility report
///
/// Reads one `<language>.json` result summary per language and renders a
/// single table with a row per test suite and a column per engine.
///
/// Examples:
///   compat-report
///   compat-report --results ../results --output-dir ../docs
///   compat-report --format markdown --strict
///   compat-report --init-config
#[derive(Parser, Debug, Clone)]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Args {
    /// Directory containing the per-language result JSON files
    ///
    /// Defaults to `results` or the value in .compat-report.toml.
    #[arg(short, long, value_name = "DIR")]
    pub results: Option<PathBuf>,

    /// Directory the report is written to
    ///
    /// Defaults to `docs` or the value in .compat-report.toml.
    #[arg(short, long, value_name = "DIR")]
    pub output_dir: Option<PathBuf>,

    /// Output format (html, markdown, json)
    #[arg(short, long, value_name = "FORMAT")]
    pub format: Option<OutputFormat>,

    /// Stylesheet copied next to the HTML report
    ///
    /// If not specified, the bundled stylesheet is written.
    #[arg(long, value_name = "FILE")]
    pub stylesheet: Option<PathBuf>,

    /// Report title
    #[arg(long, value_name = "TEXT")]
    pub title: Option<String>,

    /// Path to configuration file
    ///
    /// If not specified, looks for .compat-report.toml in the current directory
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Fail when two languages report the same engine name
    #[arg(long)]
    pub strict: bool,

    /// Enable verbose logging output
    #[arg(short, long)]
    pub verbose: bool,

    /// Run in quiet mode (minimal output)
    #[arg(short, long)]
    pub quiet: bool,

    /// Generate a default .compat-report.toml configuration file
    #[arg(long)]
    pub init_config: bool,
}

impl Args {
    /// Parse command-line arguments.
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Validate the parsed arguments.
    pub fn validate(&self) -> Result<(), String> {
        // Skip validation for --init-config
        if self.init_config {
            return Ok(());
        }

        // Check for conflicting options
        if self.verbose && self.quiet {
            return Err("Cannot use both --verbose and --quiet".to_string());
        }

        if let Some(ref title) = self.title {
            if title.trim().is_empty() {
                return Err("Title must not be empty".to_string());
            }
        }

        if let Some(ref stylesheet) = self.stylesheet {
            if !stylesheet.is_file() {
                return Err(format!(
                    "Stylesheet does not exist: {}",
                    stylesheet.display()
                ));
            }
        }

        Ok(())
    }

    /// Returns the log level based on verbosity settings.
    ///
    /// `--quiet` wins over `--verbose` and over `verbose = true` in the config.
    pub fn log_level(&self, config_verbose: bool) -> tracing::Level {
        if self.quiet {
            tracing::Level::ERROR
        } else if self.verbose || config_verbose {
            tracing::Level::DEBUG
        } else {
            tracing::Level::INFO
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_args() -> Args {
        Args::parse_from(["compat-report"])
    }

    #[test]
    fn test_defaults() {
        let args = make_args();
        assert!(args.results.is_none());
        assert!(args.format.is_none());
        assert!(!args.strict);
        assert!(args.validate().is_ok());
    }

    #[test]
    fn test_parse_format() {
        let args = Args::parse_from(["compat-report", "--format", "json", "-o", "site"]);
        assert_eq!(args.format, Some(OutputFormat::Json));
        assert_eq!(args.output_dir, Some(PathBuf::from("site")));
    }

    #[test]
    fn test_validation_conflicting_options() {
        let mut args = make_args();
        args.verbose = true;
        args.quiet = true;
        assert!(args.validate().is_err());
    }

    #[test]
    fn test_validation_missing_stylesheet() {
        let mut args = make_args();
        args.stylesheet = Some(PathBuf::from("/nonexistent/styles.css"));
        assert!(args.validate().is_err());
    }

    #[test]
    fn test_validation_empty_title() {
        let mut args = make_args();
        args.title = Some("  ".to_string());
        assert!(args.validate().is_err());
    }

    #[test]
    fn test_log_level() {
        let mut args = make_args();
        assert_eq!(args.log_level(false), tracing::Level::INFO);
        assert_eq!(args.log_level(true), tracing::Level::DEBUG);

        args.verbose = true;
        assert_eq!(args.log_level(false), tracing::Level::DEBUG);

        args.verbose = false;
        args.quiet = true;
        assert_eq!(args.log_level(false), tracing::Level::ERROR);
        assert_eq!(args.log_level(true), tracing::Level::ERROR);
    }
}
