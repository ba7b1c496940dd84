//! Configuration file handling.
//!
//! This module handles loading and merging configuration from
//! `.compat-report.toml` files.

use crate::report::OutputFormat;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Name of the configuration file looked up in the working directory.
pub const CONFIG_FILE_NAME: &str = ".compat-report.toml";

/// Root configuration structure.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// General settings.
    #[serde(default)]
    pub general: GeneralConfig,

    /// Report settings.
    #[serde(default)]
    pub report: ReportConfig,
}

/// General application settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneralConfig {
    /// Directory holding one `<language>.json` per language.
    #[serde(default = "default_results_dir")]
    pub results_dir: PathBuf,

    /// Directory the report is written to.
    #[serde(default = "default_output_dir")]
    pub output_dir: PathBuf,

    /// Enable verbose logging by default.
    #[serde(default)]
    pub verbose: bool,

    /// Treat engine names reported by two languages as an error.
    #[serde(default)]
    pub strict: bool,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            results_dir: default_results_dir(),
            output_dir: default_output_dir(),
            verbose: false,
            strict: false,
        }
    }
}

fn default_results_dir() -> PathBuf {
    PathBuf::from("results")
}

fn default_output_dir() -> PathBuf {
    PathBuf::from("docs")
}

/// Report generation settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportConfig {
    /// Page and document title.
    #[serde(default = "default_title")]
    pub title: String,

    /// Output format.
    #[serde(default)]
    pub format: OutputFormat,

    /// Custom stylesheet copied next to the HTML report.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stylesheet: Option<PathBuf>,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            title: default_title(),
            format: OutputFormat::default(),
            stylesheet: None,
        }
    }
}

fn default_title() -> String {
    "JSON Logic Compatibility Report".to_string()
}

impl Config {
    /// Load configuration from a file path.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let config: Config = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        Ok(config)
    }

    /// Try to load configuration from the default location.
    ///
    /// Returns `Ok(None)` if the file doesn't exist, `Err` if it exists but can't be parsed.
    pub fn load_default() -> Result<Option<Self>> {
        let default_path = Path::new(CONFIG_FILE_NAME);

        if default_path.exists() {
            Ok(Some(Self::load(default_path)?))
        } else {
            Ok(None)
        }
    }

    /// Merge this configuration with CLI arguments.
    ///
    /// Only values given explicitly on the command line override the file.
    pub fn merge_with_args(&mut self, args: &crate::cli::Args) {
        if let Some(ref results) = args.results {
            self.general.results_dir = results.clone();
        }
        if let Some(ref output_dir) = args.output_dir {
            self.general.output_dir = output_dir.clone();
        }
        if let Some(format) = args.format {
            self.report.format = format;
        }
        if let Some(ref title) = args.title {
            self.report.title = title.clone();
        }
        if let Some(ref stylesheet) = args.stylesheet {
            self.report.stylesheet = Some(stylesheet.clone());
        }

        // Flags always override
        if args.verbose {
            self.general.verbose = true;
        }
        if args.strict {
            self.general.strict = true;
        }
    }

    /// Generate a default configuration file content.
    pub fn default_toml() -> String {
        let config = Config::default();
        toml::to_string_pretty(&config).unwrap_or_else(|_| String::new())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::Args;
    use clap::Parser;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.general.results_dir, PathBuf::from("results"));
        assert_eq!(config.general.output_dir, PathBuf::from("docs"));
        assert_eq!(config.report.format, OutputFormat::Html);
        assert!(!config.general.strict);
    }

    #[test]
    fn test_parse_config() {
        let toml_content = r#"
[general]
results_dir = "../results"
strict = true

[report]
title = "Engines"
format = "markdown"
stylesheet = "templates/styles.css"
"#;

        let config: Config = toml::from_str(toml_content).unwrap();
        assert_eq!(config.general.results_dir, PathBuf::from("../results"));
        assert_eq!(config.general.output_dir, PathBuf::from("docs"));
        assert!(config.general.strict);
        assert_eq!(config.report.title, "Engines");
        assert_eq!(config.report.format, OutputFormat::Markdown);
        assert_eq!(
            config.report.stylesheet,
            Some(PathBuf::from("templates/styles.css"))
        );
    }

    #[test]
    fn test_merge_with_args() {
        let mut config: Config = toml::from_str(
            r#"
[general]
output_dir = "site"

[report]
format = "json"
"#,
        )
        .unwrap();

        let args = Args::parse_from(["compat-report", "--results", "out", "--strict"]);
        config.merge_with_args(&args);

        assert_eq!(config.general.results_dir, PathBuf::from("out"));
        assert_eq!(config.general.output_dir, PathBuf::from("site"));
        assert_eq!(config.report.format, OutputFormat::Json);
        assert!(config.general.strict);

        let args = Args::parse_from(["compat-report", "--format", "html"]);
        config.merge_with_args(&args);
        assert_eq!(config.report.format, OutputFormat::Html);
    }

    #[test]
    fn test_default_toml_generation() {
        let toml_str = Config::default_toml();
        assert!(!toml_str.is_empty());
        assert!(toml_str.contains("[general]"));
        assert!(toml_str.contains("[report]"));

        let parsed: Config = toml::from_str(&toml_str).unwrap();
        assert_eq!(parsed.report.title, default_title());
    }
}
