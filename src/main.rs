//! compat-report - cross-language test-engine compatibility report
//!
//! A CLI tool that reads the per-language JSON result summaries written by
//! the test runners and renders one table of suites against engines.
//!
//! Exit codes:
//!   0 - Success
//!   1 - Error (missing results, malformed document, engine conflict under --strict, I/O)

mod analysis;
mod cli;
mod config;
mod error;
mod loader;
mod models;
mod report;

use anyhow::{Context, Result};
use cli::Args;
use config::{Config, CONFIG_FILE_NAME};
use report::ReportOptions;
use std::path::{Path, PathBuf};
use tracing::{debug, error, info, warn};
use tracing_subscriber::FmtSubscriber;

fn main() -> Result<()> {
    // Parse command-line arguments
    let args = Args::parse_args();

    // Validate arguments
    if let Err(e) = args.validate() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }

    // Handle --init-config early (no logging needed)
    if args.init_config {
        return handle_init_config();
    }

    // Resolve config first; its verbose setting picks the log level
    let (config, source) = match resolve_config(&args) {
        Ok(resolved) => resolved,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            std::process::exit(1);
        }
    };

    // Initialize logging
    init_logging(args.log_level(config.general.verbose));

    info!("compat-report v{}", env!("CARGO_PKG_VERSION"));
    debug!("Arguments: {:?}", args);
    source.log();

    match run_report(&config) {
        Ok(report_path) => {
            println!("Report generated: {}", report_path.display());
            Ok(())
        }
        Err(e) => {
            error!("Report generation failed: {:#}", e);
            eprintln!("Error: {:#}", e);
            std::process::exit(1);
        }
    }
}

/// Handle --init-config: generate a default .compat-report.toml.
fn handle_init_config() -> Result<()> {
    let path = std::path::Path::new(CONFIG_FILE_NAME);

    if path.exists() {
        eprintln!(
            "{} already exists. Remove it first or edit it manually.",
            CONFIG_FILE_NAME
        );
        std::process::exit(1);
    }

    let content = Config::default_toml();
    std::fs::write(path, &content)
        .with_context(|| format!("Failed to write {}", CONFIG_FILE_NAME))?;

    println!("Created {} with default settings.", CONFIG_FILE_NAME);
    Ok(())
}

/// Initialize logging at the given level.
fn init_logging(level: tracing::Level) {
    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false)
        .compact()
        .finish();

    if let Err(e) = tracing::subscriber::set_global_default(subscriber) {
        eprintln!("Failed to set tracing subscriber: {}", e);
    }
}

/// Load, aggregate and write the report. Returns the report path.
fn run_report(config: &Config) -> Result<PathBuf> {
    let results_dir = &config.general.results_dir;
    let documents = loader::load_results(results_dir)
        .with_context(|| format!("Failed to load results from {}", results_dir.display()))?;

    if documents.is_empty() {
        warn!("No result files found in {}", results_dir.display());
    }

    let table = analysis::build_summary_table(&documents);

    for conflict in &table.conflicts {
        warn!("Engine name collision: {}", conflict);
    }
    if config.general.strict {
        analysis::ensure_no_conflicts(&table)?;
    }

    info!(
        "Summary: {} engines across {} suites",
        table.columns.len(),
        table.rows.len()
    );

    let options = ReportOptions {
        output_dir: config.general.output_dir.clone(),
        format: config.report.format,
        title: config.report.title.clone(),
        stylesheet: config.report.stylesheet.clone(),
    };

    report::write_report(&table, &options)
}

/// Where the configuration came from, logged once logging is up.
#[derive(Debug)]
enum ConfigSource {
    Explicit(PathBuf),
    Default,
    Builtin,
    Invalid(String),
}

impl ConfigSource {
    fn log(&self) {
        match self {
            ConfigSource::Explicit(path) => info!("Loaded config from: {}", path.display()),
            ConfigSource::Default => info!("Loaded default config from {}", CONFIG_FILE_NAME),
            ConfigSource::Builtin => debug!("No config file found, using defaults"),
            ConfigSource::Invalid(e) => warn!("Failed to load config: {}", e),
        }
    }
}

/// Load configuration from file or use defaults, then apply the arguments.
fn resolve_config(args: &Args) -> Result<(Config, ConfigSource)> {
    let (mut config, source) = load_config(args.config.as_deref())?;
    config.merge_with_args(args);
    Ok((config, source))
}

fn load_config(explicit: Option<&Path>) -> Result<(Config, ConfigSource)> {
    // Try explicit config path
    if let Some(config_path) = explicit {
        let config = Config::load(config_path)?;
        return Ok((config, ConfigSource::Explicit(config_path.to_path_buf())));
    }

    // Try default location
    match Config::load_default() {
        Ok(Some(config)) => Ok((config, ConfigSource::Default)),
        Ok(None) => Ok((Config::default(), ConfigSource::Builtin)),
        Err(e) => Ok((Config::default(), ConfigSource::Invalid(format!("{:#}", e)))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;
    use std::fs;
    use tempfile::TempDir;

    const GO_RESULTS: &str = r#"{
        "test_suites": { "math": { "goengine": {"passed": 8, "total": 10} } },
        "totals": { "goengine": {"passed": 8, "total": 10} }
    }"#;

    const PYTHON_RESULTS: &str = r#"{
        "test_suites": {
            "math": { "pyengine": {"passed": 10, "total": 10} },
            "strings": { "pyengine": {"passed": 2, "total": 4} }
        },
        "totals": { "pyengine": {"passed": 12, "total": 14} }
    }"#;

    fn write_results(dir: &Path, files: &[(&str, &str)]) -> PathBuf {
        let results = dir.join("results");
        fs::create_dir(&results).unwrap();
        for (name, content) in files {
            fs::write(results.join(name), content).unwrap();
        }
        results
    }

    fn run(args: &Args) -> Result<PathBuf> {
        let (config, _) = resolve_config(args)?;
        run_report(&config)
    }

    fn args_for(dir: &Path, extra: &[&str]) -> Args {
        args_with_config(dir, "", extra)
    }

    fn args_with_config(dir: &Path, config_toml: &str, extra: &[&str]) -> Args {
        let results = dir.join("results");
        let output = dir.join("docs");
        let config = dir.join("config.toml");
        fs::write(&config, config_toml).unwrap();

        let mut argv = vec![
            "compat-report".to_string(),
            "--results".to_string(),
            results.display().to_string(),
            "--output-dir".to_string(),
            output.display().to_string(),
            "--config".to_string(),
            config.display().to_string(),
        ];
        argv.extend(extra.iter().map(|s| s.to_string()));
        Args::parse_from(argv)
    }

    #[test]
    fn test_run_report_end_to_end() {
        let dir = TempDir::new().unwrap();
        write_results(
            dir.path(),
            &[("go.json", GO_RESULTS), ("python.json", PYTHON_RESULTS)],
        );

        let path = run(&args_for(dir.path(), &[])).unwrap();

        assert_eq!(path, dir.path().join("docs").join("index.html"));
        let html = fs::read_to_string(&path).unwrap();
        assert!(html.contains("goengine"));
        assert!(html.contains("pyengine"));
        assert!(html.contains("<td class=\"na\">N/A</td>"));
        assert!(dir.path().join("docs").join("styles.css").exists());
    }

    #[test]
    fn test_run_report_strict_conflict() {
        let dir = TempDir::new().unwrap();
        let shared = r#"{ "test_suites": { "math": { "json_logic": {"passed": 1, "total": 1} } } }"#;
        write_results(dir.path(), &[("python.json", shared), ("ruby.json", shared)]);

        assert!(run(&args_for(dir.path(), &[])).is_ok());

        let err = run(&args_for(dir.path(), &["--strict"])).unwrap_err();
        assert!(format!("{:#}", err).contains("json_logic"));
    }

    #[test]
    fn test_run_report_missing_results() {
        let dir = TempDir::new().unwrap();
        assert!(run(&args_for(dir.path(), &[])).is_err());
    }

    #[test]
    fn test_config_verbose_sets_debug_level() {
        let dir = TempDir::new().unwrap();

        let args = args_with_config(dir.path(), "[general]\nverbose = true\n", &[]);
        let (config, source) = resolve_config(&args).unwrap();
        assert!(config.general.verbose);
        assert!(matches!(source, ConfigSource::Explicit(_)));
        assert_eq!(args.log_level(config.general.verbose), tracing::Level::DEBUG);

        let args = args_with_config(dir.path(), "[general]\nverbose = true\n", &["--quiet"]);
        let (config, _) = resolve_config(&args).unwrap();
        assert_eq!(args.log_level(config.general.verbose), tracing::Level::ERROR);

        let args = args_for(dir.path(), &[]);
        let (config, _) = resolve_config(&args).unwrap();
        assert_eq!(args.log_level(config.general.verbose), tracing::Level::INFO);
    }

    #[test]
    fn test_missing_explicit_config_fails() {
        let dir = TempDir::new().unwrap();
        let mut args = args_for(dir.path(), &[]);
        args.config = Some(dir.path().join("missing.toml"));
        assert!(resolve_config(&args).is_err());
    }
}
