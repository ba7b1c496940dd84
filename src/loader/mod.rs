//! Result document discovery and loading.
//!
//! Each language's test runners write one JSON summary into a shared
//! results directory. This module finds those files and parses them.

use crate::error::ReportError;
use crate::models::{ResultDocument, ResultSet};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};
use walkdir::WalkDir;

/// File extension of result documents.
const RESULT_EXTENSION: &str = "json";

/// Language identifier for a result file: its name up to the first dot.
pub fn language_of(path: &Path) -> Option<String> {
    let name = path.file_name()?.to_str()?;
    let language = name.split('.').next().unwrap_or("");

    if language.is_empty() {
        None
    } else {
        Some(language.to_string())
    }
}

/// Check whether a path looks like a result document.
fn is_result_file(path: &Path) -> bool {
    path.extension().and_then(|e| e.to_str()) == Some(RESULT_EXTENSION)
}

/// List the result files directly inside `dir`, sorted by path.
pub fn discover(dir: &Path) -> Result<Vec<PathBuf>, ReportError> {
    if !dir.is_dir() {
        return Err(ReportError::ResultsDirMissing(dir.to_path_buf()));
    }

    let mut files = Vec::new();

    for entry in WalkDir::new(dir).min_depth(1).max_depth(1) {
        let entry = match entry {
            Ok(e) => e,
            Err(e) => {
                debug!("Cannot read entry in {}: {}", dir.display(), e);
                continue;
            }
        };

        if entry.file_type().is_file() && is_result_file(entry.path()) {
            files.push(entry.into_path());
        }
    }

    files.sort();
    Ok(files)
}

/// Parse one result document.
///
/// The root must be a JSON object; its `test_suites` and `totals` keys are
/// optional.
pub fn parse_document(path: &Path, content: &str) -> Result<ResultDocument, ReportError> {
    let malformed = |reason: String| ReportError::MalformedDocument {
        path: path.to_path_buf(),
        reason,
    };

    let value: serde_json::Value =
        serde_json::from_str(content).map_err(|e| malformed(e.to_string()))?;

    if !value.is_object() {
        return Err(malformed("expected a JSON object at the root".to_string()));
    }

    serde_json::from_value(value).map_err(|e| malformed(e.to_string()))
}

/// Load every result document in a directory, keyed by language.
pub fn load_results(dir: &Path) -> Result<ResultSet, ReportError> {
    let mut results = ResultSet::new();

    for path in discover(dir)? {
        let Some(language) = language_of(&path) else {
            warn!("Skipping result file without a language name: {}", path.display());
            continue;
        };

        let content = fs::read_to_string(&path).map_err(|e| ReportError::io(&path, e))?;
        let document = parse_document(&path, &content)?;

        debug!(
            "Loaded {} ({} suites, {} engine totals)",
            path.display(),
            document.test_suites.len(),
            document.totals.len()
        );

        if results.insert(language.clone(), document).is_some() {
            warn!(
                "Multiple result files for '{}', keeping {}",
                language,
                path.display()
            );
        }
    }

    info!(
        "Loaded results for {} languages from {}",
        results.len(),
        dir.display()
    );

    Ok(results)
}
