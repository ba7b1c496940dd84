//! Error types for loading results and building reports.

use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while loading result documents or building the report.
///
/// Missing suites, engines or totals are never errors; they become `N/A`
/// cells in the table.
#[derive(Debug, Error)]
pub enum ReportError {
    #[error("results directory not found: {}", .0.display())]
    ResultsDirMissing(PathBuf),

    #[error("malformed result document {}: {reason}", path.display())]
    MalformedDocument { path: PathBuf, reason: String },

    #[error("engine '{engine}' is reported by both '{existing}' and '{claimed_by}'")]
    EngineConflict {
        engine: String,
        existing: String,
        claimed_by: String,
    },

    #[error("I/O error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl ReportError {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}
