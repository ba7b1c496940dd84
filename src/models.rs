//! Data models for the compatibility report.
//!
//! This module contains the per-language result documents read from disk
//! and the aligned table model handed to the renderers.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Pass/total counts for one engine, either for a single suite or in aggregate.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EngineStats {
    /// Number of passing test cases.
    #[serde(default)]
    pub passed: u64,
    /// Number of test cases run.
    #[serde(default)]
    pub total: u64,
}

impl EngineStats {
    #[cfg(test)]
    pub fn new(passed: u64, total: u64) -> Self {
        Self { passed, total }
    }

    /// Success rate as a percentage, 0 when nothing ran.
    pub fn success_rate(&self) -> f64 {
        if self.total > 0 {
            self.passed as f64 / self.total as f64 * 100.0
        } else {
            0.0
        }
    }
}

/// Per-suite results keyed by engine name, in document order.
pub type SuiteResults = IndexMap<String, EngineStats>;

/// All results produced by one language's test runners.
///
/// Keys other than `test_suites` and `totals` (timestamps, interpreter
/// versions) are ignored. Missing keys deserialize as empty maps. Maps keep
/// the key order of the source JSON.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResultDocument {
    /// Suite name -> engine name -> stats.
    #[serde(default)]
    pub test_suites: IndexMap<String, SuiteResults>,
    /// Engine name -> stats summed over all suites.
    #[serde(default)]
    pub totals: IndexMap<String, EngineStats>,
}

impl ResultDocument {
    /// Record one engine's outcome for a suite and fold it into the totals.
    ///
    /// Recording the same suite/engine twice replaces the suite entry but
    /// still accumulates into the totals, matching how the runners append
    /// to an existing document.
    #[cfg(test)]
    pub fn record(&mut self, suite: &str, engine: &str, passed: u64, total: u64) {
        self.test_suites
            .entry(suite.to_string())
            .or_default()
            .insert(engine.to_string(), EngineStats::new(passed, total));

        let totals = self.totals.entry(engine.to_string()).or_default();
        totals.passed += passed;
        totals.total += total;
    }

    /// Look up the stats for an engine within a suite.
    pub fn suite_stats(&self, suite: &str, engine: &str) -> Option<&EngineStats> {
        self.test_suites.get(suite).and_then(|s| s.get(engine))
    }
}

/// Language identifier -> that language's result document, in load order.
pub type ResultSet = IndexMap<String, ResultDocument>;

/// Success classification of a report cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Tier {
    /// Everything passed.
    High,
    /// Some passed.
    Medium,
    /// Nothing passed.
    Low,
    /// No data.
    Na,
}

impl fmt::Display for Tier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Tier::High => write!(f, "high"),
            Tier::Medium => write!(f, "medium"),
            Tier::Low => write!(f, "low"),
            Tier::Na => write!(f, "na"),
        }
    }
}

impl Tier {
    /// CSS class used by the stylesheet for this tier.
    pub fn css_class(&self) -> &'static str {
        match self {
            Tier::High => "success-high",
            Tier::Medium => "success-medium",
            Tier::Low => "success-low",
            Tier::Na => "na",
        }
    }

    /// Returns an emoji representation of the tier.
    pub fn emoji(&self) -> &'static str {
        match self {
            Tier::High => "🟢",
            Tier::Medium => "🟡",
            Tier::Low => "🟠",
            Tier::Na => "⚪",
        }
    }
}

/// A rendered cell: display value plus its tier.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cell {
    pub value: String,
    pub tier: Tier,
}

impl Cell {
    /// The placeholder for missing data.
    pub fn na() -> Self {
        Self {
            value: "N/A".to_string(),
            tier: Tier::Na,
        }
    }

    /// A pass count, right-aligned to three characters.
    pub fn count(passed: u64, tier: Tier) -> Self {
        Self {
            value: format!("{:>3}", passed),
            tier,
        }
    }

    /// A percentage with two decimals, right-aligned to six characters.
    pub fn rate(rate: f64, tier: Tier) -> Self {
        Self {
            value: format!("{:>6.2}%", rate),
            tier,
        }
    }
}

/// A table column: one engine.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Column {
    /// Engine name.
    pub name: String,
    /// Icon class for the owning language, empty when unknown.
    pub icon_hint: String,
}

/// A table row: one test suite.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SuiteRow {
    /// Suite name.
    pub name: String,
    /// Representative number of cases in the suite.
    pub total_cases: u64,
    /// One cell per column, in column order.
    pub cells: Vec<Cell>,
}

/// Two languages claimed the same engine name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EngineConflict {
    pub engine: String,
    /// Language that held the name first.
    pub existing: String,
    /// Language that took it over.
    pub claimed_by: String,
}

impl fmt::Display for EngineConflict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "engine '{}' reported by both '{}' and '{}'",
            self.engine, self.existing, self.claimed_by
        )
    }
}

/// The complete cross-tabulated report.
///
/// `rows[i].cells`, `totals` and `success_rates` are index-aligned with
/// `columns`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SummaryTable {
    pub columns: Vec<Column>,
    pub rows: Vec<SuiteRow>,
    pub totals: Vec<Cell>,
    pub success_rates: Vec<Cell>,
    /// Engine names claimed by more than one language.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub conflicts: Vec<EngineConflict>,
}
