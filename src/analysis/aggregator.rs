//! Result aggregation into the cross-language summary table.
//!
//! This module pivots the per-language result documents into one dense
//! table: a column per engine (grouped by language), a row per suite, and
//! the totals and success-rate rows.

use crate::error::ReportError;
use crate::models::{
    Cell, Column, EngineConflict, ResultDocument, ResultSet, SuiteRow, SummaryTable, Tier,
};
use std::collections::{BTreeMap, BTreeSet, HashMap};
use tracing::{debug, warn};

/// Devicon classes for the languages the report knows how to decorate.
const LANGUAGE_ICONS: &[(&str, &str)] = &[
    ("go", "devicon-go-original-wordmark"),
    ("python", "devicon-python-plain"),
    ("rust", "devicon-rust-original"),
    ("php", "devicon-php-plain"),
    ("javascript", "devicon-javascript-plain"),
    ("java", "devicon-java-plain"),
    ("csharp", "devicon-csharp-plain"),
    ("ruby", "devicon-ruby-plain"),
];

/// Outcome of registering an engine under a language.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Registration {
    /// The engine now belongs (or already belonged) to this language.
    Registered,
    /// Another language held the name; it has been taken over.
    Conflict { existing: String },
}

/// Engine -> owning language index plus the fixed column order.
#[derive(Debug, Clone, Default)]
pub struct EngineIndex {
    owners: HashMap<String, String>,
    ordered: Vec<String>,
    conflicts: Vec<EngineConflict>,
}

impl EngineIndex {
    /// Assign an engine to a language. The latest registration wins.
    pub fn register(&mut self, engine: &str, language: &str) -> Registration {
        match self
            .owners
            .insert(engine.to_string(), language.to_string())
        {
            Some(existing) if existing != language => {
                self.conflicts.push(EngineConflict {
                    engine: engine.to_string(),
                    existing: existing.clone(),
                    claimed_by: language.to_string(),
                });
                Registration::Conflict { existing }
            }
            _ => Registration::Registered,
        }
    }

    /// Language that owns an engine.
    pub fn language_of(&self, engine: &str) -> Option<&str> {
        self.owners.get(engine).map(String::as_str)
    }

    /// Engines sorted by language, then by name.
    pub fn ordered_engines(&self) -> &[String] {
        &self.ordered
    }

    /// Engine names claimed by more than one language.
    pub fn conflicts(&self) -> &[EngineConflict] {
        &self.conflicts
    }
}

/// Build the engine index and column order from every document's suites.
///
/// Engines are registered in document order, so a name reported by two
/// languages ends up with whichever was loaded last. The column order does
/// not depend on document order: languages ascending, then engines ascending.
pub fn build_engine_index(documents: &ResultSet) -> EngineIndex {
    let mut index = EngineIndex::default();
    let mut engines_by_language: BTreeMap<&str, BTreeSet<&str>> = BTreeMap::new();

    for (language, document) in documents {
        let engines = engines_by_language.entry(language.as_str()).or_default();

        for suite_results in document.test_suites.values() {
            for engine in suite_results.keys() {
                if let Registration::Conflict { existing } = index.register(engine, language) {
                    warn!(
                        "Engine '{}' already reported by '{}', reassigning to '{}'",
                        engine, existing, language
                    );
                }
                engines.insert(engine.as_str());
            }
        }
    }

    for (language, engines) in engines_by_language {
        debug!("Language '{}' reports {} engines", language, engines.len());
        index
            .ordered
            .extend(engines.into_iter().map(str::to_string));
    }

    index
}

/// Icon hint for a language, empty for languages without one.
pub fn icon_hint(language: &str) -> &'static str {
    let language = language.to_lowercase();
    LANGUAGE_ICONS
        .iter()
        .find(|(name, _)| *name == language)
        .map(|(_, icon)| *icon)
        .unwrap_or("")
}

/// Column descriptors in engine order.
pub fn build_columns(index: &EngineIndex) -> Vec<Column> {
    index
        .ordered_engines()
        .iter()
        .map(|engine| Column {
            name: engine.clone(),
            icon_hint: icon_hint(index.language_of(engine).unwrap_or("")).to_string(),
        })
        .collect()
}

/// The first non-zero total reported for a suite, or 0.
///
/// Languages are scanned in document order and each language's engines in
/// the key order of its JSON, not alphabetically.
pub fn representative_total(documents: &ResultSet, suite: &str) -> u64 {
    documents
        .values()
        .filter_map(|document| document.test_suites.get(suite))
        .flat_map(|suite_results| suite_results.values())
        .map(|stats| stats.total)
        .find(|total| *total > 0)
        .unwrap_or(0)
}

/// Union of suite names across all documents, ascending.
pub fn suite_names(documents: &ResultSet) -> BTreeSet<&str> {
    documents
        .values()
        .flat_map(|document| document.test_suites.keys())
        .map(String::as_str)
        .collect()
}

fn owning_document<'a>(
    documents: &'a ResultSet,
    index: &EngineIndex,
    engine: &str,
) -> Option<&'a ResultDocument> {
    index
        .language_of(engine)
        .and_then(|language| documents.get(language))
}

/// One row per suite, with a cell per engine column.
pub fn build_rows(documents: &ResultSet, index: &EngineIndex) -> Vec<SuiteRow> {
    suite_names(documents)
        .into_iter()
        .map(|suite| {
            let total_cases = representative_total(documents, suite);

            let cells = index
                .ordered_engines()
                .iter()
                .map(|engine| {
                    match owning_document(documents, index, engine)
                        .and_then(|document| document.suite_stats(suite, engine))
                    {
                        Some(stats) => {
                            Cell::count(stats.passed, classify(stats.passed, total_cases))
                        }
                        None => Cell::na(),
                    }
                })
                .collect();

            SuiteRow {
                name: suite.to_string(),
                total_cases,
                cells,
            }
        })
        .collect()
}

/// Totals and success-rate cells, one of each per engine column.
///
/// The totals cell is `low` when nothing passed and `medium` otherwise,
/// even at 100%. Only the success-rate cell can reach `high`.
pub fn build_totals(documents: &ResultSet, index: &EngineIndex) -> (Vec<Cell>, Vec<Cell>) {
    index
        .ordered_engines()
        .iter()
        .map(|engine| {
            match owning_document(documents, index, engine)
                .and_then(|document| document.totals.get(engine))
            {
                Some(stats) => {
                    let rate = stats.success_rate();
                    let tier = if stats.passed == 0 {
                        Tier::Low
                    } else {
                        Tier::Medium
                    };
                    (
                        Cell::count(stats.passed, tier),
                        Cell::rate(rate, classify_rate(rate)),
                    )
                }
                None => (Cell::na(), Cell::na()),
            }
        })
        .unzip()
}

/// Classify a pass count against the expected total.
pub fn classify(passed: u64, total: u64) -> Tier {
    if total == 0 {
        return Tier::Na;
    }

    classify_rate(passed as f64 / total as f64 * 100.0)
}

/// Classify a success percentage.
pub fn classify_rate(rate: f64) -> Tier {
    if rate == 100.0 {
        Tier::High
    } else if rate > 0.0 {
        Tier::Medium
    } else {
        Tier::Low
    }
}

/// Build the complete summary table from the loaded documents.
pub fn build_summary_table(documents: &ResultSet) -> SummaryTable {
    let index = build_engine_index(documents);
    let columns = build_columns(&index);
    let rows = build_rows(documents, &index);
    let (totals, success_rates) = build_totals(documents, &index);

    debug!(
        "Built summary table: {} columns, {} rows",
        columns.len(),
        rows.len()
    );

    SummaryTable {
        columns,
        rows,
        totals,
        success_rates,
        conflicts: index.conflicts().to_vec(),
    }
}

/// Fail on the first engine name claimed by two languages.
pub fn ensure_no_conflicts(table: &SummaryTable) -> Result<(), ReportError> {
    match table.conflicts.first() {
        Some(conflict) => Err(ReportError::EngineConflict {
            engine: conflict.engine.clone(),
            existing: conflict.existing.clone(),
            claimed_by: conflict.claimed_by.clone(),
        }),
        None => Ok(()),
    }
}
