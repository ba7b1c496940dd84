//! Result analysis.
//!
//! Pivots the per-language result documents into the summary table.

pub mod aggregator;

pub use aggregator::*;
