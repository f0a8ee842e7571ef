mod memory;
mod normalize;
mod record;

use anyhow::Result;
use rustc_hash::FxHashMap;

pub use memory::MemoryCorpus;
pub use normalize::{normalize_term, tokenize};
pub use record::{EducationLevel, HistoricalRecord};

/// Boundary contract with the historical-rate corpus. Implementations that
/// wrap a remote store surface their own failures as `anyhow::Error`; callers
/// propagate those unmodified and own any retry policy.
pub trait CorpusStore {
    /// OR of phrases, each phrase an implicit AND of its words with
    /// prefix-matching semantics. A phrase without usable words matches
    /// nothing.
    fn search_by_phrases(&self, phrases: &[String]) -> Result<Vec<HistoricalRecord>>;

    /// Lexeme -> document frequency, restricted to `document frequency >= min_df`.
    fn term_document_frequencies(&self, min_df: u32) -> Result<FxHashMap<String, u32>>;

    /// Per-record lexeme lists, deduplicated within each record.
    fn term_vectors(&self) -> Result<Vec<(u64, Vec<String>)>>;

    /// Mean and sample standard deviation of `current_price`, matching the
    /// SQL-level aggregate a relational store would compute. A set of fewer
    /// than two records has a standard deviation of 0.
    fn price_mean_stddev(&self, records: &[HistoricalRecord]) -> Result<(f64, f64)> {
        Ok(sample_mean_stddev(records.iter().map(|r| r.current_price)))
    }
}

pub fn sample_mean_stddev(values: impl Iterator<Item = f64>) -> (f64, f64) {
    let values: Vec<f64> = values.collect();
    if values.is_empty() {
        return (0.0, 0.0);
    }
    let n = values.len() as f64;
    let mean = values.iter().sum::<f64>() / n;
    if values.len() < 2 {
        return (mean, 0.0);
    }
    let variance = values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / (n - 1.0);
    (mean, variance.sqrt())
}
