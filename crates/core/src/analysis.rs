use std::sync::Mutex;

use rayon::prelude::*;
use rustc_hash::FxHashSet;

use ratecomp_corpus::{CorpusStore, EducationLevel, HistoricalRecord};

use crate::broaden::{Broadener, PartOfSpeechTagger};
use crate::config::AnalysisConfig;
use crate::error::Result;
use crate::finder::{default_finders, ComparableFinder};
use crate::model::{AnalysisResult, ComparablesSummary, ProposedRow};
use crate::stats::{average_experience, most_common_education};
use crate::vocabulary::Vocabulary;

type FutileKey = (String, &'static str, u32, EducationLevel, usize);

/// Remembers (phrase, finder, criteria) combinations that came back with too
/// few comparables, so rows sharing phrases within one batch never re-run a
/// known-dead search. Create one per batch, drop it with the batch.
#[derive(Debug, Default)]
pub struct SearchCache {
    futile: Mutex<FxHashSet<FutileKey>>,
}

impl SearchCache {
    pub fn new() -> Self {
        Self::default()
    }

    fn is_futile(&self, key: &FutileKey) -> bool {
        self.futile.lock().expect("cache lock").contains(key)
    }

    fn mark_futile(&self, key: FutileKey) {
        self.futile.lock().expect("cache lock").insert(key);
    }
}

/// The accepted (phrase, finder) combination and its comparable records.
pub struct FoundComparables {
    pub phrase: String,
    pub records: Vec<HistoricalRecord>,
    pub finder: Box<dyn ComparableFinder>,
}

pub struct Analyzer<S> {
    store: S,
    vocabulary: Vocabulary,
    config: AnalysisConfig,
    tagger: Option<Box<dyn PartOfSpeechTagger>>,
}

impl<S: CorpusStore + Sync> Analyzer<S> {
    pub fn new(store: S, vocabulary: Vocabulary, config: AnalysisConfig) -> Self {
        Self {
            store,
            vocabulary,
            config,
            tagger: None,
        }
    }

    /// Builds the vocabulary from the store with the configured minimum
    /// document frequency.
    pub fn from_store(store: S, config: AnalysisConfig) -> Result<Self> {
        let vocabulary = Vocabulary::from_corpus(&store, config.min_vocabulary_frequency)?;
        Ok(Self::new(store, vocabulary, config))
    }

    pub fn with_tagger(mut self, tagger: Box<dyn PartOfSpeechTagger>) -> Self {
        self.tagger = Some(tagger);
        self
    }

    pub fn vocabulary(&self) -> &Vocabulary {
        &self.vocabulary
    }

    /// Walks broadened phrases (outer) and finder strategies in strictness
    /// order (inner); the first combination with at least `min_count`
    /// comparables wins. Phrases whose every finder is already known futile
    /// are not searched again.
    pub fn find_comparable_contracts(
        &self,
        labor_category: &str,
        min_years_experience: u32,
        education_level: EducationLevel,
        min_count: usize,
        cache: &SearchCache,
    ) -> Result<Option<FoundComparables>> {
        let mut broadener = Broadener::new(&self.vocabulary, self.config.broaden.clone());
        if let Some(tagger) = self.tagger.as_deref() {
            broadener = broadener.with_tagger(tagger);
        }
        for phrase in broadener.broaden(labor_category) {
            let mut finders = default_finders(min_years_experience, education_level);
            let pending: Vec<usize> = (0..finders.len())
                .filter(|&idx| {
                    !cache.is_futile(&(
                        phrase.clone(),
                        finders[idx].name(),
                        min_years_experience,
                        education_level,
                        min_count,
                    ))
                })
                .collect();
            if pending.is_empty() {
                tracing::debug!(phrase = %phrase, "every finder already futile, skipping search");
                continue;
            }
            let candidates = self
                .store
                .search_by_phrases(std::slice::from_ref(&phrase))?;
            for idx in pending {
                let matched = finders[idx].filter(&candidates);
                if matched.len() >= min_count {
                    tracing::debug!(
                        phrase = %phrase,
                        finder = finders[idx].name(),
                        count = matched.len(),
                        "accepted comparable set"
                    );
                    let finder = finders.swap_remove(idx);
                    return Ok(Some(FoundComparables {
                        phrase,
                        records: matched,
                        finder,
                    }));
                }
                cache.mark_futile((
                    phrase.clone(),
                    finders[idx].name(),
                    min_years_experience,
                    education_level,
                    min_count,
                ));
            }
        }
        Ok(None)
    }

    pub fn describe(&self, row: &ProposedRow) -> Result<AnalysisResult> {
        self.describe_with_cache(row, &SearchCache::new())
    }

    pub fn describe_with_cache(
        &self,
        row: &ProposedRow,
        cache: &SearchCache,
    ) -> Result<AnalysisResult> {
        let Some(found) = self.find_comparable_contracts(
            &row.labor_category,
            row.min_years_experience,
            row.education_level,
            self.config.min_comparables,
            cache,
        )?
        else {
            return Ok(AnalysisResult::not_found());
        };
        let (average_price, stddev) = self.store.price_mean_stddev(&found.records)?;
        let price_delta = row.price - average_price;
        let (severe, stddevs_from_average) =
            severity(price_delta.abs(), stddev, self.config.severe_stddevs);
        let mut deep_link_params = vec![("q".to_string(), found.phrase.clone())];
        deep_link_params.extend(
            found
                .finder
                .deep_link_params()
                .into_iter()
                .map(|(key, value)| (key.to_string(), value)),
        );
        Ok(AnalysisResult {
            comparables: Some(ComparablesSummary {
                search_labor_category: found.phrase,
                experience_criteria: found.finder.describe_experience(),
                education_criteria: found.finder.describe_education(),
                count: found.records.len(),
                average_price,
                stddev,
                average_experience: average_experience(&found.records),
                most_common_education: most_common_education(&found.records),
                price_delta,
                stddevs_from_average,
                severe,
                preposition: preposition(price_delta, stddevs_from_average),
                deep_link_params,
            }),
        })
    }

    /// One verdict per input row, in input order. Rows share a single cache
    /// for the lifetime of the batch.
    pub fn analyze_batch(&self, rows: &[ProposedRow]) -> Result<Vec<AnalysisResult>> {
        let cache = SearchCache::new();
        rows.par_iter()
            .map(|row| self.describe_with_cache(row, &cache))
            .collect()
    }
}

/// Severity and whole-stddev distance. A zero standard deviation means every
/// comparable carried the same price: any nonzero gap is off their scale and
/// counts as one whole deviation, while a matching price is not severe.
fn severity(price_delta: f64, stddev: f64, severe_stddevs: f64) -> (bool, u32) {
    if stddev > 0.0 {
        let severe = price_delta >= severe_stddevs * stddev;
        (severe, (price_delta / stddev).ceil() as u32)
    } else if price_delta > 0.0 {
        (true, 1)
    } else {
        (false, 0)
    }
}

fn preposition(price_delta: f64, stddevs: u32) -> String {
    let direction = if price_delta < 0.0 { "below" } else { "above" };
    let mut phrase = "way ".repeat(stddevs.saturating_sub(1) as usize);
    phrase.push_str(direction);
    phrase
}
