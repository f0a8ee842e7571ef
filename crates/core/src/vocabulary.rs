use rustc_hash::FxHashMap;

use ratecomp_corpus::{tokenize, CorpusStore};

use crate::error::Result;

/// Term frequency and pairwise co-occurrence over the historical corpus.
/// Read-only after construction.
#[derive(Debug, Clone, Default)]
pub struct Vocabulary {
    frequencies: FxHashMap<String, u32>,
    cooccurrences: FxHashMap<(String, String), u32>,
}

impl Vocabulary {
    /// Build directly from raw labor-category phrases. No frequency
    /// filtering; meant for tests and small corpora.
    pub fn from_documents<I, S>(documents: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut vocabulary = Self::default();
        for document in documents {
            let terms = unique_terms(tokenize(document.as_ref()));
            for term in &terms {
                *vocabulary.frequencies.entry(term.clone()).or_insert(0) += 1;
            }
            vocabulary.fold_pairs(&terms);
        }
        vocabulary
    }

    /// Build from the corpus index. Only terms at or above
    /// `min_document_frequency` are retained, and co-occurrence pairs are
    /// kept only when both terms survive the threshold.
    pub fn from_corpus<S>(store: &S, min_document_frequency: u32) -> Result<Self>
    where
        S: CorpusStore + ?Sized,
    {
        let frequencies = store.term_document_frequencies(min_document_frequency)?;
        let mut vocabulary = Self {
            frequencies,
            cooccurrences: FxHashMap::default(),
        };
        for (_, terms) in store.term_vectors()? {
            let retained: Vec<String> = unique_terms(terms)
                .into_iter()
                .filter(|term| vocabulary.frequencies.contains_key(term))
                .collect();
            vocabulary.fold_pairs(&retained);
        }
        tracing::debug!(
            terms = vocabulary.frequencies.len(),
            pairs = vocabulary.cooccurrences.len(),
            "built vocabulary from corpus index"
        );
        Ok(vocabulary)
    }

    pub fn frequency(&self, term: &str) -> u32 {
        self.frequencies.get(term).copied().unwrap_or(0)
    }

    pub fn cooccurrence(&self, term_a: &str, term_b: &str) -> u32 {
        let key = if term_a <= term_b {
            (term_a.to_string(), term_b.to_string())
        } else {
            (term_b.to_string(), term_a.to_string())
        };
        self.cooccurrences.get(&key).copied().unwrap_or(0)
    }

    pub fn contains(&self, term: &str) -> bool {
        self.frequencies.contains_key(term)
    }

    pub fn len(&self) -> usize {
        self.frequencies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.frequencies.is_empty()
    }

    fn fold_pairs(&mut self, terms: &[String]) {
        for i in 0..terms.len() {
            for j in (i + 1)..terms.len() {
                *self
                    .cooccurrences
                    .entry((terms[i].clone(), terms[j].clone()))
                    .or_insert(0) += 1;
            }
        }
    }
}

/// Sorted and deduplicated, so a term repeated within one document counts
/// once and pair keys come out in canonical order.
fn unique_terms(mut terms: Vec<String>) -> Vec<String> {
    terms.sort();
    terms.dedup();
    terms
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratecomp_corpus::{EducationLevel, HistoricalRecord, MemoryCorpus};

    fn vocabulary() -> Vocabulary {
        Vocabulary::from_documents([
            "Systems Engineer",
            "Senior Systems Engineer",
            "Systems Administrator",
        ])
    }

    #[test]
    fn frequency_counts_documents_not_occurrences() {
        let vocabulary = Vocabulary::from_documents(["Engineer Engineer", "Engineer"]);
        assert_eq!(vocabulary.frequency("engineer"), 2);
    }

    #[test]
    fn cooccurrence_is_symmetric() {
        let vocabulary = vocabulary();
        assert_eq!(vocabulary.cooccurrence("system", "engineer"), 2);
        assert_eq!(
            vocabulary.cooccurrence("engineer", "system"),
            vocabulary.cooccurrence("system", "engineer")
        );
    }

    #[test]
    fn cooccurrence_never_exceeds_either_frequency() {
        let vocabulary = vocabulary();
        let pair = vocabulary.cooccurrence("senior", "system");
        assert!(pair <= vocabulary.frequency("senior"));
        assert!(pair <= vocabulary.frequency("system"));
    }

    #[test]
    fn absent_terms_read_as_zero() {
        let vocabulary = vocabulary();
        assert_eq!(vocabulary.frequency("plumber"), 0);
        assert_eq!(vocabulary.cooccurrence("plumber", "engineer"), 0);
        assert!(!vocabulary.contains("plumber"));
    }

    #[test]
    fn corpus_build_drops_pairs_below_threshold() {
        let store = MemoryCorpus::from_records(vec![
            HistoricalRecord::new("Systems Engineer", 5, EducationLevel::Bachelors, 80.0),
            HistoricalRecord::new("Systems Engineer", 7, EducationLevel::Bachelors, 95.0),
            HistoricalRecord::new("Senior Systems Engineer", 9, EducationLevel::Masters, 120.0),
        ]);
        let vocabulary = Vocabulary::from_corpus(&store, 2).unwrap();
        assert!(vocabulary.contains("system"));
        assert!(!vocabulary.contains("senior"));
        assert_eq!(vocabulary.cooccurrence("system", "engineer"), 3);
        // "senior" fell below the threshold, so its pairs are not retained.
        assert_eq!(vocabulary.cooccurrence("senior", "system"), 0);
    }
}
