use anyhow::Result;
use rustc_hash::FxHashMap;

use crate::normalize::tokenize;
use crate::record::HistoricalRecord;
use crate::CorpusStore;

/// In-memory corpus store. Lexeme lists are computed once at insert so that
/// repeated phrase searches over one batch stay cheap.
#[derive(Debug, Default)]
pub struct MemoryCorpus {
    records: Vec<HistoricalRecord>,
    lexemes: Vec<Vec<String>>,
}

impl MemoryCorpus {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_records(records: impl IntoIterator<Item = HistoricalRecord>) -> Self {
        let mut corpus = Self::new();
        for record in records {
            corpus.insert(record);
        }
        corpus
    }

    pub fn insert(&mut self, record: HistoricalRecord) {
        let mut terms: Vec<String> = Vec::new();
        for term in tokenize(&record.labor_category) {
            if !terms.contains(&term) {
                terms.push(term);
            }
        }
        self.lexemes.push(terms);
        self.records.push(record);
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    fn matches(&self, idx: usize, words: &[String]) -> bool {
        words
            .iter()
            .all(|word| self.lexemes[idx].iter().any(|lexeme| lexeme.starts_with(word.as_str())))
    }
}

impl CorpusStore for MemoryCorpus {
    fn search_by_phrases(&self, phrases: &[String]) -> Result<Vec<HistoricalRecord>> {
        // Each phrase is an AND of prefix-matching words; phrases are unioned.
        // A phrase with no usable words matches nothing.
        let queries: Vec<Vec<String>> = phrases
            .iter()
            .map(|phrase| tokenize(phrase))
            .filter(|words| !words.is_empty())
            .collect();
        let mut out = Vec::new();
        for idx in 0..self.records.len() {
            if queries.iter().any(|words| self.matches(idx, words)) {
                out.push(self.records[idx].clone());
            }
        }
        Ok(out)
    }

    fn term_document_frequencies(&self, min_df: u32) -> Result<FxHashMap<String, u32>> {
        let mut frequencies: FxHashMap<String, u32> = FxHashMap::default();
        for terms in &self.lexemes {
            for term in terms {
                *frequencies.entry(term.clone()).or_insert(0) += 1;
            }
        }
        frequencies.retain(|_, count| *count >= min_df);
        Ok(frequencies)
    }

    fn term_vectors(&self) -> Result<Vec<(u64, Vec<String>)>> {
        Ok(self
            .lexemes
            .iter()
            .enumerate()
            .map(|(idx, terms)| (idx as u64, terms.clone()))
            .collect())
    }
}
