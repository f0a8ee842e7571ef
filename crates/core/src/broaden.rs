use itertools::Itertools;

use ratecomp_corpus::normalize_term;

use crate::config::BroadenConfig;
use crate::vocabulary::Vocabulary;

/// Tier markers like "Engineer II" carry no comparability signal.
const STOP_WORDS: [&str; 18] = [
    "1", "2", "3", "4", "5", "6", "7", "8", "9", "i", "ii", "iii", "iv", "v", "vi", "vii", "viii",
    "ix",
];

fn is_stop_word(word: &str) -> bool {
    let lowered = word.to_lowercase();
    STOP_WORDS.contains(&lowered.as_str())
}

/// Coarse noun tagging used to keep broadened candidates anchored on a
/// noun-like word. Absent a tagger, every word counts as noun-like.
pub trait PartOfSpeechTagger: Send + Sync {
    fn is_noun(&self, word: &str) -> bool;
}

pub struct Broadener<'v> {
    vocabulary: &'v Vocabulary,
    config: BroadenConfig,
    tagger: Option<&'v dyn PartOfSpeechTagger>,
}

impl<'v> Broadener<'v> {
    pub fn new(vocabulary: &'v Vocabulary, config: BroadenConfig) -> Self {
        Self {
            vocabulary,
            config,
            tagger: None,
        }
    }

    pub fn with_tagger(mut self, tagger: &'v dyn PartOfSpeechTagger) -> Self {
        self.tagger = Some(tagger);
        self
    }

    /// Candidate phrases for one query, most specific first. The sequence is
    /// finite and single-pass; stop consuming once a phrase has found enough
    /// comparables.
    pub fn broaden(&self, phrase: &str) -> BroadenedPhrases {
        if self.config.require_noun && self.tagger.is_none() {
            tracing::debug!("no part-of-speech tagger configured, noun filter is a no-op");
        }
        let kept: Vec<&str> = phrase
            .split_whitespace()
            .filter(|word| !is_stop_word(word))
            .collect();
        let stripped = kept.join(" ");

        let mut words: Vec<CandidateWord> = Vec::new();
        for word in &kept {
            if words.len() == self.config.max_lexemes {
                break;
            }
            let lexeme = normalize_term(word);
            if lexeme.is_empty() || !self.vocabulary.contains(&lexeme) {
                continue;
            }
            if words.iter().any(|candidate| candidate.lexeme == lexeme) {
                continue;
            }
            words.push(CandidateWord {
                surface: (*word).to_string(),
                frequency: self.vocabulary.frequency(&lexeme),
                noun_like: self
                    .tagger
                    .map(|tagger| tagger.is_noun(word))
                    .unwrap_or(true),
                lexeme,
            });
        }

        let mut cooccurrence = vec![vec![0u32; words.len()]; words.len()];
        for i in 0..words.len() {
            for j in (i + 1)..words.len() {
                let count = self.vocabulary.cooccurrence(&words[i].lexeme, &words[j].lexeme);
                cooccurrence[i][j] = count;
                cooccurrence[j][i] = count;
            }
        }

        BroadenedPhrases {
            first: Some(stripped),
            words,
            cooccurrence,
            min_phrase_chars: self.config.min_phrase_chars,
            max_candidates: self.config.max_candidates,
            min_cooccurrence: self.config.min_cooccurrence,
            filter_nouns: self.config.require_noun && self.tagger.is_some(),
            ranked: None,
        }
    }
}

#[derive(Debug, Clone)]
struct CandidateWord {
    surface: String,
    lexeme: String,
    frequency: u32,
    noun_like: bool,
}

#[derive(Debug)]
struct RankedSubset {
    size: usize,
    specificity: u32,
    has_noun: bool,
    phrase: String,
}

/// Lazy, finite, single-pass candidate sequence. The stop-word-stripped
/// query is always yielded first; ranked subsets are only enumerated if the
/// caller keeps consuming.
pub struct BroadenedPhrases {
    first: Option<String>,
    words: Vec<CandidateWord>,
    cooccurrence: Vec<Vec<u32>>,
    min_phrase_chars: usize,
    max_candidates: usize,
    min_cooccurrence: u32,
    filter_nouns: bool,
    ranked: Option<std::vec::IntoIter<String>>,
}

impl BroadenedPhrases {
    fn rank_subsets(&self) -> Vec<String> {
        let indices: Vec<usize> = (0..self.words.len()).collect();
        let mut scored: Vec<RankedSubset> = Vec::new();
        for subset in indices.into_iter().powerset() {
            if subset.is_empty() {
                continue;
            }
            if self.joined_length(&subset) < self.min_phrase_chars {
                continue;
            }
            let Some(specificity) = self.subset_specificity(&subset) else {
                continue;
            };
            scored.push(RankedSubset {
                size: subset.len(),
                specificity,
                has_noun: subset.iter().any(|&idx| self.words[idx].noun_like),
                phrase: subset
                    .iter()
                    .map(|&idx| self.words[idx].surface.as_str())
                    .join(" "),
            });
        }
        // Larger subsets first; among equals, the rarest combination wins.
        scored.sort_by(|a, b| {
            b.size
                .cmp(&a.size)
                .then(a.specificity.cmp(&b.specificity))
        });
        scored.truncate(self.max_candidates);
        scored
            .into_iter()
            .filter(|subset| !self.filter_nouns || subset.has_noun)
            .map(|subset| subset.phrase)
            .collect()
    }

    fn joined_length(&self, subset: &[usize]) -> usize {
        let chars: usize = subset.iter().map(|&idx| self.words[idx].lexeme.len()).sum();
        chars + subset.len() - 1
    }

    /// Minimum pairwise co-occurrence for multi-term subsets, the term's own
    /// frequency for singletons. `None` when any pair falls below the
    /// coherence floor.
    fn subset_specificity(&self, subset: &[usize]) -> Option<u32> {
        if subset.len() == 1 {
            return Some(self.words[subset[0]].frequency);
        }
        let mut minimum = u32::MAX;
        for (pos, &a) in subset.iter().enumerate() {
            for &b in &subset[pos + 1..] {
                let count = self.cooccurrence[a][b];
                if count < self.min_cooccurrence {
                    return None;
                }
                minimum = minimum.min(count);
            }
        }
        Some(minimum)
    }
}

impl Iterator for BroadenedPhrases {
    type Item = String;

    fn next(&mut self) -> Option<String> {
        if let Some(first) = self.first.take() {
            return Some(first);
        }
        if self.ranked.is_none() {
            self.ranked = Some(self.rank_subsets().into_iter());
        }
        self.ranked.as_mut().and_then(Iterator::next)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::BroadenConfig;

    fn config(min_cooccurrence: u32) -> BroadenConfig {
        BroadenConfig {
            min_cooccurrence,
            ..BroadenConfig::default()
        }
    }

    fn phrases(vocabulary: &Vocabulary, config: BroadenConfig, query: &str) -> Vec<String> {
        Broadener::new(vocabulary, config).broaden(query).collect()
    }

    #[test]
    fn stripped_phrase_is_always_first() {
        let vocabulary = Vocabulary::from_documents(["clerical assistant"]);
        let yielded = phrases(&vocabulary, config(1), "clerical II");
        assert_eq!(yielded[0], "clerical");
    }

    #[test]
    fn all_stop_words_still_yield_once() {
        let vocabulary = Vocabulary::from_documents(["clerical assistant"]);
        assert_eq!(phrases(&vocabulary, config(1), "II 3"), vec![String::new()]);
    }

    #[test]
    fn words_keep_their_original_order() {
        let vocabulary =
            Vocabulary::from_documents(["senior network engineer", "senior network engineer"]);
        for yielded in phrases(&vocabulary, config(1), "Senior Network Engineer") {
            let positions: Vec<usize> = yielded
                .split_whitespace()
                .map(|word| {
                    ["Senior", "Network", "Engineer"]
                        .iter()
                        .position(|w| *w == word)
                        .unwrap()
                })
                .collect();
            assert!(positions.windows(2).all(|pair| pair[0] < pair[1]));
        }
    }

    #[test]
    fn incoherent_pairs_are_never_combined() {
        // "database" and "nurse" never appear together.
        let vocabulary =
            Vocabulary::from_documents(["database administrator", "registered nurse"]);
        let yielded = phrases(&vocabulary, config(1), "Database Nurse");
        assert_eq!(yielded[0], "Database Nurse");
        assert!(!yielded[1..].iter().any(|p| p == "Database Nurse"));
        assert!(yielded[1..].iter().any(|p| p == "Database"));
        assert!(yielded[1..].iter().any(|p| p == "Nurse"));
    }

    #[test]
    fn rarer_combinations_rank_before_common_ones() {
        let mut documents = vec!["staff accountant lead"; 5];
        documents.extend(["staff accountant"; 20]);
        let vocabulary = Vocabulary::from_documents(documents);
        let yielded = phrases(&vocabulary, config(1), "Staff Accountant Lead");
        assert_eq!(yielded[0], "Staff Accountant Lead");
        assert_eq!(yielded[1], "Staff Accountant Lead");
        // Pairs touching "lead" co-occur 5 times, "staff accountant" 25.
        let staff_accountant = yielded.iter().position(|p| p == "Staff Accountant").unwrap();
        let staff_lead = yielded.iter().position(|p| p == "Staff Lead").unwrap();
        assert!(staff_lead < staff_accountant);
    }

    #[test]
    fn lexeme_cap_bounds_subset_generation() {
        let document = "alpha bravo charlie delta echo foxtrot golf hotel india juliett";
        let vocabulary = Vocabulary::from_documents([document, document]);
        let capped = BroadenConfig {
            max_candidates: 64,
            ..config(1)
        };
        let yielded = phrases(&vocabulary, capped, document);
        // Words beyond the cap of 8 never appear in ranked candidates.
        assert!(yielded[1..].iter().all(|p| !p.contains("india")));
        assert!(yielded[1..].iter().all(|p| !p.contains("juliett")));
        // The unconditional first yield still carries the full phrase.
        assert!(yielded[0].contains("juliett"));
    }

    #[test]
    fn short_candidates_are_discarded() {
        let vocabulary = Vocabulary::from_documents(["ox cart driver", "ox cart driver"]);
        let yielded = phrases(&vocabulary, config(1), "ox");
        // "ox" joined is under the four-character floor.
        assert_eq!(yielded, vec!["ox".to_string()]);
    }

    #[test]
    fn duplicate_lexemes_share_one_slot() {
        let vocabulary = Vocabulary::from_documents(["engineer engineer", "engineer"]);
        let yielded = phrases(&vocabulary, config(1), "Engineer Engineers");
        assert_eq!(yielded[0], "Engineer Engineers");
        assert_eq!(yielded[1..], ["Engineer".to_string()]);
    }

    #[test]
    fn repeated_calls_yield_identical_sequences() {
        let vocabulary = Vocabulary::from_documents([
            "senior systems engineer",
            "systems engineer",
            "systems administrator",
        ]);
        let first = phrases(&vocabulary, config(1), "Senior Systems Engineer");
        let second = phrases(&vocabulary, config(1), "Senior Systems Engineer");
        assert_eq!(first, second);
    }

    struct VerbHater;

    impl PartOfSpeechTagger for VerbHater {
        fn is_noun(&self, word: &str) -> bool {
            word != "running"
        }
    }

    #[test]
    fn noun_filter_skips_nounless_subsets_but_not_the_first_yield() {
        let vocabulary = Vocabulary::from_documents(["running track", "running track"]);
        let config = BroadenConfig {
            require_noun: true,
            ..config(1)
        };
        let yielded: Vec<String> = Broadener::new(&vocabulary, config)
            .with_tagger(&VerbHater)
            .broaden("running")
            .collect();
        // The stripped query always goes out; the nounless subset does not.
        assert_eq!(yielded, vec!["running".to_string()]);
    }
}
