use serde::Deserialize;

pub const DEFAULT_MIN_COMPARABLES: usize = 30;
pub const DEFAULT_SEVERE_STDDEVS: f64 = 2.0;
pub const DEFAULT_MIN_VOCABULARY_FREQUENCY: u32 = 100;

#[derive(Debug, Clone, Deserialize)]
pub struct AnalysisConfig {
    #[serde(default = "default_min_comparables")]
    pub min_comparables: usize,
    #[serde(default = "default_severe_stddevs")]
    pub severe_stddevs: f64,
    #[serde(default = "default_min_vocabulary_frequency")]
    pub min_vocabulary_frequency: u32,
    #[serde(default)]
    pub broaden: BroadenConfig,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            min_comparables: DEFAULT_MIN_COMPARABLES,
            severe_stddevs: DEFAULT_SEVERE_STDDEVS,
            min_vocabulary_frequency: DEFAULT_MIN_VOCABULARY_FREQUENCY,
            broaden: BroadenConfig::default(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct BroadenConfig {
    /// Lexemes beyond this cap are dropped from subset generation.
    #[serde(default = "default_max_lexemes")]
    pub max_lexemes: usize,
    /// Ranked candidate phrases kept per query.
    #[serde(default = "default_max_candidates")]
    pub max_candidates: usize,
    /// Joined candidates shorter than this are discarded.
    #[serde(default = "default_min_phrase_chars")]
    pub min_phrase_chars: usize,
    /// Minimum pairwise co-occurrence for a subset to stay coherent.
    #[serde(default = "default_min_cooccurrence")]
    pub min_cooccurrence: u32,
    /// Drop candidates without a noun-like word when a tagger is configured.
    #[serde(default)]
    pub require_noun: bool,
}

impl Default for BroadenConfig {
    fn default() -> Self {
        Self {
            max_lexemes: default_max_lexemes(),
            max_candidates: default_max_candidates(),
            min_phrase_chars: default_min_phrase_chars(),
            min_cooccurrence: default_min_cooccurrence(),
            require_noun: false,
        }
    }
}

fn default_min_comparables() -> usize {
    DEFAULT_MIN_COMPARABLES
}

fn default_severe_stddevs() -> f64 {
    DEFAULT_SEVERE_STDDEVS
}

fn default_min_vocabulary_frequency() -> u32 {
    DEFAULT_MIN_VOCABULARY_FREQUENCY
}

fn default_max_lexemes() -> usize {
    8
}

fn default_max_candidates() -> usize {
    8
}

fn default_min_phrase_chars() -> usize {
    4
}

fn default_min_cooccurrence() -> u32 {
    10
}
