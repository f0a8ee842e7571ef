mod analysis;
mod broaden;
mod config;
mod error;
mod export;
mod finder;
mod model;
mod stats;
mod vocabulary;

pub use analysis::{Analyzer, FoundComparables, SearchCache};
pub use broaden::{BroadenedPhrases, Broadener, PartOfSpeechTagger};
pub use config::{
    AnalysisConfig, BroadenConfig, DEFAULT_MIN_COMPARABLES, DEFAULT_MIN_VOCABULARY_FREQUENCY,
    DEFAULT_SEVERE_STDDEVS,
};
pub use error::{AnalysisError, Result};
pub use export::{export_rows, EXPORT_HEADERS, NOT_FOUND_LABEL};
pub use finder::{
    default_finders, ComparableFinder, ExactEduAndExpFinder, GteEduAndExpFinder,
    EXPERIENCE_BAND_YEARS,
};
pub use model::{AnalysisResult, ComparablesSummary, ProposedRow};
pub use stats::{average_experience, most_common_education, pct_diff};
pub use vocabulary::Vocabulary;
