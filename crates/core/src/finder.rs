use itertools::Itertools;

use ratecomp_corpus::{EducationLevel, HistoricalRecord};

/// Comparable contracts are expected to ask for at least the proposed
/// experience, up to this many years more.
pub const EXPERIENCE_BAND_YEARS: u32 = 4;

/// One policy for turning (experience, education) into a comparables filter,
/// with human-readable descriptions and deep-link parameters for the
/// interactive search view. Strategies are tried in strictness order, so
/// registration order is a contract.
pub trait ComparableFinder: Send + Sync {
    fn name(&self) -> &'static str;

    fn matches(&self, record: &HistoricalRecord) -> bool;

    fn describe_experience(&self) -> String;

    fn describe_education(&self) -> String;

    /// Query-string pairs reproducing this filter in the search UI. The
    /// caller adds the `q` parameter for the winning phrase.
    fn deep_link_params(&self) -> Vec<(&'static str, String)>;

    fn filter(&self, records: &[HistoricalRecord]) -> Vec<HistoricalRecord> {
        records
            .iter()
            .filter(|record| self.matches(record))
            .cloned()
            .collect()
    }
}

/// Education matches exactly and experience falls inside a fixed
/// forward-looking band.
#[derive(Debug, Clone)]
pub struct ExactEduAndExpFinder {
    min_experience: u32,
    education: EducationLevel,
}

impl ExactEduAndExpFinder {
    pub fn new(min_experience: u32, education: EducationLevel) -> Self {
        Self {
            min_experience,
            education,
        }
    }

    fn max_experience(&self) -> u32 {
        self.min_experience + EXPERIENCE_BAND_YEARS
    }
}

impl ComparableFinder for ExactEduAndExpFinder {
    fn name(&self) -> &'static str {
        "exact-edu-exp-band"
    }

    fn matches(&self, record: &HistoricalRecord) -> bool {
        record.education_level == self.education
            && (self.min_experience..=self.max_experience())
                .contains(&record.min_years_experience)
    }

    fn describe_experience(&self) -> String {
        format!("{}-{} years", self.min_experience, self.max_experience())
    }

    fn describe_education(&self) -> String {
        self.education.code().to_string()
    }

    fn deep_link_params(&self) -> Vec<(&'static str, String)> {
        vec![
            ("min_experience", self.min_experience.to_string()),
            ("max_experience", self.max_experience().to_string()),
            ("education", self.education.code().to_string()),
        ]
    }
}

/// Broader fallback: the requested education level or any higher one, and
/// experience open-ended upward.
#[derive(Debug, Clone)]
pub struct GteEduAndExpFinder {
    min_experience: u32,
    education: EducationLevel,
}

impl GteEduAndExpFinder {
    pub fn new(min_experience: u32, education: EducationLevel) -> Self {
        Self {
            min_experience,
            education,
        }
    }

    fn education_codes(&self) -> String {
        self.education.and_above().map(EducationLevel::code).join(",")
    }
}

impl ComparableFinder for GteEduAndExpFinder {
    fn name(&self) -> &'static str {
        "gte-edu-exp"
    }

    fn matches(&self, record: &HistoricalRecord) -> bool {
        record.education_level >= self.education
            && record.min_years_experience >= self.min_experience
    }

    fn describe_experience(&self) -> String {
        format!("{} years or greater", self.min_experience)
    }

    fn describe_education(&self) -> String {
        self.education_codes()
    }

    fn deep_link_params(&self) -> Vec<(&'static str, String)> {
        vec![
            ("min_experience", self.min_experience.to_string()),
            ("education", self.education_codes()),
        ]
    }
}

/// The configured strategies, most strict first.
pub fn default_finders(
    min_experience: u32,
    education: EducationLevel,
) -> Vec<Box<dyn ComparableFinder>> {
    vec![
        Box::new(ExactEduAndExpFinder::new(min_experience, education)),
        Box::new(GteEduAndExpFinder::new(min_experience, education)),
    ]
}
