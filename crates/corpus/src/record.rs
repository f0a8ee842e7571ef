use std::fmt;

use serde::{Deserialize, Serialize};

/// Ordered education scale; variant order is the comparison order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EducationLevel {
    None,
    HighSchool,
    Associates,
    Bachelors,
    Masters,
    Doctorate,
}

impl EducationLevel {
    pub const ALL: [EducationLevel; 6] = [
        EducationLevel::None,
        EducationLevel::HighSchool,
        EducationLevel::Associates,
        EducationLevel::Bachelors,
        EducationLevel::Masters,
        EducationLevel::Doctorate,
    ];

    pub fn from_str(raw: &str) -> Option<Self> {
        match raw.trim().to_lowercase().as_str() {
            "none" => Some(EducationLevel::None),
            "hs" | "high school" | "high-school" => Some(EducationLevel::HighSchool),
            "aa" | "associates" => Some(EducationLevel::Associates),
            "ba" | "bachelors" => Some(EducationLevel::Bachelors),
            "ma" | "masters" => Some(EducationLevel::Masters),
            "phd" | "ph.d." | "doctorate" => Some(EducationLevel::Doctorate),
            _ => None,
        }
    }

    pub fn code(self) -> &'static str {
        match self {
            EducationLevel::None => "None",
            EducationLevel::HighSchool => "HS",
            EducationLevel::Associates => "AA",
            EducationLevel::Bachelors => "BA",
            EducationLevel::Masters => "MA",
            EducationLevel::Doctorate => "PHD",
        }
    }

    /// This level and every higher one, in scale order.
    pub fn and_above(self) -> impl Iterator<Item = EducationLevel> {
        Self::ALL.into_iter().filter(move |level| *level >= self)
    }
}

impl fmt::Display for EducationLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoricalRecord {
    pub labor_category: String,
    pub min_years_experience: u32,
    pub education_level: EducationLevel,
    pub current_price: f64,
}

impl HistoricalRecord {
    pub fn new(
        labor_category: impl Into<String>,
        min_years_experience: u32,
        education_level: EducationLevel,
        current_price: f64,
    ) -> Self {
        Self {
            labor_category: labor_category.into(),
            min_years_experience,
            education_level,
            current_price,
        }
    }
}
