use serde::Serialize;

use ratecomp_corpus::EducationLevel;

use crate::error::{AnalysisError, Result};

/// One proposed labor-rate line item, as submitted by a vendor.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProposedRow {
    pub labor_category: String,
    pub min_years_experience: u32,
    pub education_level: EducationLevel,
    pub price: f64,
}

impl ProposedRow {
    /// Validates raw vendor input. Bad rows are rejected here, before any
    /// analysis runs; nothing downstream coerces invalid values.
    pub fn new(
        labor_category: impl Into<String>,
        min_years_experience: i64,
        education_level: &str,
        price: f64,
    ) -> Result<Self> {
        if min_years_experience < 0 {
            return Err(AnalysisError::NegativeExperience(min_years_experience));
        }
        let education_level = EducationLevel::from_str(education_level)
            .ok_or_else(|| AnalysisError::UnknownEducation(education_level.to_string()))?;
        if !price.is_finite() || price <= 0.0 {
            return Err(AnalysisError::InvalidPrice(price));
        }
        Ok(Self {
            labor_category: labor_category.into(),
            min_years_experience: min_years_experience as u32,
            education_level,
            price,
        })
    }
}

/// Verdict for one proposed row. `comparables` is `None` when no broadening
/// level produced enough matches; that is a terminal state, not an error.
#[derive(Debug, Clone, Serialize)]
pub struct AnalysisResult {
    pub comparables: Option<ComparablesSummary>,
}

impl AnalysisResult {
    pub fn not_found() -> Self {
        Self { comparables: None }
    }

    pub fn found(&self) -> bool {
        self.comparables.is_some()
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ComparablesSummary {
    /// The broadened phrase that produced the comparable set.
    pub search_labor_category: String,
    pub experience_criteria: String,
    pub education_criteria: String,
    pub count: usize,
    pub average_price: f64,
    pub stddev: f64,
    pub average_experience: f64,
    /// All levels tied for most common among the comparables, scale order.
    pub most_common_education: Vec<EducationLevel>,
    /// Signed: proposed price minus comparable average.
    pub price_delta: f64,
    /// Whole sample standard deviations between price and average.
    pub stddevs_from_average: u32,
    pub severe: bool,
    pub preposition: String,
    /// Query-string pairs reproducing this comparable set in the search UI.
    pub deep_link_params: Vec<(String, String)>,
}

impl ComparablesSummary {
    pub fn description(&self) -> String {
        let unit = if self.stddevs_from_average == 1 {
            "standard deviation"
        } else {
            "standard deviations"
        };
        format!(
            "This price is {} {} {} the average.",
            self.stddevs_from_average, unit, self.preposition
        )
    }

    pub fn most_common_education_label(&self) -> String {
        self.most_common_education
            .iter()
            .map(|level| level.code())
            .collect::<Vec<_>>()
            .join(",")
    }
}
