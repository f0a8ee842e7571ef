use ratecomp_corpus::{EducationLevel, HistoricalRecord};

/// Symmetric percent difference, `(a - b) / ((a + b) / 2) * 100`. The output
/// schema depends on this exact formula; do not swap in a plain relative
/// difference.
pub fn pct_diff(a: f64, b: f64) -> f64 {
    let midpoint = (a + b) / 2.0;
    if midpoint == 0.0 {
        return 0.0;
    }
    (a - b) / midpoint * 100.0
}

/// Every education level tied for the highest count, in scale order. Empty
/// input yields an empty set, never a fabricated winner.
pub fn most_common_education(records: &[HistoricalRecord]) -> Vec<EducationLevel> {
    let mut counts = [0usize; EducationLevel::ALL.len()];
    for record in records {
        counts[record.education_level as usize] += 1;
    }
    let best = counts.iter().copied().max().unwrap_or(0);
    if best == 0 {
        return Vec::new();
    }
    EducationLevel::ALL
        .into_iter()
        .filter(|level| counts[*level as usize] == best)
        .collect()
}

pub fn average_experience(records: &[HistoricalRecord]) -> f64 {
    if records.is_empty() {
        return 0.0;
    }
    records
        .iter()
        .map(|record| record.min_years_experience as f64)
        .sum::<f64>()
        / records.len() as f64
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pct_diff_is_antisymmetric() {
        assert_eq!(pct_diff(110.0, 90.0), -pct_diff(90.0, 110.0));
        assert!((pct_diff(110.0, 90.0) - 20.0).abs() < 1e-12);
    }

    #[test]
    fn pct_diff_survives_a_zero_midpoint() {
        assert_eq!(pct_diff(0.0, 0.0), 0.0);
    }

    #[test]
    fn ties_return_every_winning_level() {
        let records = vec![
            HistoricalRecord::new("Analyst", 5, EducationLevel::Bachelors, 70.0),
            HistoricalRecord::new("Analyst", 6, EducationLevel::Masters, 80.0),
            HistoricalRecord::new("Analyst", 7, EducationLevel::Bachelors, 90.0),
            HistoricalRecord::new("Analyst", 8, EducationLevel::Masters, 95.0),
        ];
        assert_eq!(
            most_common_education(&records),
            vec![EducationLevel::Bachelors, EducationLevel::Masters]
        );
    }

    #[test]
    fn empty_sets_have_no_common_education() {
        assert!(most_common_education(&[]).is_empty());
        assert_eq!(average_experience(&[]), 0.0);
    }
}
