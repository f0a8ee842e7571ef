use crate::model::{AnalysisResult, ProposedRow};
use crate::stats::pct_diff;

/// Sentinel rendered in the search-labor-category column when no comparable
/// set was found. Such rows keep their place; the export never drops them.
pub const NOT_FOUND_LABEL: &str = "Error: Comparables not found";

/// Column order and header text are a compatibility surface for downstream
/// CSV/XLSX consumers.
pub const EXPORT_HEADERS: [&str; 16] = [
    "#",
    "No of Comps",
    "Vendor Labor Category",
    "Search Labor Category",
    "Proposed Edu",
    "Proposed Exp",
    "Most Common EDU",
    "Avg EXP",
    "Offered Hourly Price",
    "Average Price",
    "% Diff from Average",
    "+ 1 Standard Deviation",
    "% Diff from +1 Standard Deviation",
    "Exp Comparable Search Criteria",
    "Edu Comparable Search Criteria",
    "Outside 1 Standard Deviation",
];

/// Flatten (input row, verdict) pairs to tabular cells, one output row per
/// input row, serials starting at 1.
pub fn export_rows(pairs: &[(ProposedRow, AnalysisResult)]) -> Vec<Vec<String>> {
    pairs
        .iter()
        .enumerate()
        .map(|(idx, (row, result))| export_row(idx + 1, row, result))
        .collect()
}

fn export_row(serial: usize, row: &ProposedRow, result: &AnalysisResult) -> Vec<String> {
    let Some(summary) = &result.comparables else {
        return vec![
            serial.to_string(),
            String::new(),
            row.labor_category.clone(),
            NOT_FOUND_LABEL.to_string(),
            row.education_level.code().to_string(),
            row.min_years_experience.to_string(),
            String::new(),
            String::new(),
            money(row.price),
            String::new(),
            String::new(),
            String::new(),
            String::new(),
            String::new(),
            String::new(),
            String::new(),
        ];
    };
    let plus_one_stddev = summary.average_price + summary.stddev;
    let outside = (row.price - summary.average_price).abs() > summary.stddev;
    vec![
        serial.to_string(),
        summary.count.to_string(),
        row.labor_category.clone(),
        summary.search_labor_category.clone(),
        row.education_level.code().to_string(),
        row.min_years_experience.to_string(),
        summary.most_common_education_label(),
        format!("{:.1}", summary.average_experience),
        money(row.price),
        money(summary.average_price),
        money(pct_diff(row.price, summary.average_price)),
        money(plus_one_stddev),
        money(pct_diff(row.price, plus_one_stddev)),
        summary.experience_criteria.clone(),
        summary.education_criteria.clone(),
        if outside { "TRUE" } else { "FALSE" }.to_string(),
    ]
}

fn money(value: f64) -> String {
    format!("{value:.2}")
}
