//! Satisfaction distribution analysis.

use crate::analysis::stats::{mean, median, mode};
use crate::analysis::ReportSection;
use crate::ingestion::CanonicalRecord;
use serde_json::json;
use std::collections::BTreeMap;

/// Frequency distribution of overall satisfaction, with summary
/// statistics and threshold-based recommendations.
pub fn satisfaction_distribution(records: &[CanonicalRecord]) -> ReportSection {
    if records.is_empty() {
        return ReportSection::error("No satisfaction data found");
    }

    let ratings: Vec<u8> = records.iter().map(|r| r.satisfaction).collect();
    let as_f64: Vec<f64> = ratings.iter().map(|&v| v as f64).collect();

    let mut counts: BTreeMap<u8, usize> = BTreeMap::new();
    for rating in &ratings {
        *counts.entry(*rating).or_insert(0) += 1;
    }

    let categories: Vec<u8> = counts.keys().copied().collect();
    let values: Vec<usize> = counts.values().copied().collect();
    let pie_data: Vec<_> = counts
        .iter()
        .map(|(rating, count)| json!({ "name": rating.to_string(), "value": count }))
        .collect();

    let average = mean(&as_f64).unwrap_or(0.0);

    ReportSection::chart(
        "satisfaction_distribution",
        json!({
            "categories": categories,
            "values": values,
            "pie_data": pie_data,
            "stats": {
                "average": average,
                "median": median(&as_f64).unwrap_or(0.0),
                "mode": mode(&ratings).unwrap_or(0),
                "total_responses": records.len(),
            },
            "recommendations": recommendations(average),
        }),
    )
}

fn recommendations(average: f64) -> Vec<&'static str> {
    let insight = if average >= 4.5 {
        "Excellent satisfaction levels - maintain current standards"
    } else if average >= 4.0 {
        "Good satisfaction - look for opportunities to reach excellence"
    } else if average >= 3.5 {
        "Moderate satisfaction - identify key improvement areas"
    } else {
        "Below average satisfaction - urgent improvements needed"
    };
    vec![insight]
}
