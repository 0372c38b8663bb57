//! Net Promoter Score analysis over recommendation scores.

use crate::analysis::stats::round1;
use crate::analysis::ReportSection;
use crate::ingestion::CanonicalRecord;
use serde_json::json;
use std::collections::BTreeMap;

/// Partition recommendation scores into Detractors / Passives / Promoters
/// and compute the Net Promoter Score in [-100, 100].
pub fn recommendation_analysis(records: &[CanonicalRecord]) -> ReportSection {
    let scores: Vec<u8> = records
        .iter()
        .filter_map(|r| r.recommendation_score)
        .collect();

    if scores.is_empty() {
        return ReportSection::error("No recommendation score data found");
    }

    let detractors = scores.iter().filter(|&&s| s <= 6).count();
    let passives = scores.iter().filter(|&&s| (7..=8).contains(&s)).count();
    let promoters = scores.iter().filter(|&&s| s >= 9).count();
    let total = scores.len();

    let nps = (promoters as f64 - detractors as f64) / total as f64 * 100.0;

    let mut distribution: BTreeMap<u8, usize> = BTreeMap::new();
    for score in &scores {
        *distribution.entry(*score).or_insert(0) += 1;
    }
    let score_distribution: BTreeMap<String, usize> = distribution
        .into_iter()
        .map(|(score, count)| (score.to_string(), count))
        .collect();

    let pct = |count: usize| round1(count as f64 / total as f64 * 100.0);

    ReportSection::chart(
        "nps_analysis",
        json!({
            "categories": ["Detractors (0-6)", "Passives (7-8)", "Promoters (9-10)"],
            "values": [detractors, passives, promoters],
            "percentages": [pct(detractors), pct(passives), pct(promoters)],
            "nps_score": round1(nps),
            "nps_category": categorize_nps(nps),
            "score_distribution": score_distribution,
        }),
    )
}

/// Standard NPS bands; each boundary is inclusive on its lower bound.
pub fn categorize_nps(nps: f64) -> &'static str {
    if nps >= 70.0 {
        "World Class"
    } else if nps >= 50.0 {
        "Excellent"
    } else if nps >= 30.0 {
        "Good"
    } else if nps >= 0.0 {
        "Needs Improvement"
    } else {
        "Critical"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn batch(scores: &[u8]) -> Vec<CanonicalRecord> {
        scores
            .iter()
            .map(|&s| {
                let mut r = CanonicalRecord::new(4, 3);
                r.recommendation_score = Some(s);
                r
            })
            .collect()
    }

    #[test]
    fn partitions_and_scores_reference_batch() {
        let section = recommendation_analysis(&batch(&[2, 4, 6, 7, 8, 9, 9, 10, 10, 10]));
        let data = section.data().unwrap();
        assert_eq!(data["values"], json!([3, 2, 5]));
        assert_eq!(data["nps_score"], json!(20.0));
        assert_eq!(data["nps_category"], json!("Needs Improvement"));
    }

    #[test]
    fn all_promoters_hits_upper_bound() {
        let section = recommendation_analysis(&batch(&[9, 10, 10]));
        let data = section.data().unwrap();
        assert_eq!(data["nps_score"], json!(100.0));
        assert_eq!(data["nps_category"], json!("World Class"));
    }

    #[test]
    fn all_detractors_hits_lower_bound() {
        let section = recommendation_analysis(&batch(&[0, 3, 6]));
        let data = section.data().unwrap();
        assert_eq!(data["nps_score"], json!(-100.0));
        assert_eq!(data["nps_category"], json!("Critical"));
    }

    #[test]
    fn band_boundaries_inclusive_on_lower_bound() {
        assert_eq!(categorize_nps(70.0), "World Class");
        assert_eq!(categorize_nps(50.0), "Excellent");
        assert_eq!(categorize_nps(30.0), "Good");
        assert_eq!(categorize_nps(0.0), "Needs Improvement");
        assert_eq!(categorize_nps(-0.1), "Critical");
    }

    #[test]
    fn absent_scores_degrade_to_error() {
        let records = vec![CanonicalRecord::new(4, 3)];
        assert!(recommendation_analysis(&records).is_error());
    }
}
