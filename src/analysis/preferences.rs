//! Time-slot and venue/modality preference analysis.

use crate::analysis::stats::{mean, round1, round2};
use crate::analysis::ReportSection;
use crate::ingestion::CanonicalRecord;
use serde_json::json;
use std::collections::{BTreeMap, HashMap};

/// Keywords marking a venue preference as an online modality.
const ONLINE_KEYWORDS: [&str; 5] = ["online", "virtual", "remote", "webinar", "zoom"];

/// Classify free-form venue text as Online or In-Person by keyword
/// containment. Empty text classifies as neither.
pub fn classify_modality(venue: &str) -> Option<&'static str> {
    let lowered = venue.to_lowercase();
    if lowered.trim().is_empty() {
        return None;
    }
    if ONLINE_KEYWORDS.iter().any(|kw| lowered.contains(kw)) {
        Some("Online")
    } else {
        Some("In-Person")
    }
}

/// Frequency distribution of preferred time slots with per-slot mean
/// satisfaction.
pub fn time_slot_preferences(records: &[CanonicalRecord]) -> ReportSection {
    let mut grouped: HashMap<&str, Vec<f64>> = HashMap::new();
    for record in records {
        if let Some(slot) = record.preferred_time.as_deref() {
            grouped.entry(slot).or_default().push(record.satisfaction as f64);
        }
    }

    if grouped.is_empty() {
        return ReportSection::error("No time slot preference data found");
    }

    let specified: usize = grouped.values().map(Vec::len).sum();
    let mut ranked: Vec<(&str, usize)> = grouped.iter().map(|(s, v)| (*s, v.len())).collect();
    ranked.sort_by(|a, b| b.1.cmp(&a.1).then(a.0.cmp(b.0)));

    let entry = |slot: &str, count: usize| {
        json!({
            "time_slot": slot,
            "count": count,
            "percentage": round1(count as f64 / specified as f64 * 100.0),
        })
    };
    let distribution: Vec<_> = ranked.iter().map(|(s, c)| entry(s, *c)).collect();
    let satisfaction_by_time: BTreeMap<String, f64> = grouped
        .iter()
        .map(|(slot, sats)| (slot.to_string(), round2(mean(sats).unwrap())))
        .collect();

    let (most_slot, most_count) = ranked[0];
    let (least_slot, least_count) = *ranked.last().unwrap();

    ReportSection::chart(
        "time_slot_preferences",
        json!({
            "distribution": distribution,
            "satisfaction_by_time": satisfaction_by_time,
            "stats": {
                "total_responses": records.len(),
                "specified_responses": specified,
                "unique_time_slots": ranked.len(),
                "most_popular": entry(most_slot, most_count),
                "least_popular": entry(least_slot, least_count),
            },
        }),
    )
}

/// Venue preference distribution with online/in-person modality
/// classification.
pub fn venue_modality_preferences(records: &[CanonicalRecord]) -> ReportSection {
    let mut grouped: HashMap<&str, Vec<f64>> = HashMap::new();
    for record in records {
        if let Some(venue) = record.preferred_venue.as_deref() {
            if !venue.trim().is_empty() {
                grouped.entry(venue).or_default().push(record.satisfaction as f64);
            }
        }
    }

    if grouped.is_empty() {
        return ReportSection::error("No venue preference data found");
    }

    let specified: usize = grouped.values().map(Vec::len).sum();
    let mut ranked: Vec<(&str, usize)> = grouped.iter().map(|(v, s)| (*v, s.len())).collect();
    ranked.sort_by(|a, b| b.1.cmp(&a.1).then(a.0.cmp(b.0)));

    let venue_entry = |venue: &str, count: usize| {
        json!({
            "venue_type": venue,
            "modality": classify_modality(venue),
            "count": count,
            "percentage": round1(count as f64 / specified as f64 * 100.0),
        })
    };
    let venue_distribution: Vec<_> = ranked.iter().map(|(v, c)| venue_entry(v, *c)).collect();

    let mut modality_counts: BTreeMap<&str, usize> = BTreeMap::new();
    for (venue, count) in &ranked {
        if let Some(modality) = classify_modality(venue) {
            *modality_counts.entry(modality).or_insert(0) += count;
        }
    }
    let modality_breakdown: Vec<_> = modality_counts
        .iter()
        .map(|(modality, count)| {
            json!({
                "modality": modality,
                "count": count,
                "percentage": round1(*count as f64 / specified as f64 * 100.0),
            })
        })
        .collect();

    let satisfaction_by_venue: BTreeMap<String, f64> = grouped
        .iter()
        .map(|(venue, sats)| (venue.to_string(), round2(mean(sats).unwrap())))
        .collect();

    let (most_venue, most_count) = ranked[0];
    let (least_venue, least_count) = *ranked.last().unwrap();

    ReportSection::chart(
        "venue_modality_preferences",
        json!({
            "venue_distribution": venue_distribution,
            "modality_breakdown": modality_breakdown,
            "satisfaction_by_venue": satisfaction_by_venue,
            "stats": {
                "total_responses": records.len(),
                "specified_responses": specified,
                "unique_venues": ranked.len(),
                "online_preference_count": modality_counts.get("Online").copied().unwrap_or(0),
                "in_person_preference_count": modality_counts.get("In-Person").copied().unwrap_or(0),
                "most_popular_venue": venue_entry(most_venue, most_count),
                "least_popular_venue": venue_entry(least_venue, least_count),
            },
        }),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn with_prefs(satisfaction: u8, time: Option<&str>, venue: Option<&str>) -> CanonicalRecord {
        let mut r = CanonicalRecord::new(satisfaction, 3);
        r.preferred_time = time.map(str::to_string);
        r.preferred_venue = venue.map(str::to_string);
        r
    }

    #[test]
    fn modality_keyword_classification() {
        assert_eq!(classify_modality("Zoom webinar"), Some("Online"));
        assert_eq!(classify_modality("Virtual meetup"), Some("Online"));
        assert_eq!(classify_modality("Remote session"), Some("Online"));
        assert_eq!(classify_modality("University auditorium"), Some("In-Person"));
        assert_eq!(classify_modality("  "), None);
    }

    #[test]
    fn time_slots_ranked_with_satisfaction() {
        let records = vec![
            with_prefs(5, Some("Evening"), None),
            with_prefs(4, Some("Evening"), None),
            with_prefs(3, Some("Morning"), None),
        ];
        let section = time_slot_preferences(&records);
        let data = section.data().unwrap();
        assert_eq!(data["distribution"][0]["time_slot"], json!("Evening"));
        assert_eq!(data["distribution"][0]["count"], json!(2));
        assert_eq!(data["satisfaction_by_time"]["Evening"], json!(4.5));
        assert_eq!(data["stats"]["specified_responses"], json!(3));
        assert_eq!(data["stats"]["most_popular"]["time_slot"], json!("Evening"));
    }

    #[test]
    fn venue_modalities_counted() {
        let records = vec![
            with_prefs(5, None, Some("Online via Zoom")),
            with_prefs(4, None, Some("Online via Zoom")),
            with_prefs(4, None, Some("Campus hall")),
        ];
        let section = venue_modality_preferences(&records);
        let data = section.data().unwrap();
        assert_eq!(data["stats"]["online_preference_count"], json!(2));
        assert_eq!(data["stats"]["in_person_preference_count"], json!(1));
        assert_eq!(data["venue_distribution"][0]["modality"], json!("Online"));
    }

    #[test]
    fn missing_preferences_degrade_to_error() {
        let records = vec![CanonicalRecord::new(4, 3)];
        assert!(time_slot_preferences(&records).is_error());
        assert!(venue_modality_preferences(&records).is_error());
    }
}
