//! End-to-end pipeline tests: CSV text through extraction to the
//! composite report.

use feedback_insights::analysis::report::{comprehensive_report, initial_summary};
use feedback_insights::analysis::ReportSection;
use feedback_insights::ingestion::{extract_feedback, read_csv_str};
use feedback_insights::FeedbackError;
use pretty_assertions::assert_eq;
use serde_json::json;

/// Build CSV text for the legacy export template, one row per tuple of
/// (satisfaction, recommendation, pacing, sessions, channel).
fn legacy_csv(rows: &[(&str, &str, &str, &str, &str)]) -> String {
    let mut csv = String::from(
        "Overall Satisfaction,\
         How likely are you to recommend our events to a friend or colleague?,\
         Pacing,\
         Which sessions did you attend?,\
         Event Discovery Channel,\
         What did you like most about the event?,\
         What could be improved?\n",
    );
    for (satisfaction, recommendation, pacing, sessions, channel) in rows {
        csv.push_str(&format!(
            "{satisfaction},{recommendation},{pacing},\"{sessions}\",{channel},Great event,Nothing\n"
        ));
    }
    csv
}

fn extract(csv: &str) -> feedback_insights::ExtractionResult {
    let batch = read_csv_str(csv).unwrap();
    extract_feedback(&batch).unwrap()
}

fn section_data(section: &ReportSection) -> &serde_json::Value {
    section.data().expect("section should have succeeded")
}

#[test]
fn nps_reference_scenario() {
    let rows: Vec<(&str, &str, &str, &str, &str)> = ["2", "4", "6", "7", "8", "9", "9", "10", "10", "10"]
        .iter()
        .map(|score| ("4", *score, "3", "", "Social Media"))
        .collect();
    let extraction = extract(&legacy_csv(&rows));
    let report = comprehensive_report(&extraction);

    let nps = section_data(&report.nps);
    assert_eq!(nps["values"], json!([3, 2, 5]));
    assert_eq!(nps["nps_score"], json!(20.0));
    assert_eq!(nps["nps_category"], json!("Needs Improvement"));
}

#[test]
fn pacing_rescales_mixed_scale_export() {
    let rows: Vec<(&str, &str, &str, &str, &str)> = vec![
        ("4", "8", "2", "", "Friends"),
        ("4", "8", "8", "", "Friends"),
        ("4", "8", "10", "", "Friends"),
        ("4", "8", "3", "", "Friends"),
    ];
    let extraction = extract(&legacy_csv(&rows));
    let pacing: Vec<u8> = extraction.records.iter().map(|r| r.pacing).collect();
    assert_eq!(pacing, vec![2, 4, 5, 3]);
}

#[test]
fn pii_columns_stripped_from_canonical_output() {
    let csv = "First Name,Email,Order Number,Overall Satisfaction,What did you like most about the event?,What could be improved?,Pacing\n\
               Ada,ada@example.com,ORD-1,5,Loved the keynote,Longer breaks,3\n";
    let extraction = extract(csv);
    let serialized = serde_json::to_string(&extraction.records).unwrap();
    assert!(!serialized.contains("Ada"));
    assert!(!serialized.contains("ada@example.com"));
    assert!(!serialized.contains("ORD-1"));
}

#[test]
fn missing_required_columns_fail_fast_with_all_names() {
    let batch = read_csv_str("Overall Satisfaction,Venue Rating\n4,5\n").unwrap();
    let err = extract_feedback(&batch).unwrap_err();
    match err {
        FeedbackError::MissingColumns(columns) => {
            assert_eq!(
                columns,
                vec!["improvement_feedback", "pacing", "positive_feedback"]
            );
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn missing_optional_column_degrades_only_dependent_sections() {
    // No venue/speaker/content ratings anywhere in the export.
    let rows: Vec<(&str, &str, &str, &str, &str)> = (0..12)
        .map(|_| ("4", "9", "3", "Keynote", "Newsletter"))
        .collect();
    let extraction = extract(&legacy_csv(&rows));
    let report = comprehensive_report(&extraction);

    assert!(report.ratings.is_error());
    assert!(report.correlation.is_error());
    assert!(!report.satisfaction.is_error());
    assert!(!report.nps.is_error());
    assert!(!report.pacing.is_error());
    assert!(!report.sessions.is_error());
    assert!(!report.discovery_channels.is_error());
}

#[test]
fn unified_template_headers_map_to_same_canonical_fields() {
    let csv = "\"Overall, how satisfied were you with this event?\",\
               Venue Rating,Speaker Rating,Content Relevance,\
               What did you like most about the event?,What could be improved?,\
               How was the pacing of the event?\n\
               4 - Satisfied,5,4,4,Hands-on labs,More time,3\n";
    let extraction = extract(csv);
    let record = &extraction.records[0];
    assert_eq!(record.satisfaction, 4);
    assert_eq!(record.venue_rating, Some(5));
    assert_eq!(record.speaker_rating, Some(4));
    assert_eq!(record.content_rating, Some(4));
    assert_eq!(record.pacing, 3);
}

#[test]
fn community_export_schema_end_to_end() {
    let csv = "Event,Chapter,City,First Name,Email,\
               How well did the content of the event meet your expectations?,\
               \"From a scale of 1 - 10, how was the pacing of the event (1 being too slow and 10 being too fast)?\",\
               What did you find most useful from the topics presented?,\
               \"Any other concerns or suggestions? Comments about the event? Workshop or community activity suggestions? What should we cover next? Anything will do! We take our time reading these ^ _ ^\",\
               How did you hear about this event?\n\
               DevFest,Iloilo,Iloilo City,Grace,grace@example.com,5,8,The ML track,More workshops,Facebook\n";
    let extraction = extract(csv);
    let record = &extraction.records[0];
    assert_eq!(record.satisfaction, 5);
    assert_eq!(record.pacing, 4);
    assert_eq!(record.positive_feedback, "The ML track");
    assert_eq!(record.improvement_feedback, "More workshops");
    assert_eq!(record.event_discovery.as_deref(), Some("Facebook"));
    assert_eq!(record.extra.get("chapter").map(String::as_str), Some("Iloilo"));
    assert!(!record.extra.contains_key("first_name"));
}

#[test]
fn uncoercible_rows_dropped_and_surfaced_in_summary() {
    let csv = "Overall Satisfaction,What did you like most about the event?,What could be improved?,Pacing\n\
               5,Great,Nothing,3\n\
               excellent,Great,Nothing,3\n\
               4,Fine,More demos,not sure\n";
    let extraction = extract(csv);
    assert_eq!(extraction.records.len(), 1);
    assert_eq!(extraction.dropped_rows, 2);

    let report = comprehensive_report(&extraction);
    assert_eq!(report.summary.total_responses, 1);
    assert_eq!(report.summary.dropped_rows, 2);
}

#[test]
fn channel_effectiveness_ranking_from_csv() {
    let mut rows: Vec<(&str, &str, &str, &str, &str)> = Vec::new();
    for _ in 0..100 {
        rows.push(("4", "8", "3", "", "X"));
    }
    for _ in 0..10 {
        rows.push(("5", "8", "3", "", "Y"));
    }
    let extraction = extract(&legacy_csv(&rows));
    let report = comprehensive_report(&extraction);
    let channels = &section_data(&report.discovery_channels)["channels"];
    assert_eq!(channels[0]["event_discovery"], json!("X"));
    assert_eq!(channels[0]["effectiveness_score"], json!(86.0));
    assert_eq!(channels[1]["event_discovery"], json!("Y"));
    assert_eq!(channels[1]["effectiveness_score"], json!(73.0));
}

#[test]
fn session_quadrants_from_csv() {
    let mut rows: Vec<(&str, &str, &str, &str, &str)> = Vec::new();
    for i in 0..20 {
        rows.push((if i < 10 { "4" } else { "5" }, "9", "3", "Session A", "Ads"));
    }
    for i in 0..4 {
        rows.push((if i < 2 { "4" } else { "5" }, "9", "3", "Session B", "Ads"));
    }
    let extraction = extract(&legacy_csv(&rows));
    let report = comprehensive_report(&extraction);
    let matrix = section_data(&report.session_matrix);

    let sessions = matrix["sessions"].as_array().unwrap();
    let a = sessions
        .iter()
        .find(|s| s["session"] == json!("Session A"))
        .unwrap();
    let b = sessions
        .iter()
        .find(|s| s["session"] == json!("Session B"))
        .unwrap();
    assert_eq!(a["category"], json!("Star"));
    assert_eq!(b["category"], json!("Hidden Gem"));
    assert_eq!(matrix["quadrants"]["stars"], json!(1));
    assert_eq!(matrix["quadrants"]["hidden_gems"], json!(1));
}

#[test]
fn report_serializes_with_uniform_section_envelopes() {
    let rows: Vec<(&str, &str, &str, &str, &str)> =
        vec![("5", "9", "3", "Keynote", "Social Media")];
    let extraction = extract(&legacy_csv(&rows));
    let report = comprehensive_report(&extraction);
    let value = serde_json::to_value(&report).unwrap();

    for key in [
        "satisfaction",
        "nps",
        "sessions",
        "ratings",
        "feedback",
        "one_word_descriptions",
        "pacing",
        "correlation",
        "session_matrix",
        "discovery_channels",
        "time_preferences",
        "venue_preferences",
        "scatter_data",
    ] {
        let section = value
            .get(key)
            .unwrap_or_else(|| panic!("missing section {key}"));
        let well_formed = section.get("error").is_some()
            || (section.get("chart_type").is_some() && section.get("data").is_some());
        assert!(well_formed, "section {key} has unexpected shape: {section}");
    }
    assert!(value["summary"]["analysis_timestamp"].is_string());
}

#[test]
fn initial_summary_matches_batch_without_full_report() {
    let rows: Vec<(&str, &str, &str, &str, &str)> = vec![
        ("4", "8", "3", "Keynote, Panel", "Friends"),
        ("5", "10", "3", "Keynote", "Friends"),
    ];
    let extraction = extract(&legacy_csv(&rows));
    let summary = initial_summary(&extraction.records);

    assert_eq!(summary.total_responses, 2);
    assert_eq!(summary.average_satisfaction, 4.5);
    assert_eq!(summary.average_recommendation, 9.0);
    assert_eq!(summary.most_attended_sessions[0].session, "Keynote");
    assert_eq!(summary.most_attended_sessions[0].count, 2);
    assert_eq!(summary.response_distribution["satisfaction"]["5"], 1);
}

#[test]
fn reading_from_disk_matches_in_memory_extraction() {
    let rows: Vec<(&str, &str, &str, &str, &str)> = vec![("4", "9", "2", "Keynote", "Ads")];
    let csv = legacy_csv(&rows);

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("feedback.csv");
    std::fs::write(&path, &csv).unwrap();

    let from_disk = feedback_insights::ingestion::extract_feedback_path(&path).unwrap();
    let in_memory = extract(&csv);
    assert_eq!(
        serde_json::to_value(&from_disk.records).unwrap(),
        serde_json::to_value(&in_memory.records).unwrap()
    );
}
