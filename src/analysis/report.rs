//! Report Orchestrator - Runs every metrics function over one normalized
//! batch and assembles the composite dashboard report.
//!
//! Sections are isolated: a panic inside one section degrades it to an
//! error entry while the remaining sections still complete. Callers always
//! receive the full report shape.

use crate::analysis::{
    comparative, marketing, nps, preferences, satisfaction, sessions, textual, ReportSection,
};
use crate::ingestion::{CanonicalRecord, ExtractionResult};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::collections::BTreeMap;
use std::panic::{catch_unwind, AssertUnwindSafe};
use uuid::Uuid;

/// Composite analysis report, one section per analytic facet.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Report {
    pub summary: ReportSummary,
    pub satisfaction: ReportSection,
    pub nps: ReportSection,
    pub sessions: ReportSection,
    pub ratings: ReportSection,
    pub feedback: ReportSection,
    pub one_word_descriptions: ReportSection,
    pub pacing: ReportSection,
    pub correlation: ReportSection,
    pub session_matrix: ReportSection,
    pub discovery_channels: ReportSection,
    pub time_preferences: ReportSection,
    pub venue_preferences: ReportSection,
    pub scatter_data: ReportSection,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ReportSummary {
    pub report_id: String,
    pub total_responses: usize,
    pub dropped_rows: usize,
    pub analysis_timestamp: String,
}

/// Run one section behind a panic boundary so an unexpected failure
/// cannot take the rest of the report down.
fn run_section<F>(name: &str, f: F) -> ReportSection
where
    F: FnOnce() -> ReportSection,
{
    match catch_unwind(AssertUnwindSafe(f)) {
        Ok(section) => {
            if let ReportSection::Error { error } = &section {
                tracing::debug!(section = name, error, "section degraded");
            }
            section
        }
        Err(_) => {
            tracing::error!(section = name, "section panicked");
            ReportSection::error(format!("Internal error in {name} analysis"))
        }
    }
}

/// Generate the full dashboard report for an extracted batch.
pub fn comprehensive_report(extraction: &ExtractionResult) -> Report {
    let records = &extraction.records;
    tracing::info!(records = records.len(), "generating comprehensive report");

    Report {
        summary: ReportSummary {
            report_id: Uuid::new_v4().to_string(),
            total_responses: records.len(),
            dropped_rows: extraction.dropped_rows,
            analysis_timestamp: Utc::now().to_rfc3339(),
        },
        satisfaction: run_section("satisfaction", || {
            satisfaction::satisfaction_distribution(records)
        }),
        nps: run_section("nps", || nps::recommendation_analysis(records)),
        sessions: run_section("sessions", || sessions::session_popularity(records)),
        ratings: run_section("ratings", || comparative::rating_comparison(records)),
        feedback: run_section("feedback", || textual::text_insights(records)),
        one_word_descriptions: run_section("one_word_descriptions", || {
            textual::one_word_descriptions(records)
        }),
        pacing: run_section("pacing", || comparative::pacing_analysis(records)),
        correlation: run_section("correlation", || comparative::correlation_analysis(records)),
        session_matrix: run_section("session_matrix", || {
            sessions::session_performance_matrix(records)
        }),
        discovery_channels: run_section("discovery_channels", || {
            marketing::discovery_channel_impact(records)
        }),
        time_preferences: run_section("time_preferences", || {
            preferences::time_slot_preferences(records)
        }),
        venue_preferences: run_section("venue_preferences", || {
            preferences::venue_modality_preferences(records)
        }),
        scatter_data: run_section("scatter_data", || scatter_section(records)),
    }
}

/// Paired satisfaction/recommendation points for scatter plots, restricted
/// to records carrying both values.
fn scatter_section(records: &[CanonicalRecord]) -> ReportSection {
    let points: Vec<_> = records
        .iter()
        .filter_map(|r| {
            r.recommendation_score.map(|score| {
                json!({
                    "x": r.satisfaction,
                    "y": score,
                    "satisfaction": r.satisfaction,
                    "recommendation_score": score,
                    "venue_rating": r.venue_rating,
                    "speaker_rating": r.speaker_rating,
                    "content_rating": r.content_rating,
                })
            })
        })
        .collect();

    ReportSection::chart(
        "satisfaction_vs_recommendation_scatter",
        json!({
            "total_points": points.len(),
            "points": points,
        }),
    )
}

/// Lightweight summary for immediate display after upload, computed
/// without running the metrics engine.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct InitialSummary {
    pub total_responses: usize,
    pub average_satisfaction: f64,
    pub average_recommendation: f64,
    pub response_distribution: BTreeMap<String, BTreeMap<String, usize>>,
    pub most_attended_sessions: Vec<SessionCount>,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct SessionCount {
    pub session: String,
    pub count: usize,
}

pub fn initial_summary(records: &[CanonicalRecord]) -> InitialSummary {
    let total = records.len();

    let average = |values: Vec<f64>| {
        if values.is_empty() {
            0.0
        } else {
            values.iter().sum::<f64>() / values.len() as f64
        }
    };

    let mut satisfaction_counts: BTreeMap<String, usize> = BTreeMap::new();
    for record in records {
        *satisfaction_counts
            .entry(record.satisfaction.to_string())
            .or_insert(0) += 1;
    }
    let mut response_distribution = BTreeMap::new();
    if total > 0 {
        response_distribution.insert("satisfaction".to_string(), satisfaction_counts);
    }

    let mut session_counts: BTreeMap<String, usize> = BTreeMap::new();
    for record in records {
        for session in &record.sessions_attended {
            *session_counts.entry(session.clone()).or_insert(0) += 1;
        }
    }
    let mut ranked: Vec<SessionCount> = session_counts
        .into_iter()
        .map(|(session, count)| SessionCount { session, count })
        .collect();
    ranked.sort_by(|a, b| b.count.cmp(&a.count).then(a.session.cmp(&b.session)));
    ranked.truncate(5);

    InitialSummary {
        total_responses: total,
        average_satisfaction: average(records.iter().map(|r| r.satisfaction as f64).collect()),
        average_recommendation: average(
            records
                .iter()
                .filter_map(|r| r.recommendation_score.map(f64::from))
                .collect(),
        ),
        response_distribution,
        most_attended_sessions: ranked,
    }
}
