//! Session-level analytics: attendance popularity and the
//! attendance/satisfaction performance matrix.

use crate::analysis::stats::{mean, median, round1, round2};
use crate::analysis::ReportSection;
use crate::ingestion::CanonicalRecord;
use itertools::Itertools;
use serde::Serialize;
use serde_json::json;
use std::collections::HashMap;

/// How many sessions the popularity ranking reports.
const TOP_SESSIONS: usize = 10;

/// Attendance counts and mean attendee satisfaction for the most popular
/// sessions.
pub fn session_popularity(records: &[CanonicalRecord]) -> ReportSection {
    let mut counts: HashMap<&str, usize> = HashMap::new();
    for record in records {
        for session in &record.sessions_attended {
            *counts.entry(session.as_str()).or_insert(0) += 1;
        }
    }

    if counts.is_empty() {
        return ReportSection::error("No session attendance data found");
    }

    // Count descending, name ascending so equal counts rank
    // deterministically.
    let top: Vec<(&str, usize)> = counts
        .iter()
        .map(|(s, c)| (*s, *c))
        .sorted_by(|a, b| b.1.cmp(&a.1).then(a.0.cmp(b.0)))
        .take(TOP_SESSIONS)
        .collect();

    let avg_satisfaction: Vec<f64> = top
        .iter()
        .map(|(session, _)| {
            let sats: Vec<f64> = records
                .iter()
                .filter(|r| r.sessions_attended.iter().any(|s| s == session))
                .map(|r| r.satisfaction as f64)
                .collect();
            round2(mean(&sats).unwrap_or(0.0))
        })
        .collect();

    let total = records.len();
    let all_counts: Vec<f64> = counts.values().map(|&c| c as f64).collect();

    ReportSection::chart(
        "session_popularity",
        json!({
            "sessions": top.iter().map(|(s, _)| *s).collect::<Vec<_>>(),
            "attendance": top.iter().map(|(_, c)| *c).collect::<Vec<_>>(),
            "average_satisfaction": avg_satisfaction,
            "attendance_rates": top.iter().map(|(session, count)| json!({
                "session": session,
                "count": count,
                "percentage": round1(*count as f64 / total as f64 * 100.0),
            })).collect::<Vec<_>>(),
            "stats": {
                "total_unique_sessions": counts.len(),
                "avg_attendance_per_session": mean(&all_counts).unwrap_or(0.0),
                "most_popular": {
                    "session": top[0].0,
                    "count": top[0].1,
                },
            },
        }),
    )
}

#[derive(Clone, Debug, Serialize)]
struct SessionPerformance {
    session: String,
    attendance: usize,
    avg_satisfaction: f64,
    response_count: usize,
    category: &'static str,
    color: &'static str,
}

/// Median-split every session on attendance and mean satisfaction into
/// four quadrants. Medians are taken over the session-level aggregates;
/// a session sitting exactly on a median falls into the favorable `>=`
/// branch.
pub fn session_performance_matrix(records: &[CanonicalRecord]) -> ReportSection {
    let mut aggregates: HashMap<&str, Vec<f64>> = HashMap::new();
    for record in records {
        for session in &record.sessions_attended {
            aggregates
                .entry(session.as_str())
                .or_default()
                .push(record.satisfaction as f64);
        }
    }

    if aggregates.is_empty() {
        return ReportSection::error("No valid session performance data found");
    }

    let mut raw: Vec<(&str, usize, f64)> = aggregates
        .iter()
        .map(|(session, sats)| (*session, sats.len(), round2(mean(sats).unwrap())))
        .collect();
    raw.sort_by(|a, b| b.1.cmp(&a.1).then(a.0.cmp(b.0)));

    let attendances: Vec<f64> = raw.iter().map(|(_, a, _)| *a as f64).collect();
    let satisfactions: Vec<f64> = raw.iter().map(|(_, _, s)| *s).collect();
    let median_attendance = median(&attendances).unwrap();
    let median_satisfaction = median(&satisfactions).unwrap();

    let sessions: Vec<SessionPerformance> = raw
        .iter()
        .map(|(session, attendance, avg)| {
            let (category, color) = classify_quadrant(
                *attendance as f64 >= median_attendance,
                *avg >= median_satisfaction,
            );
            SessionPerformance {
                session: session.to_string(),
                attendance: *attendance,
                avg_satisfaction: *avg,
                response_count: *attendance,
                category,
                color,
            }
        })
        .collect();

    let count_of = |category: &str| sessions.iter().filter(|s| s.category == category).count();
    let quadrants = json!({
        "stars": count_of("Star"),
        "hidden_gems": count_of("Hidden Gem"),
        "crowd_favorites": count_of("Crowd Favorite"),
        "needs_improvement": count_of("Needs Improvement"),
    });

    ReportSection::chart(
        "session_performance_matrix",
        json!({
            "sessions": sessions,
            "quadrants": quadrants,
            "thresholds": {
                "median_attendance": round1(median_attendance),
                "median_satisfaction": round2(median_satisfaction),
            },
            "stats": {
                "total_sessions": attendances.len(),
                "avg_attendance": round1(mean(&attendances).unwrap()),
                "avg_satisfaction": round2(mean(&satisfactions).unwrap()),
            },
        }),
    )
}

fn classify_quadrant(high_attendance: bool, high_satisfaction: bool) -> (&'static str, &'static str) {
    match (high_attendance, high_satisfaction) {
        (true, true) => ("Star", "#4CAF50"),
        (false, true) => ("Hidden Gem", "#2196F3"),
        (true, false) => ("Crowd Favorite", "#FF9800"),
        (false, false) => ("Needs Improvement", "#F44336"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn attendee(satisfaction: u8, sessions: &[&str]) -> CanonicalRecord {
        let mut r = CanonicalRecord::new(satisfaction, 3);
        r.sessions_attended = sessions.iter().map(|s| s.to_string()).collect();
        r
    }

    #[test]
    fn popularity_ranks_by_attendance() {
        let records = vec![
            attendee(5, &["Keynote", "Workshop"]),
            attendee(4, &["Keynote"]),
            attendee(3, &["Keynote", "Panel"]),
        ];
        let section = session_popularity(&records);
        let data = section.data().unwrap();
        assert_eq!(data["sessions"][0], json!("Keynote"));
        assert_eq!(data["attendance"][0], json!(3));
        assert_eq!(data["average_satisfaction"][0], json!(4.0));
        assert_eq!(data["stats"]["total_unique_sessions"], json!(3));
    }

    #[test]
    fn no_sessions_degrades_to_error() {
        let records = vec![CanonicalRecord::new(4, 3)];
        assert!(session_popularity(&records).is_error());
        assert!(session_performance_matrix(&records).is_error());
    }

    #[test]
    fn quadrants_split_on_session_level_medians() {
        // Session A: attendance 20, satisfaction 4.5.
        // Session B: attendance 4, satisfaction 4.5.
        // Medians 12 / 4.5: A is a Star, B a Hidden Gem (satisfaction
        // ties sit on the favorable side).
        let mut records = Vec::new();
        for i in 0..20 {
            records.push(attendee(if i < 10 { 4 } else { 5 }, &["A"]));
        }
        for i in 0..4 {
            records.push(attendee(if i < 2 { 4 } else { 5 }, &["B"]));
        }
        let section = session_performance_matrix(&records);
        let data = section.data().unwrap();
        let sessions = data["sessions"].as_array().unwrap();
        let a = sessions.iter().find(|s| s["session"] == json!("A")).unwrap();
        let b = sessions.iter().find(|s| s["session"] == json!("B")).unwrap();
        assert_eq!(a["category"], json!("Star"));
        assert_eq!(b["category"], json!("Hidden Gem"));
        assert_eq!(data["thresholds"]["median_attendance"], json!(12.0));
        assert_eq!(data["thresholds"]["median_satisfaction"], json!(4.5));
    }

    #[test]
    fn low_attendance_low_satisfaction_needs_improvement() {
        let mut records = Vec::new();
        for _ in 0..10 {
            records.push(attendee(5, &["Big Hit"]));
        }
        records.push(attendee(2, &["Niche"]));
        let section = session_performance_matrix(&records);
        let data = section.data().unwrap();
        let sessions = data["sessions"].as_array().unwrap();
        let niche = sessions
            .iter()
            .find(|s| s["session"] == json!("Niche"))
            .unwrap();
        assert_eq!(niche["category"], json!("Needs Improvement"));
    }

    #[test]
    fn median_ties_fall_into_favorable_branch() {
        // One session is its own median on both axes and must be a Star.
        let records = vec![attendee(4, &["Solo"]), attendee(4, &["Solo"])];
        let section = session_performance_matrix(&records);
        let data = section.data().unwrap();
        assert_eq!(data["sessions"][0]["category"], json!("Star"));
        assert_eq!(data["quadrants"]["stars"], json!(1));
    }

    #[test]
    fn matrix_is_deterministic() {
        let records = vec![
            attendee(5, &["A", "B"]),
            attendee(3, &["B"]),
            attendee(4, &["A", "C"]),
        ];
        let first = serde_json::to_string(&session_performance_matrix(&records)).unwrap();
        let second = serde_json::to_string(&session_performance_matrix(&records)).unwrap();
        assert_eq!(first, second);
    }
}
