//! Discovery-channel effectiveness analysis.

use crate::analysis::stats::{mean, pearson, round2, round3, sample_std};
use crate::analysis::ReportSection;
use crate::ingestion::CanonicalRecord;
use serde::Serialize;
use serde_json::json;
use std::collections::HashMap;

/// Effectiveness weights: 70% satisfaction quality, 30% reach. Fixed
/// output-compatibility constants.
const QUALITY_WEIGHT: f64 = 0.7;
const REACH_WEIGHT: f64 = 0.3;

/// Minimum observations before the channel/satisfaction correlation is
/// reported.
const MIN_CORRELATION_SAMPLES: usize = 30;

#[derive(Clone, Debug, Serialize)]
struct ChannelStats {
    event_discovery: String,
    avg_satisfaction: f64,
    count: usize,
    std_dev: f64,
    effectiveness_score: f64,
}

/// Rank discovery channels by a weighted blend of attendee satisfaction
/// and reach.
pub fn discovery_channel_impact(records: &[CanonicalRecord]) -> ReportSection {
    let observations: Vec<(&str, f64)> = records
        .iter()
        .filter_map(|r| {
            r.event_discovery
                .as_deref()
                .map(|c| (c, r.satisfaction as f64))
        })
        .collect();

    if observations.is_empty() {
        return ReportSection::error("No event discovery channel data found");
    }

    let mut grouped: HashMap<&str, Vec<f64>> = HashMap::new();
    for &(channel, satisfaction) in &observations {
        grouped.entry(channel).or_default().push(satisfaction);
    }

    let max_count = grouped.values().map(Vec::len).max().unwrap() as f64;
    let mut channels: Vec<ChannelStats> = grouped
        .iter()
        .map(|(channel, sats)| {
            let avg = round2(mean(sats).unwrap());
            let effectiveness =
                ((avg / 5.0) * QUALITY_WEIGHT + (sats.len() as f64 / max_count) * REACH_WEIGHT)
                    * 100.0;
            ChannelStats {
                event_discovery: channel.to_string(),
                avg_satisfaction: avg,
                count: sats.len(),
                std_dev: round2(sample_std(sats)),
                effectiveness_score: round2(effectiveness),
            }
        })
        .collect();
    channels.sort_by(|a, b| {
        b.effectiveness_score
            .partial_cmp(&a.effectiveness_score)
            .unwrap()
            .then(a.event_discovery.cmp(&b.event_discovery))
    });

    // Channels encoded by effectiveness rank give a rough signal of how
    // strongly channel choice tracks satisfaction. Only reported once the
    // sample is large enough to mean anything.
    let correlation = if observations.len() >= MIN_CORRELATION_SAMPLES {
        let rank_of: HashMap<&str, f64> = channels
            .iter()
            .enumerate()
            .map(|(rank, c)| (c.event_discovery.as_str(), rank as f64))
            .collect();
        let encoded: Vec<f64> = observations.iter().map(|(c, _)| rank_of[c]).collect();
        let sats: Vec<f64> = observations.iter().map(|(_, s)| *s).collect();
        pearson(&encoded, &sats).map(round3)
    } else {
        None
    };

    let all_sats: Vec<f64> = observations.iter().map(|(_, s)| *s).collect();

    ReportSection::chart(
        "discovery_channels",
        json!({
            "channels": channels,
            "stats": {
                "total_channels": channels.len(),
                "total_responses": observations.len(),
                "overall_avg_satisfaction": round2(mean(&all_sats).unwrap()),
                "channel_satisfaction_correlation": correlation,
            },
        }),
    )
}
