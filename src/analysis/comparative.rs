//! Comparative analysis: aspect ratings against the satisfaction
//! baseline, rating correlations, and pacing effects.

use crate::analysis::stats::{mean, pearson, round1, round2, sample_std};
use crate::analysis::ReportSection;
use crate::ingestion::CanonicalRecord;
use serde::Serialize;
use serde_json::json;
use std::collections::BTreeMap;

/// Aspects correlated and compared against overall satisfaction.
const ASPECTS: [(&str, fn(&CanonicalRecord) -> Option<u8>); 3] = [
    ("Venue", |r| r.venue_rating),
    ("Speaker", |r| r.speaker_rating),
    ("Content", |r| r.content_rating),
];

/// Minimum paired observations before a correlation is reported.
const MIN_CORRELATION_SAMPLES: usize = 10;

/// Mean differences within this band count as neither strength nor
/// weakness; it filters rating noise.
const BASELINE_DEAD_BAND: f64 = 0.1;

#[derive(Clone, Debug, Serialize)]
struct AspectSummary {
    aspect: String,
    average: f64,
    count: usize,
    distribution: BTreeMap<String, usize>,
    vs_overall: f64,
    performance_category: &'static str,
}

/// Compare each aspect's mean rating against the overall-satisfaction
/// baseline, classifying strengths and weaknesses outside a +/-0.1 dead
/// band.
pub fn rating_comparison(records: &[CanonicalRecord]) -> ReportSection {
    let baseline = mean(
        &records
            .iter()
            .map(|r| r.satisfaction as f64)
            .collect::<Vec<_>>(),
    )
    .unwrap_or(0.0);

    let mut summaries: Vec<AspectSummary> = Vec::new();
    for (name, getter) in ASPECTS {
        let values: Vec<f64> = records.iter().filter_map(getter).map(f64::from).collect();
        if values.is_empty() {
            continue;
        }
        let average = mean(&values).unwrap();
        let mut distribution: BTreeMap<String, usize> = BTreeMap::new();
        for v in &values {
            *distribution.entry((*v as u8).to_string()).or_insert(0) += 1;
        }
        summaries.push(AspectSummary {
            aspect: name.to_string(),
            average,
            count: values.len(),
            distribution,
            vs_overall: average - baseline,
            performance_category: classify_vs_baseline(average, baseline),
        });
    }

    if summaries.is_empty() {
        return ReportSection::error("No rating data found");
    }

    let highest = summaries
        .iter()
        .max_by(|a, b| a.average.partial_cmp(&b.average).unwrap())
        .unwrap();
    let lowest = summaries
        .iter()
        .min_by(|a, b| a.average.partial_cmp(&b.average).unwrap())
        .unwrap();
    let highest_rated = highest.aspect.clone();
    let lowest_rated = lowest.aspect.clone();
    let rating_spread = highest.average - lowest.average;
    let strengths: Vec<String> = summaries
        .iter()
        .filter(|s| s.performance_category == "strength")
        .map(|s| s.aspect.clone())
        .collect();
    let weaknesses: Vec<String> = summaries
        .iter()
        .filter(|s| s.performance_category == "weakness")
        .map(|s| s.aspect.clone())
        .collect();

    ReportSection::chart(
        "rating_comparison",
        json!({
            "aspects": summaries.iter().map(|s| s.aspect.clone()).collect::<Vec<_>>(),
            "averages": summaries.iter().map(|s| s.average).collect::<Vec<_>>(),
            "overall_satisfaction": baseline,
            "baseline_data": summaries.iter().map(|s| json!({
                "aspect": s.aspect,
                "value": s.average,
                "baseline": baseline,
                "performance": s.performance_category,
                "difference": s.vs_overall,
            })).collect::<Vec<_>>(),
            "scatter_pairs": aspect_scatter_pairs(records),
            "detailed_comparison": summaries,
            "insights": {
                "highest_rated": highest_rated,
                "lowest_rated": lowest_rated,
                "rating_spread": rating_spread,
                "strengths": strengths,
                "weaknesses": weaknesses,
                "overall_satisfaction": baseline,
            },
        }),
    )
}

fn classify_vs_baseline(average: f64, baseline: f64) -> &'static str {
    if average > baseline + BASELINE_DEAD_BAND {
        "strength"
    } else if average < baseline - BASELINE_DEAD_BAND {
        "weakness"
    } else {
        "adequate"
    }
}

/// Paired aspect-vs-aspect points for scatter plots, one list per aspect
/// pair with both ratings present.
fn aspect_scatter_pairs(records: &[CanonicalRecord]) -> serde_json::Value {
    let mut pairs = serde_json::Map::new();
    let combos: [(&str, usize, usize); 3] = [
        ("venue_vs_speaker", 0, 1),
        ("venue_vs_content", 0, 2),
        ("speaker_vs_content", 1, 2),
    ];
    for (key, a, b) in combos {
        let (name_a, get_a) = ASPECTS[a];
        let (name_b, get_b) = ASPECTS[b];
        let field_a = format!("{}_rating", name_a.to_lowercase());
        let field_b = format!("{}_rating", name_b.to_lowercase());
        let points: Vec<_> = records
            .iter()
            .filter_map(|r| match (get_a(r), get_b(r)) {
                (Some(x), Some(y)) => {
                    let mut point = serde_json::Map::new();
                    point.insert(field_a.clone(), json!(x));
                    point.insert(field_b.clone(), json!(y));
                    Some(serde_json::Value::Object(point))
                }
                _ => None,
            })
            .collect();
        if !points.is_empty() {
            pairs.insert(key.to_string(), json!(points));
        }
    }
    serde_json::Value::Object(pairs)
}

#[derive(Clone, Debug, Serialize)]
struct CorrelationEntry {
    aspect: String,
    correlation: f64,
    impact_level: &'static str,
    sample_size: usize,
}

/// Pearson correlation of each aspect rating against overall
/// satisfaction. Aspects with fewer than ten paired observations are
/// skipped.
pub fn correlation_analysis(records: &[CanonicalRecord]) -> ReportSection {
    if records.is_empty() {
        return ReportSection::error("No satisfaction data found for correlation analysis");
    }
    if !ASPECTS
        .iter()
        .any(|(_, getter)| records.iter().any(|r| getter(r).is_some()))
    {
        return ReportSection::error("No aspect rating data found for correlation analysis");
    }

    let mut correlations: Vec<CorrelationEntry> = Vec::new();
    let mut scatter_data = Vec::new();

    for (name, getter) in ASPECTS {
        let pairs: Vec<(f64, f64)> = records
            .iter()
            .filter_map(|r| getter(r).map(|a| (a as f64, r.satisfaction as f64)))
            .collect();
        if pairs.len() < MIN_CORRELATION_SAMPLES {
            continue;
        }
        let xs: Vec<f64> = pairs.iter().map(|p| p.0).collect();
        let ys: Vec<f64> = pairs.iter().map(|p| p.1).collect();
        let Some(correlation) = pearson(&xs, &ys) else {
            continue;
        };

        correlations.push(CorrelationEntry {
            aspect: name.to_string(),
            correlation,
            impact_level: impact_level(correlation),
            sample_size: pairs.len(),
        });
        scatter_data.push(json!({
            "aspect": name,
            "points": pairs.iter().map(|(a, s)| json!({
                "aspect_rating": a,
                "satisfaction": s,
            })).collect::<Vec<_>>(),
        }));
    }

    if correlations.is_empty() {
        return ReportSection::error(
            "Insufficient paired observations for correlation analysis",
        );
    }

    correlations.sort_by(|a, b| b.correlation.partial_cmp(&a.correlation).unwrap());

    let strongest = &correlations[0];
    let mut insights = vec![
        format!(
            "{} has the strongest correlation ({:.2}%) with overall satisfaction",
            strongest.aspect,
            strongest.correlation * 100.0
        ),
        format!(
            "Improving {} will have the greatest impact on attendee satisfaction",
            strongest.aspect.to_lowercase()
        ),
    ];
    let weak: Vec<String> = correlations
        .iter()
        .filter(|c| c.correlation < 0.5)
        .map(|c| c.aspect.to_lowercase())
        .collect();
    if !weak.is_empty() {
        insights.push(format!(
            "Focus less on {} as they show weaker impact",
            weak.join(", ")
        ));
    }

    let stats = json!({
        "strongest_driver": strongest.aspect,
        "strongest_correlation": strongest.correlation,
        "total_aspects_analyzed": correlations.len(),
    });

    ReportSection::chart(
        "correlation_analysis",
        json!({
            "correlations": correlations,
            "scatter_data": scatter_data,
            "insights": insights,
            "stats": stats,
        }),
    )
}

fn impact_level(correlation: f64) -> &'static str {
    if correlation > 0.7 {
        "high"
    } else if correlation > 0.5 {
        "medium"
    } else {
        "low"
    }
}

#[derive(Clone, Debug, Serialize)]
struct PacingGroup {
    category: u8,
    value: f64,
    count: usize,
    std_dev: f64,
}

/// Group satisfaction by pacing value and rank the groups. A spread above
/// one full point between best and worst group flags a significant pacing
/// effect.
pub fn pacing_analysis(records: &[CanonicalRecord]) -> ReportSection {
    if records.is_empty() {
        return ReportSection::error("No valid pacing/satisfaction data found");
    }

    let mut grouped: BTreeMap<u8, Vec<f64>> = BTreeMap::new();
    for record in records {
        grouped
            .entry(record.pacing)
            .or_default()
            .push(record.satisfaction as f64);
    }

    let mut chart_data: Vec<PacingGroup> = grouped
        .iter()
        .map(|(pacing, sats)| PacingGroup {
            category: *pacing,
            value: round2(mean(sats).unwrap()),
            count: sats.len(),
            std_dev: round2(sample_std(sats)),
        })
        .collect();
    chart_data.sort_by(|a, b| b.value.partial_cmp(&a.value).unwrap());

    let total = records.len();
    let best = chart_data.first().unwrap();
    let worst = chart_data.last().unwrap();

    let mut insights = Vec::new();
    if best.value - worst.value > 1.0 {
        insights.push(format!(
            "Pacing significantly affects satisfaction - '{}' leads to {:.1}/5 satisfaction",
            best.category, best.value
        ));
    }

    let distribution: BTreeMap<String, serde_json::Value> = chart_data
        .iter()
        .map(|g| {
            (
                g.category.to_string(),
                json!({
                    "count": g.count,
                    "avg_satisfaction": g.value,
                    "percentage": round1(g.count as f64 / total as f64 * 100.0),
                }),
            )
        })
        .collect();

    ReportSection::chart(
        "pacing_analysis",
        json!({
            "categories": chart_data.iter().map(|g| g.category).collect::<Vec<_>>(),
            "values": chart_data.iter().map(|g| g.value).collect::<Vec<_>>(),
            "counts": chart_data.iter().map(|g| g.count).collect::<Vec<_>>(),
            "chart_data": chart_data,
            "stats": {
                "total_responses": total,
                "pacing_distribution": distribution,
                "satisfaction_range": {
                    "highest": best.value,
                    "lowest": worst.value,
                    "difference": round2(best.value - worst.value),
                },
                "best_pacing": best.category,
                "worst_pacing": worst.category,
            },
            "insights": insights,
        }),
    )
}
