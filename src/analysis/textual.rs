//! Free-text feedback analysis: one-word descriptions and word
//! frequencies.

use crate::analysis::stats::{mean, round1};
use crate::analysis::ReportSection;
use crate::ingestion::{CanonicalRecord, NO_COMMENT};
use itertools::Itertools;
use lazy_static::lazy_static;
use regex::Regex;
use serde_json::json;
use std::collections::HashMap;

/// Words carrying no signal, excluded from frequency counts.
const STOP_WORDS: [&str; 40] = [
    "the", "and", "or", "but", "in", "on", "at", "to", "for", "of", "with", "by", "a", "an", "is",
    "was", "are", "were", "be", "been", "have", "has", "had", "do", "did", "will", "would",
    "could", "should", "it", "this", "that", "these", "those", "i", "you", "he", "she", "we",
    "they",
];

/// How many frequent words the text-insight section reports.
const TOP_WORDS: usize = 20;

lazy_static! {
    static ref WORD: Regex = Regex::new(r"\b[a-zA-Z]{3,}\b").unwrap();
}

fn title_case(text: &str) -> String {
    text.split_whitespace()
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => {
                    first.to_uppercase().collect::<String>() + &chars.as_str().to_lowercase()
                }
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

fn is_placeholder(text: &str) -> bool {
    text.is_empty() || text == NO_COMMENT || text == "No comment provided"
}

/// Count-descending, then alphabetical, so equal counts order
/// deterministically.
fn ranked_counts(counts: HashMap<String, usize>) -> Vec<(String, usize)> {
    counts
        .into_iter()
        .sorted_by(|a, b| b.1.cmp(&a.1).then(a.0.cmp(&b.0)))
        .collect()
}

/// One-word event descriptions, cleaned and counted for word-cloud
/// display.
pub fn one_word_descriptions(records: &[CanonicalRecord]) -> ReportSection {
    let descriptions: Vec<String> = records
        .iter()
        .filter_map(|r| r.one_word_desc.as_deref())
        .map(str::trim)
        .filter(|d| !is_placeholder(d))
        .map(title_case)
        .collect();

    if descriptions.is_empty() {
        return ReportSection::error("No valid one-word descriptions found");
    }

    let mut counts: HashMap<String, usize> = HashMap::new();
    for description in &descriptions {
        *counts.entry(description.clone()).or_insert(0) += 1;
    }
    let ranked = ranked_counts(counts);

    let word_cloud: Vec<_> = ranked
        .iter()
        .map(|(word, count)| json!({ "word": word, "count": count }))
        .collect();

    ReportSection::chart(
        "one_word_descriptions",
        json!({
            "word_cloud": word_cloud,
            "top_descriptions": word_cloud.iter().take(10).collect::<Vec<_>>(),
            "stats": {
                "total_responses": descriptions.len(),
                "unique_words": ranked.len(),
                "most_common": { "word": ranked[0].0, "count": ranked[0].1 },
                "response_rate": round1(descriptions.len() as f64 / records.len() as f64 * 100.0),
            },
        }),
    )
}

/// Word frequencies and samples across all free-text feedback fields.
pub fn text_insights(records: &[CanonicalRecord]) -> ReportSection {
    if records.is_empty() {
        return ReportSection::error("No text feedback found");
    }

    let fields: [(&str, fn(&CanonicalRecord) -> &str); 3] = [
        ("positive_feedback", |r| &r.positive_feedback),
        ("improvement_feedback", |r| &r.improvement_feedback),
        ("additional_comments", |r| &r.additional_comments),
    ];

    let mut all_feedback: Vec<&str> = Vec::new();
    let mut feedback_counts = serde_json::Map::new();
    let mut sample_feedback = serde_json::Map::new();

    for (name, getter) in fields {
        let texts: Vec<&str> = records
            .iter()
            .map(|r| getter(r).trim())
            .filter(|t| !is_placeholder(t))
            .collect();
        feedback_counts.insert(display_name(name), json!(texts.len()));
        sample_feedback.insert(
            name.to_string(),
            json!(texts.iter().take(3).collect::<Vec<_>>()),
        );
        all_feedback.extend(texts);
    }

    let word_frequency: Vec<_> = ranked_counts(common_words(&all_feedback))
        .into_iter()
        .take(TOP_WORDS)
        .map(|(word, count)| json!({ "word": word, "count": count }))
        .collect();

    let lengths: Vec<f64> = all_feedback
        .iter()
        .map(|t| t.split_whitespace().count() as f64)
        .collect();

    ReportSection::chart(
        "text_insights",
        json!({
            "feedback_counts": feedback_counts,
            "word_frequency": word_frequency,
            "sample_feedback": sample_feedback,
            "stats": {
                "total_text_responses": all_feedback.len(),
                "avg_response_length": mean(&lengths).unwrap_or(0.0),
            },
        }),
    )
}

fn display_name(field: &str) -> String {
    title_case(&field.replace('_', " "))
}

/// Lowercase alphabetic words of three or more letters, stop words
/// removed.
fn common_words(texts: &[&str]) -> HashMap<String, usize> {
    let mut counts: HashMap<String, usize> = HashMap::new();
    for text in texts {
        for m in WORD.find_iter(text) {
            let word = m.as_str().to_lowercase();
            if STOP_WORDS.contains(&word.as_str()) {
                continue;
            }
            *counts.entry(word).or_insert(0) += 1;
        }
    }
    counts
}
