//! Field Normalizer - Coerces mapped raw values into typed canonical
//! records.
//!
//! Ratings arrive either numeric ("4") or as labelled text
//! ("3 - Meets Expectations"); the first contiguous digit run is taken as
//! the value. Pacing answers above 5 come from 1-10 scale templates and
//! are rescaled onto 1-5. A batch is assumed to come from a single export
//! template; a genuine 1-10-scale answer of exactly 5 cannot be told apart
//! from a 1-5-scale answer, so values of 5 and below always pass through
//! unchanged.
//!
//! Rows whose required ratings carry no extractable number are dropped and
//! counted, never silently absorbed.

use crate::ingestion::mapper::{ColumnPlan, MappedRecord};
use crate::ingestion::record::{CanonicalRecord, ExtractionResult, NO_COMMENT};
use crate::ingestion::schema::CanonicalField;
use lazy_static::lazy_static;
use regex::Regex;
use std::collections::BTreeMap;

lazy_static! {
    static ref DIGIT_RUN: Regex = Regex::new(r"\d+").unwrap();
}

/// First contiguous digit run in a cell, if any.
fn extract_number(value: &str) -> Option<i64> {
    DIGIT_RUN
        .find(value)
        .and_then(|m| m.as_str().parse::<i64>().ok())
}

fn clamp_rating(value: i64, min: i64, max: i64) -> u8 {
    value.clamp(min, max) as u8
}

/// Rescale a pacing answer onto 1-5. Values above 5 are 1-10-scale input:
/// divide by 2 and round to nearest. Idempotent for already-normalized
/// values.
fn normalize_pacing(value: i64) -> u8 {
    let value = if value > 5 {
        (value as f64 / 2.0).round() as i64
    } else {
        value
    };
    clamp_rating(value, 1, 5)
}

fn split_sessions(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

fn text_or_placeholder(value: Option<&String>) -> String {
    match value {
        Some(v) if !v.trim().is_empty() => v.trim().to_string(),
        _ => NO_COMMENT.to_string(),
    }
}

fn optional_text(value: Option<&String>) -> Option<String> {
    value
        .map(|v| v.trim())
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}

const METADATA_FIELDS: [CanonicalField; 12] = [
    CanonicalField::CourseYear,
    CanonicalField::WouldJoin,
    CanonicalField::GainedInsights,
    CanonicalField::PlanToImplement,
    CanonicalField::FeltIncluded,
    CanonicalField::FamiliarityLevel,
    CanonicalField::EventName,
    CanonicalField::EventDate,
    CanonicalField::EventType,
    CanonicalField::Chapter,
    CanonicalField::ChapterCountry,
    CanonicalField::City,
];

/// Normalize one mapped row. `None` means a required rating could not be
/// coerced and the row must be dropped.
fn normalize_record(plan: &ColumnPlan, record: &MappedRecord) -> Option<CanonicalRecord> {
    let satisfaction = extract_number(record.get(&CanonicalField::Satisfaction)?)?;
    let pacing = extract_number(record.get(&CanonicalField::Pacing)?)?;

    // Unanswered recommendation scores fall to 0, the bottom of the 0-10
    // range. Optional 1-5 aspect ratings stay absent instead: a clamped
    // zero would fabricate a 1-star observation.
    let recommendation_score = plan.has(CanonicalField::RecommendationScore).then(|| {
        let raw = record
            .get(&CanonicalField::RecommendationScore)
            .and_then(|v| extract_number(v))
            .unwrap_or(0);
        clamp_rating(raw, 0, 10)
    });

    let aspect = |field: CanonicalField| -> Option<u8> {
        record
            .get(&field)
            .and_then(|v| extract_number(v))
            .map(|v| clamp_rating(v, 1, 5))
    };

    let mut extra = BTreeMap::new();
    for field in METADATA_FIELDS {
        if let Some(value) = optional_text(record.get(&field)) {
            extra.insert(field.as_str().to_string(), value);
        }
    }

    Some(CanonicalRecord {
        satisfaction: clamp_rating(satisfaction, 1, 5),
        pacing: normalize_pacing(pacing),
        recommendation_score,
        venue_rating: aspect(CanonicalField::VenueRating),
        speaker_rating: aspect(CanonicalField::SpeakerRating),
        content_rating: aspect(CanonicalField::ContentRating),
        sessions_attended: record
            .get(&CanonicalField::SessionsAttended)
            .map(|v| split_sessions(v))
            .unwrap_or_default(),
        positive_feedback: text_or_placeholder(record.get(&CanonicalField::PositiveFeedback)),
        improvement_feedback: text_or_placeholder(record.get(&CanonicalField::ImprovementFeedback)),
        additional_comments: text_or_placeholder(record.get(&CanonicalField::AdditionalComments)),
        preferred_time: optional_text(record.get(&CanonicalField::PreferredTime)),
        preferred_venue: optional_text(record.get(&CanonicalField::PreferredVenue)),
        event_discovery: optional_text(record.get(&CanonicalField::EventDiscovery)),
        one_word_desc: optional_text(record.get(&CanonicalField::OneWordDesc)),
        extra,
    })
}

/// Normalize a mapped batch, dropping rows whose required ratings cannot
/// be coerced.
pub fn normalize_batch(plan: &ColumnPlan, mapped: &[MappedRecord]) -> ExtractionResult {
    let mut records = Vec::with_capacity(mapped.len());
    let mut dropped_rows = 0;

    for record in mapped {
        match normalize_record(plan, record) {
            Some(normalized) => records.push(normalized),
            None => dropped_rows += 1,
        }
    }

    if dropped_rows > 0 {
        tracing::warn!(
            dropped_rows,
            kept = records.len(),
            "dropped rows with uncoercible required ratings"
        );
    }

    ExtractionResult {
        records,
        dropped_rows,
    }
}
