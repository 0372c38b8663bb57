//! Canonical record types produced by the extraction pipeline.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Placeholder substituted for blank free-text answers so downstream text
/// analysis can filter non-answers deterministically.
pub const NO_COMMENT: &str = "No comment";

/// One fully normalized survey response. Rating fields are clamped into
/// their declared ranges; PII never reaches this struct.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct CanonicalRecord {
    /// Overall satisfaction, 1-5.
    pub satisfaction: u8,
    /// Event pacing, 1-5 after scale reconciliation.
    pub pacing: u8,
    /// Net-promoter style score, 0-10.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub recommendation_score: Option<u8>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub venue_rating: Option<u8>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub speaker_rating: Option<u8>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content_rating: Option<u8>,
    /// Sessions the respondent attended. Always a list, possibly empty.
    #[serde(default)]
    pub sessions_attended: Vec<String>,
    pub positive_feedback: String,
    pub improvement_feedback: String,
    pub additional_comments: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub preferred_time: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub preferred_venue: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub event_discovery: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub one_word_desc: Option<String>,
    /// Non-analytic metadata carried for display and filtering (event
    /// name, chapter, city, course/year, ...), keyed by canonical field
    /// name.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub extra: BTreeMap<String, String>,
}

impl CanonicalRecord {
    /// Convenience constructor used by tests and fixtures: required fields
    /// only, everything else empty.
    pub fn new(satisfaction: u8, pacing: u8) -> Self {
        Self {
            satisfaction,
            pacing,
            recommendation_score: None,
            venue_rating: None,
            speaker_rating: None,
            content_rating: None,
            sessions_attended: Vec::new(),
            positive_feedback: NO_COMMENT.to_string(),
            improvement_feedback: NO_COMMENT.to_string(),
            additional_comments: NO_COMMENT.to_string(),
            preferred_time: None,
            preferred_venue: None,
            event_discovery: None,
            one_word_desc: None,
            extra: BTreeMap::new(),
        }
    }
}

/// Output of the extraction pipeline: the normalized batch plus how many
/// rows were dropped because a required field could not be coerced.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ExtractionResult {
    pub records: Vec<CanonicalRecord>,
    pub dropped_rows: usize,
}
