//! Analysis - Metrics engine and report orchestration.
//!
//! Each metric module exposes pure functions from a normalized record
//! batch to one [`ReportSection`]. Sections are independent: every
//! function detects its own missing inputs and degrades to an error
//! section instead of failing the batch.

pub mod comparative;
pub mod marketing;
pub mod nps;
pub mod preferences;
pub mod report;
pub mod satisfaction;
pub mod sessions;
pub mod stats;
pub mod textual;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Output of one metrics function: chart payload or a descriptive error.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ReportSection {
    Chart { chart_type: String, data: Value },
    Error { error: String },
}

impl ReportSection {
    pub fn chart(chart_type: &str, data: Value) -> Self {
        ReportSection::Chart {
            chart_type: chart_type.to_string(),
            data,
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        ReportSection::Error {
            error: message.into(),
        }
    }

    pub fn is_error(&self) -> bool {
        matches!(self, ReportSection::Error { .. })
    }

    /// Chart payload, if this section succeeded.
    pub fn data(&self) -> Option<&Value> {
        match self {
            ReportSection::Chart { data, .. } => Some(data),
            ReportSection::Error { .. } => None,
        }
    }
}
