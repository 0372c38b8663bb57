//! Survey feedback normalization and analytics engine.
//!
//! Ingests event-feedback CSV exports in any of the supported header
//! schemas, normalizes them into canonical records with PII stripped, and
//! computes the analytics sections that drive the reporting dashboard.

pub mod analysis;
pub mod error;
pub mod ingestion;

pub use analysis::report::{comprehensive_report, initial_summary};
pub use error::{FeedbackError, Result};
pub use ingestion::{extract_feedback, CanonicalRecord, ExtractionResult};
