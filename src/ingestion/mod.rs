//! Ingestion - Raw survey exports to canonical records.
//!
//! Pipeline: CSV reader -> schema mapper -> field normalizer. Each stage
//! is a pure transformation; nothing here touches the network or mutates
//! its input.

pub mod mapper;
pub mod normalizer;
pub mod reader;
pub mod record;
pub mod schema;

pub use mapper::{map_batch, ColumnPlan, MappedRecord};
pub use normalizer::normalize_batch;
pub use reader::{read_csv_path, read_csv_reader, read_csv_str, validate_csv_path, RawBatch};
pub use record::{CanonicalRecord, ExtractionResult, NO_COMMENT};
pub use schema::{CanonicalField, FIELD_REGISTRY, PII_HEADERS, REQUIRED_FIELDS};

use crate::error::Result;

/// Run the full extraction pipeline over a raw batch: map headers,
/// validate required fields, normalize rows.
pub fn extract_feedback(batch: &RawBatch) -> Result<ExtractionResult> {
    let (plan, mapped) = map_batch(batch)?;
    let result = normalize_batch(&plan, &mapped);
    tracing::info!(
        records = result.records.len(),
        dropped = result.dropped_rows,
        "extracted feedback batch"
    );
    Ok(result)
}

/// Convenience wrapper: read a CSV file and extract it in one call.
pub fn extract_feedback_path<P: AsRef<std::path::Path>>(path: P) -> Result<ExtractionResult> {
    let batch = read_csv_path(path)?;
    extract_feedback(&batch)
}
