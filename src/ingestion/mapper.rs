//! Schema Mapper - Resolves raw export headers onto canonical fields.
//!
//! Mapping happens once per batch: the header row is resolved into a
//! column plan, PII columns are discarded, and required-field presence is
//! validated before any row is touched. Unknown headers are ignored so new
//! export template columns cannot break extraction.

use crate::error::{FeedbackError, Result};
use crate::ingestion::reader::RawBatch;
use crate::ingestion::schema::{CanonicalField, FIELD_REGISTRY, PII_HEADERS, REQUIRED_FIELDS};
use std::collections::HashMap;

/// One response with raw cell values keyed by canonical field. Values are
/// still unnormalized strings.
pub type MappedRecord = HashMap<CanonicalField, String>;

/// Resolved header plan for one batch: canonical field to source column
/// index.
#[derive(Clone, Debug)]
pub struct ColumnPlan {
    columns: HashMap<CanonicalField, usize>,
}

impl ColumnPlan {
    /// Resolve a header row against the registry.
    ///
    /// PII columns are excluded unconditionally. When several present
    /// headers map to the same canonical field, the registry entry declared
    /// first claims the field and the rest are ignored.
    pub fn resolve(headers: &[String]) -> Result<Self> {
        let pii_columns: Vec<&str> = headers
            .iter()
            .map(String::as_str)
            .filter(|h| PII_HEADERS.contains(h))
            .collect();
        if !pii_columns.is_empty() {
            tracing::debug!(columns = ?pii_columns, "dropping PII columns");
        }

        let mut columns: HashMap<CanonicalField, usize> = HashMap::new();
        for (header, field) in FIELD_REGISTRY.iter() {
            if columns.contains_key(field) {
                continue;
            }
            if let Some(idx) = headers.iter().position(|h| h == header) {
                columns.insert(*field, idx);
            }
        }

        let missing: Vec<String> = REQUIRED_FIELDS
            .iter()
            .filter(|f| !columns.contains_key(f))
            .map(|f| f.as_str().to_string())
            .collect();
        if !missing.is_empty() {
            let mut missing = missing;
            missing.sort();
            return Err(FeedbackError::MissingColumns(missing));
        }

        Ok(Self { columns })
    }

    pub fn column(&self, field: CanonicalField) -> Option<usize> {
        self.columns.get(&field).copied()
    }

    pub fn has(&self, field: CanonicalField) -> bool {
        self.columns.contains_key(&field)
    }
}

/// Map a raw batch into canonical-keyed records. The input batch is read
/// only; output rows are fresh allocations.
pub fn map_batch(batch: &RawBatch) -> Result<(ColumnPlan, Vec<MappedRecord>)> {
    let plan = ColumnPlan::resolve(&batch.headers)?;

    let mut records = Vec::with_capacity(batch.len());
    for row in 0..batch.len() {
        let mut record = MappedRecord::new();
        for (field, &col) in plan.columns.iter() {
            record.insert(*field, batch.cell(row, col).to_string());
        }
        records.push(record);
    }

    Ok((plan, records))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ingestion::reader::read_csv_str;

    fn minimal_csv() -> &'static str {
        "Overall Satisfaction,What did you like most about the event?,What could be improved?,Pacing\n\
         5,Great talks,Nothing,3\n"
    }

    #[test]
    fn maps_minimal_required_schema() {
        let batch = read_csv_str(minimal_csv()).unwrap();
        let (plan, records) = map_batch(&batch).unwrap();
        assert!(plan.has(CanonicalField::Satisfaction));
        assert_eq!(records.len(), 1);
        assert_eq!(records[0][&CanonicalField::Satisfaction], "5");
        assert_eq!(records[0][&CanonicalField::Pacing], "3");
    }

    #[test]
    fn missing_required_columns_reported_sorted() {
        let batch = read_csv_str("Overall Satisfaction,Pacing\n4,2\n").unwrap();
        let err = map_batch(&batch).unwrap_err();
        match err {
            FeedbackError::MissingColumns(cols) => {
                assert_eq!(cols, vec!["improvement_feedback", "positive_feedback"]);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn pii_columns_never_mapped() {
        let csv = "Email,Overall Satisfaction,What did you like most about the event?,What could be improved?,Pacing\n\
                   a@example.com,5,Great,Nothing,3\n";
        let batch = read_csv_str(csv).unwrap();
        let (_, records) = map_batch(&batch).unwrap();
        for record in &records {
            for value in record.values() {
                assert_ne!(value, "a@example.com");
            }
        }
    }

    #[test]
    fn first_registry_entry_wins_on_duplicate_mapping() {
        // Both headers resolve to satisfaction; the legacy form header is
        // declared first and must claim the field.
        let csv = "\"Overall, how satisfied were you with this event?\",Overall Satisfaction,What did you like most about the event?,What could be improved?,Pacing\n\
                   1,5,Great,Nothing,3\n";
        let batch = read_csv_str(csv).unwrap();
        let (_, records) = map_batch(&batch).unwrap();
        assert_eq!(records[0][&CanonicalField::Satisfaction], "5");
    }

    #[test]
    fn unknown_headers_ignored() {
        let csv = "Mystery Column,Overall Satisfaction,What did you like most about the event?,What could be improved?,Pacing\n\
                   x,4,Great,Nothing,2\n";
        let batch = read_csv_str(csv).unwrap();
        let (plan, records) = map_batch(&batch).unwrap();
        assert_eq!(records[0].len(), 4);
        assert!(plan.has(CanonicalField::Satisfaction));
    }
}
