//! CSV Reader - Materializes raw survey exports into an in-memory batch.

use crate::error::{FeedbackError, Result};
use csv::ReaderBuilder;
use std::io::Read;
use std::path::Path;

/// A raw tabular batch: one trimmed header row plus string cells, exactly
/// as exported. Produced here and consumed read-only by the schema mapper.
#[derive(Clone, Debug)]
pub struct RawBatch {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl RawBatch {
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Cell at (row, column), empty string for cells a ragged row does not
    /// carry.
    pub fn cell(&self, row: usize, col: usize) -> &str {
        self.rows[row].get(col).map(String::as_str).unwrap_or("")
    }
}

/// Read a batch from any byte source.
pub fn read_csv_reader<R: Read>(reader: R) -> Result<RawBatch> {
    let mut rdr = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(reader);

    let headers = rdr
        .headers()?
        .iter()
        .map(|h| h.trim().to_string())
        .collect::<Vec<_>>();

    let mut rows = Vec::new();
    for record in rdr.records() {
        let record = record?;
        rows.push(record.iter().map(|c| c.to_string()).collect());
    }

    tracing::debug!(rows = rows.len(), columns = headers.len(), "read CSV batch");
    Ok(RawBatch { headers, rows })
}

/// Read a batch from CSV text already in memory.
pub fn read_csv_str(csv_text: &str) -> Result<RawBatch> {
    read_csv_reader(csv_text.as_bytes())
}

/// Read a batch from a file path, after cheap validation of the path and
/// header row.
pub fn read_csv_path<P: AsRef<Path>>(path: P) -> Result<RawBatch> {
    let path = path.as_ref();
    validate_csv_path(path)?;
    let file = std::fs::File::open(path)?;
    read_csv_reader(file)
}

/// Checks a CSV file is plausible before full processing: it must exist,
/// carry a `.csv` extension, and yield a header row.
pub fn validate_csv_path(path: &Path) -> Result<()> {
    if !path.exists() {
        return Err(FeedbackError::InvalidInput(format!(
            "File not found: {}",
            path.display()
        )));
    }
    let is_csv = path
        .extension()
        .map(|ext| ext.eq_ignore_ascii_case("csv"))
        .unwrap_or(false);
    if !is_csv {
        return Err(FeedbackError::InvalidInput(
            "File must be a CSV file".to_string(),
        ));
    }
    let file = std::fs::File::open(path)?;
    let mut rdr = ReaderBuilder::new().has_headers(true).from_reader(file);
    rdr.headers()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reads_headers_and_rows() {
        let batch = read_csv_str("A,B\n1,2\n3,4\n").unwrap();
        assert_eq!(batch.headers, vec!["A", "B"]);
        assert_eq!(batch.len(), 2);
        assert_eq!(batch.cell(1, 0), "3");
    }

    #[test]
    fn trims_header_whitespace() {
        let batch = read_csv_str(" A , B \nx,y\n").unwrap();
        assert_eq!(batch.headers, vec!["A", "B"]);
    }

    #[test]
    fn short_rows_read_as_empty_cells() {
        let batch = read_csv_str("A,B,C\n1,2\n").unwrap();
        assert_eq!(batch.cell(0, 2), "");
    }

    #[test]
    fn rejects_non_csv_extension() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("data.txt");
        std::fs::write(&path, "A,B\n1,2\n").unwrap();
        let err = validate_csv_path(&path).unwrap_err();
        assert!(matches!(err, FeedbackError::InvalidInput(_)));
    }

    #[test]
    fn rejects_missing_file() {
        let err = validate_csv_path(Path::new("/nonexistent/f.csv")).unwrap_err();
        assert!(matches!(err, FeedbackError::InvalidInput(_)));
    }
}
