use thiserror::Error;

#[derive(Error, Debug)]
pub enum FeedbackError {
    #[error("Missing required columns in the CSV: {0:?}")]
    MissingColumns(Vec<String>),

    #[error("Invalid CSV input: {0}")]
    InvalidInput(String),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, FeedbackError>;
