use thiserror::Error;

#[derive(Error, Debug)]
pub enum SimError {
    #[error("IO Error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV Error: {0}")]
    Csv(#[from] csv::Error),

    #[error("JSON Parsing Error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Configuration Error: {0}")]
    Config(String),

    #[error("Internal Consistency Error: {0}")]
    Invariant(String),
}

pub type SimResult<T> = Result<T, SimError>;
