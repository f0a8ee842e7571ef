use thiserror::Error;

#[derive(Error, Debug)]
pub enum AnalysisError {
    #[error("unknown education level: {0}")]
    UnknownEducation(String),
    #[error("years of experience must not be negative, got {0}")]
    NegativeExperience(i64),
    #[error("proposed price must be a positive number, got {0}")]
    InvalidPrice(f64),
    #[error("corpus query failed: {0}")]
    Corpus(#[from] anyhow::Error),
}

pub type Result<T> = std::result::Result<T, AnalysisError>;
