use thiserror::Error;

/// Main error type for Codetrail operations
#[derive(Error, Debug)]
pub enum CodetrailError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Pattern error: {0}")]
    Pattern(#[from] regex::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Path traversal detected: {0}")]
    PathTraversal(String),

    #[error("File is skipped by repository filters: {0}")]
    SkippedFile(String),

    #[error("Branch index {index} out of range (options: {options})")]
    BranchIndexOutOfRange { index: usize, options: usize },

    #[error("Step index {index} out of range (steps: {steps})")]
    StepIndexOutOfRange { index: usize, steps: usize },
}

pub type Result<T> = std::result::Result<T, CodetrailError>;
