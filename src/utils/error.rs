// src/utils/error.rs
use thiserror::Error;

// Define specific error types for different parts of the application
#[derive(Error, Debug)]
pub enum DateError {
    #[error("No statement date or date range found in document text")]
    NoDateFound,
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Input is missing the '{0}' key. Please include it and retry your request.")]
    MissingField(&'static str),

    #[error("Invalid fiscal start '{0}': expected MM-DD with a real calendar day")]
    InvalidFiscalStart(String),
}

#[derive(Error, Debug)]
pub enum AnalysisError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Analysis result not found: {0}")]
    NotFound(String),

    #[error("Failed to parse analysis result: {0}")]
    Parse(#[from] serde_json::Error),
}

#[derive(Error, Debug)]
pub enum StorageError {
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(String),
}

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error), // Automatically convert IO errors

    #[error("Loading analysis failed: {0}")]
    Analysis(#[from] AnalysisError),

    #[error("Date repair failed: {0}")]
    Date(#[from] DateError),

    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),
}
