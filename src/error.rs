//! Error types for ClimateScope.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Authentication failed: {0}")]
    Auth(String),

    #[error("Invalid registration: {0}")]
    Validation(String),

    #[error("Dataset error: {0}")]
    DataLoad(String),

    #[error("No weather records for {0:?}")]
    EmptySelection(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
