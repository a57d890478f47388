use thiserror::Error;

use crate::validators::FieldErrors;

#[derive(Error, Debug)]
pub enum SpendError {
    #[error("Database error: {0}")]
    Db(#[from] rusqlite::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid fields:\n{0}")]
    Validation(FieldErrors),

    #[error("{0}")]
    Import(String),

    #[error("Invalid setting: {0}")]
    Settings(String),

    #[error("Config error: {0}")]
    Config(String),
}

impl From<FieldErrors> for SpendError {
    fn from(errors: FieldErrors) -> Self {
        SpendError::Validation(errors)
    }
}

pub type Result<T> = std::result::Result<T, SpendError>;
