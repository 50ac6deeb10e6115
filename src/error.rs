//! Crate error type

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("The frame rate has to be between 1 and 60 (got {0})")]
    InvalidFrameRate(u32),

    #[error("World document has no `{0}` record")]
    MissingRecord(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Platform error: {0}")]
    Platform(String),
}

pub type Result<T> = std::result::Result<T, Error>;
