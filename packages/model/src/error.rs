//! Error types for document persistence

use thiserror::Error;

#[derive(Error, Debug)]
pub enum PersistError {
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Document is not a JSON array or object")]
    UnsupportedShape,
}
