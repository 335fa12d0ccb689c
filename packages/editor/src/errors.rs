//! Error types for the editor

use thiserror::Error;

#[derive(Error, Debug)]
pub enum EditorError {
    #[error("Persistence error: {0}")]
    Persist(#[from] mindpad_model::PersistError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
