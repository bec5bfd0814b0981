use thiserror::Error;

use crate::storage::StoreError;

/// Boxed error type returned by caller-supplied transformations.
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

#[derive(Error, Debug)]
pub enum RevdocError {
    #[error("Missing or empty document id")]
    InvalidId,

    #[error("Store read error: {0}")]
    StoreRead(#[source] StoreError),

    #[error("Store write error: {0}")]
    StoreWrite(#[source] StoreError),

    #[error("Transformation failed: {0}")]
    Transform(#[source] BoxError),

    #[error("Gave up on document {id} after {attempts} conflicting writes")]
    RetriesExhausted { id: String, attempts: u32 },

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

pub type Result<T> = std::result::Result<T, RevdocError>;
