use crate::data_store::document::Document;
use crate::data_store::revision::Revision;
use crate::errors::{Result, RevdocError};
use crate::storage::{StoreError, StoreResult};

/// Outcome of one conditional write.
#[derive(Debug, PartialEq, Eq)]
pub enum WriteAttempt {
    /// The store accepted the write under this new revision.
    Accepted(Revision),
    /// Someone else wrote since our read; the revision we sent is stale.
    Conflicted,
}

/// Turns a store read into the current state seen by a transformation.
///
/// `NotFound` becomes `None` (the absence marker). Any other failure ends the
/// upsert as [`RevdocError::StoreRead`].
pub fn classify_read(read: StoreResult<Document>) -> Result<Option<Document>> {
    match read {
        Ok(doc) => Ok(Some(doc)),
        Err(StoreError::NotFound) => Ok(None),
        Err(e) => Err(RevdocError::StoreRead(e)),
    }
}

/// Separates write conflicts, which are retried, from every other failure,
/// which ends the upsert as [`RevdocError::StoreWrite`].
pub fn classify_write(write: StoreResult<Revision>) -> Result<WriteAttempt> {
    match write {
        Ok(rev) => Ok(WriteAttempt::Accepted(rev)),
        Err(StoreError::Conflict) => Ok(WriteAttempt::Conflicted),
        Err(e) => Err(RevdocError::StoreWrite(e)),
    }
}
