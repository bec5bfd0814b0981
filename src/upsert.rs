use log::{debug, trace};

use crate::conflict::detection::{WriteAttempt, classify_read, classify_write};
use crate::conflict::resolution::ConflictResolution;
use crate::data_store::document::{Document, DocumentId, Fields};
use crate::data_store::revision::Revision;
use crate::errors::{BoxError, Result, RevdocError};
use crate::storage::DocumentStore;

/// What a transformation returns: `Ok(None)` leaves the store untouched,
/// `Ok(Some(fields))` is the content to write.
pub type DiffResult = std::result::Result<Option<Fields>, BoxError>;

/// Terminal outcome of an upsert that did not fail.
#[derive(Debug, Clone, PartialEq)]
pub enum Upserted {
    /// The transformation declined to change anything. Holds the document as
    /// it was read, or `None` if there was no document.
    Unchanged(Option<Document>),
    /// The write was accepted; the document carries its new revision.
    Updated(Document),
}

impl Upserted {
    /// Whether this call's write was accepted.
    pub fn is_updated(&self) -> bool {
        matches!(self, Upserted::Updated(_))
    }

    /// The document as it stands after the upsert, if any.
    pub fn document(&self) -> Option<&Document> {
        match self {
            Upserted::Unchanged(doc) => doc.as_ref(),
            Upserted::Updated(doc) => Some(doc),
        }
    }

    /// Takes the document out of the outcome.
    pub fn into_document(self) -> Option<Document> {
        match self {
            Upserted::Unchanged(doc) => doc,
            Upserted::Updated(doc) => Some(doc),
        }
    }

    /// Revision of the document after the upsert.
    pub fn rev(&self) -> Option<&Revision> {
        self.document().and_then(Document::rev)
    }
}

/// Applies `diff` to document `id`, creating it if absent and retrying on
/// write conflicts.
///
/// Each attempt reads the current document, hands it to `diff` and, unless
/// `diff` declines, writes the result tagged with the revision just read.
/// A conflicting write sends the loop back to the read with no pause. Read,
/// write and transformation failures end the loop at once.
///
/// `diff` may run several times for one call and should be free of side
/// effects. `Conflict` never escapes this function; under
/// [`ConflictResolution::RetryLimit`] running out of retries is reported as
/// [`RevdocError::RetriesExhausted`].
///
/// # Errors
///
/// - [`RevdocError::StoreRead`] if the read fails with anything but `NotFound`.
/// - [`RevdocError::Transform`] if `diff` fails.
/// - [`RevdocError::StoreWrite`] if the write fails with anything but `Conflict`.
pub async fn upsert<F>(
    store: &dyn DocumentStore,
    id: &DocumentId,
    mut diff: F,
    resolution: ConflictResolution,
) -> Result<Upserted>
where
    F: FnMut(Option<&Document>) -> DiffResult,
{
    let mut conflicts: u32 = 0;

    loop {
        trace!("Upsert of {} attempt {}", id, conflicts + 1);

        let current = classify_read(store.get(id).await)?;

        let Some(fields) = diff(current.as_ref()).map_err(RevdocError::Transform)? else {
            debug!("Upsert of {} left the document unchanged.", id);
            return Ok(Upserted::Unchanged(current));
        };

        let mut candidate = Document::new(id.clone(), fields);
        candidate.set_rev(current.and_then(|doc| doc.rev().cloned()));

        match classify_write(store.put(candidate.clone()).await)? {
            WriteAttempt::Accepted(rev) => {
                debug!("Upsert of {} written at revision {}.", id, rev);
                return Ok(Upserted::Updated(candidate.with_rev(rev)));
            }
            WriteAttempt::Conflicted => {
                conflicts = conflicts.saturating_add(1);
                if !resolution.allows_retry(conflicts) {
                    debug!("Upsert of {} giving up after {} conflicts.", id, conflicts);
                    return Err(RevdocError::RetriesExhausted {
                        id: id.to_string(),
                        attempts: conflicts,
                    });
                }
                debug!(
                    "Conflict detected for {} at revision {:?}. Retrying.",
                    id,
                    candidate.rev()
                );
            }
        }
    }
}
