use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use ahash::AHashMap as HashMap;
use log::trace;
use parking_lot::RwLock;

use crate::data_store::document::{Document, DocumentId};
use crate::data_store::revision::Revision;
use crate::storage::{StoreError, StoreResult, SyncDocumentStore};

/// In-memory revisioned document store.
///
/// Keeps only the latest version of every document and enforces
/// single-writer-wins on each revision: a write is accepted only when it
/// carries exactly the revision currently stored (or none, for an absent id).
/// Accepted writes get a `<generation>-<suffix>` token one generation past
/// the one they replaced.
///
/// Cloning yields another handle to the same documents.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    inner: Arc<Inner>,
}

#[derive(Debug, Default)]
struct Inner {
    docs: RwLock<HashMap<DocumentId, Document>>,
    /// Accepted writes so far; doubles as the revision suffix.
    accepted: AtomicU64,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the current version of `id` without going through the store trait.
    pub fn snapshot(&self, id: &str) -> Option<Document> {
        self.inner.docs.read().get(id).cloned()
    }

    /// Number of writes the store has accepted.
    pub fn accepted_writes(&self) -> u64 {
        self.inner.accepted.load(Ordering::SeqCst)
    }

    pub fn len(&self) -> usize {
        self.inner.docs.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.docs.read().is_empty()
    }
}

impl SyncDocumentStore for MemoryStore {
    fn get(&self, id: &DocumentId) -> StoreResult<Document> {
        self.inner
            .docs
            .read()
            .get(id)
            .cloned()
            .ok_or(StoreError::NotFound)
    }

    fn put(&self, doc: Document) -> StoreResult<Revision> {
        let mut docs = self.inner.docs.write();
        let current = docs.get(doc.id()).and_then(|existing| existing.rev());

        if current != doc.rev() {
            trace!(
                "Rejecting write to {}: expected {:?}, got {:?}",
                doc.id(),
                current,
                doc.rev()
            );
            return Err(StoreError::Conflict);
        }

        let discriminator = self.inner.accepted.fetch_add(1, Ordering::SeqCst) + 1;
        let rev = Revision::successor(current, discriminator);
        let id = doc.id().clone();
        docs.insert(id, doc.with_rev(rev.clone()));
        Ok(rev)
    }
}
