use futures::future::{self, BoxFuture, FutureExt};
use thiserror::Error;

use crate::data_store::document::{Document, DocumentId};
use crate::data_store::revision::Revision;

/// Failures a document store reports back to the upsert loop.
///
/// `NotFound` and `Conflict` must be distinguishable from everything else:
/// the loop treats the former as "absent" on reads and retries on the latter.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    #[error("Document not found")]
    NotFound,

    #[error("Document update conflict")]
    Conflict,

    #[error("{0}")]
    Other(String),
}

pub type StoreResult<T> = std::result::Result<T, StoreError>;

/// Deferred-result interface to a revisioned document store.
///
/// This is the interface the upsert loop drives. Each call is one suspension
/// point; nothing else in the loop awaits. Implementations must be `Send` and
/// `Sync` so many loops can share one store.
pub trait DocumentStore: Send + Sync {
    /// Reads the current version of `id`.
    ///
    /// The returned document carries its current revision. Fails with
    /// [`StoreError::NotFound`] when `id` has no current document.
    fn get<'a>(&'a self, id: &'a DocumentId) -> BoxFuture<'a, StoreResult<Document>>;

    /// Conditionally writes `doc`, returning the new revision.
    ///
    /// Fails with [`StoreError::Conflict`] when `doc.rev()` does not match the
    /// store's current revision for the id. That includes writing a token when
    /// the store has no document, and writing no token when it has one.
    fn put(&self, doc: Document) -> BoxFuture<'_, StoreResult<Revision>>;
}

/// Direct-result interface to a revisioned document store.
///
/// Same contract as [`DocumentStore`], for stores that answer synchronously.
/// Wrap with [`Direct`] to drive it through the upsert loop.
pub trait SyncDocumentStore: Send + Sync {
    /// Reads the current version of `id`, or fails with [`StoreError::NotFound`].
    fn get(&self, id: &DocumentId) -> StoreResult<Document>;

    /// Conditionally writes `doc`, failing with [`StoreError::Conflict`] on a stale revision.
    fn put(&self, doc: Document) -> StoreResult<Revision>;
}

/// Adapts a [`SyncDocumentStore`] to the deferred [`DocumentStore`] interface.
///
/// Each call resolves immediately, so the retry semantics are identical to
/// those of a truly asynchronous store.
#[derive(Debug, Clone, Default)]
pub struct Direct<S>(S);

impl<S> Direct<S> {
    /// Wraps a direct-result store.
    pub fn new(store: S) -> Self {
        Self(store)
    }

    pub fn inner(&self) -> &S {
        &self.0
    }

    pub fn into_inner(self) -> S {
        self.0
    }
}

impl<S: SyncDocumentStore> DocumentStore for Direct<S> {
    fn get<'a>(&'a self, id: &'a DocumentId) -> BoxFuture<'a, StoreResult<Document>> {
        future::ready(self.0.get(id)).boxed()
    }

    fn put(&self, doc: Document) -> BoxFuture<'_, StoreResult<Revision>> {
        future::ready(self.0.put(doc)).boxed()
    }
}
