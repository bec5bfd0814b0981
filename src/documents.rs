use std::sync::Arc;

use futures::executor::block_on;

use crate::config::UpsertConfig;
use crate::create::create_if_absent;
use crate::data_store::document::{Document, Fields};
use crate::errors::Result;
use crate::storage::{Direct, DocumentStore, SyncDocumentStore};
use crate::target::DocTarget;
use crate::upsert::{DiffResult, Upserted, upsert};

/// Revdoc Prelude
pub mod prelude {
    pub use crate::config::*;
    pub use crate::conflict::resolution::*;
    pub use crate::data_store::document::*;
    pub use crate::data_store::memory::*;
    pub use crate::data_store::revision::*;
    pub use crate::errors::*;
    pub use crate::storage::*;
    pub use crate::target::*;
    pub use crate::upsert::*;
    pub use crate::*;
}

/// The main entry point: conflict-retrying upserts over one document store.
///
/// Holds no state besides the store handle and its configuration, so one
/// instance can be shared (e.g. behind an `Arc`) by any number of concurrent
/// callers. Every operation comes in three interchangeable conventions over
/// the same retry loop: `async`, blocking (`*_blocking`) and callback
/// (`*_with_callback`).
#[derive(Clone)]
pub struct Documents {
    /// The store every upsert reads from and writes to.
    store: Arc<dyn DocumentStore>,
    /// Settings applied to every upsert.
    config: UpsertConfig,
}

impl Documents {
    /// Creates a facade over `store` with the default configuration.
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        Self::with_config(store, UpsertConfig::default())
    }

    /// Creates a facade over `store` that applies `config` to every upsert.
    pub fn with_config(store: Arc<dyn DocumentStore>, config: UpsertConfig) -> Self {
        Self { store, config }
    }

    /// Creates a facade over a direct-result store.
    pub fn from_sync<S>(store: S) -> Self
    where
        S: SyncDocumentStore + 'static,
    {
        Self::new(Arc::new(Direct::new(store)))
    }

    /// The store every upsert goes through.
    pub fn store(&self) -> &Arc<dyn DocumentStore> {
        &self.store
    }

    /// The configuration applied to every upsert.
    pub fn config(&self) -> &UpsertConfig {
        &self.config
    }

    /// Applies `diff` to the targeted document, creating it if absent and
    /// retrying on conflicts.
    ///
    /// `target` is an id, or a record whose `_id` names the document. A
    /// missing or empty id fails with
    /// [`RevdocError::InvalidId`](crate::RevdocError::InvalidId) before the
    /// store is touched.
    ///
    /// # Examples
    ///
    /// ```
    /// use revdoc::prelude::*;
    /// use serde_json::json;
    ///
    /// # futures::executor::block_on(async {
    /// let docs = Documents::from_sync(MemoryStore::new());
    ///
    /// let bump = |current: Option<&Document>| -> DiffResult {
    ///     let mut fields = current.map(|doc| doc.fields().clone()).unwrap_or_default();
    ///     let count = fields.get("count").and_then(|v| v.as_i64()).unwrap_or(0);
    ///     fields.insert("count".into(), json!(count + 1));
    ///     Ok(Some(fields))
    /// };
    ///
    /// docs.upsert("counter", bump).await.unwrap();
    /// let outcome = docs.upsert("counter", bump).await.unwrap();
    /// assert_eq!(outcome.document().unwrap().get("count"), Some(&json!(2)));
    /// # });
    /// ```
    pub async fn upsert<T, F>(&self, target: T, diff: F) -> Result<Upserted>
    where
        T: Into<DocTarget>,
        F: FnMut(Option<&Document>) -> DiffResult,
    {
        let id = target.into().id()?;
        upsert(
            self.store.as_ref(),
            &id,
            diff,
            self.config.conflict_resolution,
        )
        .await
    }

    /// Writes `fields` under the targeted id unless a document already exists.
    ///
    /// When `target` is a record, its content (minus `_id`/`_rev`) is part of
    /// the initial document too; on overlapping keys `fields` wins.
    /// Losing or late callers get [`Upserted::Unchanged`] holding the winner.
    pub async fn put_if_not_exists<T>(&self, target: T, fields: Fields) -> Result<Upserted>
    where
        T: Into<DocTarget>,
    {
        let (id, mut initial) = target.into().into_parts()?;
        initial.extend(fields);
        upsert(
            self.store.as_ref(),
            &id,
            create_if_absent(initial),
            self.config.conflict_resolution,
        )
        .await
    }

    /// Like [`put_if_not_exists`](Self::put_if_not_exists), taking both the id
    /// and the initial content from one record.
    pub async fn put_record_if_not_exists<T>(&self, record: T) -> Result<Upserted>
    where
        T: Into<DocTarget>,
    {
        let (id, fields) = record.into().into_parts()?;
        upsert(
            self.store.as_ref(),
            &id,
            create_if_absent(fields),
            self.config.conflict_resolution,
        )
        .await
    }

    /// Blocking form of [`upsert`](Self::upsert).
    pub fn upsert_blocking<T, F>(&self, target: T, diff: F) -> Result<Upserted>
    where
        T: Into<DocTarget>,
        F: FnMut(Option<&Document>) -> DiffResult,
    {
        block_on(self.upsert(target, diff))
    }

    /// Blocking form of [`put_if_not_exists`](Self::put_if_not_exists).
    pub fn put_if_not_exists_blocking<T>(&self, target: T, fields: Fields) -> Result<Upserted>
    where
        T: Into<DocTarget>,
    {
        block_on(self.put_if_not_exists(target, fields))
    }

    /// Blocking form of [`put_record_if_not_exists`](Self::put_record_if_not_exists).
    pub fn put_record_if_not_exists_blocking<T>(&self, record: T) -> Result<Upserted>
    where
        T: Into<DocTarget>,
    {
        block_on(self.put_record_if_not_exists(record))
    }

    /// Runs [`upsert`](Self::upsert) to completion and hands the outcome to `callback`.
    pub fn upsert_with_callback<T, F, C>(&self, target: T, diff: F, callback: C)
    where
        T: Into<DocTarget>,
        F: FnMut(Option<&Document>) -> DiffResult,
        C: FnOnce(Result<Upserted>),
    {
        callback(self.upsert_blocking(target, diff))
    }

    /// Runs [`put_if_not_exists`](Self::put_if_not_exists) to completion and
    /// hands the outcome to `callback`.
    pub fn put_if_not_exists_with_callback<T, C>(&self, target: T, fields: Fields, callback: C)
    where
        T: Into<DocTarget>,
        C: FnOnce(Result<Upserted>),
    {
        callback(self.put_if_not_exists_blocking(target, fields))
    }

    /// Runs [`put_record_if_not_exists`](Self::put_record_if_not_exists) to
    /// completion and hands the outcome to `callback`.
    pub fn put_record_if_not_exists_with_callback<T, C>(&self, record: T, callback: C)
    where
        T: Into<DocTarget>,
        C: FnOnce(Result<Upserted>),
    {
        callback(self.put_record_if_not_exists_blocking(record))
    }
}
