//! Common utilities for revdoc integration tests.
#![allow(dead_code)]

use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;
use std::sync::atomic::{AtomicU32, AtomicUsize, Ordering};
use std::task::{Context, Poll};

use futures::future::{BoxFuture, FutureExt};
use serde_json::Value;

use revdoc::{
    Document, DocumentId, DocumentStore, Documents, Fields, MemoryStore, Revision, StoreError,
    StoreResult, SyncDocumentStore,
};

// --- Helper Functions ---

/// Turns a `json!` object into document content.
pub fn fields(value: Value) -> Fields {
    match value {
        Value::Object(map) => map,
        other => panic!("expected a JSON object, got {}", other),
    }
}

/// A fresh in-memory store and a `Documents` facade over it.
pub fn setup() -> (MemoryStore, Documents) {
    let store = MemoryStore::new();
    let docs = Documents::from_sync(store.clone());
    (store, docs)
}

/// The stored document in flat record shape, without its `_rev`.
pub fn stored_without_rev(store: &MemoryStore, id: &str) -> Value {
    let mut doc = store.snapshot(id).expect("document should exist");
    doc.set_rev(None);
    doc.to_value()
}

/// Generation of the stored document's revision.
pub fn stored_generation(store: &MemoryStore, id: &str) -> u64 {
    store
        .snapshot(id)
        .and_then(|doc| doc.rev().and_then(Revision::generation))
        .expect("document should have a revision")
}

// --- YieldNow ---

/// Future that returns `Pending` once before completing.
#[derive(Default)]
pub struct YieldNow {
    yielded: bool,
}

impl Future for YieldNow {
    type Output = ();

    fn poll(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<()> {
        if self.yielded {
            return Poll::Ready(());
        }
        self.yielded = true;
        cx.waker().wake_by_ref();
        Poll::Pending
    }
}

// --- YieldingStore ---

/// An asynchronous store that yields before every read and write, so that
/// upserts joined on a single thread interleave at each suspension point.
#[derive(Clone, Default)]
pub struct YieldingStore {
    pub inner: MemoryStore,
}

impl DocumentStore for YieldingStore {
    fn get<'a>(&'a self, id: &'a DocumentId) -> BoxFuture<'a, StoreResult<Document>> {
        async move {
            YieldNow::default().await;
            SyncDocumentStore::get(&self.inner, id)
        }
        .boxed()
    }

    fn put(&self, doc: Document) -> BoxFuture<'_, StoreResult<Revision>> {
        async move {
            YieldNow::default().await;
            SyncDocumentStore::put(&self.inner, doc)
        }
        .boxed()
    }
}

// --- RacingStore ---

/// A store where a rival writer sneaks in right before each of our first
/// `races` writes, so those writes are guaranteed to conflict.
///
/// The rival stamps the document with `"rival": <n>`.
#[derive(Clone)]
pub struct RacingStore {
    pub inner: MemoryStore,
    races: Arc<AtomicU32>,
    rival_writes: Arc<AtomicU32>,
}

impl RacingStore {
    pub fn new(races: u32) -> Self {
        Self {
            inner: MemoryStore::new(),
            races: Arc::new(AtomicU32::new(races)),
            rival_writes: Arc::new(AtomicU32::new(0)),
        }
    }

    pub fn rival_writes(&self) -> u32 {
        self.rival_writes.load(Ordering::SeqCst)
    }
}

impl SyncDocumentStore for RacingStore {
    fn get(&self, id: &DocumentId) -> StoreResult<Document> {
        self.inner.get(id)
    }

    fn put(&self, doc: Document) -> StoreResult<Revision> {
        let raced = self
            .races
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |left| left.checked_sub(1))
            .is_ok();
        if raced {
            let n = self.rival_writes.fetch_add(1, Ordering::SeqCst) + 1;
            let (mut rival_fields, rev) = match self.inner.get(doc.id()) {
                Ok(current) => {
                    let rev = current.rev().cloned();
                    (current.into_fields(), rev)
                }
                Err(_) => (Fields::new(), None),
            };
            rival_fields.insert("rival".to_string(), Value::from(n));
            let mut rival = Document::new(doc.id().clone(), rival_fields);
            rival.set_rev(rev);
            self.inner.put(rival)?;
        }
        self.inner.put(doc)
    }
}

// --- CountingStore ---

/// Counts every read and write that reaches the wrapped store.
#[derive(Clone, Default)]
pub struct CountingStore {
    pub inner: MemoryStore,
    gets: Arc<AtomicUsize>,
    puts: Arc<AtomicUsize>,
}

impl CountingStore {
    pub fn gets(&self) -> usize {
        self.gets.load(Ordering::SeqCst)
    }

    pub fn puts(&self) -> usize {
        self.puts.load(Ordering::SeqCst)
    }
}

impl SyncDocumentStore for CountingStore {
    fn get(&self, id: &DocumentId) -> StoreResult<Document> {
        self.gets.fetch_add(1, Ordering::SeqCst);
        self.inner.get(id)
    }

    fn put(&self, doc: Document) -> StoreResult<Revision> {
        self.puts.fetch_add(1, Ordering::SeqCst);
        self.inner.put(doc)
    }
}

// --- FailingStore ---

/// Fails reads and/or writes with `StoreError::Other`.
#[derive(Clone, Default)]
pub struct FailingStore {
    pub inner: MemoryStore,
    pub fail_reads: bool,
    pub fail_writes: bool,
}

impl SyncDocumentStore for FailingStore {
    fn get(&self, id: &DocumentId) -> StoreResult<Document> {
        if self.fail_reads {
            return Err(StoreError::Other("read unavailable".to_string()));
        }
        self.inner.get(id)
    }

    fn put(&self, doc: Document) -> StoreResult<Revision> {
        if self.fail_writes {
            return Err(StoreError::Other("write unavailable".to_string()));
        }
        self.inner.put(doc)
    }
}

// --- Transformations ---

/// Increments the `count` field, starting from zero.
pub fn increment(current: Option<&Document>) -> revdoc::DiffResult {
    let mut fields = current.map(|doc| doc.fields().clone()).unwrap_or_default();
    let count = fields.get("count").and_then(Value::as_i64).unwrap_or(0);
    fields.insert("count".to_string(), Value::from(count + 1));
    Ok(Some(fields))
}

/// Writes `{"version": 1}` unless a version is already there.
pub fn version_one_once(current: Option<&Document>) -> revdoc::DiffResult {
    if current.and_then(|doc| doc.get("version")).is_some() {
        return Ok(None);
    }
    Ok(Some(fields(serde_json::json!({"version": 1}))))
}
