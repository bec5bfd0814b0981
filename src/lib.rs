pub mod errors;
pub mod data_store;
pub mod storage;
pub mod conflict;
pub mod config;
pub mod target;
pub mod upsert;
pub mod create;
pub mod documents;

// Re-export key types and structs for easier access
pub use errors::{BoxError, Result, RevdocError};
pub use data_store::document::{Document, DocumentId, Fields};
pub use data_store::memory::MemoryStore;
pub use data_store::revision::Revision;
pub use storage::{Direct, DocumentStore, StoreError, StoreResult, SyncDocumentStore};
pub use conflict::resolution::ConflictResolution;
pub use config::UpsertConfig;
pub use target::DocTarget;
pub use upsert::{DiffResult, Upserted};
pub use documents::{Documents, prelude};
