//! Argument sugar accepted by the [`Documents`](crate::Documents) facades.
//!
//! Everything here is pure preprocessing. It runs before the upsert loop
//! and never touches the store.

use serde_json::Value;

use crate::data_store::document::{Document, DocumentId, Fields, ID_FIELD, strip_reserved};
use crate::errors::{Result, RevdocError};
use crate::upsert::DiffResult;

/// Addresses a document either by id or by a record carrying an `_id` field.
#[derive(Debug, Clone, PartialEq)]
pub enum DocTarget {
    Id(String),
    Record(Fields),
}

impl DocTarget {
    /// Resolves the identifier, or fails with [`RevdocError::InvalidId`]
    /// when it is missing, empty, or not a string.
    pub fn id(&self) -> Result<DocumentId> {
        match self {
            DocTarget::Id(id) => DocumentId::new(id.as_str()),
            DocTarget::Record(record) => match record.get(ID_FIELD) {
                Some(Value::String(id)) => DocumentId::new(id.as_str()),
                _ => Err(RevdocError::InvalidId),
            },
        }
    }

    /// Splits into the identifier and the content to create.
    ///
    /// An id target has no content; a record target contributes everything
    /// except its reserved fields.
    pub fn into_parts(self) -> Result<(DocumentId, Fields)> {
        let id = self.id()?;
        let fields = match self {
            DocTarget::Id(_) => Fields::new(),
            DocTarget::Record(mut record) => {
                strip_reserved(&mut record);
                record
            }
        };
        Ok((id, fields))
    }
}

impl From<&str> for DocTarget {
    fn from(id: &str) -> Self {
        DocTarget::Id(id.to_string())
    }
}

impl From<String> for DocTarget {
    fn from(id: String) -> Self {
        DocTarget::Id(id)
    }
}

impl From<&String> for DocTarget {
    fn from(id: &String) -> Self {
        DocTarget::Id(id.clone())
    }
}

impl From<DocumentId> for DocTarget {
    fn from(id: DocumentId) -> Self {
        DocTarget::Id(id.into())
    }
}

impl From<&DocumentId> for DocTarget {
    fn from(id: &DocumentId) -> Self {
        DocTarget::Id(id.to_string())
    }
}

impl From<Fields> for DocTarget {
    fn from(record: Fields) -> Self {
        DocTarget::Record(record)
    }
}

impl From<Value> for DocTarget {
    /// Strings are ids and objects are records. Anything else resolves to no id.
    fn from(value: Value) -> Self {
        match value {
            Value::String(id) => DocTarget::Id(id),
            Value::Object(record) => DocTarget::Record(record),
            _ => DocTarget::Record(Fields::new()),
        }
    }
}

/// Wraps plain content as a transformation that always writes it.
///
/// # Examples
///
/// ```
/// use revdoc::{Documents, MemoryStore, target};
/// use serde_json::json;
///
/// let store = MemoryStore::new();
/// let docs = Documents::from_sync(store.clone());
///
/// let content = json!({"some": "doc"}).as_object().cloned().unwrap();
/// docs.upsert_blocking("myid", target::constant(content)).unwrap();
/// assert_eq!(store.snapshot("myid").unwrap().get("some"), Some(&json!("doc")));
/// ```
pub fn constant(fields: Fields) -> impl FnMut(Option<&Document>) -> DiffResult + Clone + Send {
    move |_current| Ok(Some(fields.clone()))
}
