use std::borrow::Borrow;
use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::data_store::revision::Revision;
use crate::errors::{Result, RevdocError};

/// Field holding the document identifier in the flat record shape.
pub const ID_FIELD: &str = "_id";
/// Field holding the revision token in the flat record shape.
pub const REV_FIELD: &str = "_rev";

/// Document content: a JSON object, without the reserved `_id`/`_rev` keys.
pub type Fields = Map<String, Value>;

/// Non-empty identifier of a logical document.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct DocumentId(String);

impl DocumentId {
    /// Creates an identifier, rejecting the empty string with [`RevdocError::InvalidId`].
    pub fn new(id: impl Into<String>) -> Result<Self> {
        let id = id.into();
        if id.is_empty() {
            return Err(RevdocError::InvalidId);
        }
        Ok(Self(id))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for DocumentId {
    type Error = RevdocError;

    fn try_from(id: String) -> Result<Self> {
        Self::new(id)
    }
}

impl From<DocumentId> for String {
    fn from(id: DocumentId) -> Self {
        id.0
    }
}

impl AsRef<str> for DocumentId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl Borrow<str> for DocumentId {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for DocumentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A snapshot of one document: identifier, revision (once written) and content.
///
/// Serializes to the flat record shape `{"_id": .., "_rev": .., ...fields}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Document {
    #[serde(rename = "_id")]
    id: DocumentId,
    #[serde(rename = "_rev", default, skip_serializing_if = "Option::is_none")]
    rev: Option<Revision>,
    #[serde(flatten)]
    fields: Fields,
}

impl Document {
    /// Creates an unwritten document. Reserved keys in `fields` are dropped.
    pub fn new(id: DocumentId, mut fields: Fields) -> Self {
        strip_reserved(&mut fields);
        Self {
            id,
            rev: None,
            fields,
        }
    }

    /// Returns the same document tagged with `rev`.
    pub fn with_rev(mut self, rev: Revision) -> Self {
        self.rev = Some(rev);
        self
    }

    pub fn id(&self) -> &DocumentId {
        &self.id
    }

    /// The revision this snapshot was read at, `None` if it was never written.
    pub fn rev(&self) -> Option<&Revision> {
        self.rev.as_ref()
    }

    pub fn set_rev(&mut self, rev: Option<Revision>) {
        self.rev = rev;
    }

    pub fn fields(&self) -> &Fields {
        &self.fields
    }

    /// Mutable access to the content. Reserved keys inserted here are ignored
    /// when the document is next written through an upsert.
    pub fn fields_mut(&mut self) -> &mut Fields {
        &mut self.fields
    }

    pub fn get(&self, field: &str) -> Option<&Value> {
        self.fields.get(field)
    }

    pub fn into_fields(self) -> Fields {
        self.fields
    }

    /// Flat JSON shape, including `_id` and (if present) `_rev`.
    pub fn to_value(&self) -> Value {
        let mut record = Map::with_capacity(self.fields.len() + 2);
        record.insert(ID_FIELD.to_string(), Value::String(self.id.to_string()));
        if let Some(rev) = &self.rev {
            record.insert(REV_FIELD.to_string(), Value::String(rev.to_string()));
        }
        record.extend(self.fields.clone());
        Value::Object(record)
    }
}

/// Removes `_id` and `_rev` from a record, leaving plain content.
pub fn strip_reserved(fields: &mut Fields) {
    fields.remove(ID_FIELD);
    fields.remove(REV_FIELD);
}
