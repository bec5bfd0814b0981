use std::fmt;

use serde::{Deserialize, Serialize};

/// Opaque revision token assigned by a document store on every successful write.
///
/// The upsert loop only ever hands a token back to the store it came from; it
/// never compares or orders tokens itself. Stores that follow the
/// `<generation>-<suffix>` convention (as [`MemoryStore`](crate::MemoryStore)
/// does) can be inspected with [`Revision::generation`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Revision(String);

impl Revision {
    /// Wraps a store-provided token.
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    /// Builds the token that follows `previous`, bumping the generation.
    ///
    /// `discriminator` makes tokens of equal generation distinct, so two
    /// writers that both start from "absent" never produce the same token.
    ///
    /// # Examples
    ///
    /// ```
    /// use revdoc::Revision;
    ///
    /// let first = Revision::successor(None, 42);
    /// assert_eq!(first.generation(), Some(1));
    /// assert_eq!(first.as_str(), "1-000000000000002a");
    ///
    /// let second = Revision::successor(Some(&first), 43);
    /// assert_eq!(second.generation(), Some(2));
    /// ```
    pub fn successor(previous: Option<&Revision>, discriminator: u64) -> Self {
        let generation = previous.and_then(Revision::generation).unwrap_or(0) + 1;
        Self(format!("{generation}-{discriminator:016x}"))
    }

    /// Returns the generation prefix of a `<generation>-<suffix>` token.
    ///
    /// `None` if the token does not follow that convention.
    pub fn generation(&self) -> Option<u64> {
        let (generation, _) = self.0.split_once('-')?;
        generation.parse().ok()
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Revision {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<String> for Revision {
    fn from(token: String) -> Self {
        Self(token)
    }
}

impl From<&str> for Revision {
    fn from(token: &str) -> Self {
        Self(token.to_string())
    }
}
