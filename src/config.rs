use serde::{Deserialize, Serialize};

use crate::conflict::resolution::ConflictResolution;
use crate::errors::{Result, RevdocError};

/// Settings shared by every upsert issued through one [`Documents`](crate::Documents).
///
/// The defaults retry conflicts forever without pausing.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, Default, PartialEq, Eq)]
#[serde(default)]
pub struct UpsertConfig {
    pub conflict_resolution: ConflictResolution,
}

impl UpsertConfig {
    /// Parses a JSON configuration; missing keys take their defaults.
    ///
    /// # Examples
    ///
    /// ```
    /// use revdoc::{ConflictResolution, UpsertConfig};
    ///
    /// let config = UpsertConfig::from_json(r#"{"conflict_resolution": {"retry_limit": 5}}"#).unwrap();
    /// assert_eq!(config.conflict_resolution, ConflictResolution::RetryLimit(5));
    /// assert_eq!(UpsertConfig::from_json("{}").unwrap(), UpsertConfig::default());
    /// ```
    pub fn from_json(raw: &str) -> Result<Self> {
        serde_json::from_str(raw).map_err(|e| RevdocError::InvalidConfig(e.to_string()))
    }
}
