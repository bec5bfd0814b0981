use serde::{Deserialize, Serialize};

/// Defines what an upsert does when its conditional write conflicts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConflictResolution {
    /// Re-read and retry immediately, as many times as it takes.
    #[default]
    Retry,
    /// Retry immediately, but give up after this many conflicting writes.
    RetryLimit(u32),
}

impl ConflictResolution {
    /// Whether another attempt is allowed after `conflicts` conflicting writes.
    pub fn allows_retry(&self, conflicts: u32) -> bool {
        match self {
            ConflictResolution::Retry => true,
            ConflictResolution::RetryLimit(limit) => conflicts <= *limit,
        }
    }
}
