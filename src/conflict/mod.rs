/// This module classifies store replies into read states and write attempts.
pub mod detection;
/// This module contains the policy applied when a write conflicts.
pub mod resolution;
