/// Documents, identifiers and their field content.
pub mod document;
/// The reference in-memory store.
pub mod memory;
/// Revision tokens.
pub mod revision;
