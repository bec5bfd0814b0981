use crate::data_store::document::{Document, Fields};
use crate::upsert::DiffResult;

/// Transformation behind `put_if_not_exists`: writes `initial` only when no
/// version of the document exists yet.
///
/// Any existing document, whatever its content, makes it a no-op, so the
/// first accepted write wins and later or racing callers come back unchanged.
pub fn create_if_absent(initial: Fields) -> impl FnMut(Option<&Document>) -> DiffResult + Send {
    move |current| match current {
        Some(_) => Ok(None),
        None => Ok(Some(initial.clone())),
    }
}
