use crate::error::Result;
use crate::query::{Cursor, Query};
use crate::records::FromDocument;
use crate::store::DocumentStore;
use serde::Serialize;

/// Default number of rows per page
pub const DEFAULT_PAGE_SIZE: usize = 20;

/// One page of typed records
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Listing<T> {
    pub items: Vec<T>,
    /// Pass back as `start_after` to load the next page
    #[serde(skip)]
    pub next: Option<Cursor>,
    pub has_more: bool,
}

impl<T> Listing<T> {
    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

/// Run a query and decode every document
pub async fn fetch<T: FromDocument>(
    store: &dyn DocumentStore,
    query: &Query,
) -> Result<Listing<T>> {
    let page = store.query(query).await?;
    Ok(Listing {
        items: page.documents.iter().map(T::from_document).collect(),
        next: page.cursor,
        has_more: page.has_more,
    })
}

/// Cursor that resumes a query after the document with `id`
///
/// `None` when the document no longer exists; callers restart from the top.
pub async fn cursor_after(
    store: &dyn DocumentStore,
    query: &Query,
    id: &str,
) -> Result<Option<Cursor>> {
    Ok(store
        .get(&query.collection, id)
        .await?
        .map(|doc| query.cursor_for(&doc)))
}
