//! Collection responses.

use serde::{Deserialize, Serialize};

/// Body of a list endpoint.
///
/// Collections are served either as a bare JSON array or wrapped in a
/// page-number pagination envelope. Both decode into this type; use
/// [`ListResponse::into_items`] to get the rows in server order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ListResponse<T> {
    /// Paginated envelope.
    Page {
        /// Total rows across all pages.
        count: u64,
        /// URL of the next page. `None` on the last page.
        #[serde(default)]
        next: Option<String>,
        /// URL of the previous page. `None` on the first page.
        #[serde(default)]
        previous: Option<String>,
        /// Rows on this page.
        results: Vec<T>,
    },
    /// Unpaginated array.
    Items(Vec<T>),
}

impl<T> ListResponse<T> {
    /// Rows carried by this response, in server order.
    pub fn into_items(self) -> Vec<T> {
        match self {
            Self::Page { results, .. } => results,
            Self::Items(items) => items,
        }
    }

    /// URL of the next page, if the server paginated and more rows remain.
    pub fn next_page(&self) -> Option<&str> {
        match self {
            Self::Page { next, .. } => next.as_deref(),
            Self::Items(_) => None,
        }
    }
}
