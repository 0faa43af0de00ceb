//! DTOs for the free-text search page.

use crate::domain::product::Product;
use crate::pagination::PageCursor;

/// One window of search results.
#[derive(Debug)]
pub struct SearchPageData {
    /// Canonical query string the window was fetched with. Feeding it back
    /// into the pager operations yields the neighbouring windows.
    pub query_string: String,
    pub products: Vec<Product>,
    pub cursor: PageCursor,
}
