//! DTOs for the category listing page.

use crate::domain::product::Product;
use crate::domain::sort::SortSpec;
use crate::domain::types::CategoryId;
use crate::pagination::{PageCursor, Paginated};

/// Data required to render a category's product grid with its sort control
/// and page strip.
pub struct ListingPageData {
    pub category: CategoryId,
    pub page: Paginated<Product>,
    /// Window the page was fetched with, already reconciled against the
    /// reported total.
    pub cursor: PageCursor,
    pub order_by: SortSpec,
}
