//! DTOs for the product detail page.

use crate::domain::product::Product;

/// Data required to render a single product's detail view.
#[derive(Debug)]
pub struct ProductPageData {
    pub product: Product,
}
