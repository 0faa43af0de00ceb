use serde::{Deserialize, Serialize};

use crate::domain::types::{CategoryId, ProductId};

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    pub description: String,
    pub price: u32,
    pub image: String,
    pub rating: u8,
    pub categories: Vec<CategoryId>,
    pub stock: u32,
}

impl Product {
    /// Whether the product can currently be ordered.
    #[must_use]
    pub fn in_stock(&self) -> bool {
        self.stock > 0
    }
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Category {
    pub id: CategoryId,
    pub name: String,
    pub image: String,
    pub product_count: u32,
}
