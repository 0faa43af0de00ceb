//! DTOs for the category overview page.

use crate::domain::product::Category;

/// Data required to render the landing page's category grid.
#[derive(Debug)]
pub struct HomePageData {
    pub categories: Vec<Category>,
}
