//! Search input and its rating clamp rules.

use crate::DEFAULT_PAGE_LIMIT;
use crate::query::ProductQuery;

#[derive(Clone, Debug, Default, PartialEq, Eq)]
/// Form data for the product search screen.
///
/// The rating bounds are only reachable through [`SearchForm::set_min_rate`]
/// and [`SearchForm::set_max_rate`], which enforce the screen's reset
/// rules: an out-of-range or cleared edit snaps to the bound's default
/// instead of keeping the previous value.
pub struct SearchForm {
    /// Free-text search term.
    pub query: String,
    /// Lowest acceptable price.
    pub min_price: Option<u32>,
    /// Highest acceptable price.
    pub max_price: Option<u32>,
    /// Only list products that are in stock.
    pub in_stock: Option<bool>,
    min_rate: Option<u8>,
    max_rate: Option<u8>,
}

impl SearchForm {
    #[must_use]
    pub fn new(query: impl Into<String>) -> Self {
        SearchForm {
            query: query.into(),
            ..SearchForm::default()
        }
    }

    /// Records a minimum-rating edit. Values outside `1..=5`, including a
    /// cleared field, reset the bound to 1.
    pub fn set_min_rate(&mut self, rate: Option<u8>) {
        self.min_rate = match rate {
            Some(rate) if (1..=5).contains(&rate) => Some(rate),
            _ => Some(1),
        };
    }

    /// Records a maximum-rating edit. Values outside `1..=5`, including a
    /// cleared field, reset the bound to 5.
    pub fn set_max_rate(&mut self, rate: Option<u8>) {
        self.max_rate = match rate {
            Some(rate) if (1..=5).contains(&rate) => Some(rate),
            _ => Some(5),
        };
    }

    /// Current minimum-rating bound, `None` until first edited.
    #[must_use]
    pub fn min_rate(&self) -> Option<u8> {
        self.min_rate
    }

    /// Current maximum-rating bound, `None` until first edited.
    #[must_use]
    pub fn max_rate(&self) -> Option<u8> {
        self.max_rate
    }

    /// Builds the submit query: the window resets to the first page and
    /// both rating bounds are clamped into `0..=5`.
    #[must_use]
    pub fn into_query(self) -> ProductQuery {
        ProductQuery {
            query: Some(self.query).filter(|query| !query.is_empty()),
            min_price: self.min_price,
            max_price: self.max_price,
            in_stock: self.in_stock,
            min_rate: self.min_rate.map(|rate| rate.min(5)),
            max_rate: self.max_rate.map(|rate| rate.min(5)),
            offset: Some(0),
            limit: Some(DEFAULT_PAGE_LIMIT),
            ..ProductQuery::new()
        }
    }
}
