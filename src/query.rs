//! Sparse product filters and their canonical query-string encoding.
//!
//! [`ProductQuery`] keeps one optional slot per recognized filter key plus a
//! passthrough list for keys this crate does not interpret. Serialization
//! emits the recognized keys in a fixed order, skips everything unset, and
//! repeats `categories` once per element, so equal filter sets always encode
//! to the same string.

use serde::Serialize;

use crate::domain::sort::SortSpec;
use crate::domain::types::CategoryId;

#[derive(Clone, Debug, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductQuery {
    /// Free-text search term.
    pub query: Option<String>,
    /// Exact price match.
    pub price: Option<u32>,
    pub min_price: Option<u32>,
    pub max_price: Option<u32>,
    pub in_stock: Option<bool>,
    /// Exact rating match.
    pub rating: Option<u8>,
    pub min_rate: Option<u8>,
    pub max_rate: Option<u8>,
    /// Category filters, one `categories=<id>` pair per element.
    pub categories: Vec<CategoryId>,
    pub order_by: Option<SortSpec>,
    pub offset: Option<usize>,
    pub limit: Option<usize>,
    /// Unrecognized key/value pairs, re-emitted after the typed keys in
    /// their original order.
    #[serde(skip)]
    pub extra: Vec<(String, String)>,
}

impl ProductQuery {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the free-text term. Empty terms are treated as unset.
    pub fn search(mut self, term: impl Into<String>) -> Self {
        self.query = Some(term.into()).filter(|s| !s.is_empty());
        self
    }

    pub fn price(mut self, price: u32) -> Self {
        self.price = Some(price);
        self
    }

    pub fn min_price(mut self, price: u32) -> Self {
        self.min_price = Some(price);
        self
    }

    pub fn max_price(mut self, price: u32) -> Self {
        self.max_price = Some(price);
        self
    }

    pub fn in_stock(mut self, in_stock: bool) -> Self {
        self.in_stock = Some(in_stock);
        self
    }

    pub fn rating(mut self, rating: u8) -> Self {
        self.rating = Some(rating);
        self
    }

    pub fn min_rate(mut self, rate: u8) -> Self {
        self.min_rate = Some(rate);
        self
    }

    pub fn max_rate(mut self, rate: u8) -> Self {
        self.max_rate = Some(rate);
        self
    }

    /// Adds one category filter. Repeated calls append.
    pub fn category(mut self, category: CategoryId) -> Self {
        self.categories.push(category);
        self
    }

    pub fn order_by(mut self, order_by: SortSpec) -> Self {
        self.order_by = Some(order_by);
        self
    }

    pub fn paginate(mut self, offset: usize, limit: usize) -> Self {
        self.offset = Some(offset);
        self.limit = Some(limit);
        self
    }

    /// Adds a passthrough pair for a key this crate does not interpret.
    /// Pairs with empty values are dropped, like every other empty filter.
    pub fn param(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        let value = value.into();
        if !value.is_empty() {
            self.extra.push((key.into(), value));
        }
        self
    }

    /// Encodes the filter set as a URL query string, without a leading `?`.
    ///
    /// Unset filters produce no pair at all, so an all-empty query encodes
    /// to the empty string.
    #[must_use]
    pub fn to_query_string(&self) -> String {
        let mut encoded = encode_pairs(self);

        if !self.extra.is_empty() {
            let extras = encode_pairs(&self.extra);
            if !encoded.is_empty() && !extras.is_empty() {
                encoded.push('&');
            }
            encoded.push_str(&extras);
        }

        encoded
    }

    /// Rebuilds a filter set from a query string, tolerating a leading `?`.
    ///
    /// Values that do not parse for their key (a non-numeric `offset`, an
    /// unknown `orderBy` combination, an empty category) are dropped rather
    /// than rejected. Unrecognized keys are preserved in [`Self::extra`] in
    /// encounter order.
    #[must_use]
    pub fn from_query_str(input: &str) -> Self {
        let input = input.strip_prefix('?').unwrap_or(input);

        let pairs: Vec<(String, String)> = match serde_html_form::from_str(input) {
            Ok(pairs) => pairs,
            Err(err) => {
                log::error!("Failed to parse query string: {err}");
                Vec::new()
            }
        };

        let mut query = Self::new();
        for (key, value) in pairs {
            match key.as_str() {
                "query" => query.query = Some(value).filter(|s| !s.is_empty()),
                "price" => query.price = value.parse().ok(),
                "minPrice" => query.min_price = value.parse().ok(),
                "maxPrice" => query.max_price = value.parse().ok(),
                "inStock" => query.in_stock = value.parse().ok(),
                "rating" => query.rating = value.parse().ok(),
                "minRate" => query.min_rate = value.parse().ok(),
                "maxRate" => query.max_rate = value.parse().ok(),
                "categories" => {
                    if let Ok(category) = CategoryId::new(value) {
                        query.categories.push(category);
                    }
                }
                "orderBy" => query.order_by = value.parse().ok(),
                "offset" => query.offset = value.parse().ok(),
                "limit" => query.limit = value.parse().ok(),
                _ => query.extra.push((key, value)),
            }
        }

        query
    }
}

impl std::fmt::Display for ProductQuery {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.to_query_string())
    }
}

fn encode_pairs<T: Serialize>(value: &T) -> String {
    match serde_html_form::to_string(value) {
        Ok(encoded) => encoded,
        Err(err) => {
            log::error!("Failed to encode query string: {err}");
            String::new()
        }
    }
}
