//! Traits describing the remote storefront API.
//!
//! Services depend on these traits rather than on a concrete transport, so
//! tests can swap in [`mock::MockApi`] and the CLI wires up [`rest::RestApi`].

use crate::api::errors::ApiResult;
use crate::domain::auth::AccessToken;
use crate::domain::product::{Category, Product};
use crate::domain::types::ProductId;
use crate::domain::user::{Credentials, NewUser, UpdateUser, UserProfile};
use crate::query::ProductQuery;

pub mod errors;
#[cfg(feature = "test-mocks")]
pub mod mock;
#[cfg(feature = "http")]
pub mod rest;

pub trait ProductReader {
    /// Returns the reported total alongside the window of products selected
    /// by `query`.
    fn search_products(&self, query: &ProductQuery) -> ApiResult<(usize, Vec<Product>)>;
    /// Fetches a single product, `None` when the id is unknown.
    fn get_product_by_id(&self, id: &ProductId) -> ApiResult<Option<Product>>;
    fn list_categories(&self) -> ApiResult<Vec<Category>>;
}

pub trait UserReader {
    fn get_current_user(&self, token: &AccessToken) -> ApiResult<UserProfile>;
}

pub trait UserWriter {
    fn register_user(&self, new_user: &NewUser) -> ApiResult<()>;
    fn update_user(&self, token: &AccessToken, updates: &UpdateUser) -> ApiResult<UserProfile>;
}

pub trait Authenticator {
    fn login(&self, credentials: &Credentials) -> ApiResult<AccessToken>;
    fn logout(&self, token: &AccessToken) -> ApiResult<()>;
}
