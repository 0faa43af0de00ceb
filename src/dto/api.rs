//! Wire payloads exchanged with the storefront API.

use serde::Deserialize;

use crate::domain::auth::AccessToken;
use crate::domain::product::Product;

/// Body of `GET /products`: the requested window plus the match count.
#[derive(Debug, Deserialize)]
pub struct SearchResponse {
    pub data: Vec<Product>,
    pub total: usize,
}

/// Body of a successful `POST /user/login`.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginResponse {
    pub access_token: AccessToken,
}
