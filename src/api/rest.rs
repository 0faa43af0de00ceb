//! Blocking REST client for the storefront API.

use std::time::Duration;

use reqwest::StatusCode;
use reqwest::blocking::{Client, Response};
use reqwest::header::ACCEPT;

use crate::api::errors::{ApiError, ApiResult};
use crate::api::{Authenticator, ProductReader, UserReader, UserWriter};
use crate::domain::auth::AccessToken;
use crate::domain::product::{Category, Product};
use crate::domain::types::{NonEmptyString, ProductId};
use crate::domain::user::{Credentials, NewUser, UpdateUser, UserProfile};
use crate::dto::api::{LoginResponse, SearchResponse};
use crate::query::ProductQuery;

/// Client for the remote product/user service. Cheap to clone; the inner
/// connection pool is shared.
#[derive(Clone, Debug)]
pub struct RestApi {
    base_url: String,
    http: Client,
}

impl RestApi {
    /// Builds a client for the service at `base_url` (scheme and host,
    /// without a trailing slash) using the given request timeout.
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> ApiResult<Self> {
        let base_url = NonEmptyString::new(base_url)?;
        let http = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|err| ApiError::Transport(err.to_string()))?;

        Ok(Self {
            base_url: base_url.into_inner().trim_end_matches('/').to_string(),
            http,
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    /// Consumes a non-success response into the matching [`ApiError`].
    fn error_for(response: Response) -> ApiError {
        let status = response.status().as_u16();
        let body = response.text().unwrap_or_default();
        ApiError::from_status(status, body)
    }
}

impl ProductReader for RestApi {
    fn search_products(&self, query: &ProductQuery) -> ApiResult<(usize, Vec<Product>)> {
        let url = format!("{}?{}", self.url("/products"), query.to_query_string());
        let response = self
            .http
            .get(url)
            .header(ACCEPT, "application/json")
            .send()?;

        if !response.status().is_success() {
            return Err(Self::error_for(response));
        }

        let body: SearchResponse = response.json()?;
        Ok((body.total, body.data))
    }

    fn get_product_by_id(&self, id: &ProductId) -> ApiResult<Option<Product>> {
        let response = self
            .http
            .get(self.url(&format!("/products/{id}")))
            .header(ACCEPT, "application/json")
            .send()?;

        if response.status() == StatusCode::NOT_FOUND {
            return Ok(None);
        }
        if !response.status().is_success() {
            return Err(Self::error_for(response));
        }

        Ok(Some(response.json()?))
    }

    fn list_categories(&self) -> ApiResult<Vec<Category>> {
        let response = self
            .http
            .get(self.url("/products/categories"))
            .header(ACCEPT, "application/json")
            .send()?;

        if !response.status().is_success() {
            return Err(Self::error_for(response));
        }

        Ok(response.json()?)
    }
}

impl UserReader for RestApi {
    fn get_current_user(&self, token: &AccessToken) -> ApiResult<UserProfile> {
        let response = self
            .http
            .get(self.url("/user"))
            .bearer_auth(token.as_str())
            .header(ACCEPT, "application/json")
            .send()?;

        if !response.status().is_success() {
            return Err(Self::error_for(response));
        }

        Ok(response.json()?)
    }
}

impl UserWriter for RestApi {
    fn register_user(&self, new_user: &NewUser) -> ApiResult<()> {
        let response = self.http.post(self.url("/user")).json(new_user).send()?;

        if !response.status().is_success() {
            return Err(Self::error_for(response));
        }

        Ok(())
    }

    fn update_user(&self, token: &AccessToken, updates: &UpdateUser) -> ApiResult<UserProfile> {
        let response = self
            .http
            .put(self.url("/user"))
            .bearer_auth(token.as_str())
            .json(updates)
            .send()?;

        if !response.status().is_success() {
            return Err(Self::error_for(response));
        }

        Ok(response.json()?)
    }
}

impl Authenticator for RestApi {
    fn login(&self, credentials: &Credentials) -> ApiResult<AccessToken> {
        let response = self
            .http
            .post(self.url("/user/login"))
            .json(credentials)
            .send()?;

        if !response.status().is_success() {
            return Err(Self::error_for(response));
        }

        let body: LoginResponse = response.json()?;
        Ok(body.access_token)
    }

    fn logout(&self, token: &AccessToken) -> ApiResult<()> {
        let response = self
            .http
            .post(self.url("/logout"))
            .bearer_auth(token.as_str())
            .send()?;

        if !response.status().is_success() {
            return Err(Self::error_for(response));
        }

        Ok(())
    }
}
