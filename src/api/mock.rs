//! Mock API implementations for isolating services in tests.

use mockall::mock;

use crate::api::errors::ApiResult;
use crate::api::{Authenticator, ProductReader, UserReader, UserWriter};
use crate::domain::auth::AccessToken;
use crate::domain::product::{Category, Product};
use crate::domain::types::ProductId;
use crate::domain::user::{Credentials, NewUser, UpdateUser, UserProfile};
use crate::query::ProductQuery;

mock! {
    pub Api {}

    impl ProductReader for Api {
        fn search_products(&self, query: &ProductQuery) -> ApiResult<(usize, Vec<Product>)>;
        fn get_product_by_id(&self, id: &ProductId) -> ApiResult<Option<Product>>;
        fn list_categories(&self) -> ApiResult<Vec<Category>>;
    }

    impl UserReader for Api {
        fn get_current_user(&self, token: &AccessToken) -> ApiResult<UserProfile>;
    }

    impl UserWriter for Api {
        fn register_user(&self, new_user: &NewUser) -> ApiResult<()>;
        fn update_user(&self, token: &AccessToken, updates: &UpdateUser) -> ApiResult<UserProfile>;
    }

    impl Authenticator for Api {
        fn login(&self, credentials: &Credentials) -> ApiResult<AccessToken>;
        fn logout(&self, token: &AccessToken) -> ApiResult<()>;
    }
}
