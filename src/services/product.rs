use crate::api::ProductReader;
use crate::domain::types::ProductId;
use crate::dto::product::ProductPageData;
use crate::services::{ServiceError, ServiceResult};

/// Loads one product's detail page. An unknown id surfaces as
/// [`ServiceError::NotFound`] so the caller can render the dedicated
/// not-found view.
pub fn load_product_page<A>(api: &A, id: &ProductId) -> ServiceResult<ProductPageData>
where
    A: ProductReader + ?Sized,
{
    let product = api
        .get_product_by_id(id)
        .map_err(|err| {
            log::error!("Failed to load product {id}: {err}");
            err
        })?
        .ok_or(ServiceError::NotFound)?;

    Ok(ProductPageData { product })
}
