use crate::api::ProductReader;
use crate::dto::home::HomePageData;
use crate::services::ServiceResult;

/// Loads the category grid shown on the landing page.
pub fn load_home_page<A>(api: &A) -> ServiceResult<HomePageData>
where
    A: ProductReader + ?Sized,
{
    let categories = api.list_categories().map_err(|err| {
        log::error!("Failed to load categories: {err}");
        err
    })?;

    Ok(HomePageData { categories })
}
