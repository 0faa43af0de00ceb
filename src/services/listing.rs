use crate::api::ProductReader;
use crate::domain::product::Product;
use crate::domain::sort::SortSpec;
use crate::domain::types::CategoryId;
use crate::dto::listing::ListingPageData;
use crate::pagination::{PageCursor, Paginated};
use crate::query::ProductQuery;
use crate::services::{ServiceError, ServiceResult};
use crate::settings::{ListingSettings, SettingsStore};

/// Restores the saved sort order and window, then loads the category
/// listing.
pub fn load_listing_page<A, S>(
    api: &A,
    store: &S,
    category: &CategoryId,
) -> ServiceResult<ListingPageData>
where
    A: ProductReader + ?Sized,
    S: SettingsStore + ?Sized,
{
    let settings = restore_settings(store);
    reload(api, store, category, settings)
}

/// Applies a new sort order. The window offset is kept, so the user
/// stays on the page they were reading.
pub fn change_listing_sort<A, S>(
    api: &A,
    store: &S,
    category: &CategoryId,
    order_by: SortSpec,
) -> ServiceResult<ListingPageData>
where
    A: ProductReader + ?Sized,
    S: SettingsStore + ?Sized,
{
    let mut settings = restore_settings(store);
    settings.order_by = order_by;
    reload(api, store, category, settings)
}

/// Jumps straight to the given zero-based page index.
pub fn goto_listing_page<A, S>(
    api: &A,
    store: &S,
    category: &CategoryId,
    page_index: usize,
) -> ServiceResult<ListingPageData>
where
    A: ProductReader + ?Sized,
    S: SettingsStore + ?Sized,
{
    let mut settings = restore_settings(store);
    settings.offset = PageCursor::new(settings.offset, settings.limit)
        .jump_to(page_index)
        .offset;
    reload(api, store, category, settings)
}

/// Moves one window forward.
pub fn next_listing_page<A, S>(
    api: &A,
    store: &S,
    category: &CategoryId,
) -> ServiceResult<ListingPageData>
where
    A: ProductReader + ?Sized,
    S: SettingsStore + ?Sized,
{
    let mut settings = restore_settings(store);
    settings.offset = PageCursor::new(settings.offset, settings.limit)
        .advance()
        .offset;
    reload(api, store, category, settings)
}

/// Moves one window back, stopping at the first page.
pub fn previous_listing_page<A, S>(
    api: &A,
    store: &S,
    category: &CategoryId,
) -> ServiceResult<ListingPageData>
where
    A: ProductReader + ?Sized,
    S: SettingsStore + ?Sized,
{
    let mut settings = restore_settings(store);
    settings.offset = PageCursor::new(settings.offset, settings.limit)
        .retreat()
        .offset;
    reload(api, store, category, settings)
}

fn reload<A, S>(
    api: &A,
    store: &S,
    category: &CategoryId,
    mut settings: ListingSettings,
) -> ServiceResult<ListingPageData>
where
    A: ProductReader + ?Sized,
    S: SettingsStore + ?Sized,
{
    persist_settings(store, &settings);

    let (total, mut products) = fetch_window(api, category, &settings)?;
    let mut cursor = PageCursor::new(settings.offset, settings.limit).reconcile(total);

    // A stored window can point past the end of a shrunken result set;
    // when reconciliation pulled the cursor back, fetch the first page
    // so the items match the window.
    if cursor.offset != settings.offset {
        settings.offset = cursor.offset;
        persist_settings(store, &settings);
        let (total, first_window) = fetch_window(api, category, &settings)?;
        cursor = PageCursor::new(settings.offset, settings.limit).reconcile(total);
        products = first_window;
    }

    Ok(ListingPageData {
        category: category.clone(),
        page: Paginated::new(products, &cursor),
        cursor,
        order_by: settings.order_by,
    })
}

fn fetch_window<A>(
    api: &A,
    category: &CategoryId,
    settings: &ListingSettings,
) -> ServiceResult<(usize, Vec<Product>)>
where
    A: ProductReader + ?Sized,
{
    let query = ProductQuery::new()
        .category(category.clone())
        .order_by(settings.order_by)
        .paginate(settings.offset, settings.limit);

    api.search_products(&query).map_err(|err| {
        log::error!("Failed to load products for category {category}: {err}");
        ServiceError::from(err)
    })
}

fn restore_settings<S>(store: &S) -> ListingSettings
where
    S: SettingsStore + ?Sized,
{
    match store.load() {
        Ok(Some(settings)) => settings,
        Ok(None) => ListingSettings::default(),
        Err(err) => {
            log::warn!("Failed to load listing settings: {err}");
            ListingSettings::default()
        }
    }
}

fn persist_settings<S>(store: &S, settings: &ListingSettings)
where
    S: SettingsStore + ?Sized,
{
    if let Err(err) = store.save(settings) {
        log::warn!("Failed to save listing settings: {err}");
    }
}
