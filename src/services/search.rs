use crate::api::ProductReader;
use crate::dto::search::SearchPageData;
use crate::forms::search::SearchForm;
use crate::pagination::PageCursor;
use crate::query::ProductQuery;
use crate::services::{ServiceError, ServiceResult};
use crate::{COUNT_PROBE_LIMIT, DEFAULT_PAGE_LIMIT};

/// Runs a fresh search: the form becomes the canonical query string and
/// the first window is fetched together with the match count.
pub fn run_search<A>(api: &A, form: SearchForm) -> ServiceResult<SearchPageData>
where
    A: ProductReader + ?Sized,
{
    search_window(api, form.into_query())
}

/// Re-runs the search encoded in `params`, one window forward.
pub fn next_search_page<A>(api: &A, params: &str) -> ServiceResult<SearchPageData>
where
    A: ProductReader + ?Sized,
{
    turn_page(api, params, PageCursor::advance)
}

/// Re-runs the search encoded in `params`, one window back.
pub fn previous_search_page<A>(api: &A, params: &str) -> ServiceResult<SearchPageData>
where
    A: ProductReader + ?Sized,
{
    turn_page(api, params, PageCursor::retreat)
}

fn turn_page<A>(
    api: &A,
    params: &str,
    step: fn(PageCursor) -> PageCursor,
) -> ServiceResult<SearchPageData>
where
    A: ProductReader + ?Sized,
{
    let mut query = ProductQuery::from_query_str(params);
    let cursor = step(PageCursor::new(
        query.offset.unwrap_or(0),
        query.limit.unwrap_or(DEFAULT_PAGE_LIMIT),
    ));
    query.offset = Some(cursor.offset);
    query.limit = Some(cursor.limit);

    search_window(api, query)
}

fn search_window<A>(api: &A, query: ProductQuery) -> ServiceResult<SearchPageData>
where
    A: ProductReader + ?Sized,
{
    let (_, products) = api.search_products(&query).map_err(|err| {
        log::error!("Search request failed: {err}");
        ServiceError::from(err)
    })?;

    // The match count comes from a first-page probe capped at
    // COUNT_PROBE_LIMIT rows, not from the response's total field.
    let mut probe = query.clone();
    probe.offset = Some(0);
    probe.limit = Some(COUNT_PROBE_LIMIT);
    let (_, matches) = api.search_products(&probe).map_err(|err| {
        log::error!("Search count probe failed: {err}");
        ServiceError::from(err)
    })?;

    let cursor = PageCursor {
        offset: query.offset.unwrap_or(0),
        limit: query.limit.unwrap_or(DEFAULT_PAGE_LIMIT),
        total: matches.len(),
    };

    Ok(SearchPageData {
        query_string: query.to_query_string(),
        products,
        cursor,
    })
}

#[cfg(all(test, feature = "test-mocks"))]
mod tests {
    use super::*;
    use crate::api::mock::MockApi;
    use crate::domain::product::Product;

    fn product(id: &str) -> Product {
        Product {
            id: id.try_into().expect("valid product id"),
            name: format!("Termék {id}"),
            description: String::new(),
            price: 999,
            image: String::new(),
            rating: 4,
            categories: Vec::new(),
            stock: 1,
        }
    }

    fn products(count: usize) -> Vec<Product> {
        (0..count).map(|n| product(&format!("p-{n}"))).collect()
    }

    /// Submit fetches the first window plus the count probe and reports
    /// the probe's row count as the total.
    #[test]
    fn run_search_fetches_window_and_count() {
        let mut api = MockApi::new();
        api.expect_search_products()
            .withf(|query| query.to_query_string() == "query=tv&offset=0&limit=6")
            .times(1)
            .returning(|_| Ok((0, products(6))));
        api.expect_search_products()
            .withf(|query| query.to_query_string() == "query=tv&offset=0&limit=100")
            .times(1)
            .returning(|_| Ok((0, products(9))));

        let data = run_search(&api, SearchForm::new("tv")).expect("should run search");

        assert_eq!(data.query_string, "query=tv&offset=0&limit=6");
        assert_eq!(data.products.len(), 6);
        assert_eq!(data.cursor.total, 9);
        assert!(data.cursor.has_next());
    }

    /// The probe caps the reported total at its own window size.
    #[test]
    fn count_saturates_at_probe_limit() {
        let mut api = MockApi::new();
        api.expect_search_products()
            .withf(|query| query.limit == Some(6))
            .times(1)
            .returning(|_| Ok((0, products(6))));
        api.expect_search_products()
            .withf(|query| query.limit == Some(COUNT_PROBE_LIMIT))
            .times(1)
            .returning(|_| Ok((0, products(COUNT_PROBE_LIMIT))));

        let data = run_search(&api, SearchForm::new("tv")).expect("should run search");

        assert_eq!(data.cursor.total, COUNT_PROBE_LIMIT);
    }

    /// Turning the page shifts only the window in the query string.
    #[test]
    fn next_page_advances_offset() {
        let mut api = MockApi::new();
        api.expect_search_products()
            .withf(|query| query.to_query_string() == "query=tv&minPrice=100&offset=12&limit=6")
            .times(1)
            .returning(|_| Ok((0, products(6))));
        api.expect_search_products()
            .withf(|query| query.offset == Some(0) && query.limit == Some(COUNT_PROBE_LIMIT))
            .times(1)
            .returning(|_| Ok((0, products(20))));

        let data = next_search_page(&api, "query=tv&minPrice=100&offset=6&limit=6")
            .expect("should turn page");

        assert_eq!(data.cursor.offset, 12);
        assert_eq!(data.query_string, "query=tv&minPrice=100&offset=12&limit=6");
    }

    /// Paging back from the first window stays on the first window.
    #[test]
    fn previous_page_stops_at_first() {
        let mut api = MockApi::new();
        api.expect_search_products()
            .withf(|query| query.offset == Some(0) && query.limit == Some(6))
            .times(1)
            .returning(|_| Ok((0, products(6))));
        api.expect_search_products()
            .withf(|query| query.limit == Some(COUNT_PROBE_LIMIT))
            .times(1)
            .returning(|_| Ok((0, products(20))));

        let data =
            previous_search_page(&api, "query=tv&offset=0&limit=6").expect("should turn page");

        assert_eq!(data.cursor.offset, 0);
    }

    /// A leading question mark on the stored params is tolerated.
    #[test]
    fn params_may_carry_question_mark() {
        let mut api = MockApi::new();
        api.expect_search_products()
            .withf(|query| query.offset == Some(6) && query.query.as_deref() == Some("tv"))
            .times(1)
            .returning(|_| Ok((0, products(1))));
        api.expect_search_products()
            .withf(|query| query.limit == Some(COUNT_PROBE_LIMIT))
            .times(1)
            .returning(|_| Ok((0, products(7))));

        let data = next_search_page(&api, "?query=tv&offset=0&limit=6").expect("should turn page");

        assert_eq!(data.cursor.offset, 6);
    }
}
