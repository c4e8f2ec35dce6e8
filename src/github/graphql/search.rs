use anyhow::Context;
use chrono::{DateTime, TimeZone};

use super::queries::SEARCH_QUERY;
use super::types::*;
use crate::window::format_timestamp;

// Safety cap on cursor following; the provider signals termination via
// pageInfo.hasNextPage.
pub(super) const MAX_PAGES: usize = 1000;

/// `author:<author> created:<start>..<end>` with millisecond-precision
/// timestamps carrying an explicit offset.
pub(crate) fn build_search_query<Tz: TimeZone>(
    author: &str,
    start: &DateTime<Tz>,
    end: &DateTime<Tz>,
) -> String
where
    Tz::Offset: std::fmt::Display,
{
    format!(
        "author:{author} created:{}..{}",
        format_timestamp(start),
        format_timestamp(end)
    )
}

/// Runs the search and follows the continuation cursor until the
/// provider reports no further pages. Pages are fetched strictly
/// sequentially; any transport or GraphQL error aborts the whole run.
pub(crate) async fn fetch_search_results(
    client: &octocrab::Octocrab,
    query: &str,
) -> anyhow::Result<SearchResults> {
    collect_search_pages(|after| fetch_search_page(client, query, after)).await
}

async fn fetch_search_page(
    client: &octocrab::Octocrab,
    query: &str,
    after: Option<String>,
) -> anyhow::Result<SearchPage> {
    let payload = serde_json::json!({
        "query": SEARCH_QUERY,
        "variables": { "query": query, "after": after },
    });

    let resp = client
        .graphql::<GraphqlResponse<SearchData>>(&payload)
        .await
        .context("GraphQL search request failed")?;

    Ok(graphql_data(resp)?.search)
}

async fn collect_search_pages<F, Fut>(mut fetch_page: F) -> anyhow::Result<SearchResults>
where
    F: FnMut(Option<String>) -> Fut,
    Fut: std::future::Future<Output = anyhow::Result<SearchPage>>,
{
    let mut after: Option<String> = None;
    let mut results = SearchResults {
        items: Vec::new(),
        page_info: PageInfo {
            has_next_page: false,
            end_cursor: None,
        },
    };

    for _ in 0..MAX_PAGES {
        let page = fetch_page(after.clone()).await?;
        match merge_page(&mut results, page) {
            Some(cursor) => after = Some(cursor),
            None => break,
        }
    }

    Ok(results)
}

/// Appends a page's nodes to the accumulator, replaces the page info
/// with the page's own, and returns the cursor to continue from, if
/// any.
pub(super) fn merge_page(results: &mut SearchResults, page: SearchPage) -> Option<String> {
    results
        .items
        .extend(page.nodes.into_iter().map(SearchNode::into_item));
    results.page_info = page.page_info;

    if results.page_info.has_next_page {
        results.page_info.end_cursor.clone()
    } else {
        None
    }
}

pub(super) fn graphql_data<T>(resp: GraphqlResponse<T>) -> anyhow::Result<T> {
    if let Some(errors) = resp.errors {
        let msg = errors
            .into_iter()
            .map(|e| e.message)
            .collect::<Vec<_>>()
            .join("; ");
        anyhow::bail!("GraphQL returned errors: {msg}");
    }
    resp.data.context("GraphQL response missing data")
}
