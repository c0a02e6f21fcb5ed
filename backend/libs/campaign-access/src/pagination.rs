//! Page-token aggregation
//!
//! Drains a token-paginated listing into one vector. A token handed out twice
//! in the same aggregation is treated as a remote bug and stops the loop.

use std::collections::HashSet;
use std::future::Future;
use tonic::Status;
use tracing::{debug, warn};

use crate::{AccessError, AccessResult, Page};

/// Fetch every page of a listing, in order.
///
/// `fetch` receives the page token to request, starting with `""`. Dropping
/// the returned future stops before the next page is requested.
pub async fn collect_all_pages<T, F, Fut>(operation: &str, mut fetch: F) -> AccessResult<Vec<T>>
where
    F: FnMut(String) -> Fut,
    Fut: Future<Output = Result<Page<T>, Status>>,
{
    let mut items = Vec::new();
    let mut seen = HashSet::new();
    let mut page_token = String::new();
    let mut pages = 0usize;

    loop {
        let page = fetch(page_token)
            .await
            .map_err(|status| AccessError::remote(operation, status))?;
        pages += 1;
        items.extend(page.items);

        if page.next_page_token.is_empty() {
            debug!(operation, pages, items = items.len(), "Pagination complete");
            return Ok(items);
        }
        if !seen.insert(page.next_page_token.clone()) {
            warn!(operation, token = %page.next_page_token, pages, "Repeated page token");
            return Err(AccessError::RepeatedPageToken {
                operation: operation.to_string(),
                token: page.next_page_token,
            });
        }
        page_token = page.next_page_token;
    }
}
