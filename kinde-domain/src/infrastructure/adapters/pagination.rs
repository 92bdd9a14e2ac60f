use std::future::Future;
use tracing::debug;

use crate::domain::entities::PagedResponse;

/// Walk a paged collection, feeding each page's continuation token into the
/// next request.
///
/// Stops at the first page with no items or no continuation token. Items
/// keep the order the API returned them in; a failed page aborts the walk.
pub async fn collect_all<P, E, F, Fut>(mut fetch_page: F) -> Result<Vec<P::Item>, E>
where
    P: PagedResponse,
    F: FnMut(Option<String>) -> Fut,
    Fut: Future<Output = Result<P, E>>,
{
    let mut items = Vec::new();
    let mut next_token: Option<String> = None;
    let mut pages = 0usize;

    loop {
        let page = fetch_page(next_token.take()).await?;
        pages += 1;

        let token = page.next_token().map(str::to_string);
        let page_items = page.into_items();
        if page_items.is_empty() {
            break;
        }
        items.extend(page_items);

        match token {
            Some(token) => next_token = Some(token),
            None => break,
        }
    }

    debug!(pages, items = items.len(), "Collected paged resource");
    Ok(items)
}
