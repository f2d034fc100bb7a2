use std::future::Future;

use hyperstore_domain::{HyperStoreError, ListLimit, Result};
use tokio_util::sync::CancellationToken;
use tracing::debug;

use super::cursor::{PageCursor, PageRequest};

/// Fetch every page sequentially and assemble one ordered sequence.
///
/// Each page request waits for the previous page, since its offset depends on
/// it. Cancellation aborts the in-flight fetch and no further pages are
/// requested. Errors from `fetch` are returned unchanged.
///
/// # Errors
/// `HyperStoreError::Cancelled` if `cancel` fires, otherwise the first error
/// returned by `fetch`.
pub async fn collect_pages<T, F, Fut>(
    limit: ListLimit,
    cancel: &CancellationToken,
    mut fetch: F,
) -> Result<Vec<T>>
where
    F: FnMut(PageRequest) -> Fut,
    Fut: Future<Output = Result<Vec<T>>>,
{
    let mut cursor = PageCursor::new(limit);
    let mut records = Vec::new();

    while let Some(request) = cursor.next_request() {
        if cancel.is_cancelled() {
            return Err(HyperStoreError::Cancelled);
        }

        let page = tokio::select! {
            biased;
            () = cancel.cancelled() => return Err(HyperStoreError::Cancelled),
            page = fetch(request) => page?,
        };

        debug!(offset = request.offset, received = page.len(), "fetched page");
        records.extend(cursor.advance(page));
    }

    Ok(records)
}
