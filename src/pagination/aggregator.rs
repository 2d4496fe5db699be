//! Paginated aggregation
//!
//! Drives a [`PageFetcher`] page by page until the stop rule says the
//! collection is complete, shrinking each request so it never asks for more
//! than the caller wants or the server still holds.

use super::sizing::{adjust_page_size, normalize_page_size, stop_reason, StopReason};
use super::types::{Page, PageRequest};
use crate::error::{Error, Result};
use async_trait::async_trait;
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};

/// Fetches exactly one page of a paginated collection
#[async_trait]
pub trait PageFetcher: Send + Sync {
    /// Record type held by each page
    type Record: Send;

    /// Fetch the page described by `request`
    async fn fetch_page(
        &self,
        request: PageRequest,
        cancel: &CancellationToken,
    ) -> Result<Page<Self::Record>>;
}

/// Fetch up to `desired` records (0 = all) starting from page 1.
///
/// See [`fetch_up_to_with`].
pub async fn fetch_up_to<F>(
    fetcher: &F,
    desired: usize,
    requested_page_size: usize,
    cancel: &CancellationToken,
) -> Result<Page<F::Record>>
where
    F: PageFetcher + ?Sized,
{
    fetch_up_to_with(
        fetcher,
        &PageRequest::default(),
        desired,
        requested_page_size,
        cancel,
    )
    .await
}

/// Fetch up to `desired` records (0 = all), reusing the sort and filters of
/// `template` on every page.
///
/// Pages are fetched one after another; the size of page N+1 depends on
/// what page N returned. Any failure, including cancellation, discards what
/// was collected so far.
pub async fn fetch_up_to_with<F>(
    fetcher: &F,
    template: &PageRequest,
    desired: usize,
    requested_page_size: usize,
    cancel: &CancellationToken,
) -> Result<Page<F::Record>>
where
    F: PageFetcher + ?Sized,
{
    let mut page_size = normalize_page_size(desired, requested_page_size);
    let mut collection = Page::default();
    let mut page = 1;

    loop {
        if cancel.is_cancelled() {
            debug!(page, "aggregation cancelled");
            return Err(Error::Cancelled);
        }

        let request = template.clone().at(page, page_size);
        let current = fetcher.fetch_page(request, cancel).await?;
        let fetched = current.records.len();
        collection.records.extend(current.records);

        debug!(
            page,
            page_size,
            fetched,
            accumulated = collection.records.len(),
            total = current.total_records,
            "fetched page"
        );

        if let Some(reason) = stop_reason(
            collection.records.len(),
            current.total_records,
            desired,
            fetched,
        ) {
            if reason == StopReason::EmptyPage {
                warn!(
                    page,
                    accumulated = collection.records.len(),
                    total = current.total_records,
                    "server returned an empty page before reaching its reported total"
                );
            }

            let mut limit = current.total_records;
            if desired != 0 {
                limit = limit.min(desired);
            }
            let collected = collection.records.len();
            if collected > limit {
                warn!(
                    page,
                    collected,
                    limit,
                    total = current.total_records,
                    "dropping records beyond the reported total or requested count"
                );
            }
            collection.records.truncate(limit);

            collection.page = page;
            collection.page_size = if current.page_size > 0 {
                current.page_size
            } else {
                page_size
            };
            collection.total_records = current.total_records;
            collection.sort_key = current.sort_key;
            collection.sort_direction = current.sort_direction;

            debug!(
                pages = page,
                records = collection.records.len(),
                ?reason,
                "aggregation finished"
            );
            return Ok(collection);
        }

        page_size = adjust_page_size(
            desired,
            current.total_records,
            collection.records.len(),
            page_size,
        );
        page += 1;
    }
}
