//! Sonarr download queue (`/api/v3/queue`)

use super::Sonarr;
use crate::error::{Result, ResultExt};
use crate::http::ApiClient;
use crate::pagination::{fetch_up_to_with, Page, PageFetcher, PageRequest};
use crate::resources::Quality;
use crate::types::{ApiVersion, QueryMap};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tokio_util::sync::CancellationToken;

const QUEUE: &str = "queue";

/// Sort key applied when the caller does not pick one
pub const DEFAULT_QUEUE_SORT_KEY: &str = "timeleft";

/// Filter that keeps downloads Sonarr cannot match to a series
pub const INCLUDE_UNKNOWN_SERIES: &str = "includeUnknownSeriesItems";

/// Queue contents, one page or assembled from many
pub type Queue = Page<QueueRecord>;

/// Language tag on a queued release
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Language {
    pub id: i64,
    pub name: String,
}

/// Status message attached to a queued download
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusMessage {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub messages: Vec<String>,
}

/// One download in the queue
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct QueueRecord {
    pub id: i64,
    pub series_id: i64,
    pub episode_id: i64,
    pub language: Option<Language>,
    pub quality: Option<Quality>,
    pub size: f64,
    pub title: String,
    pub sizeleft: f64,
    pub timeleft: Option<String>,
    pub estimated_completion_time: Option<DateTime<Utc>>,
    pub status: String,
    pub tracked_download_status: String,
    pub tracked_download_state: String,
    pub status_messages: Vec<StatusMessage>,
    pub error_message: String,
    pub download_id: String,
    pub protocol: String,
    pub download_client: String,
    pub indexer: String,
    pub output_path: String,
}

/// Options for removing a queue entry
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DeleteQueueRecordParams {
    /// Also blacklist the release so it is not grabbed again
    pub blacklist: bool,
}

impl DeleteQueueRecordParams {
    fn to_query(self) -> QueryMap {
        let mut query = QueryMap::new();
        query.insert("blacklist".to_string(), self.blacklist.to_string());
        query
    }
}

/// Fetches single queue pages for the aggregator
pub(crate) struct QueuePages<'a> {
    client: &'a ApiClient,
}

impl<'a> QueuePages<'a> {
    pub(crate) fn new(client: &'a ApiClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl<'a> PageFetcher for QueuePages<'a> {
    type Record = QueueRecord;

    async fn fetch_page(
        &self,
        mut request: PageRequest,
        cancel: &CancellationToken,
    ) -> Result<Queue> {
        request.default_sort_key(DEFAULT_QUEUE_SORT_KEY);
        request.set(INCLUDE_UNKNOWN_SERIES, "true");

        let path = ApiVersion::V3.path(QUEUE);
        self.client
            .get_json(&path, request.to_query(), cancel)
            .await
            .endpoint("Get", &path)
    }
}

impl Sonarr {
    /// Fetch up to `records` queue entries (0 = all), `per_page` at a time
    /// (0 = default page size).
    pub async fn get_queue(&self, records: usize, per_page: usize) -> Result<Queue> {
        self.get_queue_with_cancel(records, per_page, &CancellationToken::new())
            .await
    }

    /// [`Sonarr::get_queue`] that stops with `Error::Cancelled` once
    /// `cancel` fires.
    pub async fn get_queue_with_cancel(
        &self,
        records: usize,
        per_page: usize,
        cancel: &CancellationToken,
    ) -> Result<Queue> {
        self.get_queue_sorted(&PageRequest::default(), records, per_page, cancel)
            .await
    }

    /// Fetch up to `records` queue entries using the sort and filters of
    /// `template` on every page.
    pub async fn get_queue_sorted(
        &self,
        template: &PageRequest,
        records: usize,
        per_page: usize,
        cancel: &CancellationToken,
    ) -> Result<Queue> {
        let pages = QueuePages::new(&self.client);
        fetch_up_to_with(&pages, template, records, per_page, cancel).await
    }

    /// Fetch exactly one queue page.
    pub async fn get_queue_page(&self, request: PageRequest) -> Result<Queue> {
        self.get_queue_page_with_cancel(request, &CancellationToken::new())
            .await
    }

    /// [`Sonarr::get_queue_page`] that stops with `Error::Cancelled` once
    /// `cancel` fires.
    pub async fn get_queue_page_with_cancel(
        &self,
        request: PageRequest,
        cancel: &CancellationToken,
    ) -> Result<Queue> {
        QueuePages::new(&self.client)
            .fetch_page(request, cancel)
            .await
    }

    /// Remove one entry from the queue.
    pub async fn delete_queue_record(
        &self,
        record_id: i64,
        params: DeleteQueueRecordParams,
    ) -> Result<()> {
        self.delete_queue_record_with_cancel(record_id, params, &CancellationToken::new())
            .await
    }

    /// [`Sonarr::delete_queue_record`] that stops with `Error::Cancelled`
    /// once `cancel` fires.
    pub async fn delete_queue_record_with_cancel(
        &self,
        record_id: i64,
        params: DeleteQueueRecordParams,
        cancel: &CancellationToken,
    ) -> Result<()> {
        let path = ApiVersion::V3.path(&format!("{QUEUE}/{record_id}"));
        self.client
            .delete(&path, params.to_query(), cancel)
            .await
            .endpoint("Delete", &path)?;

        Ok(())
    }
}
