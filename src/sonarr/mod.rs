//! Sonarr client (`/api/v3`)

mod queue;

pub use queue::{
    DeleteQueueRecordParams, Language, Queue, QueueRecord, StatusMessage,
    DEFAULT_QUEUE_SORT_KEY, INCLUDE_UNKNOWN_SERIES,
};

use crate::config::Config;
use crate::error::Result;
use crate::http::ApiClient;
use crate::resources::{self, BackupFile, SystemStatus};
use crate::types::ApiVersion;
use tokio_util::sync::CancellationToken;

const API: ApiVersion = ApiVersion::V3;

/// Methods for a Sonarr server
#[derive(Debug, Clone)]
pub struct Sonarr {
    client: ApiClient,
}

impl Sonarr {
    /// Build a client from a config
    pub fn new(config: Config) -> Result<Self> {
        Ok(Self::from_client(ApiClient::new(config)?))
    }

    /// Wrap an existing transport
    pub fn from_client(client: ApiClient) -> Self {
        Self { client }
    }

    /// The underlying transport
    pub fn client(&self) -> &ApiClient {
        &self.client
    }

    /// System status
    pub async fn get_system_status(&self) -> Result<SystemStatus> {
        self.get_system_status_with_cancel(&CancellationToken::new())
            .await
    }

    pub async fn get_system_status_with_cancel(
        &self,
        cancel: &CancellationToken,
    ) -> Result<SystemStatus> {
        resources::get_system_status(&self.client, API, cancel).await
    }

    /// Available backup archives
    pub async fn get_backup_files(&self) -> Result<Vec<BackupFile>> {
        self.get_backup_files_with_cancel(&CancellationToken::new())
            .await
    }

    pub async fn get_backup_files_with_cancel(
        &self,
        cancel: &CancellationToken,
    ) -> Result<Vec<BackupFile>> {
        resources::get_backup_files(&self.client, API, cancel).await
    }
}

#[cfg(test)]
mod tests;
