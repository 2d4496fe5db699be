//! Lidarr client (`/api/v1`)

use crate::config::Config;
use crate::error::Result;
use crate::http::ApiClient;
use crate::resources::{self, BackupFile, QualityProfile, SystemStatus};
use crate::types::ApiVersion;
use tokio_util::sync::CancellationToken;

const API: ApiVersion = ApiVersion::V1;

/// Methods for a Lidarr server
///
/// Every call has a `_with_cancel` twin taking a caller token; the plain
/// form runs to completion.
#[derive(Debug, Clone)]
pub struct Lidarr {
    client: ApiClient,
}

impl Lidarr {
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

    /// All quality profiles
    pub async fn get_quality_profiles(&self) -> Result<Vec<QualityProfile>> {
        self.get_quality_profiles_with_cancel(&CancellationToken::new())
            .await
    }

    pub async fn get_quality_profiles_with_cancel(
        &self,
        cancel: &CancellationToken,
    ) -> Result<Vec<QualityProfile>> {
        resources::get_quality_profiles(&self.client, API, cancel).await
    }

    /// Create a quality profile and return its new id
    pub async fn add_quality_profile(&self, profile: &QualityProfile) -> Result<i64> {
        self.add_quality_profile_with_cancel(profile, &CancellationToken::new())
            .await
    }

    pub async fn add_quality_profile_with_cancel(
        &self,
        profile: &QualityProfile,
        cancel: &CancellationToken,
    ) -> Result<i64> {
        resources::add_quality_profile(&self.client, API, profile, cancel).await
    }

    /// Replace the quality profile with `profile.id`
    pub async fn update_quality_profile(&self, profile: &QualityProfile) -> Result<()> {
        self.update_quality_profile_with_cancel(profile, &CancellationToken::new())
            .await
    }

    pub async fn update_quality_profile_with_cancel(
        &self,
        profile: &QualityProfile,
        cancel: &CancellationToken,
    ) -> Result<()> {
        resources::update_quality_profile(&self.client, API, profile, cancel).await
    }

    /// Delete a quality profile
    pub async fn delete_quality_profile(&self, profile_id: i64) -> Result<()> {
        self.delete_quality_profile_with_cancel(profile_id, &CancellationToken::new())
            .await
    }

    pub async fn delete_quality_profile_with_cancel(
        &self,
        profile_id: i64,
        cancel: &CancellationToken,
    ) -> Result<()> {
        resources::delete_quality_profile(&self.client, API, profile_id, cancel).await
    }
}
