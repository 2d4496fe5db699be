//! System status and backups

use crate::error::{Result, ResultExt};
use crate::http::ApiClient;
use crate::types::{ApiVersion, QueryMap};
use bytes::Bytes;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tokio_util::sync::CancellationToken;

/// `system/status` response
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SystemStatus {
    pub version: String,
    pub build_time: Option<DateTime<Utc>>,
    pub is_debug: bool,
    pub is_production: bool,
    pub is_admin: bool,
    pub is_user_interactive: bool,
    pub startup_path: String,
    pub app_data: String,
    pub os_name: String,
    pub os_version: String,
    pub is_mono_runtime: bool,
    pub is_mono: bool,
    pub is_linux: bool,
    pub is_osx: bool,
    pub is_windows: bool,
    pub is_docker: bool,
    pub mode: String,
    pub branch: String,
    pub authentication: String,
    pub sqlite_version: String,
    pub migration_version: i64,
    #[serde(rename = "urlBase")]
    pub url_base: String,
    pub runtime_version: String,
    pub runtime_name: String,
    pub start_time: Option<DateTime<Utc>>,
}

/// One entry of `system/backup`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BackupFile {
    pub id: i64,
    pub name: String,
    /// Site path of the archive; pass to [`download_backup`]
    pub path: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub time: DateTime<Utc>,
}

pub(crate) async fn get_system_status(
    client: &ApiClient,
    version: ApiVersion,
    cancel: &CancellationToken,
) -> Result<SystemStatus> {
    let path = version.path("system/status");
    client
        .get_json(&path, QueryMap::new(), cancel)
        .await
        .endpoint("Get", &path)
}

pub(crate) async fn get_backup_files(
    client: &ApiClient,
    version: ApiVersion,
    cancel: &CancellationToken,
) -> Result<Vec<BackupFile>> {
    let path = version.path("system/backup");
    client
        .get_json(&path, QueryMap::new(), cancel)
        .await
        .endpoint("Get", &path)
}

/// Download the archive behind a [`BackupFile`]
pub async fn download_backup(client: &ApiClient, backup: &BackupFile) -> Result<Bytes> {
    download_backup_with_cancel(client, backup, &CancellationToken::new()).await
}

/// [`download_backup`] that stops with `Error::Cancelled` once `cancel` fires.
pub async fn download_backup_with_cancel(
    client: &ApiClient,
    backup: &BackupFile,
    cancel: &CancellationToken,
) -> Result<Bytes> {
    client
        .download(&backup.path, cancel)
        .await
        .endpoint("Get", &backup.path)
}
