//! Quality profiles
//!
//! Lidarr and Readarr share the `/api/v1/qualityProfile` shape.

use crate::error::{Result, ResultExt};
use crate::http::ApiClient;
use crate::types::{ApiVersion, QueryMap};
use serde::{Deserialize, Serialize};
use tokio_util::sync::CancellationToken;

const QUALITY_PROFILE: &str = "qualityProfile";

/// A quality definition as the *arr apps report it
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BaseQuality {
    pub id: i64,
    pub name: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub source: String,
    #[serde(default, skip_serializing_if = "is_zero")]
    pub resolution: i64,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub modifier: String,
}

/// Revision of a grabbed release
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QualityRevision {
    #[serde(default)]
    pub version: i64,
    #[serde(default)]
    pub real: i64,
    #[serde(default)]
    pub is_repack: bool,
}

/// Quality entry in a profile, or the quality attached to a release.
///
/// Groups carry a name and nested `items`; leaves carry `quality`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Quality {
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub name: String,
    #[serde(default, skip_serializing_if = "is_zero")]
    pub id: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub quality: Option<BaseQuality>,
    #[serde(default)]
    pub items: Vec<Quality>,
    #[serde(default)]
    pub allowed: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub revision: Option<QualityRevision>,
}

/// A quality profile (`/api/v1/qualityProfile`)
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QualityProfile {
    #[serde(default)]
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub upgrade_allowed: bool,
    #[serde(default)]
    pub cutoff: i64,
    #[serde(rename = "items", default)]
    pub qualities: Vec<Quality>,
}

#[allow(clippy::trivially_copy_pass_by_ref)]
fn is_zero(value: &i64) -> bool {
    *value == 0
}

pub(crate) async fn get_quality_profiles(
    client: &ApiClient,
    version: ApiVersion,
    cancel: &CancellationToken,
) -> Result<Vec<QualityProfile>> {
    let path = version.path(QUALITY_PROFILE);
    client
        .get_json(&path, QueryMap::new(), cancel)
        .await
        .endpoint("Get", &path)
}

pub(crate) async fn add_quality_profile(
    client: &ApiClient,
    version: ApiVersion,
    profile: &QualityProfile,
    cancel: &CancellationToken,
) -> Result<i64> {
    let path = version.path(QUALITY_PROFILE);
    let created: QualityProfile = client
        .post_json(&path, profile, cancel)
        .await
        .endpoint("Post", &path)?;

    Ok(created.id)
}

pub(crate) async fn update_quality_profile(
    client: &ApiClient,
    version: ApiVersion,
    profile: &QualityProfile,
    cancel: &CancellationToken,
) -> Result<()> {
    let path = version.path(&format!("{QUALITY_PROFILE}/{}", profile.id));
    client
        .put(&path, profile, cancel)
        .await
        .endpoint("Put", &path)?;

    Ok(())
}

pub(crate) async fn delete_quality_profile(
    client: &ApiClient,
    version: ApiVersion,
    profile_id: i64,
    cancel: &CancellationToken,
) -> Result<()> {
    let path = version.path(&format!("{QUALITY_PROFILE}/{profile_id}"));
    client
        .delete(&path, QueryMap::new(), cancel)
        .await
        .endpoint("Delete", &path)?;

    Ok(())
}
