//! Common types used throughout starr
//!
//! Shared enums and type aliases used by the transport, the pagination
//! layer and the per-application clients.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

// ============================================================================
// Type Aliases
// ============================================================================

/// JSON value type (re-exported from serde_json)
pub type JsonValue = serde_json::Value;

/// Ordered query parameter map
pub type QueryMap = BTreeMap<String, String>;

// ============================================================================
// API Versions
// ============================================================================

/// API version prefix used by each application
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApiVersion {
    /// `/api/v1` (Lidarr, Readarr)
    V1,
    /// `/api/v3` (Sonarr)
    V3,
}

impl ApiVersion {
    /// Path prefix for this version, without slashes
    pub fn prefix(self) -> &'static str {
        match self {
            ApiVersion::V1 => "v1",
            ApiVersion::V3 => "v3",
        }
    }

    /// Join a resource path onto this version's prefix
    pub fn path(self, resource: &str) -> String {
        format!("{}/{}", self.prefix(), resource.trim_start_matches('/'))
    }
}

// ============================================================================
// Sort Direction
// ============================================================================

/// Sort direction reported by, and requested from, paginated endpoints
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    /// Smallest first
    Ascending,
    /// Largest first
    Descending,
    /// Server decides; also absorbs unknown values
    #[default]
    #[serde(other)]
    Default,
}

impl SortDirection {
    /// Wire representation
    pub fn as_str(self) -> &'static str {
        match self {
            SortDirection::Default => "default",
            SortDirection::Ascending => "ascending",
            SortDirection::Descending => "descending",
        }
    }
}

impl std::fmt::Display for SortDirection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

// ============================================================================
// Backoff Type
// ============================================================================

/// Type of backoff for retries
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BackoffType {
    /// Constant delay between retries
    Constant,
    /// Linear increase in delay
    Linear,
    /// Exponential increase in delay
    #[default]
    Exponential,
}
