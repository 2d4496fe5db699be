// Allow common clippy pedantic lints that aren't critical for this codebase
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::needless_pass_by_value)]

//! # starr
//!
//! Typed async client for the Sonarr, Lidarr and Readarr APIs.
//!
//! ## Features
//!
//! - **Queue aggregation**: fetch any number of queue records across pages,
//!   with the page size adapted so nothing is over-fetched
//! - **Cancellation**: every request races a `CancellationToken`
//! - **Resources**: quality profiles, system status and backups
//! - **Transport**: API key and basic auth, TLS switch, optional rate limit
//!   and retries
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use starr::{sonarr::Sonarr, Config, Result};
//!
//! #[tokio::main]
//! async fn main() -> Result<()> {
//!     let sonarr = Sonarr::new(Config::new("http://localhost:8989", "api-key"))?;
//!
//!     // Every queued download, fetched 100 at a time
//!     let queue = sonarr.get_queue(0, 100).await?;
//!     for record in &queue.records {
//!         println!("{} {}", record.id, record.title);
//!     }
//!
//!     Ok(())
//! }
//! ```
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────┐
//! │        Sonarr (v3)   Lidarr (v1)   Readarr (v1)      │
//! └───────────┬───────────────────────────┬──────────────┘
//!             │                           │
//! ┌───────────┴──────────┐   ┌────────────┴─────────────┐
//! │ pagination           │   │ resources                │
//! │ fetch_up_to → pages  │   │ profiles, status, backup │
//! └───────────┬──────────┘   └────────────┬─────────────┘
//!             └─────────────┬─────────────┘
//!                ┌──────────┴──────────┐
//!                │ http::ApiClient     │
//!                └─────────────────────┘
//! ```

#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::doc_markdown)]

// ============================================================================
// Module declarations
// ============================================================================

/// Error types
pub mod error;

/// Common types and type aliases
pub mod types;

/// Client configuration
pub mod config;

/// HTTP transport
pub mod http;

/// Paginated aggregation
pub mod pagination;

/// Resources shared across applications
pub mod resources;

/// Sonarr client
pub mod sonarr;

/// Lidarr client
pub mod lidarr;

/// Readarr client
pub mod readarr;

// ============================================================================
// Re-exports
// ============================================================================

pub use config::Config;
pub use error::{Error, Result};
pub use http::ApiClient;
pub use pagination::{Page, PageRequest};
pub use tokio_util::sync::CancellationToken;
pub use types::*;

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
