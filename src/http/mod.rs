//! HTTP transport module
//!
//! One request primitive with cancellation, plus typed JSON helpers.
//!
//! # Features
//!
//! - **API key + basic auth**: `X-Api-Key` on every request
//! - **Cancellation**: a `CancellationToken` is raced against each attempt
//! - **Rate Limiting**: optional token bucket using governor
//! - **Retries**: optional, bounded, with constant/linear/exponential backoff

mod client;
mod rate_limit;

pub use client::{ApiClient, RequestConfig, API_KEY_HEADER};
pub use rate_limit::{RateLimiter, RateLimiterConfig};
