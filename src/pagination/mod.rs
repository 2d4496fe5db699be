//! Pagination module
//!
//! # Overview
//!
//! The *arr APIs return large collections (the download queue, history)
//! one page at a time. This module assembles such a collection into a single
//! [`Page`] with [`fetch_up_to`], adapting the page size as it goes:
//!
//! 1. the first page size comes from [`normalize_page_size`];
//! 2. after each page, [`stop_reason`] decides whether the collection is done;
//! 3. otherwise [`adjust_page_size`] trims the next request so it does not
//!    overshoot.

mod aggregator;
mod sizing;
mod types;

pub use aggregator::{fetch_up_to, fetch_up_to_with, PageFetcher};
pub use sizing::{
    adjust_page_size, normalize_page_size, stop_reason, StopReason, DEFAULT_PAGE_SIZE,
    MIN_PAGE_SIZE,
};
pub use types::{Page, PageRequest};
