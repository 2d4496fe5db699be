//! Pagination types
//!
//! Request parameters sent to paginated endpoints and the page envelope they
//! answer with. The same envelope carries the aggregated result.

use crate::types::{QueryMap, SortDirection};
use serde::{Deserialize, Serialize};

/// Parameters for one page of a paginated endpoint
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PageRequest {
    /// 1-based page number (0 is sent as 1)
    pub page: usize,
    /// Records per page (0 lets the server decide)
    pub page_size: usize,
    /// Field to sort by
    pub sort_key: Option<String>,
    /// Sort direction
    pub sort_direction: Option<SortDirection>,
    /// Endpoint-specific filters
    pub params: QueryMap,
}

impl PageRequest {
    /// Create a request for one page
    pub fn new(page: usize, page_size: usize) -> Self {
        Self {
            page,
            page_size,
            ..Default::default()
        }
    }

    /// Same filters and sort, different page
    #[must_use]
    pub fn at(mut self, page: usize, page_size: usize) -> Self {
        self.page = page;
        self.page_size = page_size;
        self
    }

    /// Set sort key and direction
    #[must_use]
    pub fn sorted_by(mut self, key: impl Into<String>, direction: SortDirection) -> Self {
        self.sort_key = Some(key.into());
        self.sort_direction = Some(direction);
        self
    }

    /// Add an endpoint filter
    #[must_use]
    pub fn param(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.params.insert(key.into(), value.into());
        self
    }

    /// Set a filter, replacing any existing value
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.params.insert(key.into(), value.into());
    }

    /// Set a filter only if the caller has not
    pub fn check_set(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.params.entry(key.into()).or_insert_with(|| value.into());
    }

    /// Set the sort key only if the caller has not
    pub fn default_sort_key(&mut self, key: impl Into<String>) {
        if self.sort_key.is_none() {
            self.sort_key = Some(key.into());
        }
    }

    /// Render as query parameters
    pub fn to_query(&self) -> QueryMap {
        let mut query = self.params.clone();
        query.insert("page".to_string(), self.page.max(1).to_string());
        if self.page_size > 0 {
            query.insert("pageSize".to_string(), self.page_size.to_string());
        }
        if let Some(ref key) = self.sort_key {
            query.insert("sortKey".to_string(), key.clone());
        }
        if let Some(direction) = self.sort_direction {
            query.insert("sortDirection".to_string(), direction.to_string());
        }
        query
    }
}

/// One page of records, or the collection assembled from many pages
///
/// Servers report `totalRecords` for the whole collection; only trust it once
/// a page has actually been fetched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Page<T> {
    /// Page number this envelope came from (the last one, when aggregated)
    #[serde(default)]
    pub page: usize,
    /// Page size the server used
    #[serde(default)]
    pub page_size: usize,
    /// Sort key the server used
    #[serde(default)]
    pub sort_key: String,
    /// Sort direction the server used
    #[serde(default)]
    pub sort_direction: SortDirection,
    /// Records in the whole server-side collection
    #[serde(default)]
    pub total_records: usize,
    /// Records, in server order
    #[serde(default)]
    pub records: Vec<T>,
}

impl<T> Default for Page<T> {
    fn default() -> Self {
        Self {
            page: 0,
            page_size: 0,
            sort_key: String::new(),
            sort_direction: SortDirection::Default,
            total_records: 0,
            records: Vec::new(),
        }
    }
}

impl<T> Page<T> {
    /// Number of records held
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// True when no records are held
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
