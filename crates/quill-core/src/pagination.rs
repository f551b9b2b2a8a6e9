//! Page/limit pagination.

use serde::{Deserialize, Serialize};

use crate::error::DomainError;

/// Page size used by transports when a caller gives a page but no limit.
pub const DEFAULT_PAGE_SIZE: i64 = 20;

/// A validated pagination request. `page` is 1-indexed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    limit: u64,
    page: u64,
}

impl PageRequest {
    /// Reject `limit <= 0`, `page < 1`, and pages whose row offset does not
    /// fit in an `i64`.
    pub fn new(limit: i64, page: i64) -> Result<Self, DomainError> {
        if limit <= 0 {
            return Err(DomainError::InvalidArgument(format!(
                "limit must be greater than 0, got {limit}"
            )));
        }
        if page < 1 {
            return Err(DomainError::InvalidArgument(format!(
                "page must be at least 1, got {page}"
            )));
        }
        if (page - 1).checked_mul(limit).is_none() {
            return Err(DomainError::InvalidArgument(format!(
                "page {page} with limit {limit} is out of range"
            )));
        }

        Ok(Self {
            limit: limit as u64,
            page: page as u64,
        })
    }

    pub fn limit(&self) -> u64 {
        self.limit
    }

    pub fn page(&self) -> u64 {
        self.page
    }

    /// Rows to skip before this page starts.
    pub fn offset(&self) -> u64 {
        (self.page - 1) * self.limit
    }
}

/// A bounded slice of a listing plus what a client needs to navigate it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub page: u64,
    pub page_size: u64,
    pub total_count: u64,
    pub total_pages: u64,
}

impl<T> Page<T> {
    pub fn new(items: Vec<T>, request: PageRequest, total_count: u64) -> Self {
        Self {
            items,
            page: request.page,
            page_size: request.limit,
            total_count,
            total_pages: total_count.div_ceil(request.limit),
        }
    }

    pub fn map<U>(self, f: impl FnMut(T) -> U) -> Page<U> {
        Page {
            items: self.items.into_iter().map(f).collect(),
            page: self.page,
            page_size: self.page_size,
            total_count: self.total_count,
            total_pages: self.total_pages,
        }
    }

    pub fn has_next(&self) -> bool {
        self.page < self.total_pages
    }

    pub fn has_previous(&self) -> bool {
        self.page > 1
    }
}
