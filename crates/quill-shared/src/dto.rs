//! Data Transfer Objects - request/response types for the API.

use serde::{Deserialize, Serialize};

/// `?limit=&page=` query parameters for listings.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PaginationQuery {
    pub limit: Option<i64>,
    pub page: Option<i64>,
}

impl PaginationQuery {
    /// Whether the caller asked for a page rather than the full listing.
    pub fn is_paginated(&self) -> bool {
        self.limit.is_some() || self.page.is_some()
    }
}

/// A post as exposed over the API.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PostResponse {
    pub id: String,
    pub user_id: String,
    pub title: String,
    pub body: String,
    pub created_at: String,
    pub updated_at: String,
}

/// A comment as exposed over the API.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CommentResponse {
    pub id: String,
    pub post_id: String,
    pub user_id: String,
    pub body: String,
    pub created_at: String,
    pub updated_at: String,
}

/// Navigation metadata for a paginated listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageMeta {
    pub page: u64,
    pub page_size: u64,
    pub total_count: u64,
    pub total_pages: u64,
}

/// One page of a listing.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PagedResponse<T> {
    pub items: Vec<T>,
    pub meta: PageMeta,
}

