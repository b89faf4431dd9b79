//! Page requests and the paginated list envelope shared by every module.

use serde::Serialize;
use utoipa::ToSchema;

pub const DEFAULT_PAGE: u64 = 1;
pub const DEFAULT_LIMIT: u64 = 10;

/// SQLite binds `OFFSET`/`LIMIT` as signed 64-bit integers
const MAX_SQL_BOUND: u64 = i64::MAX as u64;

/// Which slice of a listing to fetch. `limit: None` means every row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    pub page: u64,
    pub limit: Option<u64>,
}

impl Default for PageRequest {
    fn default() -> Self {
        Self {
            page: DEFAULT_PAGE,
            limit: Some(DEFAULT_LIMIT),
        }
    }
}

impl PageRequest {
    /// Build from optional query values, falling back to the defaults.
    pub fn new(page: Option<u64>, limit: Option<u64>) -> Self {
        Self {
            page: page.unwrap_or(DEFAULT_PAGE).max(1),
            limit: Some(limit.unwrap_or(DEFAULT_LIMIT).max(1)),
        }
    }

    pub fn unbounded() -> Self {
        Self {
            page: 1,
            limit: None,
        }
    }

    /// `(offset, limit)` to apply to the query, or `None` when the request is unbounded.
    /// Both are capped at what SQLite accepts, so a page far past the end reads as empty.
    pub fn window(&self) -> Option<(u64, u64)> {
        self.limit.map(|limit| {
            let offset = self.page.saturating_sub(1).saturating_mul(limit);
            (offset.min(MAX_SQL_BOUND), limit.min(MAX_SQL_BOUND))
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct Pagination {
    pub total: u64,
    pub page: u64,
    pub page_size: u64,
    pub total_pages: u64,
}

#[derive(Debug, Clone, Serialize)]
pub struct PaginatedResponse<T> {
    pub data: Vec<T>,
    pub pagination: Pagination,
}

impl<T> PaginatedResponse<T> {
    pub fn new(data: Vec<T>, total: u64, request: PageRequest) -> Self {
        // An unbounded listing is a single page holding everything
        let page_size = request.limit.unwrap_or(total);
        let total_pages = if page_size == 0 {
            1
        } else {
            total.div_ceil(page_size).max(1)
        };

        Self {
            data,
            pagination: Pagination {
                total,
                page: request.page,
                page_size,
                total_pages,
            },
        }
    }
}
