//! Page windows and pagination metadata

use serde::{Deserialize, Serialize};

/// Slice of a result set requested from the data store
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageWindow {
    /// Page number (1-based)
    pub page: u32,
    /// Rows per page
    pub limit: u32,
    /// Index of the first row
    pub offset: u64,
}

impl PageWindow {
    /// Page-based window: `offset = (page - 1) * limit`
    pub fn from_page(page: u32, limit: u32) -> Self {
        let page = page.max(1);
        Self {
            page,
            limit,
            offset: u64::from(page - 1) * u64::from(limit),
        }
    }

    /// Offset-based window; the reported page is `floor(offset / limit) + 1`
    pub fn from_offset(offset: u64, limit: u32) -> Self {
        let page = if limit == 0 {
            1
        } else {
            u32::try_from(offset / u64::from(limit))
                .unwrap_or(u32::MAX - 1)
                .saturating_add(1)
        };
        Self {
            page,
            limit,
            offset,
        }
    }

    /// Inclusive index of the last row in the window
    pub fn last_index(&self) -> u64 {
        (self.offset + u64::from(self.limit)).saturating_sub(1)
    }
}

/// Pagination metadata derived from a total row count
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaginationMeta {
    pub total: u64,
    pub page: u32,
    pub limit: u32,
    pub total_pages: u64,
    pub has_more: bool,
}

impl PaginationMeta {
    /// `totalPages = ceil(total / limit)`, `hasMore = page < totalPages`
    pub fn compute(total: u64, window: PageWindow) -> Self {
        let total_pages = if window.limit == 0 {
            0
        } else {
            total.div_ceil(u64::from(window.limit))
        };

        Self {
            total,
            page: window.page,
            limit: window.limit,
            total_pages,
            has_more: u64::from(window.page) < total_pages,
        }
    }
}

/// A page of items with its pagination metadata
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListResponse<T> {
    pub items: Vec<T>,
    pub meta: PaginationMeta,
}

impl<T> ListResponse<T> {
    pub fn new(items: Vec<T>, meta: PaginationMeta) -> Self {
        Self { items, meta }
    }

    pub fn map<U>(self, f: impl FnMut(T) -> U) -> ListResponse<U> {
        ListResponse {
            items: self.items.into_iter().map(f).collect(),
            meta: self.meta,
        }
    }
}
