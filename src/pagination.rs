//! Paged result wrapper and paging metadata.

use serde::Serialize;

/// Default number of items per page when the caller does not choose one.
pub const DEFAULT_PAGE_SIZE: usize = 10;

/// Upper bound for the number of items returned in one page.
pub const MAX_PAGE_SIZE: usize = 50;

/// Counting metadata for a page, sent to clients in the `X-Pagination` header.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MetaData {
    pub current_page: usize,
    pub total_pages: usize,
    pub page_size: usize,
    pub total_count: usize,
    pub has_previous: bool,
    pub has_next: bool,
}

impl MetaData {
    /// Computes the metadata for `total_count` items split into pages of
    /// `page_size`. A zero page size yields zero pages.
    pub fn new(total_count: usize, current_page: usize, page_size: usize) -> Self {
        let current_page = current_page.max(1);
        let total_pages = if page_size == 0 {
            0
        } else {
            total_count.div_ceil(page_size)
        };

        Self {
            current_page,
            total_pages,
            page_size,
            total_count,
            has_previous: current_page > 1,
            has_next: current_page < total_pages,
        }
    }

    /// Number of items preceding the current page.
    pub fn offset(&self) -> usize {
        (self.current_page - 1).saturating_mul(self.page_size)
    }
}

/// One materialized page of a filtered, sorted sequence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PagedList<T> {
    pub items: Vec<T>,
    pub meta_data: MetaData,
}

impl<T> PagedList<T> {
    /// Wraps an already sliced page together with the count of the whole
    /// filtered sequence.
    pub fn new(items: Vec<T>, total_count: usize, current_page: usize, page_size: usize) -> Self {
        Self {
            items,
            meta_data: MetaData::new(total_count, current_page, page_size),
        }
    }

    /// Projects the items while keeping the metadata untouched.
    pub fn map<U, F>(self, f: F) -> PagedList<U>
    where
        F: FnMut(T) -> U,
    {
        PagedList {
            items: self.items.into_iter().map(f).collect(),
            meta_data: self.meta_data,
        }
    }
}
