//! Offset pagination: page `p` at size `s` skips `(p-1)*s` rows.

use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::api::error::QueryValidationError;

pub const MAX_PAGE_SIZE: i64 = 100;
pub const DEFAULT_PAGE_SIZE: i64 = 20;

/// Pagination query parameters. Validated before any query runs: page must be
/// at least 1 and page_size within 1..=100.
#[derive(Debug, Clone, Copy, Deserialize, ToSchema, IntoParams)]
pub struct Pagination {
    #[serde(default = "default_page")]
    pub page: i64,
    #[serde(default = "default_page_size")]
    pub page_size: i64,
}

fn default_page() -> i64 {
    1
}

fn default_page_size() -> i64 {
    DEFAULT_PAGE_SIZE
}

impl Default for Pagination {
    fn default() -> Self {
        Self {
            page: default_page(),
            page_size: default_page_size(),
        }
    }
}

impl Pagination {
    pub fn validate(&self) -> Result<(), QueryValidationError> {
        if self.page < 1 {
            return Err(QueryValidationError::PageOutOfRange { page: self.page });
        }
        if self.page_size < 1 || self.page_size > MAX_PAGE_SIZE {
            return Err(QueryValidationError::PageSizeOutOfRange {
                page_size: self.page_size,
                max: MAX_PAGE_SIZE,
            });
        }
        Ok(())
    }

    pub fn offset(&self) -> i64 {
        (self.page - 1) * self.page_size
    }

    pub fn limit(&self) -> i64 {
        self.page_size
    }
}

/// One page of results plus the counts a client needs to walk all pages.
#[derive(Debug, Serialize, ToSchema)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub total: i64,
    pub page: i64,
    pub page_size: i64,
    pub total_pages: i64,
}

impl<T> Page<T> {
    pub fn new(items: Vec<T>, total: i64, pagination: Pagination) -> Self {
        let total_pages = (total + pagination.page_size - 1) / pagination.page_size;
        Self {
            items,
            total,
            page: pagination.page,
            page_size: pagination.page_size,
            total_pages,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pagination(page: i64, page_size: i64) -> Pagination {
        Pagination { page, page_size }
    }

    #[test]
    fn offset_skips_prior_pages() {
        assert_eq!(pagination(1, 20).offset(), 0);
        assert_eq!(pagination(3, 20).offset(), 40);
        assert_eq!(pagination(2, 7).offset(), 7);
    }

    #[test]
    fn page_zero_is_rejected() {
        assert_eq!(
            pagination(0, 20).validate(),
            Err(QueryValidationError::PageOutOfRange { page: 0 })
        );
    }

    #[test]
    fn page_size_bounds_are_enforced() {
        assert!(pagination(1, 1).validate().is_ok());
        assert!(pagination(1, 100).validate().is_ok());
        assert!(pagination(1, 0).validate().is_err());
        assert!(pagination(1, 101).validate().is_err());
    }

    #[test]
    fn total_pages_rounds_up() {
        let page = Page::new(vec![1, 2, 3], 41, pagination(1, 20));
        assert_eq!(page.total_pages, 3);

        let page = Page::new(Vec::<i32>::new(), 0, pagination(1, 20));
        assert_eq!(page.total_pages, 0);

        let page = Page::new(vec![1], 20, pagination(1, 20));
        assert_eq!(page.total_pages, 1);
    }
}
