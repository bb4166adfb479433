//! This modules defines the common functionality for paging data.

use serde::{Deserialize, Serialize};

use crate::Error;

/// The config for pagination
#[derive(Debug, Clone)]
pub struct PaginationConfig {
    /// The page number to default to when not specified in a request.
    pub default_page: u64,
    /// The number of items per page when not specified in a request.
    pub default_page_size: u64,
}

impl Default for PaginationConfig {
    fn default() -> Self {
        Self {
            default_page: 1,
            default_page_size: 10,
        }
    }
}

/// A validated, one-based page request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pagination {
    page: u64,
    limit: u64,
}

impl Pagination {
    /// Create a page request, filling in missing values from `config`.
    ///
    /// # Errors
    /// Returns [Error::InvalidPagination] if `page` or `limit` is zero.
    pub fn new(
        page: Option<u64>,
        limit: Option<u64>,
        config: &PaginationConfig,
    ) -> Result<Self, Error> {
        let page = page.unwrap_or(config.default_page);
        let limit = limit.unwrap_or(config.default_page_size);

        if page == 0 || limit == 0 {
            return Err(Error::InvalidPagination { page, limit });
        }

        Ok(Self { page, limit })
    }

    /// The one-based page number.
    pub fn page(&self) -> u64 {
        self.page
    }

    /// The maximum number of items on the page.
    pub fn limit(&self) -> u64 {
        self.limit
    }

    /// The number of items before the first item on the page.
    pub fn offset(&self) -> u64 {
        (self.page - 1).saturating_mul(self.limit)
    }
}

impl Default for Pagination {
    fn default() -> Self {
        let config = PaginationConfig::default();

        Self {
            page: config.default_page,
            limit: config.default_page_size,
        }
    }
}

/// One page of a filtered result set.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Page<T> {
    /// At most `limit` items, starting at the page's offset.
    pub items: Vec<T>,
    /// The number of items in the whole filtered set.
    pub total: u64,
    /// The requested page number, echoed back.
    pub page: u64,
    /// The number of pages needed to show the whole filtered set.
    pub total_pages: u64,
}

impl<T> Page<T> {
    /// Assemble a page from the items and total returned by a store query.
    pub fn new(items: Vec<T>, total: u64, pagination: Pagination) -> Self {
        Self {
            items,
            total,
            page: pagination.page,
            total_pages: total_pages(total, pagination.limit),
        }
    }
}

/// The number of pages of size `limit` needed to hold `total` items.
///
/// `limit` must be non-zero.
pub fn total_pages(total: u64, limit: u64) -> u64 {
    total.div_ceil(limit)
}

#[cfg(test)]
mod tests {
    use crate::{
        Error,
        pagination::{Page, Pagination, PaginationConfig, total_pages},
    };

    #[test]
    fn defaults_to_first_page_of_ten() {
        let pagination = Pagination::new(None, None, &PaginationConfig::default()).unwrap();

        assert_eq!(pagination.page(), 1);
        assert_eq!(pagination.limit(), 10);
        assert_eq!(pagination.offset(), 0);
    }

    #[test]
    fn offset_skips_previous_pages() {
        let pagination = Pagination::new(Some(3), Some(25), &PaginationConfig::default()).unwrap();

        assert_eq!(pagination.offset(), 50);
    }

    #[test]
    fn rejects_zero_page_or_limit() {
        let config = PaginationConfig::default();

        assert_eq!(
            Pagination::new(Some(0), None, &config),
            Err(Error::InvalidPagination { page: 0, limit: 10 })
        );
        assert_eq!(
            Pagination::new(None, Some(0), &config),
            Err(Error::InvalidPagination { page: 1, limit: 0 })
        );
    }

    #[test]
    fn total_pages_rounds_up() {
        let cases = [(0, 10, 0), (1, 10, 1), (10, 10, 1), (11, 10, 2), (99, 1, 99)];

        for (total, limit, want) in cases {
            assert_eq!(
                total_pages(total, limit),
                want,
                "total_pages({total}, {limit})"
            );
        }
    }

    #[test]
    fn page_serializes_total_pages_in_camel_case() {
        let page = Page::new(vec![1, 2], 12, Pagination::default());

        let json = serde_json::to_value(&page).unwrap();

        assert_eq!(
            json,
            serde_json::json!({ "items": [1, 2], "total": 12, "page": 1, "totalPages": 2 })
        );
    }
}
