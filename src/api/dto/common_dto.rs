//! Shared DTO types used across multiple endpoints.

use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

/// Pagination query parameters for list endpoints.
#[derive(Debug, Clone, Deserialize, IntoParams)]
pub struct PaginationParams {
    /// Page number (1-indexed). Defaults to 1.
    #[serde(default = "default_page")]
    pub page: u32,
    /// Items per page (max 100). Defaults to 20.
    #[serde(default = "default_per_page")]
    pub per_page: u32,
}

/// Pagination metadata included in list responses.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct PaginationMeta {
    /// Current page number.
    pub page: u32,
    /// Items per page.
    pub per_page: u32,
    /// Total number of items.
    pub total: u32,
    /// Total number of pages.
    pub total_pages: u32,
}

fn default_page() -> u32 {
    1
}

fn default_per_page() -> u32 {
    20
}

impl PaginationParams {
    /// Clamps `page` to at least 1 and `per_page` to 1..=100.
    #[must_use]
    pub fn clamped(&self) -> Self {
        Self {
            page: self.page.max(1),
            per_page: self.per_page.clamp(1, 100),
        }
    }

    /// SQL limit for the clamped parameters.
    #[must_use]
    pub fn limit(&self) -> i64 {
        i64::from(self.per_page)
    }

    /// SQL offset for the clamped parameters.
    #[must_use]
    pub fn offset(&self) -> i64 {
        i64::from(self.page.saturating_sub(1)) * i64::from(self.per_page)
    }
}

impl PaginationMeta {
    /// Builds metadata for a page over `total` items.
    #[must_use]
    pub fn new(params: &PaginationParams, total: u32) -> Self {
        let total_pages = if total == 0 {
            0
        } else {
            total.div_ceil(params.per_page.max(1))
        };
        Self {
            page: params.page,
            per_page: params.per_page,
            total,
            total_pages,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clamp_bounds_page_and_per_page() {
        let params = PaginationParams {
            page: 0,
            per_page: 1000,
        };
        let clamped = params.clamped();
        assert_eq!(clamped.page, 1);
        assert_eq!(clamped.per_page, 100);
    }

    #[test]
    fn offset_follows_the_page() {
        let params = PaginationParams {
            page: 3,
            per_page: 20,
        }
        .clamped();
        assert_eq!(params.limit(), 20);
        assert_eq!(params.offset(), 40);
    }

    #[test]
    fn meta_computes_total_pages() {
        let params = PaginationParams {
            page: 1,
            per_page: 20,
        };
        assert_eq!(PaginationMeta::new(&params, 0).total_pages, 0);
        assert_eq!(PaginationMeta::new(&params, 20).total_pages, 1);
        assert_eq!(PaginationMeta::new(&params, 21).total_pages, 2);
    }
}
