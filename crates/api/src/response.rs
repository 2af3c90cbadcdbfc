//! Shared response envelope types for API handlers.
//!
//! All API responses use a `{ "data": ... }` envelope per project
//! conventions. Use [`DataResponse`] instead of ad-hoc
//! `serde_json::json!({ "data": ... })` to get compile-time type safety and
//! consistent serialization.

use serde::Serialize;

/// Standard `{ "data": T }` response envelope.
#[derive(Debug, Serialize)]
pub struct DataResponse<T: Serialize> {
    pub data: T,
}

/// Envelope for paginated list responses.
#[derive(Debug, Serialize)]
pub struct PageResponse<T: Serialize> {
    pub data: Vec<T>,
    pub pagination: Pagination,
}

/// Pagination metadata for list endpoints.
#[derive(Debug, Serialize)]
pub struct Pagination {
    pub total: i64,
    pub page: i64,
    pub pages: i64,
    pub limit: i64,
    pub has_next_page: bool,
    pub has_prev_page: bool,
}

impl Pagination {
    /// Derive pagination metadata from a total row count, 1-based page
    /// number, and page size.
    pub fn new(total: i64, page: i64, limit: i64) -> Self {
        let pages = if limit > 0 {
            (total + limit - 1) / limit
        } else {
            0
        };
        Self {
            total,
            page,
            pages,
            limit,
            has_next_page: page < pages,
            has_prev_page: page > 1,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pagination_math() {
        let p = Pagination::new(25, 2, 10);
        assert_eq!(p.pages, 3);
        assert!(p.has_next_page);
        assert!(p.has_prev_page);

        let first = Pagination::new(25, 1, 10);
        assert!(!first.has_prev_page);

        let last = Pagination::new(25, 3, 10);
        assert!(!last.has_next_page);

        let empty = Pagination::new(0, 1, 10);
        assert_eq!(empty.pages, 0);
        assert!(!empty.has_next_page);
    }
}
