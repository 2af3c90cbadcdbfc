//! Shared query parameter types for API handlers.

use serde::Deserialize;

/// Generic page-based pagination parameters (`?page=&limit=`).
///
/// Pages are 1-based. Values are clamped in [`Self::resolve`] so a hostile
/// `limit` cannot turn a listing into a full table scan.
#[derive(Debug, Deserialize)]
pub struct PaginationParams {
    pub page: Option<i64>,
    pub limit: Option<i64>,
}

/// Default page size for candidate listings.
const DEFAULT_LIMIT: i64 = 10;
/// Hard upper bound on page size.
const MAX_LIMIT: i64 = 100;

impl PaginationParams {
    /// Resolve to `(page, limit, offset)` with defaults and clamping applied.
    pub fn resolve(&self) -> (i64, i64, i64) {
        let page = self.page.unwrap_or(1).max(1);
        let limit = self.limit.unwrap_or(DEFAULT_LIMIT).clamp(1, MAX_LIMIT);
        (page, limit, (page - 1) * limit)
    }
}
