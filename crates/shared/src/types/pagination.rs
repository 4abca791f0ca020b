//! Pagination types for list endpoints.

use serde::{Deserialize, Serialize};

/// Upper bound for a single page.
pub const MAX_LIMIT: u64 = 500;

/// Offset pagination parameters (`skip` rows, then return at most `limit`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageRequest {
    /// Number of rows to skip.
    #[serde(default)]
    pub skip: u64,
    /// Maximum number of rows to return.
    #[serde(default = "default_limit")]
    pub limit: u64,
}

fn default_limit() -> u64 {
    100
}

impl Default for PageRequest {
    fn default() -> Self {
        Self {
            skip: 0,
            limit: default_limit(),
        }
    }
}

impl PageRequest {
    /// Creates a page request.
    #[must_use]
    pub const fn new(skip: u64, limit: u64) -> Self {
        Self { skip, limit }
    }

    /// Calculates the offset for database queries.
    #[must_use]
    pub const fn offset(&self) -> u64 {
        self.skip
    }

    /// Returns the limit for database queries, capped at [`MAX_LIMIT`].
    #[must_use]
    pub fn limit(&self) -> u64 {
        self.limit.min(MAX_LIMIT)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_request_default() {
        let request = PageRequest::default();
        assert_eq!(request.offset(), 0);
        assert_eq!(request.limit(), 100);
    }

    #[test]
    fn test_page_request_offset() {
        let request = PageRequest::new(40, 20);
        assert_eq!(request.offset(), 40);
        assert_eq!(request.limit(), 20);
    }

    #[test]
    fn test_page_request_limit_capped() {
        let request = PageRequest::new(0, 10_000);
        assert_eq!(request.limit(), MAX_LIMIT);
    }

    #[test]
    fn test_page_request_deserialize_defaults() {
        let request: PageRequest = serde_json::from_str("{}").unwrap();
        assert_eq!(request, PageRequest::default());

        let request: PageRequest = serde_json::from_str(r#"{"skip": 5}"#).unwrap();
        assert_eq!(request.skip, 5);
        assert_eq!(request.limit, 100);
    }
}
