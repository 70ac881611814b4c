//! Query parameters for the list operation
//!
//! `page` is read leniently: anything that is not a positive integer means
//! the first page. When `page` is repeated the first occurrence is used.
//!
//! ```rust
//! use product_service::handlers::ListQuery;
//!
//! assert_eq!(ListQuery::with_page("3").pagination().offset, 20);
//! assert_eq!(ListQuery::with_page("abc").page_number(), 1);
//! ```

use serde::{Deserialize, Serialize};

use crate::repository::Pagination;

/// Fixed number of products per page
pub const PAGE_SIZE: u64 = 10;

#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct ListQuery {
    /// Raw `page` value as sent by the client
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page: Option<String>,
}

impl ListQuery {
    #[must_use]
    pub fn with_page(page: impl Into<String>) -> Self {
        Self {
            page: Some(page.into()),
        }
    }

    /// Build from decoded query-string pairs, keeping the first `page`
    #[must_use]
    pub fn from_pairs<I>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (String, String)>,
    {
        pairs
            .into_iter()
            .find(|(key, _)| key == "page")
            .map(|(_, value)| Self::with_page(value))
            .unwrap_or_default()
    }

    /// One-based page number, falling back to 1
    #[must_use]
    pub fn page_number(&self) -> u64 {
        self.page
            .as_deref()
            .and_then(|raw| raw.parse::<i64>().ok())
            .filter(|page| *page >= 1)
            .and_then(|page| u64::try_from(page).ok())
            .unwrap_or(1)
    }

    #[must_use]
    pub const fn items_per_page(&self) -> u64 {
        PAGE_SIZE
    }

    #[must_use]
    pub fn pagination(&self) -> Pagination {
        Pagination::page(self.page_number(), self.items_per_page())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_page_is_first() {
        let query = ListQuery::default();
        assert_eq!(query.page_number(), 1);
        assert_eq!(query.pagination().offset, 0);
        assert_eq!(query.items_per_page(), 10);
    }

    #[test]
    fn test_invalid_pages_fall_back() {
        for raw in ["0", "-4", "abc", "", "1.5", "99999999999999999999"] {
            assert_eq!(ListQuery::with_page(raw).page_number(), 1, "page={raw:?}");
        }
    }

    #[test]
    fn test_valid_page_offset() {
        assert_eq!(ListQuery::with_page("2").pagination().offset, 10);
        assert_eq!(ListQuery::with_page("+2").page_number(), 2);
    }

    #[test]
    fn test_first_page_pair_wins() {
        let pairs = vec![
            ("sort".to_string(), "name".to_string()),
            ("page".to_string(), "2".to_string()),
            ("page".to_string(), "3".to_string()),
        ];
        assert_eq!(ListQuery::from_pairs(pairs).page_number(), 2);
        assert_eq!(ListQuery::from_pairs(Vec::new()), ListQuery::default());
    }

    #[test]
    fn test_deserialize_from_query_string() {
        let query: ListQuery = serde_json::from_value(serde_json::json!({ "page": "5" })).unwrap();
        assert_eq!(query.page_number(), 5);
    }
}
