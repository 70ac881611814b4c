//! Offset pagination for repository queries

/// Offset/limit window over an ordered result set
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pagination {
    /// Number of rows to skip
    pub offset: u64,
    /// Maximum number of rows to return
    pub limit: u64,
}

impl Pagination {
    /// One-based page of `page_size` rows. Page 0 is treated as page 1.
    #[must_use]
    pub const fn page(page_number: u64, page_size: u64) -> Self {
        let offset = page_number.saturating_sub(1).saturating_mul(page_size);
        Self {
            offset,
            limit: page_size,
        }
    }

    /// Offset clamped into the signed range SQL drivers bind
    #[must_use]
    pub fn sql_offset(&self) -> i64 {
        i64::try_from(self.offset).unwrap_or(i64::MAX)
    }

    /// Limit clamped into the signed range SQL drivers bind
    #[must_use]
    pub fn sql_limit(&self) -> i64 {
        i64::try_from(self.limit).unwrap_or(i64::MAX)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_offsets() {
        assert_eq!(Pagination::page(1, 10), Pagination { offset: 0, limit: 10 });
        assert_eq!(Pagination::page(2, 10), Pagination { offset: 10, limit: 10 });
        assert_eq!(Pagination::page(0, 10), Pagination::page(1, 10));
    }

    #[test]
    fn test_huge_page_saturates() {
        let pagination = Pagination::page(u64::MAX, 10);
        assert_eq!(pagination.offset, u64::MAX);
        assert_eq!(pagination.sql_offset(), i64::MAX);
        assert_eq!(pagination.sql_limit(), 10);
    }
}
