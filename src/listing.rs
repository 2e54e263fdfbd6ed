//! Listing parameters and pagination arithmetic.
//!
//! Caller-supplied sort columns are mapped onto a fixed allow-list here, so
//! no request text ever reaches an ORDER BY clause.

use serde::Serialize;

use crate::model::Customer;

/// Columns a customer listing may be sorted by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortColumn {
    FirstName,
    #[default]
    LastName,
    PhoneNumber,
    Id,
}

impl SortColumn {
    /// The SQL column name. These four strings are the only sort fragments
    /// a query can contain.
    pub fn as_str(self) -> &'static str {
        match self {
            SortColumn::FirstName => "first_name",
            SortColumn::LastName => "last_name",
            SortColumn::PhoneNumber => "phone_number",
            SortColumn::Id => "id",
        }
    }

    /// Parse a caller-supplied column name. Anything outside the allow-list
    /// falls back to the default (`last_name`).
    pub fn parse_or_default(raw: Option<&str>) -> Self {
        match raw {
            Some("first_name") => SortColumn::FirstName,
            Some("last_name") => SortColumn::LastName,
            Some("phone_number") => SortColumn::PhoneNumber,
            Some("id") => SortColumn::Id,
            _ => SortColumn::default(),
        }
    }
}

/// Sort direction. Anything that is not DESC (case-insensitive) sorts ASC.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortOrder {
    #[default]
    Asc,
    Desc,
}

impl SortOrder {
    pub fn as_str(self) -> &'static str {
        match self {
            SortOrder::Asc => "ASC",
            SortOrder::Desc => "DESC",
        }
    }

    pub fn parse_or_default(raw: Option<&str>) -> Self {
        match raw {
            Some(s) if s.eq_ignore_ascii_case("desc") => SortOrder::Desc,
            _ => SortOrder::Asc,
        }
    }
}

/// Normalized listing parameters for the customer list operation.
#[derive(Debug, Clone)]
pub struct ListParams {
    pub search: Option<String>,
    pub sort_by: SortColumn,
    pub sort_order: SortOrder,
    pub page: u32,
    pub limit: u32,
}

impl Default for ListParams {
    fn default() -> Self {
        Self {
            search: None,
            sort_by: SortColumn::default(),
            sort_order: SortOrder::default(),
            page: 1,
            limit: 10,
        }
    }
}

impl ListParams {
    /// Normalize raw request values: an empty search drops the predicate,
    /// page and limit default to 1 and 10 and clamp to at least 1.
    pub fn normalize(
        search: Option<String>,
        sort_by: Option<&str>,
        sort_order: Option<&str>,
        page: Option<u32>,
        limit: Option<u32>,
    ) -> Self {
        Self {
            search: search.filter(|s| !s.is_empty()),
            sort_by: SortColumn::parse_or_default(sort_by),
            sort_order: SortOrder::parse_or_default(sort_order),
            page: page.unwrap_or(1).max(1),
            limit: limit.unwrap_or(10).max(1),
        }
    }

    /// Row offset for the requested page. Page and limit are only bounded
    /// from below, so the product is computed in u64 and saturated to the
    /// widest value SQLite can bind.
    pub fn offset(&self) -> i64 {
        let offset = u64::from(self.page - 1) * u64::from(self.limit);
        i64::try_from(offset).unwrap_or(i64::MAX)
    }
}

/// Pagination envelope returned alongside a page of rows.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Pagination {
    pub page: u32,
    pub limit: u32,
    pub total: u64,
    pub pages: u64,
}

impl Pagination {
    /// `total` counts every row matching the search predicate; `pages` is
    /// `ceil(total / limit)`.
    pub fn new(params: &ListParams, total: u64) -> Self {
        Self {
            page: params.page,
            limit: params.limit,
            total,
            pages: total.div_ceil(u64::from(params.limit)),
        }
    }
}

/// One page of customers plus its pagination envelope.
#[derive(Debug, Clone)]
pub struct CustomerPage {
    pub rows: Vec<Customer>,
    pub pagination: Pagination,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sort_column_allow_list() {
        assert_eq!(SortColumn::parse_or_default(Some("first_name")), SortColumn::FirstName);
        assert_eq!(SortColumn::parse_or_default(Some("id")), SortColumn::Id);
        // Arbitrary column names never survive parsing
        assert_eq!(
            SortColumn::parse_or_default(Some("id; DROP TABLE customers")),
            SortColumn::LastName
        );
        assert_eq!(SortColumn::parse_or_default(None), SortColumn::LastName);
    }

    #[test]
    fn test_sort_order_fallback() {
        assert_eq!(SortOrder::parse_or_default(Some("desc")), SortOrder::Desc);
        assert_eq!(SortOrder::parse_or_default(Some("DESC")), SortOrder::Desc);
        assert_eq!(SortOrder::parse_or_default(Some("asc")), SortOrder::Asc);
        assert_eq!(SortOrder::parse_or_default(Some("sideways")), SortOrder::Asc);
        assert_eq!(SortOrder::parse_or_default(None), SortOrder::Asc);
    }

    #[test]
    fn test_normalize_defaults_and_clamps() {
        let params = ListParams::normalize(None, None, None, None, None);
        assert_eq!(params.page, 1);
        assert_eq!(params.limit, 10);
        assert!(params.search.is_none());

        let params = ListParams::normalize(Some(String::new()), None, None, Some(0), Some(0));
        assert!(params.search.is_none());
        assert_eq!(params.page, 1);
        assert_eq!(params.limit, 1);
    }

    #[test]
    fn test_offset() {
        let params = ListParams::normalize(None, None, None, Some(3), Some(10));
        assert_eq!(params.offset(), 20);
        assert_eq!(ListParams::default().offset(), 0);
    }

    #[test]
    fn test_offset_survives_large_page_and_limit() {
        // page * limit overflows u32; the offset must stay exact
        let params = ListParams::normalize(None, None, None, Some(3), Some(3_000_000_000));
        assert_eq!(params.offset(), 6_000_000_000);

        // The absolute worst case saturates instead of wrapping
        let params = ListParams::normalize(None, None, None, Some(u32::MAX), Some(u32::MAX));
        assert_eq!(params.offset(), i64::MAX);
    }

    #[test]
    fn test_pagination_ceiling() {
        let params = ListParams::normalize(None, None, None, Some(1), Some(10));
        assert_eq!(Pagination::new(&params, 0).pages, 0);
        assert_eq!(Pagination::new(&params, 10).pages, 1);
        assert_eq!(Pagination::new(&params, 11).pages, 2);
        assert_eq!(Pagination::new(&params, 25).pages, 3);
    }
}
