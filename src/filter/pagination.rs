use super::error::FilterError;

/// Page bounds for one listing request. `page_index` is 0-based.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pagination {
    pub page_index: i64,
    pub page_size: i64,
    pub items_total: i64,
    pub pages_total: i64,
}

/// Parse the 1-based `page` query value. Missing or empty means page 1.
pub fn parse_page(raw: Option<&str>) -> Result<i64, FilterError> {
    match raw.map(str::trim).filter(|s| !s.is_empty()) {
        None => Ok(1),
        Some(s) => s
            .parse::<i64>()
            .map_err(|_| FilterError::InvalidPage(format!("'{}' is not an integer", s))),
    }
}

/// `ceil(items_total / page_size)` without going through floats
pub fn pages_total(items_total: i64, page_size: i64) -> i64 {
    if items_total <= 0 || page_size <= 0 {
        return 0;
    }
    (items_total + page_size - 1) / page_size
}

impl Pagination {
    /// Resolve a 1-based page against the filtered item count.
    pub fn resolve(page: i64, items_total: i64, page_size: i64) -> Result<Self, FilterError> {
        let pages_total = pages_total(items_total, page_size);
        let page_index = page.saturating_sub(1);

        if page_index < 0 || page_index >= pages_total {
            return Err(FilterError::PageOutOfRange { page, items_total, pages_total });
        }

        Ok(Self { page_index, page_size, items_total, pages_total })
    }

    pub fn page_current(&self) -> i64 {
        self.page_index + 1
    }

    pub fn limit(&self) -> i64 {
        self.page_size
    }

    pub fn offset(&self) -> i64 {
        self.page_index * self.page_size
    }
}
