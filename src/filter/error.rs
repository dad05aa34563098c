use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum FilterError {
    #[error("Unknown field: {0}")]
    UnknownField(String),

    #[error("Unsupported operator: {0}")]
    UnsupportedOperator(String),

    #[error("Invalid sort direction: {0} (expected asc or desc)")]
    InvalidSortDirection(String),

    #[error("Missing filter predicate for field '{0}'")]
    MissingPredicate(String),

    #[error("Missing filter value for field '{0}'")]
    MissingValue(String),

    #[error("Invalid value '{value}' for field '{field}': expected {expected}")]
    InvalidValue {
        field: String,
        value: String,
        expected: &'static str,
    },

    #[error("Invalid page: {0}")]
    InvalidPage(String),

    #[error("Page {page} is out of range ({pages_total} pages, {items_total} items)")]
    PageOutOfRange {
        page: i64,
        items_total: i64,
        pages_total: i64,
    },

    #[error("Invalid limit: {0}")]
    InvalidLimit(String),

    #[error("Invalid offset: {0}")]
    InvalidOffset(String),
}
