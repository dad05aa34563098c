use super::error::FilterError;
use super::filter_order::FilterOrder;
use super::filter_where::FilterWhere;
use super::pagination::Pagination;
use super::types::{FilterOrderInfo, FilterWhereInfo, ListQuery, SqlResult};

/// Parameterized SELECT / COUNT builder over a single table.
#[derive(Debug, Clone)]
pub struct Filter {
    table_name: &'static str,
    where_data: Option<FilterWhereInfo>,
    order_data: Vec<FilterOrderInfo>,
    limit: Option<i64>,
    offset: Option<i64>,
}

impl Filter {
    pub fn new(table_name: &'static str) -> Self {
        Self {
            table_name,
            where_data: None,
            order_data: vec![],
            limit: None,
            offset: None,
        }
    }

    /// Translate the raw listing query (minus `page`, which needs the count first).
    pub fn from_list_query(table_name: &'static str, query: &ListQuery) -> Result<Self, FilterError> {
        let mut filter = Self::new(table_name);
        filter.where_data = FilterWhere::parse(
            query.filter_by.as_deref(),
            query.filter_pred.as_deref(),
            query.filter_value.as_deref(),
        )?;
        filter.order_data = FilterOrder::parse(query.order_by.as_deref(), query.order_dir.as_deref())?;
        Ok(filter)
    }

    pub fn where_clause(&mut self, condition: FilterWhereInfo) -> &mut Self {
        self.where_data = Some(condition);
        self
    }

    pub fn order(&mut self, order: Vec<FilterOrderInfo>) -> &mut Self {
        self.order_data = order;
        self
    }

    pub fn limit(&mut self, limit: i64, offset: Option<i64>) -> Result<&mut Self, FilterError> {
        if limit < 0 {
            return Err(FilterError::InvalidLimit("Limit must be non-negative".to_string()));
        }
        if let Some(off) = offset {
            if off < 0 {
                return Err(FilterError::InvalidOffset("Offset must be non-negative".to_string()));
            }
        }
        self.limit = Some(limit);
        self.offset = offset;
        Ok(self)
    }

    pub fn paginate(&mut self, page: &Pagination) -> Result<&mut Self, FilterError> {
        self.limit(page.limit(), Some(page.offset()))
    }

    pub fn to_sql(&self) -> SqlResult {
        let (where_clause, params) = FilterWhere::generate(self.where_data.as_ref());
        let order_clause = FilterOrder::generate(&self.order_data);
        let limit_clause = self.build_limit_clause();

        let query = [
            "SELECT *".to_string(),
            format!("FROM \"{}\"", self.table_name),
            if where_clause.is_empty() { String::new() } else { format!("WHERE {}", where_clause) },
            order_clause,
            limit_clause,
        ]
        .into_iter()
        .filter(|s| !s.is_empty())
        .collect::<Vec<_>>()
        .join(" ");

        SqlResult { query, params }
    }

    pub fn to_count_sql(&self) -> SqlResult {
        let (where_clause, params) = FilterWhere::generate(self.where_data.as_ref());
        let query = if where_clause.is_empty() {
            format!("SELECT COUNT(*) AS count FROM \"{}\"", self.table_name)
        } else {
            format!("SELECT COUNT(*) AS count FROM \"{}\" WHERE {}", self.table_name, where_clause)
        };
        SqlResult { query, params }
    }

    fn build_limit_clause(&self) -> String {
        match (self.limit, self.offset) {
            (Some(l), Some(o)) => format!("LIMIT {} OFFSET {}", l, o),
            (Some(l), None) => format!("LIMIT {}", l),
            _ => String::new(),
        }
    }
}
