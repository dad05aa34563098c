use sqlx::{
    self,
    sqlite::{SqliteArguments, SqlitePool, SqliteRow},
    FromRow, Row, Sqlite,
};

use crate::database::manager::DatabaseError;
use crate::filter::{Filter, SqlParam, SqlResult};

/// Runs a `Filter` against a table and maps rows into `T`
pub struct QueryBuilder<T> {
    table_name: &'static str,
    filter: Option<Filter>,
    _phantom: std::marker::PhantomData<T>,
}

impl<T> QueryBuilder<T>
where
    T: for<'r> FromRow<'r, SqliteRow> + Send + Unpin,
{
    pub fn new(table_name: &'static str) -> Self {
        Self {
            table_name,
            filter: None,
            _phantom: std::marker::PhantomData,
        }
    }

    pub fn filter(mut self, filter: Filter) -> Self {
        self.filter = Some(filter);
        self
    }

    /// Fetch undecoded rows; the caller maps each one into `T` on its own
    pub async fn select_rows(self, pool: &SqlitePool) -> Result<Vec<SqliteRow>, DatabaseError> {
        let sql_result = self.sql_result();
        let mut q = sqlx::query(&sql_result.query);
        for p in sql_result.params.iter() {
            q = bind_param_query(q, p);
        }
        let rows = q.fetch_all(pool).await?;
        Ok(rows)
    }

    pub async fn select_optional(self, pool: &SqlitePool) -> Result<Option<T>, DatabaseError> {
        let sql_result = self.sql_result();
        let mut q = sqlx::query_as::<_, T>(&sql_result.query);
        for p in sql_result.params.iter() {
            q = bind_param_query_as(q, p);
        }
        let row = q.fetch_optional(pool).await?;
        Ok(row)
    }

    pub async fn count(self, pool: &SqlitePool) -> Result<i64, DatabaseError> {
        let sql_result = self
            .filter
            .as_ref()
            .map(Filter::to_count_sql)
            .unwrap_or_else(|| SqlResult {
                query: format!("SELECT COUNT(*) AS count FROM \"{}\"", self.table_name),
                params: vec![],
            });

        let mut q = sqlx::query(&sql_result.query);
        for p in sql_result.params.iter() {
            q = bind_param_query(q, p);
        }
        let row = q.fetch_one(pool).await?;
        let count: i64 = row.try_get("count")?;
        Ok(count)
    }

    fn sql_result(&self) -> SqlResult {
        match &self.filter {
            Some(filter) => filter.to_sql(),
            None => SqlResult { query: format!("SELECT * FROM \"{}\"", self.table_name), params: vec![] },
        }
    }
}

/// Execute a statement that returns no rows, yielding the affected row count
pub async fn execute(pool: &SqlitePool, sql_result: &SqlResult) -> Result<u64, DatabaseError> {
    let mut q = sqlx::query(&sql_result.query);
    for p in sql_result.params.iter() {
        q = bind_param_query(q, p);
    }
    let done = q.execute(pool).await?;
    Ok(done.rows_affected())
}

fn bind_param_query<'q>(
    q: sqlx::query::Query<'q, Sqlite, SqliteArguments<'q>>,
    v: &SqlParam,
) -> sqlx::query::Query<'q, Sqlite, SqliteArguments<'q>> {
    match v {
        SqlParam::Text(s) => q.bind(s.clone()),
        SqlParam::Integer(i) => q.bind(*i),
        SqlParam::Real(f) => q.bind(*f),
    }
}

fn bind_param_query_as<'q, O>(
    q: sqlx::query::QueryAs<'q, Sqlite, O, SqliteArguments<'q>>,
    v: &SqlParam,
) -> sqlx::query::QueryAs<'q, Sqlite, O, SqliteArguments<'q>>
where
    O: for<'r> FromRow<'r, SqliteRow>,
{
    match v {
        SqlParam::Text(s) => q.bind(s.clone()),
        SqlParam::Integer(i) => q.bind(*i),
        SqlParam::Real(f) => q.bind(*f),
    }
}
