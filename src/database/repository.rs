use sqlx::sqlite::SqlitePool;
use sqlx::{FromRow, Row};
use tracing::debug;

use crate::database::manager::DatabaseError;
use crate::database::models::{User, UserDraft, UserPatch};
use crate::database::query_builder::{execute, QueryBuilder};
use crate::database::schema::USERS_TABLE;
use crate::filter::{Filter, FilterField, FilterOp, FilterWhereInfo, SqlParam, SqlResult};

/// A listed row whose columns could not be read into a `User`
#[derive(Debug)]
pub struct UndecodableRow {
    pub id: Option<String>,
    pub error: sqlx::Error,
}

/// Store operations for the `users` table.
///
/// Every call is a single statement; there are no multi-record transactions, so
/// concurrent partial updates of one record resolve as last-write-wins.
#[derive(Clone)]
pub struct UserRepository {
    pool: SqlitePool,
}

impl UserRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    pub async fn create(&self, user: &User) -> Result<(), DatabaseError> {
        let sql = SqlResult {
            query: format!(
                "INSERT INTO \"{}\" (\"id\", \"firstname\", \"secondname\", \"age\", \"x\", \"y\", \"random_key\") \
                 VALUES (?, ?, ?, ?, ?, ?, ?)",
                USERS_TABLE
            ),
            params: vec![
                SqlParam::Text(user.id.clone()),
                SqlParam::Text(user.firstname.clone()),
                SqlParam::Text(user.secondname.clone()),
                SqlParam::Integer(user.age),
                SqlParam::Real(user.x),
                SqlParam::Real(user.y),
                SqlParam::Text(user.random_key.clone()),
            ],
        };
        execute(&self.pool, &sql).await?;
        debug!("Inserted user {}", user.id);
        Ok(())
    }

    pub async fn get_by_id(&self, id: &str) -> Result<User, DatabaseError> {
        let mut filter = Filter::new(USERS_TABLE);
        filter.where_clause(FilterWhereInfo {
            field: FilterField::Id,
            operator: FilterOp::Eq,
            data: SqlParam::Text(id.to_string()),
        });

        QueryBuilder::<User>::new(USERS_TABLE)
            .filter(filter)
            .select_optional(&self.pool)
            .await?
            .ok_or_else(|| DatabaseError::NotFound(format!("user {} not found", id)))
    }

    /// Full replace of the client-writable fields. The secret is left as stored.
    pub async fn update(&self, id: &str, draft: &UserDraft) -> Result<(), DatabaseError> {
        let assignments = vec![
            (FilterField::Firstname, SqlParam::Text(draft.firstname.clone())),
            (FilterField::Secondname, SqlParam::Text(draft.secondname.clone())),
            (FilterField::Age, SqlParam::Integer(draft.age)),
            (FilterField::Lat, SqlParam::Real(draft.map.lat)),
            (FilterField::Lon, SqlParam::Real(draft.map.lon)),
        ];
        self.update_columns(id, assignments).await
    }

    /// Write only the fields present in `patch`
    pub async fn update_partial(&self, id: &str, patch: &UserPatch) -> Result<(), DatabaseError> {
        let mut assignments = Vec::new();
        if let Some(ref v) = patch.firstname {
            assignments.push((FilterField::Firstname, SqlParam::Text(v.clone())));
        }
        if let Some(ref v) = patch.secondname {
            assignments.push((FilterField::Secondname, SqlParam::Text(v.clone())));
        }
        if let Some(v) = patch.age {
            assignments.push((FilterField::Age, SqlParam::Integer(v)));
        }
        if let Some(map) = patch.map {
            if let Some(lat) = map.lat {
                assignments.push((FilterField::Lat, SqlParam::Real(lat)));
            }
            if let Some(lon) = map.lon {
                assignments.push((FilterField::Lon, SqlParam::Real(lon)));
            }
        }

        if assignments.is_empty() {
            // Nothing to write, but the caller still learns whether the record exists
            return self.get_by_id(id).await.map(|_| ());
        }
        self.update_columns(id, assignments).await
    }

    /// Rows are decoded one at a time, so a row with mistyped columns comes back
    /// as `Err(UndecodableRow)` instead of failing the whole query.
    pub async fn find(
        &self,
        filter: Filter,
    ) -> Result<Vec<Result<User, UndecodableRow>>, DatabaseError> {
        let rows = QueryBuilder::<User>::new(USERS_TABLE)
            .filter(filter)
            .select_rows(&self.pool)
            .await?;

        Ok(rows
            .iter()
            .map(|row| {
                User::from_row(row).map_err(|error| UndecodableRow {
                    id: row.try_get("id").ok(),
                    error,
                })
            })
            .collect())
    }

    pub async fn count(&self, filter: Filter) -> Result<i64, DatabaseError> {
        QueryBuilder::<User>::new(USERS_TABLE)
            .filter(filter)
            .count(&self.pool)
            .await
    }

    async fn update_columns(
        &self,
        id: &str,
        assignments: Vec<(FilterField, SqlParam)>,
    ) -> Result<(), DatabaseError> {
        let set_clause = assignments
            .iter()
            .map(|(field, _)| format!("\"{}\" = ?", field.column()))
            .collect::<Vec<_>>()
            .join(", ");

        let mut params: Vec<SqlParam> = assignments.into_iter().map(|(_, v)| v).collect();
        params.push(SqlParam::Text(id.to_string()));

        let sql = SqlResult {
            query: format!("UPDATE \"{}\" SET {} WHERE \"id\" = ?", USERS_TABLE, set_clause),
            params,
        };

        match execute(&self.pool, &sql).await? {
            0 => Err(DatabaseError::NotFound(format!("user {} not found", id))),
            _ => {
                debug!("Updated user {}", id);
                Ok(())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DatabaseConfig;
    use crate::database::manager::DatabaseManager;
    use crate::database::models::{Coordinates, CoordinatesPatch};
    use crate::filter::{FilterOrderInfo, SortDirection};

    async fn repository() -> (UserRepository, tempfile::TempDir) {
        let dir = tempfile::tempdir().unwrap();
        let config = DatabaseConfig {
            url: format!("sqlite://{}", dir.path().join("users.db").display()),
            max_connections: 1,
        };
        let pool = DatabaseManager::connect(&config).await.unwrap();
        (UserRepository::new(pool), dir)
    }

    fn draft(firstname: &str, age: i64) -> UserDraft {
        UserDraft {
            firstname: firstname.to_string(),
            secondname: "Tester".to_string(),
            age,
            map: Coordinates { lat: 10.0, lon: 20.0 },
        }
    }

    #[tokio::test]
    async fn create_then_get() {
        let (repo, _dir) = repository().await;
        let user = User::create(draft("Alice", 30));
        repo.create(&user).await.unwrap();
        assert_eq!(repo.get_by_id(&user.id).await.unwrap(), user);
    }

    #[tokio::test]
    async fn missing_record_is_not_found() {
        let (repo, _dir) = repository().await;
        assert!(matches!(repo.get_by_id("nope").await, Err(DatabaseError::NotFound(_))));
        assert!(matches!(repo.update("nope", &draft("Bob", 20)).await, Err(DatabaseError::NotFound(_))));
        assert!(matches!(
            repo.update_partial("nope", &UserPatch::default()).await,
            Err(DatabaseError::NotFound(_))
        ));
    }

    #[tokio::test]
    async fn full_update_keeps_secret() {
        let (repo, _dir) = repository().await;
        let user = User::create(draft("Alice", 30));
        repo.create(&user).await.unwrap();

        repo.update(&user.id, &draft("Alicia", 31)).await.unwrap();
        let stored = repo.get_by_id(&user.id).await.unwrap();
        assert_eq!(stored.firstname, "Alicia");
        assert_eq!(stored.age, 31);
        assert_eq!(stored.random_key, user.random_key);
    }

    #[tokio::test]
    async fn partial_update_touches_only_present_fields() {
        let (repo, _dir) = repository().await;
        let user = User::create(draft("Alice", 30));
        repo.create(&user).await.unwrap();

        let patch = UserPatch {
            map: Some(CoordinatesPatch { lat: None, lon: Some(-5.5) }),
            ..Default::default()
        };
        repo.update_partial(&user.id, &patch).await.unwrap();

        let stored = repo.get_by_id(&user.id).await.unwrap();
        assert_eq!(stored.y, -5.5);
        assert_eq!(stored.x, user.x);
        assert_eq!(stored.firstname, user.firstname);
        assert_eq!(stored.age, user.age);
    }

    #[tokio::test]
    async fn find_and_count_with_filter() {
        let (repo, _dir) = repository().await;
        for (name, age) in [("Anna", 20), ("Bert", 40), ("Cleo", 60), ("Dora", 40)] {
            repo.create(&User::create(draft(name, age))).await.unwrap();
        }

        let mut filter = Filter::new(USERS_TABLE);
        filter
            .where_clause(FilterWhereInfo {
                field: FilterField::Age,
                operator: FilterOp::Gte,
                data: SqlParam::Integer(40),
            })
            .order(vec![
                FilterOrderInfo { field: FilterField::Firstname, sort: SortDirection::Desc },
            ]);

        assert_eq!(repo.count(filter.clone()).await.unwrap(), 3);
        let names: Vec<String> = repo
            .find(filter)
            .await
            .unwrap()
            .into_iter()
            .map(|u| u.unwrap().firstname)
            .collect();
        assert_eq!(names, vec!["Dora", "Cleo", "Bert"]);
    }

    #[tokio::test]
    async fn mistyped_row_decodes_alone() {
        let (repo, _dir) = repository().await;
        let user = User::create(draft("Anna", 20));
        repo.create(&user).await.unwrap();
        // SQLite keeps the text as-is in an INTEGER column
        sqlx::query("INSERT INTO users VALUES ('zzz', 'Bad', 'Row', 'old', 1.0, 2.0, 'abc')")
            .execute(repo.pool())
            .await
            .unwrap();

        let rows = repo.find(Filter::new(USERS_TABLE)).await.unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows.iter().filter(|r| r.is_ok()).count(), 1);

        let bad = rows.into_iter().find_map(Result::err).unwrap();
        assert_eq!(bad.id.as_deref(), Some("zzz"));
    }
}
