use serde::{Deserialize, Serialize};
use tracing::{error, warn};

use crate::config::ListingConfig;
use crate::database::manager::DatabaseError;
use crate::database::models::{User, UserDisplay, UserDraft, UserPatch, ValidationError};
use crate::database::schema::USERS_TABLE;
use crate::database::UserRepository;
use crate::filter::pagination::parse_page;
use crate::filter::{Filter, FilterError, ListQuery, Pagination};

#[derive(Debug, thiserror::Error)]
pub enum UserServiceError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error(transparent)]
    Filter(#[from] FilterError),
    #[error(transparent)]
    Database(#[from] DatabaseError),
    #[error("Stored user {id} failed validation: {reason}")]
    CorruptRecord { id: String, reason: ValidationError },
}

/// One page of the user listing
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserPage {
    pub page_current: i64,
    pub pages_total: i64,
    pub items_total: i64,
    pub items_here: i64,
    pub page_size: i64,
    pub items: Vec<UserDisplay>,
}

#[derive(Clone)]
pub struct UserService {
    repository: UserRepository,
    page_size: i64,
}

impl UserService {
    pub fn new(repository: UserRepository, listing: &ListingConfig) -> Self {
        Self { repository, page_size: listing.page_size }
    }

    /// Validate, assign id and secret, persist. Returns the new id.
    pub async fn create(&self, draft: UserDraft) -> Result<String, UserServiceError> {
        draft.validate()?;
        let user = User::create(draft);
        self.repository.create(&user).await?;
        Ok(user.id)
    }

    pub async fn get(&self, id: &str) -> Result<UserDisplay, UserServiceError> {
        let user = self.repository.get_by_id(id).await?;
        if let Err(reason) = user.validate() {
            error!("Invalid user queried from the database ({}): {}", reason, user.id);
            return Err(UserServiceError::CorruptRecord { id: user.id, reason });
        }
        Ok(user.to_display())
    }

    pub async fn replace(&self, id: &str, draft: UserDraft) -> Result<UserDisplay, UserServiceError> {
        draft.validate()?;
        self.repository.update(id, &draft).await?;
        self.get(id).await
    }

    pub async fn patch(&self, id: &str, patch: UserPatch) -> Result<UserDisplay, UserServiceError> {
        patch.validate()?;
        self.repository.update_partial(id, &patch).await?;
        self.get(id).await
    }

    /// Paginated, filtered, ordered listing.
    ///
    /// Query translation and the page number are checked before any store access. The count
    /// runs over the filtered set, then the page itself is fetched with LIMIT/OFFSET. Rows
    /// failing validation are dropped from the page and logged; `items_here` counts what is
    /// actually returned while `items_total` stays the store's count.
    pub async fn list(&self, query: &ListQuery) -> Result<UserPage, UserServiceError> {
        let page = parse_page(query.page.as_deref())?;
        let mut filter = Filter::from_list_query(USERS_TABLE, query)?;

        let items_total = self.repository.count(filter.clone()).await?;
        let pagination = Pagination::resolve(page, items_total, self.page_size)?;
        filter.paginate(&pagination)?;

        let items: Vec<UserDisplay> = self
            .repository
            .find(filter)
            .await?
            .into_iter()
            .filter_map(|row| match row {
                Ok(user) => match user.validate() {
                    Ok(()) => Some(user.to_display()),
                    Err(reason) => {
                        warn!("Skipping invalid user {} in listing: {}", user.id, reason);
                        None
                    }
                },
                Err(bad) => {
                    warn!(
                        "Skipping unreadable user {} in listing: {}",
                        bad.id.as_deref().unwrap_or("<unknown id>"),
                        bad.error
                    );
                    None
                }
            })
            .collect();

        Ok(UserPage {
            page_current: pagination.page_current(),
            pages_total: pagination.pages_total,
            items_total: pagination.items_total,
            items_here: items.len() as i64,
            page_size: pagination.page_size,
            items,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DatabaseConfig;
    use crate::database::manager::DatabaseManager;
    use crate::database::models::Coordinates;

    async fn service() -> (UserService, UserRepository, tempfile::TempDir) {
        let dir = tempfile::tempdir().unwrap();
        let config = DatabaseConfig {
            url: format!("sqlite://{}", dir.path().join("users.db").display()),
            max_connections: 1,
        };
        let repository = UserRepository::new(DatabaseManager::connect(&config).await.unwrap());
        (UserService::new(repository.clone(), &ListingConfig::default()), repository, dir)
    }

    fn draft(firstname: &str, age: i64) -> UserDraft {
        UserDraft {
            firstname: firstname.to_string(),
            secondname: "Tester".to_string(),
            age,
            map: Coordinates { lat: age as f64, lon: -(age as f64) },
        }
    }

    fn query(page: &str) -> ListQuery {
        ListQuery { page: Some(page.to_string()), ..Default::default() }
    }

    #[tokio::test]
    async fn rejects_invalid_draft_before_storage() {
        let (svc, repo, _dir) = service().await;
        let err = svc.create(draft("Al", 30)).await.unwrap_err();
        assert!(matches!(err, UserServiceError::Validation(ValidationError::Firstname)));
        assert_eq!(repo.count(Filter::new(USERS_TABLE)).await.unwrap(), 0);
    }

    #[tokio::test]
    async fn last_page_is_partial() {
        let (svc, _repo, _dir) = service().await;
        for i in 0..12 {
            svc.create(draft(&format!("User{:02}", i), 20 + i)).await.unwrap();
        }

        let page = svc.list(&query("3")).await.unwrap();
        assert_eq!(page.items_total, 12);
        assert_eq!(page.pages_total, 3);
        assert_eq!(page.page_current, 3);
        assert_eq!(page.items_here, 2);
        assert_eq!(page.items.len(), 2);
        assert_eq!(page.page_size, 5);

        let err = svc.list(&query("4")).await.unwrap_err();
        assert!(matches!(
            err,
            UserServiceError::Filter(FilterError::PageOutOfRange { items_total: 12, pages_total: 3, .. })
        ));
    }

    #[tokio::test]
    async fn corrupt_rows_are_dropped_from_listing_and_fail_get() {
        let (svc, repo, _dir) = service().await;
        for i in 0..3 {
            svc.create(draft(&format!("User{}", i), 30)).await.unwrap();
        }
        // bypass validation to plant a corrupt row
        let mut bad = User::create(draft("Bad", 30));
        bad.age = 200;
        repo.create(&bad).await.unwrap();

        let page = svc.list(&query("1")).await.unwrap();
        assert_eq!(page.items_total, 4);
        assert_eq!(page.items_here, 3);
        assert!(page.items.iter().all(|u| u.id != bad.id));

        assert!(matches!(
            svc.get(&bad.id).await.unwrap_err(),
            UserServiceError::CorruptRecord { reason: ValidationError::Age, .. }
        ));
    }

    #[tokio::test]
    async fn mistyped_rows_are_dropped_from_listing() {
        let (svc, repo, _dir) = service().await;
        for i in 0..3 {
            svc.create(draft(&format!("User{}", i), 30)).await.unwrap();
        }
        sqlx::query("INSERT INTO users VALUES ('zzz', 'Bad', 'Row', 'old', 1.0, 2.0, 'abc')")
            .execute(repo.pool())
            .await
            .unwrap();

        let page = svc.list(&ListQuery::default()).await.unwrap();
        assert_eq!(page.items_total, 4);
        assert_eq!(page.items_here, 3);
        assert!(page.items.iter().all(|u| u.id != "zzz"));

        assert!(matches!(svc.get("zzz").await.unwrap_err(), UserServiceError::Database(_)));
    }

    #[tokio::test]
    async fn patch_then_get_merges() {
        let (svc, _repo, _dir) = service().await;
        let id = svc.create(draft("Alice", 30)).await.unwrap();

        let updated = svc
            .patch(&id, UserPatch { secondname: Some("Liddell".to_string()), ..Default::default() })
            .await
            .unwrap();
        assert_eq!(updated.secondname, "Liddell");
        assert_eq!(updated.firstname, "Alice");
        assert_eq!(updated.age, 30);
        assert_eq!(updated.map, Coordinates { lat: 30.0, lon: -30.0 });
    }
}
