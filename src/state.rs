use std::sync::Arc;

use sqlx::sqlite::SqlitePool;

use crate::auth::{AuthError, CredentialStore, StaticCredentials, TokenIssuer};
use crate::config::AppConfig;
use crate::database::UserRepository;
use crate::services::UserService;

/// Dependencies shared by every handler, cloned per request by axum
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub repository: UserRepository,
    pub users: UserService,
    pub tokens: Arc<TokenIssuer>,
    pub credentials: Arc<dyn CredentialStore>,
}

impl AppState {
    pub fn new(pool: SqlitePool, config: &AppConfig) -> Result<Self, AuthError> {
        let tokens = TokenIssuer::from_config(&config.security)?;
        let credentials = StaticCredentials::from_config(&config.security);
        Ok(Self::with_parts(pool, config.clone(), tokens, Arc::new(credentials)))
    }

    pub fn with_parts(
        pool: SqlitePool,
        config: AppConfig,
        tokens: TokenIssuer,
        credentials: Arc<dyn CredentialStore>,
    ) -> Self {
        let repository = UserRepository::new(pool);
        Self {
            users: UserService::new(repository.clone(), &config.listing),
            repository,
            config: Arc::new(config),
            tokens: Arc::new(tokens),
            credentials,
        }
    }
}
