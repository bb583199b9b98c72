use std::sync::Arc;

use crate::{
    auth::{IdentityResolver, JwtService, PasswordService},
    config::Config,
    db::Database,
    errors::{AppError, AppResult},
    repositories::{CredentialStore, MongoUserRepository, UserRepository},
    services::{CredentialService, UserService},
};

#[derive(Clone)]
pub struct AppState {
    pub user_service: Arc<UserService>,
    pub credential_service: Arc<CredentialService>,
    pub identity_resolver: Arc<IdentityResolver>,
    pub config: Arc<Config>,
}

impl AppState {
    pub async fn new(config: Config) -> AppResult<Self> {
        let db = Database::connect(&config).await?;

        let user_repository = Arc::new(MongoUserRepository::new(&db));
        user_repository.ensure_indexes().await?;

        Self::with_repositories(config, user_repository.clone(), user_repository)
    }

    /// Wires the services around already constructed storage.
    pub fn with_repositories(
        config: Config,
        users: Arc<dyn UserRepository>,
        credentials: Arc<dyn CredentialStore>,
    ) -> AppResult<Self> {
        let passwords = Arc::new(
            PasswordService::new(config.password_hash_memory_kib, config.password_hash_cost)
                .map_err(|e| AppError::InternalError(e.to_string()))?,
        );
        let jwt_service = JwtService::new(&config.jwt_secret, config.jwt_expiration_hours);

        Ok(Self {
            user_service: Arc::new(UserService::new(users, passwords.clone())),
            credential_service: Arc::new(CredentialService::new(
                credentials,
                passwords,
                config.credential_lookup_timeout,
            )),
            identity_resolver: Arc::new(IdentityResolver::new(jwt_service)),
            config: Arc::new(config),
        })
    }
}
