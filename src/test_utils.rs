#[cfg(test)]
pub mod fixtures {
    use std::sync::Arc;

    use crate::{auth::PasswordService, models::domain::User};

    /// Argon2 at its minimum cost; keeps hashing in tests fast.
    pub fn test_password_service() -> Arc<PasswordService> {
        Arc::new(PasswordService::new(argon2::Params::MIN_M_COST, 1).unwrap())
    }

    /// Creates a test user whose password is `password`
    pub fn test_user_with_password(
        passwords: &PasswordService,
        username: &str,
        password: &str,
    ) -> User {
        User::new(
            username,
            "Test User",
            &format!("{}@example.com", username),
            &passwords.hash(password).unwrap(),
        )
    }
}

#[cfg(test)]
pub mod repositories {
    use std::{collections::HashMap, sync::Arc};

    use async_trait::async_trait;
    use tokio::sync::RwLock;

    use crate::{
        errors::{AppError, AppResult},
        models::domain::User,
        repositories::{CredentialStore, UserRepository},
    };

    pub struct InMemoryUserRepository {
        users_by_username: Arc<RwLock<HashMap<String, User>>>,
    }

    impl InMemoryUserRepository {
        pub fn new() -> Self {
            Self {
                users_by_username: Arc::new(RwLock::new(HashMap::new())),
            }
        }
    }

    #[async_trait]
    impl UserRepository for InMemoryUserRepository {
        async fn create(&self, user: User) -> AppResult<User> {
            let mut users = self.users_by_username.write().await;

            if users.contains_key(&user.username) {
                return Err(AppError::AlreadyExists(format!(
                    "User with username '{}' already exists",
                    user.username
                )));
            }

            users.insert(user.username.clone(), user.clone());
            Ok(user)
        }

        async fn find_by_username(&self, username: &str) -> AppResult<Option<User>> {
            let users = self.users_by_username.read().await;
            Ok(users.get(username).cloned())
        }

        async fn update(&self, user: User) -> AppResult<User> {
            let mut users = self.users_by_username.write().await;
            if !users.contains_key(&user.username) {
                return Err(AppError::NotFound(format!(
                    "User with username '{}' not found",
                    user.username
                )));
            }

            users.insert(user.username.clone(), user.clone());
            Ok(user)
        }

        async fn ensure_indexes(&self) -> AppResult<()> {
            Ok(())
        }

        async fn health_check(&self) -> AppResult<()> {
            Ok(())
        }
    }

    #[async_trait]
    impl CredentialStore for InMemoryUserRepository {
        async fn find_password_hash(&self, username: &str) -> AppResult<Option<String>> {
            let users = self.users_by_username.read().await;
            Ok(users.get(username).map(|u| u.password_hash.clone()))
        }
    }
}

#[cfg(test)]
pub mod test_helpers {
    use actix_web::http::StatusCode;

    /// Asserts that a status code represents success (2xx)
    pub fn assert_success_status(status: StatusCode) {
        assert!(
            status.is_success(),
            "Expected success status, got: {}",
            status
        );
    }
}

#[cfg(test)]
mod tests {
    use super::fixtures::*;

    #[test]
    fn test_fixtures_test_user_with_password() {
        let passwords = test_password_service();
        let user = test_user_with_password(&passwords, "custom", "secret-password");

        assert_eq!(user.username, "custom");
        assert_eq!(user.email, "custom@example.com");
        assert!(passwords.verify("secret-password", &user.password_hash).unwrap());
    }
}
