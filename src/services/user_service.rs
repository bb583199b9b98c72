use std::sync::Arc;

use validator::Validate;

use crate::{
    auth::PasswordService,
    errors::{AppError, AppResult},
    models::{
        domain::User,
        dto::{
            request::{RegisterUserRequest, UpdateUserRequest},
            response::UserDto,
        },
    },
    repositories::UserRepository,
};

pub struct UserService {
    repository: Arc<dyn UserRepository>,
    passwords: Arc<PasswordService>,
}

impl UserService {
    pub fn new(repository: Arc<dyn UserRepository>, passwords: Arc<PasswordService>) -> Self {
        Self {
            repository,
            passwords,
        }
    }

    pub async fn register(&self, request: RegisterUserRequest) -> AppResult<UserDto> {
        request.validate()?;

        if self
            .repository
            .find_by_username(&request.username)
            .await?
            .is_some()
        {
            return Err(AppError::AlreadyExists(format!(
                "User with username '{}' already exists",
                request.username
            )));
        }

        let password_hash = self.hash_password(&request.password).await?;
        let user = User::new(
            &request.username,
            &request.full_name,
            &request.email,
            &password_hash,
        );

        let user = self.repository.create(user).await?;
        log::info!("Registered user '{}'", user.username);

        Ok(user.into())
    }

    pub async fn get_user(&self, username: &str) -> AppResult<UserDto> {
        Ok(self.find_user(username).await?.into())
    }

    pub async fn update_user(&self, username: &str, request: UpdateUserRequest) -> AppResult<UserDto> {
        let request = request.normalized();
        if request.is_empty() {
            return Err(AppError::ValidationError(
                "No valid field provided for update".to_string(),
            ));
        }
        request.validate()?;

        let mut user = self.find_user(username).await?;

        if let Some(email) = request.email {
            user.email = email;
        }
        if let Some(full_name) = request.full_name {
            user.full_name = full_name;
        }
        if let Some(password) = request.password {
            user.password_hash = self.hash_password(&password).await?;
        }

        let user = self.repository.update(user).await?;
        Ok(user.into())
    }

    pub async fn health_check(&self) -> AppResult<()> {
        self.repository.health_check().await
    }

    async fn find_user(&self, username: &str) -> AppResult<User> {
        self.repository
            .find_by_username(username)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("User with username '{}' not found", username)))
    }

    async fn hash_password(&self, password: &str) -> AppResult<String> {
        let passwords = Arc::clone(&self.passwords);
        let password = password.to_string();

        tokio::task::spawn_blocking(move || passwords.hash(&password))
            .await
            .map_err(|e| AppError::InternalError(format!("Hashing task failed: {}", e)))?
            .map_err(|e| AppError::InternalError(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{fixtures::test_password_service, repositories::InMemoryUserRepository};

    fn service() -> (UserService, Arc<PasswordService>, Arc<InMemoryUserRepository>) {
        let repository = Arc::new(InMemoryUserRepository::new());
        let passwords = test_password_service();
        (
            UserService::new(repository.clone(), passwords.clone()),
            passwords,
            repository,
        )
    }

    fn register_request(username: &str) -> RegisterUserRequest {
        RegisterUserRequest {
            username: username.to_string(),
            full_name: "Alice Wonder".to_string(),
            email: format!("{}@example.com", username),
            password: "wonderland".to_string(),
        }
    }

    #[tokio::test]
    async fn test_register_hashes_password() {
        let (service, passwords, repository) = service();

        let dto = service.register(register_request("alice")).await.unwrap();
        assert_eq!(dto.username, "alice");

        let stored = repository.find_by_username("alice").await.unwrap().unwrap();
        assert_ne!(stored.password_hash, "wonderland");
        assert!(passwords.verify("wonderland", &stored.password_hash).unwrap());
    }

    #[tokio::test]
    async fn test_register_hashes_off_the_runtime() {
        use std::sync::atomic::{AtomicUsize, Ordering};

        let repository = Arc::new(InMemoryUserRepository::new());
        let passwords = Arc::new(PasswordService::new(8 * 1024, 3).unwrap());
        let service = UserService::new(repository, passwords);

        let ticks = Arc::new(AtomicUsize::new(0));
        let ticker = {
            let ticks = ticks.clone();
            tokio::spawn(async move {
                loop {
                    ticks.fetch_add(1, Ordering::SeqCst);
                    tokio::task::yield_now().await;
                }
            })
        };

        service.register(register_request("alice")).await.unwrap();
        ticker.abort();

        assert!(ticks.load(Ordering::SeqCst) > 0);
    }

    #[tokio::test]
    async fn test_register_duplicate_username() {
        let (service, _, _) = service();

        service.register(register_request("alice")).await.unwrap();
        let result = service.register(register_request("alice")).await;

        assert!(matches!(result, Err(AppError::AlreadyExists(_))));
    }

    #[tokio::test]
    async fn test_register_invalid_request() {
        let (service, _, _) = service();
        let mut request = register_request("alice");
        request.email = "nope".to_string();

        let result = service.register(request).await;
        assert!(matches!(result, Err(AppError::ValidationError(_))));
    }

    #[tokio::test]
    async fn test_get_missing_user() {
        let (service, _, _) = service();

        let result = service.get_user("ghost").await;
        assert!(matches!(result, Err(AppError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_update_user_fields_and_password() {
        let (service, passwords, repository) = service();
        service.register(register_request("alice")).await.unwrap();

        let request = UpdateUserRequest {
            email: Some("alice@wonder.land".to_string()),
            full_name: Some(String::new()),
            password: Some("through-the-looking-glass".to_string()),
        };
        let dto = service.update_user("alice", request).await.unwrap();

        assert_eq!(dto.email, "alice@wonder.land");
        assert_eq!(dto.full_name, "Alice Wonder");

        let stored = repository.find_by_username("alice").await.unwrap().unwrap();
        assert!(passwords
            .verify("through-the-looking-glass", &stored.password_hash)
            .unwrap());
        assert!(!passwords.verify("wonderland", &stored.password_hash).unwrap());
    }

    #[tokio::test]
    async fn test_update_user_without_fields() {
        let (service, _, _) = service();
        service.register(register_request("alice")).await.unwrap();

        let result = service
            .update_user("alice", UpdateUserRequest::default())
            .await;

        match result {
            Err(AppError::ValidationError(msg)) => {
                assert_eq!(msg, "No valid field provided for update")
            }
            other => panic!("Expected ValidationError, got {:?}", other),
        }
    }
}
