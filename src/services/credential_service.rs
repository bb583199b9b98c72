use std::{sync::Arc, time::Duration};

use crate::{
    auth::{HashError, PasswordService},
    repositories::CredentialStore,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoginOutcome {
    Success,
    /// Unknown username or wrong password; the two are indistinguishable.
    InvalidCredentials,
    /// The credential store failed or timed out. Transient.
    LookupError,
}

impl LoginOutcome {
    pub fn is_retryable(&self) -> bool {
        matches!(self, LoginOutcome::LookupError)
    }
}

pub struct CredentialService {
    store: Arc<dyn CredentialStore>,
    passwords: Arc<PasswordService>,
    lookup_timeout: Duration,
}

impl CredentialService {
    pub fn new(
        store: Arc<dyn CredentialStore>,
        passwords: Arc<PasswordService>,
        lookup_timeout: Duration,
    ) -> Self {
        Self {
            store,
            passwords,
            lookup_timeout,
        }
    }

    pub async fn check_login(&self, username: &str, password: &str) -> LoginOutcome {
        let lookup = tokio::time::timeout(
            self.lookup_timeout,
            self.store.find_password_hash(username),
        )
        .await;

        let digest = match lookup {
            Ok(Ok(digest)) => digest,
            Ok(Err(e)) => {
                log::error!("Credential lookup failed: {}", e);
                return LoginOutcome::LookupError;
            }
            Err(_) => {
                log::error!(
                    "Credential lookup timed out after {} ms",
                    self.lookup_timeout.as_millis()
                );
                return LoginOutcome::LookupError;
            }
        };

        let passwords = Arc::clone(&self.passwords);
        let username = username.to_string();
        let password = password.to_string();

        // Argon2 is CPU-bound; keep it off the async workers.
        let verification = tokio::task::spawn_blocking(move || {
            let Some(digest) = digest else {
                passwords.verify_dummy(&password);
                return LoginOutcome::InvalidCredentials;
            };

            match passwords.verify(&password, &digest) {
                Ok(true) => LoginOutcome::Success,
                Ok(false) => LoginOutcome::InvalidCredentials,
                Err(HashError::InvalidDigestFormat) => {
                    log::error!("Stored password digest for '{}' is malformed", username);
                    passwords.verify_dummy(&password);
                    LoginOutcome::InvalidCredentials
                }
                Err(e) => {
                    log::error!("Password verification failed: {}", e);
                    passwords.verify_dummy(&password);
                    LoginOutcome::InvalidCredentials
                }
            }
        })
        .await;

        verification.unwrap_or_else(|e| {
            log::error!("Password verification task failed: {}", e);
            LoginOutcome::LookupError
        })
    }
}
