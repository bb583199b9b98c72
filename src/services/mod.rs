pub mod credential_service;
pub mod user_service;

pub use credential_service::{CredentialService, LoginOutcome};
pub use user_service::UserService;
