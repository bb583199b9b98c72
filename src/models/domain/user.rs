use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A stored account. The username is the primary identifier and the subject
/// carried in bearer tokens.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct User {
    pub username: String,
    pub full_name: String,
    pub email: String,
    pub password_hash: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
}

impl User {
    pub fn new(username: &str, full_name: &str, email: &str, password_hash: &str) -> Self {
        User {
            username: username.to_string(),
            full_name: full_name.to_string(),
            email: email.to_string(),
            password_hash: password_hash.to_string(),
            created_at: Some(Utc::now()),
        }
    }
}

#[cfg(test)]
impl User {
    pub fn assert_fields(&self, username: &str, full_name: &str, email: &str) {
        assert_eq!(self.username, username);
        assert_eq!(self.full_name, full_name);
        assert_eq!(self.email, email);
    }
}
