use std::collections::BTreeSet;

pub const ROLE_USER: &str = "ROLE_USER";

/// The caller behind one request, as established from a verified token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Principal {
    subject: String,
    roles: BTreeSet<String>,
}

impl Principal {
    /// Every authenticated caller holds the single user role.
    pub fn user(subject: impl Into<String>) -> Self {
        Self {
            subject: subject.into(),
            roles: BTreeSet::from([ROLE_USER.to_string()]),
        }
    }

    pub fn subject(&self) -> &str {
        &self.subject
    }

    pub fn roles(&self) -> &BTreeSet<String> {
        &self.roles
    }

    pub fn has_role(&self, role: &str) -> bool {
        self.roles.contains(role)
    }
}
