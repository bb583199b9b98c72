use crate::{
    auth::principal::Principal,
    errors::{AppError, AppResult},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DenyReason {
    Unauthenticated,
    OwnerMismatch,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthorizationDecision {
    Allowed,
    Denied(DenyReason),
}

impl AuthorizationDecision {
    pub fn is_allowed(&self) -> bool {
        matches!(self, AuthorizationDecision::Allowed)
    }

    pub fn reason(&self) -> Option<DenyReason> {
        match self {
            AuthorizationDecision::Allowed => None,
            AuthorizationDecision::Denied(reason) => Some(*reason),
        }
    }

    /// Every denial maps to the same 401 so callers learn nothing about why.
    pub fn into_result(self, message: &str) -> AppResult<()> {
        match self {
            AuthorizationDecision::Allowed => Ok(()),
            AuthorizationDecision::Denied(_) => Err(AppError::Unauthorized(message.to_string())),
        }
    }
}

/// Allows the request only when the caller is the resource owner.
pub fn authorize(principal: Option<&Principal>, resource_owner: &str) -> AuthorizationDecision {
    match principal {
        None => AuthorizationDecision::Denied(DenyReason::Unauthenticated),
        Some(p) if p.subject() == resource_owner => AuthorizationDecision::Allowed,
        Some(_) => AuthorizationDecision::Denied(DenyReason::OwnerMismatch),
    }
}
