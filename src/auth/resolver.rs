use crate::auth::{jwt::JwtService, principal::Principal};

const BEARER_PREFIX: &str = "Bearer ";

/// Turns an `Authorization` header value into the request's principal.
///
/// Never fails: a missing header, another scheme, or a token that does not
/// verify all leave the request anonymous. Rejection happens later, at the
/// ownership check that actually needs an identity.
#[derive(Clone)]
pub struct IdentityResolver {
    jwt_service: JwtService,
}

impl IdentityResolver {
    pub fn new(jwt_service: JwtService) -> Self {
        Self { jwt_service }
    }

    pub fn resolve(&self, authorization: Option<&str>) -> Option<Principal> {
        let token = authorization?.strip_prefix(BEARER_PREFIX)?;

        match self.jwt_service.verify(token) {
            Ok(subject) => Some(Principal::user(subject)),
            Err(e) => {
                log::debug!("Ignoring bearer token: {}", e);
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;

    fn resolver() -> (IdentityResolver, JwtService) {
        let jwt_service = JwtService::new(&Config::test_config().jwt_secret, 1);
        (IdentityResolver::new(jwt_service.clone()), jwt_service)
    }

    #[test]
    fn test_resolve_valid_bearer_token() {
        let (resolver, jwt_service) = resolver();
        let token = jwt_service.create_token("alice").unwrap();

        let principal = resolver.resolve(Some(format!("Bearer {}", token).as_str())).unwrap();
        assert_eq!(principal.subject(), "alice");
    }

    #[test]
    fn test_resolve_missing_header() {
        let (resolver, _) = resolver();
        assert!(resolver.resolve(None).is_none());
    }

    #[test]
    fn test_resolve_other_scheme() {
        let (resolver, jwt_service) = resolver();
        let token = jwt_service.create_token("alice").unwrap();

        assert!(resolver.resolve(Some(format!("Basic {}", token).as_str())).is_none());
        assert!(resolver.resolve(Some(format!("bearer {}", token).as_str())).is_none());
        assert!(resolver.resolve(Some(format!("Bearer{}", token).as_str())).is_none());
        assert!(resolver.resolve(Some(token.as_str())).is_none());
    }

    #[test]
    fn test_resolve_garbage_token() {
        let (resolver, _) = resolver();

        assert!(resolver.resolve(Some("Bearer ")).is_none());
        assert!(resolver.resolve(Some("Bearer not.a.token")).is_none());
    }
}
