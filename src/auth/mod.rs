pub mod claims;
pub mod guard;
pub mod jwt;
pub mod middleware;
pub mod password;
pub mod principal;
pub mod resolver;

pub use claims::Claims;
pub use guard::{authorize, AuthorizationDecision, DenyReason};
pub use jwt::{JwtService, TokenError};
pub use middleware::{Identity, IdentityMiddleware};
pub use password::{HashError, PasswordService};
pub use principal::{Principal, ROLE_USER};
pub use resolver::IdentityResolver;
