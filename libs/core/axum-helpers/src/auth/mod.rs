//! Stateless JWT authentication.
//!
//! - [`JwtAuth`] signs and verifies HS256 tokens
//! - [`jwt_auth_middleware`] guards routes and stores [`JwtClaims`] in request extensions
//! - [`AuthUser`] extracts the authenticated caller from those claims
//!
//! ```ignore
//! let auth = JwtAuth::new(&JwtConfig::from_env()?);
//!
//! let protected = Router::new()
//!     .route("/todos", get(handler))
//!     .layer(axum::middleware::from_fn_with_state(auth, jwt_auth_middleware));
//! ```

pub mod config;
pub mod jwt;
pub mod middleware;
pub mod user;

pub use config::JwtConfig;
pub use jwt::{ACCESS_TOKEN_TTL, JwtAuth, JwtClaims};
pub use middleware::jwt_auth_middleware;
pub use user::{AuthUser, UserRole};
