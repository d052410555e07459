//! # Axum Helpers
//!
//! Shared HTTP plumbing for the todo service.
//!
//! - **[`auth`]**: stateless JWT verification and the [`AuthUser`] extractor
//! - **[`server`]**: router assembly with API docs, health endpoints, graceful shutdown
//! - **[`http`]**: CORS and security headers
//! - **[`errors`]**: [`AppError`] and the JSON error body
//! - **[`extractors`]**: [`IdPath`], [`QueryParams`], [`ValidatedJson`]
//! - **[`audit`]**: audit events on the `audit` tracing target

pub mod audit;
pub mod auth;
pub mod errors;
pub mod extractors;
pub mod http;
pub mod server;

pub use auth::{ACCESS_TOKEN_TTL, AuthUser, JwtAuth, JwtClaims, JwtConfig, UserRole, jwt_auth_middleware};

pub use server::{
    HealthCheckFuture, HealthResponse, ShutdownCoordinator, create_production_app, create_router,
    health_router, run_health_checks, shutdown_signal,
};

pub use http::{create_cors_layer, security_headers};

pub use errors::{AppError, ErrorCode, ErrorResponse};

pub use extractors::{IdPath, QueryParams, ValidatedJson};

pub use audit::{AuditEvent, AuditOutcome, extract_ip_from_headers, extract_user_agent};
