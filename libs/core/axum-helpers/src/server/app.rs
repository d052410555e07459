use super::shutdown::ShutdownCoordinator;
use crate::errors::handlers::not_found;
use crate::http::{create_cors_layer, parse_allowed_origins, security_headers};
use axum::{Router, http::HeaderValue, middleware};
use core_config::server::ServerConfig;
use std::future::Future;
use std::io;
use std::time::Duration;
use tower_http::compression::CompressionLayer;
use tower_http::trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer};
use tracing::{Level, info, warn};
use utoipa::OpenApi;
use utoipa_rapidoc::RapiDoc;
use utoipa_redoc::{Redoc, Servable as RedocServable};
use utoipa_scalar::{Scalar, Servable as ScalarServable};

pub const OPENAPI_JSON_PATH: &str = "/api-docs/openapi.json";

/// Wraps the API routes with docs, fallback and cross-cutting layers.
///
/// - `/api/*`: `apis` (state already applied)
/// - `/api-docs/openapi.json`, `/rapidoc`, `/redoc`, `/scalar`
/// - tracing spans, security headers, CORS, compression
///
/// `CORS_ALLOWED_ORIGIN` (comma-separated) is required.
pub fn create_router<T>(apis: Router) -> io::Result<Router>
where
    T: OpenApi + 'static,
{
    let raw = std::env::var("CORS_ALLOWED_ORIGIN").map_err(|_| {
        io::Error::new(
            io::ErrorKind::InvalidInput,
            "CORS_ALLOWED_ORIGIN environment variable is required. Example: CORS_ALLOWED_ORIGIN=http://localhost:3000",
        )
    })?;
    let origins = parse_allowed_origins(&raw)?;
    info!("CORS configured with allowed origins: {}", raw);

    Ok(build_router::<T>(apis, origins))
}

/// [`create_router`] with explicit origins
pub fn build_router<T>(apis: Router, allowed_origins: Vec<HeaderValue>) -> Router
where
    T: OpenApi + 'static,
{
    Router::new()
        .merge(RapiDoc::with_openapi(OPENAPI_JSON_PATH, T::openapi()).path("/rapidoc"))
        .merge(Redoc::with_url("/redoc", T::openapi()))
        .merge(Scalar::with_url("/scalar", T::openapi()))
        .nest("/api", apis)
        .fallback(not_found)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
        .layer(middleware::from_fn(security_headers))
        .layer(create_cors_layer(allowed_origins))
        .layer(CompressionLayer::new())
}

/// Serve until SIGINT/SIGTERM, drain in-flight requests, then run `cleanup`
/// bounded by `shutdown_timeout`.
pub async fn create_production_app<F>(
    router: Router,
    server_config: &ServerConfig,
    shutdown_timeout: Duration,
    cleanup: F,
) -> io::Result<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    let coordinator = ShutdownCoordinator::new();

    let listener = tokio::net::TcpListener::bind(server_config.address()).await?;
    info!("Server starting on {}", listener.local_addr()?);

    let signal_task = {
        let coordinator = coordinator.clone();
        tokio::spawn(async move { coordinator.wait_for_signal().await })
    };

    let graceful = {
        let coordinator = coordinator.clone();
        async move { coordinator.wait().await }
    };

    let serve_result = axum::serve(listener, router.into_make_service())
        .with_graceful_shutdown(graceful)
        .await
        .inspect_err(|e| tracing::error!("Server encountered an error: {:?}", e));

    signal_task.abort();

    info!("Running cleanup (timeout: {:?})", shutdown_timeout);
    match tokio::time::timeout(shutdown_timeout, cleanup).await {
        Ok(()) => info!("Cleanup completed"),
        Err(_) => warn!("Cleanup exceeded {:?}, forcing shutdown", shutdown_timeout),
    }

    serve_result
}
