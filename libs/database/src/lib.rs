//! Connection management for the todo service's PostgreSQL store.
//!
//! # Features
//!
//! - `postgres` (default) - connector, migrations runner and health check built on SeaORM
//! - `config` - `core_config::FromEnv` for [`postgres::PostgresConfig`]
//!
//! # Example
//!
//! ```ignore
//! use database::common::RetryConfig;
//! use database::postgres::{self, PostgresConfig};
//! use migration::Migrator;
//!
//! let config = PostgresConfig::from_env()?;
//! let db = postgres::connect_with_retry(config, RetryConfig::startup()).await?;
//! postgres::run_migrations::<Migrator>(&db, "todo_api").await?;
//! ```

pub mod common;

#[cfg(feature = "postgres")]
pub mod postgres;

pub use common::{DatabaseError, DatabaseResult};
