use core_config::{AppInfo, FromEnv, app_info, server::ServerConfig};

use axum_helpers::JwtConfig;
use database::postgres::PostgresConfig;
use domain_todos::WeatherConfig;

pub use core_config::Environment;

/// Application configuration, composed from the shared config components
#[derive(Clone, Debug)]
pub struct Config {
    pub app: AppInfo,
    pub database: PostgresConfig,
    pub server: ServerConfig,
    pub jwt: JwtConfig,
    pub weather: WeatherConfig,
    pub environment: Environment,
}

impl Config {
    pub fn from_env() -> eyre::Result<Self> {
        let environment = Environment::from_env();
        let database = PostgresConfig::from_env()?; // Required - DATABASE_URL
        let server = ServerConfig::from_env()?; // Defaults: HOST=0.0.0.0, PORT=8080
        let jwt = JwtConfig::from_env()?; // Required - JWT_SECRET
        let weather = WeatherConfig::from_env()?;

        Ok(Self {
            app: app_info!(),
            database,
            server,
            jwt,
            weather,
            environment,
        })
    }
}
