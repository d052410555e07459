//! Weather lookup used when a todo is created.
//!
//! The upstream feed is a JSON array of `{"date": "MM-DD", "weather": "..."}`
//! entries, one per calendar day. Today's date is taken in UTC.

use async_trait::async_trait;
use chrono::{NaiveDate, Utc};
use core_config::{ConfigError, FromEnv, env_or_default, env_parse};
use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;
use tracing::{debug, warn};

use crate::error::{TodoError, TodoResult};

pub const DEFAULT_WEATHER_URL: &str = "https://f-api.github.io/f-api/weather.json";
const DEFAULT_TIMEOUT_SECS: u64 = 5;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait WeatherProvider: Send + Sync {
    /// Weather label for today. Any failure aborts todo creation.
    async fn today_weather(&self) -> TodoResult<String>;
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WeatherConfig {
    pub url: String,
    pub timeout: Duration,
}

impl Default for WeatherConfig {
    fn default() -> Self {
        Self {
            url: DEFAULT_WEATHER_URL.to_string(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }
}

impl FromEnv for WeatherConfig {
    fn from_env() -> Result<Self, ConfigError> {
        let timeout_secs: u64 = env_parse("WEATHER_TIMEOUT_SECS", DEFAULT_TIMEOUT_SECS)?;
        if timeout_secs == 0 {
            return Err(ConfigError::InvalidValue {
                key: "WEATHER_TIMEOUT_SECS".to_string(),
                details: "must be at least 1 second".to_string(),
            });
        }

        Ok(Self {
            url: env_or_default("WEATHER_API_URL", DEFAULT_WEATHER_URL),
            timeout: Duration::from_secs(timeout_secs),
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct WeatherEntry {
    /// `MM-DD`
    pub date: String,
    pub weather: String,
}

/// Pick the entry for `day`, ignoring the year.
pub fn weather_for(entries: &[WeatherEntry], day: NaiveDate) -> Option<&str> {
    let key = day.format("%m-%d").to_string();
    entries
        .iter()
        .find(|entry| entry.date == key)
        .map(|entry| entry.weather.as_str())
}

/// Fetches the daily weather feed over HTTP
pub struct HttpWeatherClient {
    client: Client,
    url: String,
}

impl HttpWeatherClient {
    pub fn new(config: &WeatherConfig) -> TodoResult<Self> {
        let client = Client::builder().timeout(config.timeout).build()?;
        Ok(Self {
            client,
            url: config.url.clone(),
        })
    }

    async fn fetch(&self) -> TodoResult<Vec<WeatherEntry>> {
        let response = self.client.get(&self.url).send().await?;

        if !response.status().is_success() {
            return Err(TodoError::Weather(format!(
                "weather feed returned {}",
                response.status()
            )));
        }

        let entries: Vec<WeatherEntry> = response.json().await?;
        if entries.is_empty() {
            return Err(TodoError::Weather("weather feed is empty".to_string()));
        }

        debug!(entries = entries.len(), "Fetched weather feed");
        Ok(entries)
    }
}

#[async_trait]
impl WeatherProvider for HttpWeatherClient {
    async fn today_weather(&self) -> TodoResult<String> {
        let entries = self.fetch().await.inspect_err(|e| {
            warn!(error = %e, url = %self.url, "Weather lookup failed");
        })?;

        let today = Utc::now().date_naive();
        weather_for(&entries, today)
            .map(str::to_string)
            .ok_or_else(|| TodoError::Weather(format!("no weather entry for {}", today.format("%m-%d"))))
    }
}

/// Always reports the same weather
#[derive(Debug, Clone)]
pub struct FixedWeather(String);

impl FixedWeather {
    pub fn new(weather: impl Into<String>) -> Self {
        Self(weather.into())
    }
}

#[async_trait]
impl WeatherProvider for FixedWeather {
    async fn today_weather(&self) -> TodoResult<String> {
        Ok(self.0.clone())
    }
}
