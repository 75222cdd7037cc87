use anyhow::Result;
use async_trait::async_trait;
use chrono::{Duration, Utc};
use reqwest::Client;
use serde::de::DeserializeOwned;

use crate::config::Config;
use crate::constants::{OPENWEATHER_API_BASE, OPENWEATHER_ONECALL_BASE, USER_AGENT};
use crate::models::{CurrentWeather, Forecast, WeatherAlert, WeatherAlerts};

/// Upstream weather data access.
///
/// `None` from the current/forecast calls means "no usable data obtained"
/// (missing credentials, failed request, undecodable body). Alerts never
/// signal absence: any failure there collapses into an empty result, since
/// many OpenWeatherMap plans do not include the One Call endpoint at all.
#[async_trait]
pub trait WeatherRepository: Send + Sync {
    async fn fetch_current_weather(&self, location: &str) -> Option<CurrentWeather>;
    async fn fetch_forecast(&self, location: &str, days: i64) -> Option<Forecast>;
    async fn fetch_alerts(&self, lat: f64, lon: f64) -> WeatherAlerts;
}

/// OpenWeatherMap client over the data/2.5 and One Call 3.0 endpoints.
pub struct OpenWeatherClient {
    http: Client,
    api_key: Option<String>,
    api_base: String,
    onecall_base: String,
}

impl OpenWeatherClient {
    pub fn new(config: &Config) -> Result<Self> {
        let http = Client::builder().user_agent(USER_AGENT).build()?;

        if config.api_key.is_none() {
            tracing::warn!(
                "OpenWeatherMap API key not found in environment variable OPENWEATHER_API_KEY"
            );
        }

        Ok(Self {
            http,
            api_key: config.api_key.clone(),
            api_base: OPENWEATHER_API_BASE.to_string(),
            onecall_base: OPENWEATHER_ONECALL_BASE.to_string(),
        })
    }

    /// Redirects the data/2.5 endpoints, for tests against a local mock server.
    pub fn with_api_base(mut self, base: impl Into<String>) -> Self {
        self.api_base = base.into();
        self
    }

    /// Redirects the One Call endpoint, for tests against a local mock server.
    pub fn with_onecall_base(mut self, base: impl Into<String>) -> Self {
        self.onecall_base = base.into();
        self
    }

    /// Makes an HTTP GET request and deserializes the JSON response
    async fn get_json<T: DeserializeOwned>(&self, url: &str, query: &[(&str, &str)]) -> Result<T> {
        let response = self.http.get(url).query(query).send().await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            anyhow::bail!(
                "request failed with status {}: {}",
                status,
                truncate_body(&body)
            );
        }

        let data = response.json::<T>().await?;
        Ok(data)
    }
}

#[async_trait]
impl WeatherRepository for OpenWeatherClient {
    async fn fetch_current_weather(&self, location: &str) -> Option<CurrentWeather> {
        let api_key = match &self.api_key {
            Some(key) => key,
            None => {
                tracing::error!("API key is not configured");
                return None;
            }
        };

        tracing::info!(location, "Fetching current weather");

        let url = format!("{}/weather", self.api_base);
        let query = [
            ("q", location),
            ("appid", api_key.as_str()),
            ("units", "metric"),
        ];

        match self.get_json::<CurrentWeather>(&url, &query).await {
            Ok(weather) => {
                tracing::info!(location, "Successfully fetched current weather");
                Some(weather)
            }
            Err(err) => {
                tracing::error!(location, "Failed to fetch current weather: {err:#}");
                None
            }
        }
    }

    async fn fetch_forecast(&self, location: &str, days: i64) -> Option<Forecast> {
        let api_key = match &self.api_key {
            Some(key) => key,
            None => {
                tracing::error!("API key is not configured");
                return None;
            }
        };

        tracing::info!(location, days, "Fetching forecast");

        // The provider's forecast endpoint always covers ~5 days at 3-hour
        // resolution; the day limit is applied to the decoded entry list.
        let url = format!("{}/forecast", self.api_base);
        let query = [
            ("q", location),
            ("appid", api_key.as_str()),
            ("units", "metric"),
        ];

        let mut forecast = match self.get_json::<Forecast>(&url, &query).await {
            Ok(forecast) => forecast,
            Err(err) => {
                tracing::error!(location, "Failed to fetch forecast: {err:#}");
                return None;
            }
        };

        if days < 5 {
            let cutoff = (Utc::now() + Duration::days(days)).timestamp();
            forecast.list.retain(|entry| entry.dt <= cutoff);
            forecast.cnt = forecast.list.len() as u32;
        }

        tracing::info!(location, days, "Successfully fetched forecast");
        Some(forecast)
    }

    async fn fetch_alerts(&self, lat: f64, lon: f64) -> WeatherAlerts {
        let api_key = match &self.api_key {
            Some(key) => key,
            None => {
                tracing::error!("API key is not configured");
                return WeatherAlerts::default();
            }
        };

        tracing::info!(lat, lon, "Fetching weather alerts");

        let url = format!("{}/onecall", self.onecall_base);
        let lat_s = lat.to_string();
        let lon_s = lon.to_string();
        let query = [
            ("lat", lat_s.as_str()),
            ("lon", lon_s.as_str()),
            ("appid", api_key.as_str()),
            ("exclude", "minutely,hourly,daily"),
        ];

        let body = match self.get_json::<serde_json::Value>(&url, &query).await {
            Ok(body) => body,
            Err(err) => {
                tracing::warn!(
                    lat,
                    lon,
                    "Failed to fetch weather alerts, treating as none active \
                     (this may be due to API plan limitations): {err:#}"
                );
                return WeatherAlerts::default();
            }
        };

        // Alerts sit in a nested array of the One Call payload; an entry
        // that fails to decode is skipped rather than failing the call.
        let mut alerts = Vec::new();
        if let Some(raw_alerts) = body.get("alerts").and_then(|value| value.as_array()) {
            for raw in raw_alerts {
                match serde_json::from_value::<WeatherAlert>(raw.clone()) {
                    Ok(alert) => alerts.push(alert),
                    Err(err) => {
                        tracing::warn!("Skipping undecodable alert entry: {err}");
                    }
                }
            }
        }

        tracing::info!(lat, lon, count = alerts.len(), "Successfully fetched weather alerts");
        WeatherAlerts { alerts }
    }
}

fn truncate_body(body: &str) -> String {
    const MAX: usize = 200;
    if body.len() > MAX {
        format!("{}...", &body[..MAX])
    } else {
        body.to_string()
    }
}
