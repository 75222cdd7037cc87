use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

// ============================================================================
// OpenWeatherMap Current Weather Models
// ============================================================================

#[derive(Debug, Clone, Deserialize)]
pub struct CurrentWeather {
    pub name: String,
    pub coord: Coordinates,
    #[serde(default)]
    pub weather: Vec<Condition>,
    pub main: TemperatureBlock,
    pub wind: Option<Wind>,
    pub clouds: Option<Clouds>,
    /// Meters; the provider omits it in some responses
    #[serde(default)]
    pub visibility: u32,
    pub sys: Option<Sys>,
    /// Observation time, unix seconds
    pub dt: i64,
}

#[derive(Debug, Clone, Copy, Deserialize)]
pub struct Coordinates {
    pub lat: f64,
    pub lon: f64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Condition {
    pub main: String,
    pub description: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TemperatureBlock {
    pub temp: f64,
    pub feels_like: f64,
    pub temp_min: f64,
    pub temp_max: f64,
    pub pressure: u32,
    pub humidity: u32,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Wind {
    pub speed: f64,
    #[serde(default)]
    pub deg: u32,
    pub gust: Option<f64>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Clouds {
    pub all: u32,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Sys {
    pub country: Option<String>,
    pub sunrise: Option<i64>,
    pub sunset: Option<i64>,
}

// ============================================================================
// OpenWeatherMap 5-Day / 3-Hour Forecast Models
// ============================================================================

#[derive(Debug, Clone, Deserialize)]
pub struct Forecast {
    /// Number of entries in `list`; recomputed after truncation
    pub cnt: u32,
    pub list: Vec<ForecastEntry>,
    pub city: City,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ForecastEntry {
    /// Sample time, unix seconds (3-hour resolution)
    pub dt: i64,
    pub main: TemperatureBlock,
    #[serde(default)]
    pub weather: Vec<Condition>,
    pub wind: Option<Wind>,
    /// Precipitation probability, 0.0..=1.0
    #[serde(default)]
    pub pop: f64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct City {
    pub name: String,
    pub country: String,
}

// ============================================================================
// One Call 3.0 Alert Models
// ============================================================================

#[derive(Debug, Clone, Deserialize)]
pub struct WeatherAlert {
    pub event: String,
    pub sender_name: Option<String>,
    pub start: i64,
    pub end: i64,
    pub description: Option<String>,
    #[serde(default)]
    pub tags: Vec<String>,
}

/// Zero alerts is a normal outcome, including when the One Call endpoint
/// is unavailable on the current API plan.
#[derive(Debug, Clone, Default)]
pub struct WeatherAlerts {
    pub alerts: Vec<WeatherAlert>,
}

// ============================================================================
// MCP Tool Request Models
// ============================================================================

#[derive(Debug, Deserialize, Serialize, JsonSchema)]
pub struct CurrentWeatherRequest {
    /// Name of the city or location to get current weather for (e.g., 'London', 'New York', 'Tokyo')
    pub location: String,
}

#[derive(Debug, Deserialize, Serialize, JsonSchema)]
pub struct ForecastRequest {
    /// Name of the city or location to get weather forecast for (e.g., 'London', 'New York', 'Tokyo')
    pub location: String,
    /// Number of days to forecast (1-5 days, default is 3)
    #[serde(default = "default_forecast_days")]
    pub days: i64,
}

pub fn default_forecast_days() -> i64 {
    3
}

#[derive(Debug, Deserialize, Serialize, JsonSchema)]
pub struct AlertsRequest {
    /// Name of the city or location to get weather alerts for (e.g., 'London', 'New York', 'Tokyo')
    pub location: String,
}

#[derive(Debug, Deserialize, Serialize, JsonSchema)]
pub struct CityWeatherRequest {
    /// Name of the city to return weather for
    pub city: String,
}
