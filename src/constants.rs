/// User agent string for HTTP requests
pub const USER_AGENT: &str = "weather-mcp-server/0.1.0";

/// OpenWeatherMap data API base URL (current weather, 5-day forecast)
pub const OPENWEATHER_API_BASE: &str = "https://api.openweathermap.org/data/2.5";

/// OpenWeatherMap One Call 3.0 base URL (weather alerts)
pub const OPENWEATHER_ONECALL_BASE: &str = "https://api.openweathermap.org/data/3.0";

/// Fallback condition words for the legacy random-weather tool
pub const DEFAULT_WEATHER_CHOICES: &str = "balmy,rainy,stormy";
