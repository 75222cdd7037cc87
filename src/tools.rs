use rand::seq::SliceRandom;
use rand::Rng;
use rmcp::{
    handler::server::{tool::ToolRouter, wrapper::Parameters, ServerHandler},
    model::{
        CallToolResult, Content, Implementation, ProtocolVersion, ServerCapabilities, ServerInfo,
    },
    tool, tool_handler, tool_router,
    ErrorData as McpError,
};
use std::sync::Arc;

use crate::models::{AlertsRequest, CityWeatherRequest, CurrentWeatherRequest, ForecastRequest};
use crate::service::WeatherService;

const LOCATION_VALIDATION_MESSAGE: &str = "Please provide a valid city or location name.";
const DAYS_VALIDATION_MESSAGE: &str = "Number of days must be between 1 and 5.";

/// MCP tool surface. Validates inputs and forwards to the service; invalid
/// input comes back as tool text, not as a protocol error.
#[derive(Clone)]
pub struct WeatherTools {
    service: WeatherService,
    weather_choices: Arc<Vec<String>>,
    tool_router: ToolRouter<Self>,
}

impl WeatherTools {
    pub fn new(service: WeatherService, weather_choices: Vec<String>) -> Self {
        Self {
            service,
            weather_choices: Arc::new(weather_choices),
            tool_router: Self::tool_router(),
        }
    }

    async fn current_weather_text(&self, location: &str) -> String {
        let location = location.trim();
        if location.is_empty() {
            return LOCATION_VALIDATION_MESSAGE.to_string();
        }

        self.service.current_weather(location).await
    }

    async fn forecast_text(&self, location: &str, days: i64) -> String {
        let location = location.trim();
        if location.is_empty() {
            return LOCATION_VALIDATION_MESSAGE.to_string();
        }
        if !(1..=5).contains(&days) {
            return DAYS_VALIDATION_MESSAGE.to_string();
        }

        self.service.forecast(location, days).await
    }

    async fn alerts_text(&self, location: &str) -> String {
        let location = location.trim();
        if location.is_empty() {
            return LOCATION_VALIDATION_MESSAGE.to_string();
        }

        self.service.alerts(location).await
    }

    fn city_weather_text(&self, city: &str, rng: &mut impl Rng) -> String {
        let choice = self
            .weather_choices
            .choose(rng)
            .map(String::as_str)
            .unwrap_or("balmy");

        format!("The weather in {city} is {choice}.")
    }
}

#[tool_handler]
impl ServerHandler for WeatherTools {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            protocol_version: ProtocolVersion::V_2024_11_05,
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            server_info: Implementation {
                name: "weather-mcp-server".to_string(),
                version: env!("CARGO_PKG_VERSION").to_string(),
                icons: None,
                title: None,
                website_url: None,
            },
            instructions: Some(
                "A weather information service powered by the OpenWeatherMap API. \
                Provides current conditions, multi-day forecasts, and weather alerts \
                for locations worldwide."
                    .to_string(),
            ),
        }
    }
}

#[tool_router]
impl WeatherTools {
    #[tool(description = "Get current weather conditions for a specified location/city.")]
    async fn get_current_weather(
        &self,
        Parameters(request): Parameters<CurrentWeatherRequest>,
    ) -> Result<CallToolResult, McpError> {
        tracing::info!(location = %request.location, "Getting current weather");

        let text = self.current_weather_text(&request.location).await;

        Ok(CallToolResult::success(vec![Content::text(text)]))
    }

    #[tool(description = "Get weather forecast for a specified location for the next few days.")]
    async fn get_weather_forecast(
        &self,
        Parameters(request): Parameters<ForecastRequest>,
    ) -> Result<CallToolResult, McpError> {
        tracing::info!(
            location = %request.location,
            days = request.days,
            "Getting weather forecast"
        );

        let text = self.forecast_text(&request.location, request.days).await;

        Ok(CallToolResult::success(vec![Content::text(text)]))
    }

    #[tool(description = "Get weather alerts and warnings for a specified location.")]
    async fn get_weather_alerts(
        &self,
        Parameters(request): Parameters<AlertsRequest>,
    ) -> Result<CallToolResult, McpError> {
        tracing::info!(location = %request.location, "Getting weather alerts");

        let text = self.alerts_text(&request.location).await;

        Ok(CallToolResult::success(vec![Content::text(text)]))
    }

    #[tool(description = "Describes random weather in the provided city. (Legacy tool for testing)")]
    async fn get_city_weather(
        &self,
        Parameters(request): Parameters<CityWeatherRequest>,
    ) -> Result<CallToolResult, McpError> {
        let text = self.city_weather_text(&request.city, &mut rand::thread_rng());

        Ok(CallToolResult::success(vec![Content::text(text)]))
    }
}
