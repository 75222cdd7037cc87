mod config;
mod constants;
mod formatters;
mod models;
mod repository;
mod service;
mod tools;

use std::sync::Arc;

use anyhow::Result;
use rmcp::ServiceExt;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::config::Config;
use crate::repository::OpenWeatherClient;
use crate::service::WeatherService;
use crate::tools::WeatherTools;

#[tokio::main]
async fn main() -> Result<()> {
    // All logs go to stderr; stdout carries the MCP protocol messages.
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "weather_mcp_server=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    tracing::info!("Starting MCP weather server");

    let config = Config::from_env();
    let client = OpenWeatherClient::new(&config)?;
    let service = WeatherService::new(Arc::new(client));
    let tools = WeatherTools::new(service, config.weather_choices);

    let server = tools.serve(rmcp::transport::stdio()).await?;
    server.waiting().await?;

    tracing::info!("Server shutdown complete");
    Ok(())
}
