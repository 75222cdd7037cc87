use std::sync::Arc;

use crate::formatters::{format_alerts, format_current_weather, format_forecast};
use crate::repository::WeatherRepository;

/// Turns repository data into report text. Every operation resolves to a
/// string; upstream absence degrades to an apology naming the location.
#[derive(Clone)]
pub struct WeatherService {
    repository: Arc<dyn WeatherRepository>,
}

impl WeatherService {
    pub fn new(repository: Arc<dyn WeatherRepository>) -> Self {
        Self { repository }
    }

    pub async fn current_weather(&self, location: &str) -> String {
        match self.repository.fetch_current_weather(location).await {
            Some(weather) => format_current_weather(&weather),
            None => format!(
                "Unable to retrieve weather data for '{location}'. \
                 Please check the location name and try again."
            ),
        }
    }

    pub async fn forecast(&self, location: &str, days: i64) -> String {
        // The tool layer rejects out-of-range values; direct callers get a
        // silent clamp instead.
        let days = days.clamp(1, 5);

        match self.repository.fetch_forecast(location, days).await {
            Some(forecast) => format_forecast(&forecast, days),
            None => format!(
                "Unable to retrieve forecast data for '{location}'. \
                 Please check the location name and try again."
            ),
        }
    }

    pub async fn alerts(&self, location: &str) -> String {
        // The One Call endpoint takes coordinates, not a location name, so
        // resolve them through a current weather lookup first.
        let coord = match self.repository.fetch_current_weather(location).await {
            Some(weather) => weather.coord,
            None => {
                return format!(
                    "Unable to retrieve coordinates for '{location}' to check weather alerts."
                );
            }
        };

        let alerts = self.repository.fetch_alerts(coord.lat, coord.lon).await;
        format_alerts(&alerts, location)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{
        Condition, Coordinates, CurrentWeather, Forecast, TemperatureBlock, WeatherAlert,
        WeatherAlerts,
    };
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicBool, Ordering};
    use std::sync::Mutex;

    fn sample_current() -> CurrentWeather {
        CurrentWeather {
            name: "London".to_string(),
            coord: Coordinates {
                lat: 51.5074,
                lon: -0.1278,
            },
            weather: vec![Condition {
                main: "Clouds".to_string(),
                description: "overcast clouds".to_string(),
            }],
            main: TemperatureBlock {
                temp: 12.3,
                feels_like: 11.1,
                temp_min: 10.0,
                temp_max: 14.2,
                pressure: 1012,
                humidity: 81,
            },
            wind: None,
            clouds: None,
            visibility: 10000,
            sys: None,
            dt: 1_700_010_000,
        }
    }

    /// Configurable stand-in for the OpenWeather client.
    #[derive(Default)]
    struct StubRepository {
        current: Option<CurrentWeather>,
        forecast: Option<Forecast>,
        alerts: WeatherAlerts,
        alerts_called: AtomicBool,
        forecast_days_seen: Mutex<Option<i64>>,
    }

    #[async_trait]
    impl WeatherRepository for StubRepository {
        async fn fetch_current_weather(&self, _location: &str) -> Option<CurrentWeather> {
            self.current.clone()
        }

        async fn fetch_forecast(&self, _location: &str, days: i64) -> Option<Forecast> {
            *self.forecast_days_seen.lock().unwrap() = Some(days);
            self.forecast.clone()
        }

        async fn fetch_alerts(&self, _lat: f64, _lon: f64) -> WeatherAlerts {
            self.alerts_called.store(true, Ordering::SeqCst);
            self.alerts.clone()
        }
    }

    #[tokio::test]
    async fn current_weather_absence_degrades_to_apology() {
        let service = WeatherService::new(Arc::new(StubRepository::default()));

        let text = service.current_weather("Atlantis").await;

        assert_eq!(
            text,
            "Unable to retrieve weather data for 'Atlantis'. \
             Please check the location name and try again."
        );
    }

    #[tokio::test]
    async fn current_weather_success_renders_report() {
        let repository = StubRepository {
            current: Some(sample_current()),
            ..Default::default()
        };
        let service = WeatherService::new(Arc::new(repository));

        let text = service.current_weather("London").await;

        assert!(text.contains("Current Weather in London, "));
        assert!(text.contains("Temperature: 12.3\u{00b0}C"));
    }

    #[tokio::test]
    async fn forecast_absence_degrades_to_apology() {
        let service = WeatherService::new(Arc::new(StubRepository::default()));

        let text = service.forecast("Atlantis", 3).await;

        assert_eq!(
            text,
            "Unable to retrieve forecast data for 'Atlantis'. \
             Please check the location name and try again."
        );
    }

    #[tokio::test]
    async fn forecast_days_clamped_before_reaching_repository() {
        let repository = Arc::new(StubRepository::default());
        let service = WeatherService::new(repository.clone());

        service.forecast("Paris", 9).await;
        assert_eq!(*repository.forecast_days_seen.lock().unwrap(), Some(5));

        service.forecast("Paris", 0).await;
        assert_eq!(*repository.forecast_days_seen.lock().unwrap(), Some(1));
    }

    #[tokio::test]
    async fn alerts_without_coordinates_skips_alerts_endpoint() {
        let repository = Arc::new(StubRepository::default());
        let service = WeatherService::new(repository.clone());

        let text = service.alerts("Atlantis").await;

        assert_eq!(
            text,
            "Unable to retrieve coordinates for 'Atlantis' to check weather alerts."
        );
        assert!(!repository.alerts_called.load(Ordering::SeqCst));
    }

    #[tokio::test]
    async fn alerts_empty_result_renders_all_clear() {
        let repository = StubRepository {
            current: Some(sample_current()),
            ..Default::default()
        };
        let service = WeatherService::new(Arc::new(repository));

        let text = service.alerts("London").await;

        assert!(text.contains("No active weather alerts for this location."));
    }

    #[tokio::test]
    async fn alerts_render_fetched_alerts() {
        let repository = StubRepository {
            current: Some(sample_current()),
            alerts: WeatherAlerts {
                alerts: vec![WeatherAlert {
                    event: "Wind Warning".to_string(),
                    sender_name: None,
                    start: 1_700_000_000,
                    end: 1_700_100_000,
                    description: None,
                    tags: Vec::new(),
                }],
            },
            ..Default::default()
        };
        let service = WeatherService::new(Arc::new(repository));

        let text = service.alerts("London").await;

        assert!(text.contains("Alert #1: Wind Warning"));
    }
}
