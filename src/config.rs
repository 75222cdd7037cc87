use crate::constants::DEFAULT_WEATHER_CHOICES;

/// Process configuration, read from the environment once at startup and
/// passed by value from there on.
#[derive(Debug, Clone)]
pub struct Config {
    /// OpenWeatherMap API key. `None` when unset or empty; every provider
    /// call then resolves to absence.
    pub api_key: Option<String>,
    /// Condition words for the legacy random-weather tool.
    pub weather_choices: Vec<String>,
}

impl Config {
    pub fn from_env() -> Self {
        let api_key = std::env::var("OPENWEATHER_API_KEY")
            .ok()
            .filter(|key| !key.is_empty());

        let weather_choices = parse_weather_choices(std::env::var("WEATHER_CHOICES").ok());

        Self {
            api_key,
            weather_choices,
        }
    }
}

/// Splits a comma-delimited choice list, falling back to the default set
/// when the variable is unset or blank.
fn parse_weather_choices(raw: Option<String>) -> Vec<String> {
    let raw = match raw {
        Some(value) if !value.trim().is_empty() => value,
        _ => DEFAULT_WEATHER_CHOICES.to_string(),
    };

    raw.split(',').map(str::to_string).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn choices_default_when_unset() {
        let choices = parse_weather_choices(None);
        assert_eq!(choices, vec!["balmy", "rainy", "stormy"]);
    }

    #[test]
    fn choices_default_when_blank() {
        let choices = parse_weather_choices(Some("   ".to_string()));
        assert_eq!(choices, vec!["balmy", "rainy", "stormy"]);
    }

    #[test]
    fn choices_split_on_commas() {
        let choices = parse_weather_choices(Some("sunny,foggy".to_string()));
        assert_eq!(choices, vec!["sunny", "foggy"]);
    }
}
