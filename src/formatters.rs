use chrono::{DateTime, NaiveDate, Timelike, Utc};

use crate::models::{CurrentWeather, Forecast, ForecastEntry, WeatherAlerts};

/// Formats a current weather observation into a human-readable report.
///
/// Optional provider fields (wind, gust, cloudiness, sunrise/sunset) each
/// contribute one line when present and are silently omitted otherwise.
pub fn format_current_weather(weather: &CurrentWeather) -> String {
    let mut output = String::new();

    let country = weather
        .sys
        .as_ref()
        .and_then(|sys| sys.country.as_deref())
        .unwrap_or_default();
    output.push_str(&format!(
        "\u{1f324}\u{fe0f} Current Weather in {}, {}\n",
        weather.name, country
    ));
    output.push_str(&format!("{}\n", "=".repeat(41)));

    if let Some(condition) = weather.weather.first() {
        output.push_str(&format!(
            "Condition: {} - {}\n",
            condition.main, condition.description
        ));
    }

    let main = &weather.main;
    output.push_str(&format!(
        "Temperature: {:.1}\u{00b0}C (feels like {:.1}\u{00b0}C)\n",
        main.temp, main.feels_like
    ));
    output.push_str(&format!(
        "Min/Max: {:.1}\u{00b0}C / {:.1}\u{00b0}C\n",
        main.temp_min, main.temp_max
    ));
    output.push_str(&format!("Humidity: {}%\n", main.humidity));
    output.push_str(&format!("Pressure: {} hPa\n", main.pressure));

    if let Some(wind) = &weather.wind {
        output.push_str(&format!("Wind: {} m/s at {}\u{00b0}\n", wind.speed, wind.deg));
        if let Some(gust) = wind.gust {
            output.push_str(&format!("Wind Gust: {gust:.1} m/s\n"));
        }
    }

    if let Some(clouds) = &weather.clouds {
        output.push_str(&format!("Cloudiness: {}%\n", clouds.all));
    }

    output.push_str(&format!(
        "Visibility: {:.1} km\n",
        f64::from(weather.visibility) / 1000.0
    ));

    if let Some(sys) = &weather.sys {
        if let (Some(sunrise), Some(sunset)) = (sys.sunrise, sys.sunset) {
            output.push_str(&format!(
                "Sunrise: {} | Sunset: {}\n",
                format_time(sunrise),
                format_time(sunset)
            ));
        }
    }

    output.push_str(&format!("Last Updated: {}\n", format_timestamp(weather.dt)));

    output
}

/// Formats a truncated 3-hourly forecast into per-day summaries.
///
/// Entries are grouped by UTC calendar date in provider order; the first
/// `days` groups are rendered.
pub fn format_forecast(forecast: &Forecast, days: i64) -> String {
    if forecast.list.is_empty() {
        return "No forecast data available.".to_string();
    }

    let mut output = String::new();
    output.push_str(&format!(
        "\u{1f326}\u{fe0f} {}-Day Weather Forecast for {}, {}\n",
        days, forecast.city.name, forecast.city.country
    ));
    output.push_str(&format!("{}\n", "=".repeat(51)));

    for (date, entries) in group_by_utc_date(&forecast.list).into_iter().take(days.max(0) as usize) {
        output.push_str(&format!("\n\u{1f4c5} {}\n", date.format("%A, %B %d")));
        output.push_str(&format!("{}\n", "-".repeat(30)));

        let min_temp = entries
            .iter()
            .map(|entry| entry.main.temp_min)
            .fold(f64::INFINITY, f64::min);
        let max_temp = entries
            .iter()
            .map(|entry| entry.main.temp_max)
            .fold(f64::NEG_INFINITY, f64::max);
        output.push_str(&format!(
            "Temperature: {min_temp:.1}\u{00b0}C - {max_temp:.1}\u{00b0}C\n"
        ));
        output.push_str(&format!("Condition: {}\n", dominant_condition(&entries)));

        let morning = entries.iter().find(|e| (6..=12).contains(&utc_hour(e.dt)));
        let afternoon = entries.iter().find(|e| (12..=18).contains(&utc_hour(e.dt)));
        let evening = entries.iter().find(|e| utc_hour(e.dt) >= 18);

        for (label, sample) in [
            ("Morning", morning),
            ("Afternoon", afternoon),
            ("Evening", evening),
        ] {
            if let Some(entry) = sample {
                let description = entry
                    .weather
                    .first()
                    .map(|w| w.description.as_str())
                    .unwrap_or("N/A");
                output.push_str(&format!(
                    "  {}: {:.1}\u{00b0}C, {}\n",
                    label, entry.main.temp, description
                ));
            }
        }

        let count = entries.len() as f64;
        let avg_humidity = entries
            .iter()
            .map(|entry| f64::from(entry.main.humidity))
            .sum::<f64>()
            / count;
        let avg_wind = entries
            .iter()
            .map(|entry| entry.wind.as_ref().map_or(0.0, |wind| wind.speed))
            .sum::<f64>()
            / count;
        output.push_str(&format!(
            "  Humidity: {avg_humidity:.0}% | Wind: {avg_wind:.1} m/s\n"
        ));

        let max_pop = entries.iter().map(|entry| entry.pop).fold(0.0, f64::max) * 100.0;
        if max_pop > 0.0 {
            output.push_str(&format!("  Precipitation: {max_pop:.0}% chance\n"));
        }
    }

    output
}

/// Formats alerts for a location; an empty set renders as the all-clear
/// line, never as an error.
pub fn format_alerts(alerts: &WeatherAlerts, location: &str) -> String {
    let mut output = String::new();

    output.push_str(&format!("\u{26a0}\u{fe0f} Weather Alerts for {location}\n"));
    output.push_str(&format!("{}\n", "=".repeat(36)));

    if alerts.alerts.is_empty() {
        output.push_str("\u{2705} No active weather alerts for this location.\n");
        return output;
    }

    for (i, alert) in alerts.alerts.iter().enumerate() {
        output.push_str(&format!("\n\u{1f6a8} Alert #{}: {}\n", i + 1, alert.event));
        output.push_str(&format!("{}\n", "-".repeat(25)));

        if let Some(sender) = alert.sender_name.as_deref().filter(|s| !s.is_empty()) {
            output.push_str(&format!("Issued by: {sender}\n"));
        }

        output.push_str(&format!("Active from: {}\n", format_timestamp(alert.start)));
        output.push_str(&format!("Until: {}\n", format_timestamp(alert.end)));

        if let Some(description) = alert.description.as_deref().filter(|s| !s.is_empty()) {
            output.push_str(&format!("Description: {description}\n"));
        }

        if !alert.tags.is_empty() {
            output.push_str(&format!("Tags: {}\n", alert.tags.join(", ")));
        }
    }

    output
}

/// Groups entries by UTC calendar date, preserving provider (chronological)
/// order of both groups and entries.
fn group_by_utc_date(entries: &[ForecastEntry]) -> Vec<(NaiveDate, Vec<&ForecastEntry>)> {
    let mut groups: Vec<(NaiveDate, Vec<&ForecastEntry>)> = Vec::new();

    for entry in entries {
        let date = unix_to_utc(entry.dt).date_naive();
        match groups.iter_mut().find(|(d, _)| *d == date) {
            Some((_, items)) => items.push(entry),
            None => groups.push((date, vec![entry])),
        }
    }

    groups
}

/// Most frequent primary condition across a day group. Ties resolve to the
/// condition seen first.
fn dominant_condition(entries: &[&ForecastEntry]) -> String {
    let mut counts: Vec<(&str, usize)> = Vec::new();

    for entry in entries {
        for condition in &entry.weather {
            match counts.iter_mut().find(|(main, _)| *main == condition.main) {
                Some((_, count)) => *count += 1,
                None => counts.push((condition.main.as_str(), 1)),
            }
        }
    }

    let mut best: Option<(&str, usize)> = None;
    for (main, count) in counts.iter().copied() {
        if best.map_or(true, |(_, best_count)| count > best_count) {
            best = Some((main, count));
        }
    }

    best.map(|(main, _)| main).unwrap_or("Unknown").to_string()
}

fn unix_to_utc(ts: i64) -> DateTime<Utc> {
    DateTime::from_timestamp(ts, 0).unwrap_or_default()
}

fn utc_hour(ts: i64) -> u32 {
    unix_to_utc(ts).hour()
}

fn format_timestamp(ts: i64) -> String {
    unix_to_utc(ts).format("%Y-%m-%d %H:%M UTC").to_string()
}

fn format_time(ts: i64) -> String {
    unix_to_utc(ts).format("%H:%M").to_string()
}
