//! OpenWeatherMap current-weather client

use super::{WeatherError, WeatherProvider, WeatherReport};
use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;

const OPENWEATHER_URL: &str = "https://api.openweathermap.org/data/2.5/weather";

pub struct OpenWeatherMap {
    client: Client,
    /// Absent key is reported per lookup, not at start-up
    api_key: Option<String>,
}

impl OpenWeatherMap {
    pub fn new(api_key: Option<String>) -> Self {
        let client = Client::builder()
            .timeout(Duration::from_secs(15))
            .build()
            .expect("Failed to create HTTP client");

        Self {
            client,
            api_key: api_key.filter(|k| !k.trim().is_empty()),
        }
    }

    fn parse_report(body: &str) -> Result<WeatherReport, WeatherError> {
        let parsed: CurrentWeather =
            serde_json::from_str(body).map_err(|e| WeatherError::Malformed(e.to_string()))?;

        let description = parsed
            .weather
            .into_iter()
            .next()
            .map(|w| w.description)
            .ok_or_else(|| WeatherError::Malformed("empty weather list".to_string()))?;

        Ok(WeatherReport {
            description,
            temperature: parsed.main.temp,
            feels_like: parsed.main.feels_like,
        })
    }
}

#[async_trait]
impl WeatherProvider for OpenWeatherMap {
    async fn current(&self, city: &str) -> Result<WeatherReport, WeatherError> {
        let api_key = self.api_key.as_deref().ok_or(WeatherError::MissingCredential)?;
        tracing::info!(city = %city, "Fetching current weather");

        let response = self
            .client
            .get(OPENWEATHER_URL)
            .query(&[("q", city), ("appid", api_key), ("units", "metric")])
            .send()
            .await
            .map_err(|e| WeatherError::Request(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(WeatherError::Status {
                status: status.as_u16(),
            });
        }

        let body = response
            .text()
            .await
            .map_err(|e| WeatherError::Request(e.to_string()))?;
        Self::parse_report(&body)
    }
}

#[derive(Debug, Deserialize)]
struct CurrentWeather {
    weather: Vec<Condition>,
    main: MainReadings,
}

#[derive(Debug, Deserialize)]
struct Condition {
    description: String,
}

#[derive(Debug, Deserialize)]
struct MainReadings {
    temp: f64,
    feels_like: f64,
}
