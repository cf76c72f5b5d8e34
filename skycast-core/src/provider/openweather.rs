use async_trait::async_trait;
use chrono::{DateTime, Utc};
use reqwest::Client;
use serde::Deserialize;
use tracing::{debug, instrument};

use crate::model::WeatherSample;

use super::{ForecastPayload, ProviderError, WeatherProvider};

const DEFAULT_BASE_URL: &str = "https://api.openweathermap.org/data/2.5";

/// Client for the OpenWeather 5-day/3-hour forecast feed.
#[derive(Debug, Clone)]
pub struct OpenWeatherProvider {
    api_key: String,
    base_url: String,
    http: Client,
}

impl OpenWeatherProvider {
    /// The key is sent as-is; an empty key simply gets rejected by the
    /// provider like any other bad credential.
    pub fn new(api_key: String) -> Self {
        Self::with_base_url(api_key, DEFAULT_BASE_URL.to_string())
    }

    /// Point the client at a different endpoint, e.g. a mock server in tests.
    pub fn with_base_url(api_key: String, base_url: String) -> Self {
        Self {
            api_key,
            base_url,
            http: Client::new(),
        }
    }
}

#[async_trait]
impl WeatherProvider for OpenWeatherProvider {
    #[instrument(skip(self))]
    async fn fetch_forecast(&self, city: &str) -> Result<ForecastPayload, ProviderError> {
        let url = format!("{}/forecast", self.base_url);

        let res = self
            .http
            .get(&url)
            .query(&[
                ("q", city),
                ("units", "metric"),
                ("appid", self.api_key.as_str()),
            ])
            .send()
            .await
            .map_err(|e| ProviderError::Transport(e.to_string()))?;

        let status = res.status();
        let body = res
            .text()
            .await
            .map_err(|e| ProviderError::Transport(e.to_string()))?;

        if !status.is_success() {
            return Err(ProviderError::Status {
                status,
                body: truncate_body(&body),
            });
        }

        let parsed: OwForecastResponse =
            serde_json::from_str(&body).map_err(|e| ProviderError::Malformed(e.to_string()))?;

        if parsed.list.is_empty() {
            return Err(ProviderError::Malformed(
                "forecast list contained no samples".to_string(),
            ));
        }

        let samples = parsed
            .list
            .into_iter()
            .map(sample_from_entry)
            .collect::<Result<Vec<_>, _>>()?;

        debug!(city = %parsed.city.name, samples = samples.len(), "parsed forecast feed");

        Ok(ForecastPayload {
            city: parsed.city.name,
            samples,
        })
    }
}

fn sample_from_entry(entry: OwForecastEntry) -> Result<WeatherSample, ProviderError> {
    let timestamp = DateTime::<Utc>::from_timestamp(entry.dt, 0).ok_or_else(|| {
        ProviderError::Malformed(format!("timestamp {} is out of range", entry.dt))
    })?;

    let condition = entry
        .weather
        .into_iter()
        .next()
        .map(|w| w.main)
        .ok_or_else(|| ProviderError::Malformed("entry has no weather element".to_string()))?;

    Ok(WeatherSample {
        timestamp,
        temperature_c: entry.main.temp,
        feels_like_c: entry.main.feels_like,
        condition,
        humidity_pct: entry.main.humidity,
        wind_speed_mps: entry.wind.speed,
        pressure_hpa: entry.main.pressure,
        visibility_m: entry.visibility,
        temp_max_c: entry.main.temp_max,
        temp_min_c: entry.main.temp_min,
    })
}

#[derive(Debug, Deserialize)]
struct OwMain {
    temp: f64,
    feels_like: f64,
    temp_max: f64,
    temp_min: f64,
    humidity: u8,
    pressure: u32,
}

#[derive(Debug, Deserialize)]
struct OwWeather {
    main: String,
}

#[derive(Debug, Deserialize)]
struct OwWind {
    speed: f64,
}

#[derive(Debug, Deserialize)]
struct OwForecastEntry {
    dt: i64,
    main: OwMain,
    weather: Vec<OwWeather>,
    wind: OwWind,
    visibility: u32,
}

#[derive(Debug, Deserialize)]
struct OwCity {
    name: String,
}

#[derive(Debug, Deserialize)]
struct OwForecastResponse {
    city: OwCity,
    list: Vec<OwForecastEntry>,
}

fn truncate_body(body: &str) -> String {
    const MAX: usize = 200;
    if body.len() <= MAX {
        return body.to_string();
    }

    // Cut at the nearest char boundary; a fixed byte offset can land inside
    // a multibyte character.
    let mut cut = MAX;
    while !body.is_char_boundary(cut) {
        cut -= 1;
    }
    format!("{}...", &body[..cut])
}
