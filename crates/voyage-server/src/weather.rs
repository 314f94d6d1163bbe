//! OpenWeather-backed weather provider.
//!
//! OpenWeather reports atmosphere only; wave height and ocean current are
//! simulated and the observation is marked synthetic. When the API is not
//! configured or a request fails, the whole observation is simulated.

use rand::Rng;
use reqwest::Client;
use serde::Deserialize;
use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use voyage_core::geodesy::normalize_degrees;
use voyage_core::{Coordinate, ProviderError, WeatherObservation, WeatherProvider};

use crate::cache::WeatherCache;
use crate::config::Config;

const MPS_TO_KNOTS: f64 = 1.94384;
const METERS_PER_NM: f64 = 1852.0;

#[derive(Debug, Deserialize)]
struct OpenWeatherResponse {
    wind: Option<OpenWeatherWind>,
    main: Option<OpenWeatherMain>,
    /// Meters
    visibility: Option<f64>,
    #[serde(default)]
    weather: Vec<OpenWeatherCondition>,
}

#[derive(Debug, Deserialize)]
struct OpenWeatherWind {
    /// m/s
    speed: Option<f64>,
    deg: Option<f64>,
}

#[derive(Debug, Deserialize)]
struct OpenWeatherMain {
    temp: Option<f64>,
    pressure: Option<f64>,
    humidity: Option<f64>,
}

#[derive(Debug, Deserialize)]
struct OpenWeatherCondition {
    description: String,
}

pub struct OpenWeatherProvider {
    client: Client,
    base_url: String,
    api_key: Option<String>,
    timeout: Duration,
    cache: Arc<WeatherCache>,
}

impl OpenWeatherProvider {
    pub fn new(client: Client, config: &Config, cache: Arc<WeatherCache>) -> Self {
        Self {
            client,
            base_url: config.openweather_url.clone(),
            api_key: config.openweather_api_key.clone(),
            timeout: Duration::from_secs(config.weather_timeout_s.max(1)),
            cache,
        }
    }

    pub fn cache(&self) -> &WeatherCache {
        &self.cache
    }

    async fn request(
        &self,
        coordinate: Coordinate,
        api_key: &str,
    ) -> Result<WeatherObservation, ProviderError> {
        let response = self
            .client
            .get(&self.base_url)
            .query(&[
                ("lat", coordinate.lat.to_string()),
                ("lon", coordinate.lon.to_string()),
                ("appid", api_key.to_string()),
                ("units", "metric".to_string()),
            ])
            .timeout(self.timeout)
            .send()
            .await
            .map_err(provider_error)?;

        if !response.status().is_success() {
            return Err(ProviderError::Transport(format!(
                "weather provider HTTP {}",
                response.status()
            )));
        }

        let body: OpenWeatherResponse = response
            .json()
            .await
            .map_err(|err| ProviderError::Malformed(err.to_string()))?;

        Ok(observation_from_response(coordinate, body, &mut rand::rng()))
    }
}

impl WeatherProvider for OpenWeatherProvider {
    async fn fetch(&self, coordinate: Coordinate) -> Result<WeatherObservation, ProviderError> {
        if let Some(cached) = self.cache.get(coordinate) {
            tracing::debug!(lat = coordinate.lat, lon = coordinate.lon, "Weather cache hit");
            return Ok(cached);
        }

        let observation = match self.api_key.as_deref() {
            None => {
                tracing::debug!("OPENWEATHER_API_KEY not set, simulating weather");
                simulated_observation(coordinate, &mut rand::rng())
            }
            Some(api_key) => match self.request(coordinate, api_key).await {
                Ok(observation) => observation,
                Err(err) => {
                    tracing::warn!(
                        lat = coordinate.lat,
                        lon = coordinate.lon,
                        error = %err,
                        "Weather fetch failed, using simulated conditions"
                    );
                    simulated_observation(coordinate, &mut rand::rng())
                }
            },
        };

        self.cache.insert(coordinate, observation.clone());
        Ok(observation)
    }
}

/// Map a reqwest failure onto the provider error taxonomy.
pub(crate) fn provider_error(err: reqwest::Error) -> ProviderError {
    if err.is_timeout() {
        ProviderError::Timeout
    } else {
        ProviderError::Transport(err.to_string())
    }
}

fn observation_from_response<R: Rng>(
    coordinate: Coordinate,
    body: OpenWeatherResponse,
    rng: &mut R,
) -> WeatherObservation {
    let wind_speed = body.wind.as_ref().and_then(|w| w.speed);
    let wind_deg = body.wind.as_ref().and_then(|w| w.deg);
    let main = body.main.as_ref();

    WeatherObservation {
        coordinate,
        timestamp: Utc::now(),
        wind_speed_knots: wind_speed
            .map(|mps| mps * MPS_TO_KNOTS)
            .unwrap_or_else(|| rng.random_range(5.0..15.0)),
        wind_direction_deg: wind_deg.unwrap_or_else(|| rng.random_range(0.0..360.0)),
        wave_height_m: rng.random_range(1.0..4.0),
        current_speed_knots: rng.random_range(0.0..2.0),
        current_direction_deg: rng.random_range(0.0..360.0),
        swell_direction_deg: Some(
            wind_deg
                .map(|deg| normalize_degrees(deg + 90.0))
                .unwrap_or_else(|| rng.random_range(0.0..360.0)),
        ),
        temperature_c: Some(main.and_then(|m| m.temp).unwrap_or(20.0)),
        pressure_hpa: Some(main.and_then(|m| m.pressure).unwrap_or(1013.0)),
        humidity_pct: Some(main.and_then(|m| m.humidity).unwrap_or(50.0)),
        visibility_nm: Some(body.visibility.map(|m| m / METERS_PER_NM).unwrap_or(10.0)),
        description: Some(
            body.weather
                .into_iter()
                .next()
                .map(|c| c.description)
                .unwrap_or_else(|| "Clear".to_string()),
        ),
        synthetic: true,
    }
}

fn simulated_observation<R: Rng>(coordinate: Coordinate, rng: &mut R) -> WeatherObservation {
    WeatherObservation {
        coordinate,
        timestamp: Utc::now(),
        wind_speed_knots: rng.random_range(5.0..20.0),
        wind_direction_deg: rng.random_range(0.0..360.0),
        wave_height_m: rng.random_range(1.0..4.0),
        current_speed_knots: rng.random_range(0.0..2.0),
        current_direction_deg: rng.random_range(0.0..360.0),
        swell_direction_deg: Some(rng.random_range(0.0..360.0)),
        temperature_c: Some(20.0 + rng.random_range(0.0..15.0)),
        pressure_hpa: Some(1003.0 + rng.random_range(0.0..20.0)),
        humidity_pct: Some(50.0 + rng.random_range(0.0..30.0)),
        visibility_nm: Some(10.0),
        description: Some("Simulated data".to_string()),
        synthetic: true,
    }
}
