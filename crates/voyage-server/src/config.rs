//! Server configuration from environment.

use std::env;
use std::str::FromStr;

use voyage_core::{AnalysisConfig, SogModel};

#[derive(Debug, Clone)]
pub struct Config {
    pub server_port: u16,
    pub openweather_url: String,
    pub openweather_api_key: Option<String>,
    pub weather_timeout_s: u64,
    pub weather_cache_ttl_s: u64,
    pub weather_cache_max_entries: usize,
    pub gemini_url: String,
    pub gemini_api_key: Option<String>,
    pub gemini_model: String,
    pub insight_timeout_s: u64,
    /// 0 analyzes every leg
    pub max_legs: usize,
    pub sog_model: SogModel,
    pub sample_stride: usize,
    pub max_samples: usize,
    /// Legs echoed in an analysis response; 0 returns all of them
    pub response_leg_limit: usize,
    pub default_weather_on_empty: bool,
}

impl Config {
    pub fn from_env() -> Self {
        Self {
            server_port: parsed("VOYAGE_PORT", 3000),
            openweather_url: env::var("OPENWEATHER_API_URL").unwrap_or_else(|_| {
                "https://api.openweathermap.org/data/2.5/weather".to_string()
            }),
            openweather_api_key: non_empty("OPENWEATHER_API_KEY"),
            weather_timeout_s: parsed("WEATHER_TIMEOUT_S", 10),
            weather_cache_ttl_s: parsed("WEATHER_CACHE_TTL_S", 600),
            weather_cache_max_entries: parsed("WEATHER_CACHE_MAX_ENTRIES", 2048),
            gemini_url: env::var("GEMINI_API_URL").unwrap_or_else(|_| {
                "https://generativelanguage.googleapis.com/v1beta".to_string()
            }),
            gemini_api_key: non_empty("GEMINI_API_KEY"),
            gemini_model: env::var("GEMINI_MODEL")
                .unwrap_or_else(|_| "gemini-1.5-flash-latest".to_string()),
            insight_timeout_s: parsed("INSIGHT_TIMEOUT_S", 15),
            max_legs: parsed("VOYAGE_MAX_LEGS", 50),
            sog_model: parsed("VOYAGE_SOG_MODEL", SogModel::AlongCourse),
            sample_stride: parsed("VOYAGE_SAMPLE_STRIDE", 8),
            max_samples: parsed("VOYAGE_MAX_SAMPLES", 10),
            response_leg_limit: parsed("VOYAGE_RESPONSE_LEG_LIMIT", 20),
            default_weather_on_empty: parsed("VOYAGE_DEFAULT_WEATHER_ON_EMPTY", false),
        }
    }

    /// Engine tunables derived from the server settings.
    pub fn analysis_config(&self) -> AnalysisConfig {
        AnalysisConfig {
            sog_model: self.sog_model,
            max_legs: (self.max_legs > 0).then_some(self.max_legs),
            sample_stride: self.sample_stride.max(1),
            max_weather_samples: self.max_samples.max(1),
            default_weather_on_empty: self.default_weather_on_empty,
            ..AnalysisConfig::default()
        }
    }
}

fn parsed<T: FromStr>(key: &str, default: T) -> T {
    env::var(key)
        .ok()
        .and_then(|s| s.trim().parse().ok())
        .unwrap_or(default)
}

fn non_empty(key: &str) -> Option<String> {
    env::var(key)
        .ok()
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
}
