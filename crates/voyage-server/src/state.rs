//! Shared application state.

use reqwest::Client;
use std::sync::Arc;
use std::time::Duration;

use voyage_core::{RouteCatalog, VoyageEngine};

use crate::cache::WeatherCache;
use crate::config::Config;
use crate::insight::GeminiInsightGenerator;
use crate::weather::OpenWeatherProvider;

pub type Engine = VoyageEngine<OpenWeatherProvider, GeminiInsightGenerator>;

pub struct AppState {
    config: Config,
    catalog: RouteCatalog,
    engine: Engine,
}

impl AppState {
    pub fn new(config: Config) -> Self {
        Self::with_catalog(config, RouteCatalog::builtin())
    }

    pub fn with_catalog(config: Config, catalog: RouteCatalog) -> Self {
        let client = Client::new();
        let cache = Arc::new(WeatherCache::new(
            Duration::from_secs(config.weather_cache_ttl_s),
            config.weather_cache_max_entries,
        ));
        let weather = OpenWeatherProvider::new(client.clone(), &config, cache);
        let insights = GeminiInsightGenerator::new(client, &config);
        let engine = VoyageEngine::new(weather, config.analysis_config()).with_insights(insights);

        Self {
            config,
            catalog,
            engine,
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn catalog(&self) -> &RouteCatalog {
        &self.catalog
    }

    pub fn engine(&self) -> &Engine {
        &self.engine
    }

    pub fn weather(&self) -> &OpenWeatherProvider {
        self.engine.weather()
    }

    pub fn insights(&self) -> &GeminiInsightGenerator {
        self.engine.insights()
    }

    pub fn weather_cache_size(&self) -> usize {
        self.weather().cache().len()
    }
}
