//! Seams to the external weather and insight services.

use std::future::Future;

use crate::error::ProviderError;
use crate::insight::InsightRequest;
use crate::models::{Coordinate, WeatherObservation};

/// Source of weather observations for a single coordinate.
///
/// Implementations enforce their own timeout; the engine never waits on a
/// fetch indefinitely.
pub trait WeatherProvider: Send + Sync {
    fn fetch(
        &self,
        coordinate: Coordinate,
    ) -> impl Future<Output = Result<WeatherObservation, ProviderError>> + Send;
}

/// Generator of free-form advisory text for a finished analysis.
pub trait InsightGenerator: Send + Sync {
    fn generate(
        &self,
        request: &InsightRequest,
    ) -> impl Future<Output = Result<String, ProviderError>> + Send;
}

/// Generator used when insights are switched off.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoInsights;

impl InsightGenerator for NoInsights {
    async fn generate(&self, _request: &InsightRequest) -> Result<String, ProviderError> {
        Err(ProviderError::Unavailable(
            "insight generation is not configured".to_string(),
        ))
    }
}
