//! Analysis orchestration.
//!
//! Fetches weather for a sparse set of waypoints concurrently, then runs
//! the pure decomposition and aggregation on the observations that came
//! back. Insights are requested last, after the numbers are final.

use chrono::{DateTime, Utc};
use futures::future::join_all;
use tracing::{debug, info, warn};

use crate::aggregate::build_analysis;
use crate::config::AnalysisConfig;
use crate::error::{Result, VoyageError};
use crate::insight::{generate_insights, InsightRequest};
use crate::legs::decompose;
use crate::models::{
    Coordinate, LaycanWindow, Route, VesselProfile, VoyageAnalysis, WeatherObservation,
};
use crate::provider::{InsightGenerator, NoInsights, WeatherProvider};
use crate::sampling::sample_waypoints;

/// Inputs for one analysis run.
#[derive(Debug, Clone)]
pub struct AnalysisRequest {
    pub route: Route,
    pub vessel: VesselProfile,
    pub laycan: Option<LaycanWindow>,
    /// Departure time; now when absent
    pub departure: Option<DateTime<Utc>>,
    pub include_insights: bool,
}

impl AnalysisRequest {
    pub fn new(route: Route, vessel: VesselProfile) -> Self {
        Self {
            route,
            vessel,
            laycan: None,
            departure: None,
            include_insights: false,
        }
    }
}

/// Voyage analysis engine over a weather provider and an insight generator.
pub struct VoyageEngine<W, I = NoInsights> {
    weather: W,
    insights: I,
    config: AnalysisConfig,
}

impl<W: WeatherProvider> VoyageEngine<W, NoInsights> {
    pub fn new(weather: W, config: AnalysisConfig) -> Self {
        Self {
            weather,
            insights: NoInsights,
            config,
        }
    }
}

impl<W: WeatherProvider, I: InsightGenerator> VoyageEngine<W, I> {
    /// Replace the insight generator.
    pub fn with_insights<J: InsightGenerator>(self, insights: J) -> VoyageEngine<W, J> {
        VoyageEngine {
            weather: self.weather,
            insights,
            config: self.config,
        }
    }

    pub fn config(&self) -> &AnalysisConfig {
        &self.config
    }

    pub fn weather(&self) -> &W {
        &self.weather
    }

    pub fn insights(&self) -> &I {
        &self.insights
    }

    /// Run the full analysis for one request.
    ///
    /// Leg math never starts until every weather fetch has settled.
    pub async fn analyze(&self, request: &AnalysisRequest) -> Result<VoyageAnalysis> {
        let route = &request.route;
        route.validate()?;
        request.vessel.validate()?;
        if let Some(window) = &request.laycan {
            window.validate()?;
        }

        let departure = request.departure.unwrap_or_else(Utc::now);
        info!(
            route_id = %route.id,
            legs = route.leg_count(),
            vessel = %request.vessel.vessel_name,
            "Starting voyage analysis"
        );

        let observations = self.fetch_weather(&route.waypoints, departure).await?;
        let plan = decompose(route, &request.vessel, &observations, &self.config)?;
        if plan.is_truncated() {
            info!(
                route_id = %route.id,
                analyzed = plan.legs_analyzed(),
                total = plan.legs_total,
                "Leg cap reached; trailing legs not analyzed"
            );
        }

        let mut analysis = build_analysis(
            route,
            &request.vessel,
            plan,
            request.laycan.as_ref(),
            departure,
        )?;

        if request.include_insights {
            let insight_request = InsightRequest::from_analysis(&analysis);
            analysis.ai_insights = Some(generate_insights(&self.insights, &insight_request).await);
        }

        info!(
            route_id = %route.id,
            legs = analysis.legs_analyzed,
            samples = analysis.weather_impact.samples_used,
            status = ?analysis.laycan_compliance.status,
            "Voyage analysis complete"
        );
        Ok(analysis)
    }

    /// Fetch weather for the sampled waypoints, in sample order.
    ///
    /// Failed fetches are logged and skipped. When none succeed the result
    /// is [`VoyageError::NoWeatherData`], unless the config allows default
    /// conditions.
    pub async fn fetch_weather(
        &self,
        waypoints: &[Coordinate],
        at: DateTime<Utc>,
    ) -> Result<Vec<WeatherObservation>> {
        // Samples span the whole route even when the leg cap analyzes only a prefix.
        let points = sample_waypoints(
            waypoints,
            self.config.sample_stride,
            self.config.max_weather_samples,
        );
        debug!(samples = points.len(), "Fetching route weather");

        let results = join_all(points.iter().map(|&point| self.weather.fetch(point))).await;

        let mut observations = Vec::with_capacity(results.len());
        for (point, result) in points.iter().zip(results) {
            match result {
                Ok(observation) => observations.push(observation),
                Err(err) => warn!(
                    lat = point.lat,
                    lon = point.lon,
                    error = %err,
                    "Weather fetch failed; sample skipped"
                ),
            }
        }

        if observations.is_empty() {
            let Some(&first) = points.first() else {
                return Err(VoyageError::NoWeatherData);
            };
            if !self.config.default_weather_on_empty {
                return Err(VoyageError::NoWeatherData);
            }
            warn!(
                lat = first.lat,
                lon = first.lon,
                "No weather samples available; using default conditions"
            );
            observations.push(WeatherObservation::default_conditions(first, at));
        }

        Ok(observations)
    }
}
