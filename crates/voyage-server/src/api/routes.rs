//! REST API routes.

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use chrono::{DateTime, Utc};
use futures::future::join_all;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use std::sync::Arc;

use voyage_core::sampling::sample_waypoints;
use voyage_core::{
    route_distance_nm, vessel_presets, AnalysisRequest, Coordinate, LaycanWindow, Route,
    RouteListing, VesselPreset, VesselProfile, VoyageAnalysis, WeatherObservation,
    WeatherProvider,
};

use crate::api::error::ApiError;
use crate::state::AppState;

/// Speed used for the duration estimate in route details, knots.
const NOMINAL_SPEED_KNOTS: f64 = 12.0;
const ROUTE_WEATHER_STRIDE: usize = 5;
const ROUTE_WEATHER_MAX_POINTS: usize = 12;

/// Create the API router.
pub fn create_router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/health", get(health))
        .route("/v1/routes", get(list_routes))
        .route("/v1/routes/:route_id", get(get_route))
        .route("/v1/vessels", get(list_vessels))
        .route("/v1/weather/point/:lat/:lon", get(point_weather))
        .route("/v1/weather/route/:route_id", get(route_weather))
        .route("/v1/voyage/analyze", post(analyze_voyage))
}

// === Request/Response types ===

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RouteDetail {
    #[serde(flatten)]
    pub route: Route,
    /// Nautical miles
    pub total_distance: f64,
    /// Hours at the nominal speed
    pub estimated_duration: f64,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RouteWeather {
    pub route_id: String,
    pub route_name: String,
    pub weather_data: Vec<WeatherObservation>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalyzeRequest {
    pub route_id: String,
    pub vessel_specs: VesselProfile,
    #[serde(default)]
    pub laycan_window: Option<LaycanWindow>,
    /// Departure time; the request time when absent
    #[serde(default)]
    pub departure: Option<DateTime<Utc>>,
    #[serde(default = "default_include_insights")]
    pub include_insights: bool,
}

fn default_include_insights() -> bool {
    true
}

// === Handlers ===

async fn health(State(state): State<Arc<AppState>>) -> Json<Value> {
    Json(json!({
        "status": "OK",
        "timestamp": Utc::now(),
        "version": env!("CARGO_PKG_VERSION"),
        "routes": state.catalog().len(),
        "weatherCacheSize": state.weather_cache_size(),
    }))
}

async fn list_routes(State(state): State<Arc<AppState>>) -> Json<Vec<RouteListing>> {
    Json(state.catalog().list())
}

async fn get_route(
    State(state): State<Arc<AppState>>,
    Path(route_id): Path<String>,
) -> Result<Json<RouteDetail>, ApiError> {
    let route = state.catalog().get(&route_id)?;
    let total_distance = route_distance_nm(&route.waypoints)?;

    Ok(Json(RouteDetail {
        route: route.clone(),
        total_distance,
        estimated_duration: total_distance / NOMINAL_SPEED_KNOTS,
    }))
}

async fn list_vessels() -> Json<Vec<VesselPreset>> {
    Json(vessel_presets())
}

async fn point_weather(
    State(state): State<Arc<AppState>>,
    Path((lat, lon)): Path<(String, String)>,
) -> Result<Json<WeatherObservation>, ApiError> {
    let (Ok(lat), Ok(lon)) = (lat.trim().parse::<f64>(), lon.trim().parse::<f64>()) else {
        return Err(ApiError::bad_request(format!(
            "latitude and longitude must be numbers, got '{lat}' and '{lon}'"
        )));
    };
    let coordinate = Coordinate::new(lat, lon)?;

    let observation = state.weather().fetch(coordinate).await.map_err(|err| {
        ApiError::new(
            StatusCode::SERVICE_UNAVAILABLE,
            "Weather data unavailable",
            err.to_string(),
        )
    })?;
    Ok(Json(observation))
}

async fn route_weather(
    State(state): State<Arc<AppState>>,
    Path(route_id): Path<String>,
) -> Result<Json<RouteWeather>, ApiError> {
    let route = state.catalog().get(&route_id)?;
    let points = sample_waypoints(
        &route.waypoints,
        ROUTE_WEATHER_STRIDE,
        ROUTE_WEATHER_MAX_POINTS,
    );

    let weather = state.weather();
    let results = join_all(points.iter().map(|&point| weather.fetch(point))).await;
    let weather_data: Vec<WeatherObservation> = results
        .into_iter()
        .filter_map(|result| match result {
            Ok(observation) => Some(observation),
            Err(err) => {
                tracing::warn!(route_id = %route.id, error = %err, "Route weather sample failed");
                None
            }
        })
        .collect();

    if weather_data.is_empty() {
        return Err(ApiError::new(
            StatusCode::SERVICE_UNAVAILABLE,
            "Weather data unavailable",
            format!("no weather samples could be fetched for route {}", route.id),
        ));
    }

    Ok(Json(RouteWeather {
        route_id: route.id.clone(),
        route_name: route.name.clone(),
        weather_data,
    }))
}

async fn analyze_voyage(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<AnalyzeRequest>, JsonRejection>,
) -> Result<Json<VoyageAnalysis>, ApiError> {
    let Json(req) = payload?;
    let route = state.catalog().get(&req.route_id)?.clone();

    tracing::info!(
        route_id = %route.id,
        vessel = %req.vessel_specs.vessel_name,
        insights = req.include_insights,
        "Voyage analysis requested"
    );

    let request = AnalysisRequest {
        route,
        vessel: req.vessel_specs,
        laycan: req.laycan_window,
        departure: req.departure,
        include_insights: req.include_insights,
    };
    let mut analysis = state.engine().analyze(&request).await?;

    let limit = state.config().response_leg_limit;
    if limit > 0 {
        analysis.leg_analysis.truncate(limit);
    }
    Ok(Json(analysis))
}
