//! Core data models for voyage analysis.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{Result, VoyageError};

/// Documented fallback conditions used when a sample value is unusable.
pub const DEFAULT_WIND_SPEED_KNOTS: f64 = 10.0;
pub const DEFAULT_WAVE_HEIGHT_M: f64 = 2.0;
pub const DEFAULT_CURRENT_SPEED_KNOTS: f64 = 0.5;
pub const DEFAULT_CURRENT_DIRECTION_DEG: f64 = 180.0;

/// Geographic position in decimal degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinate {
    pub lat: f64,
    pub lon: f64,
}

impl Coordinate {
    /// Create a validated coordinate.
    pub fn new(lat: f64, lon: f64) -> Result<Self> {
        let coordinate = Self { lat, lon };
        if coordinate.is_valid() {
            Ok(coordinate)
        } else {
            Err(VoyageError::InvalidCoordinate { lat, lon })
        }
    }

    pub fn is_valid(&self) -> bool {
        self.lat.is_finite()
            && self.lon.is_finite()
            && (-90.0..=90.0).contains(&self.lat)
            && (-180.0..=180.0).contains(&self.lon)
    }
}

impl From<[f64; 2]> for Coordinate {
    fn from([lat, lon]: [f64; 2]) -> Self {
        Self { lat, lon }
    }
}

/// A named sequence of waypoints in sail order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Route {
    pub id: String,
    pub name: String,
    pub origin: String,
    pub destination: String,
    pub waypoints: Vec<Coordinate>,
}

impl Route {
    /// Check the route has at least one leg and only valid waypoints.
    pub fn validate(&self) -> Result<()> {
        if self.waypoints.len() < 2 {
            return Err(VoyageError::InvalidRoute(format!(
                "route '{}' needs at least 2 waypoints, has {}",
                self.id,
                self.waypoints.len()
            )));
        }
        if let Some(bad) = self.waypoints.iter().find(|wp| !wp.is_valid()) {
            return Err(VoyageError::InvalidCoordinate {
                lat: bad.lat,
                lon: bad.lon,
            });
        }
        Ok(())
    }

    pub fn leg_count(&self) -> usize {
        self.waypoints.len().saturating_sub(1)
    }
}

/// Vessel speed and fuel characteristics for one analysis run.
///
/// Missing fields deserialize to the defaults of an unknown vessel.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct VesselProfile {
    pub vessel_name: String,
    /// Service speed through water in knots
    pub service_speed: f64,
    /// Fuel burn at service speed in metric tons per day
    pub fuel_consumption: f64,
    /// Fuel price per metric ton
    pub fuel_price: f64,
}

impl Default for VesselProfile {
    fn default() -> Self {
        Self {
            vessel_name: "Unknown Vessel".to_string(),
            service_speed: 12.0,
            fuel_consumption: 45.0,
            fuel_price: 650.0,
        }
    }
}

impl VesselProfile {
    pub fn validate(&self) -> Result<()> {
        if !self.service_speed.is_finite() || self.service_speed <= 0.0 {
            return Err(VoyageError::InvalidVesselProfile(format!(
                "service speed must be > 0 knots, got {}",
                self.service_speed
            )));
        }
        if !self.fuel_consumption.is_finite() || self.fuel_consumption <= 0.0 {
            return Err(VoyageError::InvalidVesselProfile(format!(
                "fuel consumption must be > 0 t/day, got {}",
                self.fuel_consumption
            )));
        }
        if !self.fuel_price.is_finite() || self.fuel_price < 0.0 {
            return Err(VoyageError::InvalidVesselProfile(format!(
                "fuel price must be >= 0, got {}",
                self.fuel_price
            )));
        }
        Ok(())
    }
}

/// Weather at one location, as returned by a weather provider.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WeatherObservation {
    pub coordinate: Coordinate,
    pub timestamp: DateTime<Utc>,
    pub wind_speed_knots: f64,
    /// Direction the wind blows from, degrees true
    pub wind_direction_deg: f64,
    pub wave_height_m: f64,
    pub current_speed_knots: f64,
    pub current_direction_deg: f64,
    #[serde(default)]
    pub swell_direction_deg: Option<f64>,
    #[serde(default)]
    pub temperature_c: Option<f64>,
    #[serde(default)]
    pub pressure_hpa: Option<f64>,
    #[serde(default)]
    pub humidity_pct: Option<f64>,
    #[serde(default)]
    pub visibility_nm: Option<f64>,
    #[serde(default)]
    pub description: Option<String>,
    /// Set when some or all values were simulated rather than measured.
    #[serde(default)]
    pub synthetic: bool,
}

impl WeatherObservation {
    /// Default conditions: wind 10 kn, waves 2 m, current 0.5 kn setting 180°.
    pub fn default_conditions(coordinate: Coordinate, timestamp: DateTime<Utc>) -> Self {
        Self {
            coordinate,
            timestamp,
            wind_speed_knots: DEFAULT_WIND_SPEED_KNOTS,
            wind_direction_deg: 0.0,
            wave_height_m: DEFAULT_WAVE_HEIGHT_M,
            current_speed_knots: DEFAULT_CURRENT_SPEED_KNOTS,
            current_direction_deg: DEFAULT_CURRENT_DIRECTION_DEG,
            swell_direction_deg: None,
            temperature_c: None,
            pressure_hpa: None,
            humidity_pct: None,
            visibility_nm: None,
            description: Some("Default conditions".to_string()),
            synthetic: true,
        }
    }

    /// Copy with unusable values replaced by defaults and directions in [0, 360).
    pub fn sanitized(&self) -> Self {
        fn magnitude(value: f64, fallback: f64) -> f64 {
            if value.is_finite() && value >= 0.0 {
                value
            } else {
                fallback
            }
        }
        fn direction(value: f64, fallback: f64) -> f64 {
            if value.is_finite() {
                crate::geodesy::normalize_degrees(value)
            } else {
                fallback
            }
        }

        Self {
            wind_speed_knots: magnitude(self.wind_speed_knots, DEFAULT_WIND_SPEED_KNOTS),
            wind_direction_deg: direction(self.wind_direction_deg, 0.0),
            wave_height_m: magnitude(self.wave_height_m, DEFAULT_WAVE_HEIGHT_M),
            current_speed_knots: magnitude(self.current_speed_knots, DEFAULT_CURRENT_SPEED_KNOTS),
            current_direction_deg: direction(
                self.current_direction_deg,
                DEFAULT_CURRENT_DIRECTION_DEG,
            ),
            ..self.clone()
        }
    }
}

/// Per-leg computation result.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LegResult {
    pub leg_index: usize,
    pub from: Coordinate,
    pub to: Coordinate,
    pub distance_nm: f64,
    pub bearing_deg: f64,
    pub stw_knots: f64,
    pub sog_knots: f64,
    pub weather_factor: f64,
    /// Fuel burn rate in t/day
    pub fuel_rate_tpd: f64,
    /// Fuel burned on this leg in tons
    pub fuel_tons: f64,
    pub duration_hours: f64,
    pub weather_sample_index: usize,
    pub weather: WeatherObservation,
}

/// Scheduled delivery window.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct LaycanWindow {
    #[serde(default)]
    pub start: Option<DateTime<Utc>>,
    #[serde(default)]
    pub end: Option<DateTime<Utc>>,
}

impl LaycanWindow {
    pub fn new(start: Option<DateTime<Utc>>, end: Option<DateTime<Utc>>) -> Result<Self> {
        let window = Self { start, end };
        window.validate()?;
        Ok(window)
    }

    pub fn validate(&self) -> Result<()> {
        match (self.start, self.end) {
            (Some(start), Some(end)) if start > end => Err(VoyageError::InvalidLaycanWindow),
            _ => Ok(()),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum LaycanStatus {
    /// No complete window was supplied
    #[default]
    Unspecified,
    Compliant,
    Early,
    Late,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LaycanCompliance {
    pub status: LaycanStatus,
    /// Whole hours early or late; 0 when compliant or unspecified
    pub risk_hours: i64,
    pub eta: DateTime<Utc>,
    pub laycan_window: Option<LaycanWindow>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RouteSummary {
    #[serde(flatten)]
    pub route: Route,
    /// Sum of the analyzed legs
    pub total_distance: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VoyagePerformance {
    pub total_duration: f64,
    pub total_distance: f64,
    /// Full route distance including legs beyond the analysis cap
    pub route_distance: f64,
    pub average_sog: f64,
    pub total_fuel: f64,
    pub estimated_cost: f64,
    pub departure: DateTime<Utc>,
    pub eta: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WeatherImpact {
    pub average_wind_speed: f64,
    pub average_wave_height: f64,
    pub weather_factor: f64,
    pub samples_used: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SuggestionKind {
    SpeedAdjustment,
    WeatherRouting,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OptimizationSuggestion {
    #[serde(rename = "type")]
    pub kind: SuggestionKind,
    pub description: String,
    pub impact: String,
}

/// One advisory record from the insight generator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Insight {
    #[serde(rename = "mainPoint")]
    pub headline: String,
    #[serde(rename = "subPoints", default)]
    pub points: Vec<String>,
}

/// Result of one analysis request. Not persisted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VoyageAnalysis {
    pub route: RouteSummary,
    pub vessel: VesselProfile,
    pub performance: VoyagePerformance,
    pub laycan_compliance: LaycanCompliance,
    pub weather_impact: WeatherImpact,
    pub leg_analysis: Vec<LegResult>,
    pub legs_analyzed: usize,
    pub legs_total: usize,
    pub optimization_suggestions: Vec<OptimizationSuggestion>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ai_insights: Option<Vec<Insight>>,
}
