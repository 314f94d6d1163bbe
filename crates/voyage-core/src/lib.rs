pub mod aggregate;
pub mod catalog;
pub mod config;
pub mod engine;
pub mod error;
pub mod fuel;
pub mod geodesy;
pub mod insight;
pub mod kinematics;
pub mod legs;
pub mod models;
pub mod provider;
pub mod sampling;

pub use aggregate::{build_analysis, evaluate_laycan, weather_impact, VoyageTotals};
pub use catalog::{vessel_preset, vessel_presets, RouteCatalog, RouteListing, VesselPreset};
pub use config::AnalysisConfig;
pub use engine::{AnalysisRequest, VoyageEngine};
pub use error::{InsightError, ProviderError, VoyageError};
pub use fuel::{fuel_burn_rate, weather_resistance};
pub use geodesy::{bearing_deg, distance_nm, route_distance_nm};
pub use insight::{fallback_insights, parse_insights, resolve_insights, FallbackReason, InsightRequest};
pub use kinematics::SogModel;
pub use legs::{decompose, LegPlan};
pub use models::{
    Coordinate, Insight, LaycanCompliance, LaycanStatus, LaycanWindow, LegResult,
    OptimizationSuggestion, Route, RouteSummary, SuggestionKind, VesselProfile, VoyageAnalysis,
    VoyagePerformance, WeatherImpact, WeatherObservation,
};
pub use provider::{InsightGenerator, NoInsights, WeatherProvider};
