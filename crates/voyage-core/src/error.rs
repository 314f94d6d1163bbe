//! Error taxonomy for voyage analysis.

use thiserror::Error;

/// Failures that abort an analysis.
///
/// Per-leg anomalies (a bad weather sample, an odd bearing) never surface
/// here; they are clamped or defaulted where they occur.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum VoyageError {
    #[error("invalid route: {0}")]
    InvalidRoute(String),

    #[error("route not found: {0}")]
    UnknownRoute(String),

    #[error("invalid vessel profile: {0}")]
    InvalidVesselProfile(String),

    #[error("invalid coordinate ({lat}, {lon})")]
    InvalidCoordinate { lat: f64, lon: f64 },

    #[error("laycan window start is after its end")]
    InvalidLaycanWindow,

    #[error("no weather data available for the route")]
    NoWeatherData,

    #[error("voyage has zero total duration")]
    DegenerateVoyage,

    #[error("arrival time is outside the representable date range")]
    EtaOutOfRange,
}

impl VoyageError {
    /// True for both malformed routes and unknown route identifiers.
    pub fn is_invalid_route(&self) -> bool {
        matches!(self, Self::InvalidRoute(_) | Self::UnknownRoute(_))
    }
}

/// Failure reported by an external collaborator (weather or insight API).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ProviderError {
    #[error("provider unavailable: {0}")]
    Unavailable(String),

    #[error("provider transport error: {0}")]
    Transport(String),

    #[error("provider timed out")]
    Timeout,

    #[error("malformed provider response: {0}")]
    Malformed(String),
}

/// Why a generated insight payload could not be used.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InsightError {
    #[error("insight response was empty")]
    Empty,

    #[error("insight response is not valid JSON: {0}")]
    Parse(String),

    #[error("insight response has invalid content: {0}")]
    Invalid(String),
}

pub type Result<T, E = VoyageError> = std::result::Result<T, E>;
