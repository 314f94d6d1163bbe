//! JSON error responses.

use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use voyage_core::VoyageError;

#[derive(Debug, Error)]
#[error("{error}: {details}")]
pub struct ApiError {
    pub status: StatusCode,
    pub error: String,
    pub details: String,
}

impl ApiError {
    pub fn new(status: StatusCode, error: impl Into<String>, details: impl Into<String>) -> Self {
        Self {
            status,
            error: error.into(),
            details: details.into(),
        }
    }

    pub fn bad_request(details: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, "Invalid request", details)
    }
}

impl From<VoyageError> for ApiError {
    fn from(err: VoyageError) -> Self {
        let (status, error) = match &err {
            VoyageError::UnknownRoute(_) => (StatusCode::NOT_FOUND, "Route not found"),
            VoyageError::InvalidRoute(_) => (StatusCode::UNPROCESSABLE_ENTITY, "Invalid route"),
            VoyageError::InvalidVesselProfile(_) => {
                (StatusCode::BAD_REQUEST, "Invalid vessel specs")
            }
            VoyageError::InvalidCoordinate { .. } => {
                (StatusCode::BAD_REQUEST, "Invalid coordinates")
            }
            VoyageError::InvalidLaycanWindow => (StatusCode::BAD_REQUEST, "Invalid laycan window"),
            VoyageError::NoWeatherData => {
                (StatusCode::SERVICE_UNAVAILABLE, "Weather data unavailable")
            }
            VoyageError::DegenerateVoyage => {
                (StatusCode::UNPROCESSABLE_ENTITY, "Voyage cannot be analyzed")
            }
            VoyageError::EtaOutOfRange => (StatusCode::BAD_REQUEST, "Invalid departure"),
        };
        Self::new(status, error, err.to_string())
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        let status = match &rejection {
            JsonRejection::JsonDataError(_) => StatusCode::BAD_REQUEST,
            other => other.status(),
        };
        Self::new(status, "Invalid request body", rejection.body_text())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        if self.status.is_server_error() {
            tracing::warn!(status = %self.status, details = %self.details, "{}", self.error);
        }
        (
            self.status,
            Json(json!({ "error": self.error, "details": self.details })),
        )
            .into_response()
    }
}
