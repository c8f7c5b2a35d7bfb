//! Error types and handling for the `CityCast` service

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use thiserror::Error;

/// Main error type for the `CityCast` service
#[derive(Error, Debug)]
pub enum WeatherProxyError {
    /// Request carried no usable city name
    #[error("City not provided")]
    MissingCity,

    /// Geocoder returned no match for the city
    #[error("City not found")]
    CityNotFound { city: String },

    /// Forecast service unreachable or erroring
    #[error("Failed to fetch forecast data")]
    Upstream { message: String },

    /// Request body over the configured limit
    #[error("Request body too large")]
    BodyTooLarge,

    /// Anything else that went wrong while building the response
    #[error("{message}")]
    Internal { message: String },

    /// Configuration-related errors
    #[error("Configuration error: {message}")]
    Config { message: String },
}

impl WeatherProxyError {
    /// Create a new city-not-found error
    pub fn city_not_found<S: Into<String>>(city: S) -> Self {
        Self::CityNotFound { city: city.into() }
    }

    /// Create a new upstream error
    pub fn upstream<S: Into<String>>(message: S) -> Self {
        Self::Upstream {
            message: message.into(),
        }
    }

    /// Create a new internal error
    pub fn internal<S: Into<String>>(message: S) -> Self {
        Self::Internal {
            message: message.into(),
        }
    }

    /// Create a new configuration error
    pub fn config<S: Into<String>>(message: S) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// HTTP status this error is reported with
    #[must_use]
    pub fn status_code(&self) -> StatusCode {
        match self {
            WeatherProxyError::MissingCity => StatusCode::BAD_REQUEST,
            WeatherProxyError::CityNotFound { .. } => StatusCode::NOT_FOUND,
            WeatherProxyError::BodyTooLarge => StatusCode::PAYLOAD_TOO_LARGE,
            WeatherProxyError::Upstream { .. }
            | WeatherProxyError::Internal { .. }
            | WeatherProxyError::Config { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for WeatherProxyError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        match &self {
            WeatherProxyError::Upstream { message } => {
                tracing::error!("Upstream failure: {}", message)
            }
            WeatherProxyError::Internal { message } | WeatherProxyError::Config { message } => {
                tracing::error!("Request failed: {}", message)
            }
            WeatherProxyError::CityNotFound { city } => {
                tracing::info!("No geocoding match for '{}'", city)
            }
            WeatherProxyError::MissingCity => tracing::debug!("Rejected request without city"),
            WeatherProxyError::BodyTooLarge => tracing::debug!("Rejected oversized request body"),
        }
        (status, Json(json!({ "error": self.to_string() }))).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::to_bytes;

    #[test]
    fn test_status_codes() {
        assert_eq!(
            WeatherProxyError::MissingCity.status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            WeatherProxyError::city_not_found("Atlantis").status_code(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            WeatherProxyError::BodyTooLarge.status_code(),
            StatusCode::PAYLOAD_TOO_LARGE
        );
        assert_eq!(
            WeatherProxyError::upstream("timeout").status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
        assert_eq!(
            WeatherProxyError::internal("boom").status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_internal_message_is_verbatim() {
        let err = WeatherProxyError::internal("missing field `current`");
        assert_eq!(err.to_string(), "missing field `current`");
    }

    #[test]
    fn test_upstream_message_hides_details() {
        let err = WeatherProxyError::upstream("connection refused");
        assert_eq!(err.to_string(), "Failed to fetch forecast data");
    }

    #[tokio::test]
    async fn test_response_body_shape() {
        let response = WeatherProxyError::city_not_found("Atlantis").into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);

        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let value: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(value, json!({ "error": "City not found" }));
    }
}
