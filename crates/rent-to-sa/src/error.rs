use crate::config::ConfigError;
use crate::telemetry::TelemetryError;
use crate::workflows::profitability::{CalculationError, CatalogError, NotifyError};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use std::fmt;

#[derive(Debug)]
pub enum AppError {
    Config(ConfigError),
    Telemetry(TelemetryError),
    Catalog(CatalogError),
    Notifier(NotifyError),
    Io(std::io::Error),
    Calculation(CalculationError),
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::Config(err) => write!(f, "configuration error: {}", err),
            AppError::Telemetry(err) => write!(f, "telemetry error: {}", err),
            AppError::Catalog(err) => write!(f, "rate catalog error: {}", err),
            AppError::Notifier(err) => write!(f, "notifier error: {}", err),
            AppError::Io(err) => write!(f, "io error: {}", err),
            AppError::Calculation(err) => write!(f, "{}", err),
        }
    }
}

impl std::error::Error for AppError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            AppError::Config(err) => Some(err),
            AppError::Telemetry(err) => Some(err),
            AppError::Catalog(err) => Some(err),
            AppError::Notifier(err) => Some(err),
            AppError::Io(err) => Some(err),
            AppError::Calculation(err) => Some(err),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        if let AppError::Calculation(err) = self {
            return err.into_response();
        }

        let body = Json(json!({ "error": self.to_string() }));
        (StatusCode::INTERNAL_SERVER_ERROR, body).into_response()
    }
}

impl From<ConfigError> for AppError {
    fn from(value: ConfigError) -> Self {
        Self::Config(value)
    }
}

impl From<TelemetryError> for AppError {
    fn from(value: TelemetryError) -> Self {
        Self::Telemetry(value)
    }
}

impl From<CatalogError> for AppError {
    fn from(value: CatalogError) -> Self {
        Self::Catalog(value)
    }
}

impl From<NotifyError> for AppError {
    fn from(value: NotifyError) -> Self {
        Self::Notifier(value)
    }
}

impl From<std::io::Error> for AppError {
    fn from(value: std::io::Error) -> Self {
        Self::Io(value)
    }
}

impl From<CalculationError> for AppError {
    fn from(value: CalculationError) -> Self {
        Self::Calculation(value)
    }
}
