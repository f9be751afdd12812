use std::sync::Arc;

use axum::{
    body::Bytes,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::post,
    Router,
};
use serde_json::json;
use tracing::info;

use super::domain::CalculationRequest;
use super::notifier::ResultNotifier;
use super::service::{CalculationError, ProfitabilityService};

/// Router builder exposing the calculation endpoint.
pub fn profitability_router<N>(service: Arc<ProfitabilityService<N>>) -> Router
where
    N: ResultNotifier + 'static,
{
    Router::new()
        .route("/calculate", post(calculate_handler::<N>))
        .with_state(service)
}

/// Bodies that are not a JSON object are treated as empty so the caller gets
/// a field-level validation message.
pub(crate) async fn calculate_handler<N>(
    State(service): State<Arc<ProfitabilityService<N>>>,
    body: Bytes,
) -> Response
where
    N: ResultNotifier + 'static,
{
    let request = CalculationRequest::from_body(&body);
    info!(?request, "received calculation request");

    match service.process(&request) {
        Ok(result) => (StatusCode::OK, axum::Json(result)).into_response(),
        Err(error) => error.into_response(),
    }
}

impl CalculationError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            CalculationError::Validation(_) | CalculationError::Rent(_) => StatusCode::BAD_REQUEST,
            CalculationError::RateUnresolved { .. } => StatusCode::NOT_FOUND,
        }
    }
}

impl IntoResponse for CalculationError {
    fn into_response(self) -> Response {
        let payload = json!({
            "error": self.to_string(),
        });
        (self.status_code(), axum::Json(payload)).into_response()
    }
}
