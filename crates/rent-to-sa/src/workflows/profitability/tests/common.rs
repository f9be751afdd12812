use std::sync::{Arc, Mutex};

use axum::response::Response;
use serde_json::{json, Value};

use crate::workflows::profitability::catalog::RateCatalog;
use crate::workflows::profitability::domain::{CalculationRequest, CalculationResult};
use crate::workflows::profitability::notifier::{NotifyError, ResultNotifier};
use crate::workflows::profitability::{profitability_router, ProfitabilityService};

pub(super) fn liverpool_request() -> CalculationRequest {
    CalculationRequest::new("45 Smith St, Liverpool L4 3XY", "£900 pcm", 3, Some("house"))
}

pub(super) fn legacy_request() -> CalculationRequest {
    CalculationRequest::new("12 Walton Lane, L4 0TH", "£750", 3, Some("yurt"))
}

pub(super) fn unresolvable_request() -> CalculationRequest {
    CalculationRequest::new("No Postcode Here", "£750", 3, Some("yurt"))
}

pub(super) fn liverpool_body() -> Value {
    json!({
        "address": "45 Smith St, Liverpool L4 3XY",
        "price": "£900 pcm",
        "bedrooms": 3,
        "property_type": "house",
    })
}

pub(super) fn build_service() -> (ProfitabilityService<MemoryNotifier>, Arc<MemoryNotifier>) {
    let notifier = Arc::new(MemoryNotifier::default());
    let service = ProfitabilityService::new(
        Arc::new(RateCatalog::standard()),
        Some(notifier.clone()),
    );
    (service, notifier)
}

pub(super) fn profitability_router_with_service(
    service: ProfitabilityService<MemoryNotifier>,
) -> axum::Router {
    profitability_router(Arc::new(service))
}

#[derive(Default, Clone)]
pub(super) struct MemoryNotifier {
    events: Arc<Mutex<Vec<CalculationResult>>>,
}

impl MemoryNotifier {
    pub(super) fn events(&self) -> Vec<CalculationResult> {
        self.events.lock().expect("notifier mutex poisoned").clone()
    }
}

impl ResultNotifier for MemoryNotifier {
    fn publish(&self, result: &CalculationResult) -> Result<(), NotifyError> {
        let mut guard = self.events.lock().expect("notifier mutex poisoned");
        guard.push(result.clone());
        Ok(())
    }
}

#[derive(Default, Clone)]
pub(super) struct FailingNotifier;

impl ResultNotifier for FailingNotifier {
    fn publish(&self, _result: &CalculationResult) -> Result<(), NotifyError> {
        Err(NotifyError::Transport("webhook offline".to_string()))
    }
}

pub(super) async fn read_json_body(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), 16 * 1024)
        .await
        .expect("read body");
    serde_json::from_slice(&body).expect("json payload")
}
