use crate::infra::AppState;
use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::Extension;
use axum::Json;
use rent_to_sa::workflows::profitability::{
    profitability_router, ProfitabilityService, ResultNotifier,
};
use serde_json::json;
use std::sync::Arc;

pub(crate) fn with_profitability_routes<N>(service: Arc<ProfitabilityService<N>>) -> axum::Router
where
    N: ResultNotifier + 'static,
{
    profitability_router(service)
        .route("/", axum::routing::get(root_endpoint))
        .route("/health", axum::routing::get(healthcheck))
        .route("/ready", axum::routing::get(readiness_endpoint))
        .route("/metrics", axum::routing::get(metrics_endpoint))
}

pub(crate) async fn root_endpoint() -> Json<serde_json::Value> {
    Json(json!({ "message": "Rent-to-SA profitability API is running." }))
}

pub(crate) async fn healthcheck() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}

pub(crate) async fn readiness_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    let ready = state.readiness.load(std::sync::atomic::Ordering::Relaxed);
    let status = if ready {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    let payload = if ready {
        json!({ "status": "ready" })
    } else {
        json!({ "status": "initializing" })
    };

    (status, Json(payload))
}

pub(crate) async fn metrics_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
        state.metrics.render(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::Request;
    use rent_to_sa::workflows::profitability::{RateCatalog, WebhookNotifier};
    use tower::ServiceExt;

    fn router() -> axum::Router {
        let service = ProfitabilityService::<WebhookNotifier>::new(
            Arc::new(RateCatalog::standard()),
            None,
        );
        with_profitability_routes(Arc::new(service))
    }

    async fn read_json(response: axum::response::Response) -> serde_json::Value {
        let body = axum::body::to_bytes(response.into_body(), 16 * 1024)
            .await
            .expect("read body");
        serde_json::from_slice(&body).expect("json payload")
    }

    #[tokio::test]
    async fn root_returns_greeting() {
        let response = router()
            .oneshot(Request::get("/").body(Body::empty()).expect("request"))
            .await
            .expect("route executes");

        assert_eq!(response.status(), StatusCode::OK);
        let payload = read_json(response).await;
        assert_eq!(
            payload,
            json!({ "message": "Rent-to-SA profitability API is running." })
        );
    }

    #[tokio::test]
    async fn calculate_is_mounted_alongside_health() {
        let body = json!({
            "address": "10 Baker St, London NW1",
            "price": "£1,500",
            "bedrooms": 2,
        });
        let response = router()
            .oneshot(
                Request::post("/calculate")
                    .header(header::CONTENT_TYPE, "application/json")
                    .body(Body::from(body.to_string()))
                    .expect("request"),
            )
            .await
            .expect("route executes");

        assert_eq!(response.status(), StatusCode::OK);
        let payload = read_json(response).await;
        assert_eq!(payload["nightly_rate"], json!(136));

        let response = router()
            .oneshot(Request::get("/health").body(Body::empty()).expect("request"))
            .await
            .expect("route executes");
        assert_eq!(response.status(), StatusCode::OK);
    }
}
