use crate::infra::AppState;
use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::{Extension, Json, Router};
use bifl_catalog::catalog::{catalog_router, ProductCatalog, ProductRepository};
use bifl_catalog::compare::{compare_router, CompareApi, CompareSessions, CompareStore};
use serde_json::json;
use std::sync::Arc;

pub(crate) fn with_catalog_routes<R, S>(
    catalog: Arc<ProductCatalog<R>>,
    sessions: Arc<CompareSessions<S>>,
) -> Router
where
    R: ProductRepository + 'static,
    S: CompareStore + 'static,
{
    let compare = CompareApi {
        catalog: catalog.clone(),
        sessions,
    };

    catalog_router(catalog)
        .merge(compare_router(compare))
        .route("/health", axum::routing::get(healthcheck))
        .route("/ready", axum::routing::get(readiness_endpoint))
        .route("/metrics", axum::routing::get(metrics_endpoint))
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
    use crate::infra::{sample_products, MemoryProductRepository};
    use axum::body::{to_bytes, Body};
    use axum::http::Request;
    use bifl_catalog::badges::BadgeThresholds;
    use bifl_catalog::compare::MemoryCompareStore;
    use metrics_exporter_prometheus::PrometheusBuilder;
    use std::sync::atomic::{AtomicBool, Ordering};
    use tower::ServiceExt;

    fn app_state(ready: bool) -> AppState {
        let handle = PrometheusBuilder::new().build_recorder().handle();
        AppState {
            readiness: Arc::new(AtomicBool::new(ready)),
            metrics: Arc::new(handle),
        }
    }

    fn app(state: AppState) -> Router {
        let repository = Arc::new(MemoryProductRepository::seeded(sample_products()));
        let catalog = Arc::new(ProductCatalog::new(repository, BadgeThresholds::default()));
        let sessions = Arc::new(CompareSessions::new(Arc::new(MemoryCompareStore::default())));
        with_catalog_routes(catalog, sessions).layer(Extension(state))
    }

    async fn body_json(response: axum::response::Response) -> serde_json::Value {
        let bytes = to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("body readable");
        serde_json::from_slice(&bytes).expect("json body")
    }

    #[tokio::test]
    async fn healthcheck_reports_ok() {
        let Json(body) = healthcheck().await;
        assert_eq!(body["status"], "ok");
    }

    #[tokio::test]
    async fn readiness_tracks_flag() {
        let state = app_state(false);
        let router = app(state.clone());

        let response = router
            .clone()
            .oneshot(Request::get("/ready").body(Body::empty()).expect("request"))
            .await
            .expect("response");
        assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);

        state.readiness.store(true, Ordering::Release);
        let response = router
            .oneshot(Request::get("/ready").body(Body::empty()).expect("request"))
            .await
            .expect("response");
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_json(response).await["status"], "ready");
    }

    #[tokio::test]
    async fn metrics_endpoint_serves_prometheus_text() {
        let response = app(app_state(true))
            .oneshot(Request::get("/metrics").body(Body::empty()).expect("request"))
            .await
            .expect("response");

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            response.headers()[header::CONTENT_TYPE],
            "text/plain; version=0.0.4"
        );
    }

    #[tokio::test]
    async fn catalog_and_compare_routes_share_the_catalog() {
        let router = app(app_state(true));

        let response = router
            .clone()
            .oneshot(
                Request::get("/api/v1/products?category=kitchen")
                    .body(Body::empty())
                    .expect("request"),
            )
            .await
            .expect("response");
        assert_eq!(response.status(), StatusCode::OK);
        let listing = body_json(response).await;
        let ids: Vec<&str> = listing
            .as_array()
            .expect("array")
            .iter()
            .filter_map(|entry| entry["id"].as_str())
            .collect();
        assert_eq!(ids, vec!["cast-iron-skillet", "chef-knife"]);

        for product_id in ["cast-iron-skillet", "hiking-socks"] {
            let response = router
                .clone()
                .oneshot(
                    Request::post("/api/v1/compare/tab-1/items")
                        .header(header::CONTENT_TYPE, "application/json")
                        .body(Body::from(json!({ "productId": product_id }).to_string()))
                        .expect("request"),
                )
                .await
                .expect("response");
            assert_eq!(response.status(), StatusCode::OK);
        }

        let response = router
            .oneshot(
                Request::get("/api/v1/compare/tab-1")
                    .body(Body::empty())
                    .expect("request"),
            )
            .await
            .expect("response");
        let view = body_json(response).await;
        assert_eq!(view["count"], 2);
        assert_eq!(view["modalVisible"], true);
        assert_eq!(view["canAddMore"], true);
    }
}
