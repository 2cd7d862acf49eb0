use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use serde_json::json;

use super::domain::ProductId;
use super::repository::ProductRepository;
use super::service::{CatalogError, ProductCatalog};
use crate::badges::{BadgeDisplay, BadgeSet, ScoredProduct};

#[derive(Debug, Default, Deserialize)]
pub(crate) struct ListQuery {
    #[serde(default)]
    pub(crate) category: Option<String>,
}

#[derive(Debug, Serialize)]
pub(crate) struct BadgeResponse {
    #[serde(flatten)]
    pub(crate) badges: BadgeSet,
    pub(crate) details: Vec<BadgeDisplay>,
}

/// Router builder exposing browse, detail and badge endpoints.
pub fn catalog_router<R>(catalog: Arc<ProductCatalog<R>>) -> Router
where
    R: ProductRepository + 'static,
{
    Router::new()
        .route("/api/v1/products", get(list_handler::<R>))
        .route("/api/v1/products/:product_id", get(detail_handler::<R>))
        .route("/api/v1/badges", post(badges_handler::<R>))
        .with_state(catalog)
}

pub(crate) fn error_response(error: CatalogError) -> Response {
    let status = match &error {
        CatalogError::NotFound(_) => StatusCode::NOT_FOUND,
        CatalogError::Import(_) => StatusCode::BAD_REQUEST,
        CatalogError::Repository(_) => StatusCode::INTERNAL_SERVER_ERROR,
    };
    let payload = json!({
        "error": error.to_string(),
    });
    (status, Json(payload)).into_response()
}

pub(crate) async fn list_handler<R>(
    State(catalog): State<Arc<ProductCatalog<R>>>,
    Query(query): Query<ListQuery>,
) -> Response
where
    R: ProductRepository + 'static,
{
    match catalog.list(query.category.as_deref()) {
        Ok(products) => (StatusCode::OK, Json(products)).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn detail_handler<R>(
    State(catalog): State<Arc<ProductCatalog<R>>>,
    Path(product_id): Path<String>,
) -> Response
where
    R: ProductRepository + 'static,
{
    match catalog.detail(&ProductId(product_id)) {
        Ok(detail) => (StatusCode::OK, Json(detail)).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn badges_handler<R>(
    State(catalog): State<Arc<ProductCatalog<R>>>,
    Json(product): Json<ScoredProduct>,
) -> Response
where
    R: ProductRepository + 'static,
{
    let badges = catalog.badges(&product);
    let details = badges.resolved();
    (StatusCode::OK, Json(BadgeResponse { badges, details })).into_response()
}
