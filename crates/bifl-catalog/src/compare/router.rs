use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{delete, get, post, put},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::error;

use super::domain::ComparableProduct;
use super::sessions::{CompareSessions, CompareView, SessionId};
use super::set::AddOutcome;
use super::store::CompareStore;
use crate::catalog::router::error_response;
use crate::catalog::{ProductCatalog, ProductId, ProductRepository};

/// Handler state: catalog lookups plus the per-session compare sets.
pub struct CompareApi<R, S> {
    pub catalog: Arc<ProductCatalog<R>>,
    pub sessions: Arc<CompareSessions<S>>,
}

impl<R, S> Clone for CompareApi<R, S> {
    fn clone(&self) -> Self {
        Self {
            catalog: self.catalog.clone(),
            sessions: self.sessions.clone(),
        }
    }
}

/// Body of an add request: a catalog id, or a full snapshot for off-catalog products.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub(crate) enum AddItemRequest {
    #[serde(rename_all = "camelCase")]
    ById { product_id: String },
    Inline(ComparableProduct),
}

#[derive(Debug, Deserialize)]
pub(crate) struct ModalRequest {
    pub(crate) visible: bool,
}

#[derive(Debug, Serialize)]
pub(crate) struct AddItemResponse {
    pub(crate) outcome: AddOutcome,
    #[serde(flatten)]
    pub(crate) view: CompareView,
}

/// Router builder exposing the compare session endpoints.
pub fn compare_router<R, S>(api: CompareApi<R, S>) -> Router
where
    R: ProductRepository + 'static,
    S: CompareStore + 'static,
{
    Router::new()
        .route(
            "/api/v1/compare/:session_id",
            get(view_handler::<R, S>).delete(clear_handler::<R, S>),
        )
        .route(
            "/api/v1/compare/:session_id/items",
            post(add_handler::<R, S>),
        )
        .route(
            "/api/v1/compare/:session_id/items/:product_id",
            delete(remove_handler::<R, S>),
        )
        .route(
            "/api/v1/compare/:session_id/modal",
            put(modal_handler::<R, S>),
        )
        .route(
            "/api/v1/compare/:session_id/table",
            get(table_handler::<R, S>),
        )
        .with_state(api)
}

/// Run session work on the blocking pool; the store may touch the filesystem.
async fn with_sessions<S, T>(
    sessions: Arc<CompareSessions<S>>,
    work: impl FnOnce(&CompareSessions<S>) -> T + Send + 'static,
) -> Result<T, Response>
where
    S: CompareStore + 'static,
    T: Send + 'static,
{
    tokio::task::spawn_blocking(move || work(&sessions))
        .await
        .map_err(|err| {
            error!(error = %err, "compare session task failed");
            let payload = json!({ "error": "compare session unavailable" });
            (StatusCode::INTERNAL_SERVER_ERROR, Json(payload)).into_response()
        })
}

fn rejection_response(rejection: JsonRejection) -> Response {
    let payload = json!({ "error": rejection.body_text() });
    (rejection.status(), Json(payload)).into_response()
}

pub(crate) async fn view_handler<R, S>(
    State(api): State<CompareApi<R, S>>,
    Path(session_id): Path<String>,
) -> Response
where
    R: ProductRepository + 'static,
    S: CompareStore + 'static,
{
    let session = SessionId(session_id);
    match with_sessions(api.sessions, move |sessions| sessions.view(&session)).await {
        Ok(view) => (StatusCode::OK, Json(view)).into_response(),
        Err(response) => response,
    }
}

pub(crate) async fn add_handler<R, S>(
    State(api): State<CompareApi<R, S>>,
    Path(session_id): Path<String>,
    request: Result<Json<AddItemRequest>, JsonRejection>,
) -> Response
where
    R: ProductRepository + 'static,
    S: CompareStore + 'static,
{
    let Json(request) = match request {
        Ok(request) => request,
        Err(rejection) => return rejection_response(rejection),
    };
    let product = match request {
        AddItemRequest::ById { product_id } => {
            match api.catalog.comparable(&ProductId(product_id)) {
                Ok(product) => product,
                Err(error) => return error_response(error),
            }
        }
        AddItemRequest::Inline(product) => product,
    };

    let session = SessionId(session_id);
    match with_sessions(api.sessions, move |sessions| sessions.add(&session, product)).await {
        Ok((outcome, view)) => {
            (StatusCode::OK, Json(AddItemResponse { outcome, view })).into_response()
        }
        Err(response) => response,
    }
}

pub(crate) async fn remove_handler<R, S>(
    State(api): State<CompareApi<R, S>>,
    Path((session_id, product_id)): Path<(String, String)>,
) -> Response
where
    R: ProductRepository + 'static,
    S: CompareStore + 'static,
{
    let session = SessionId(session_id);
    match with_sessions(api.sessions, move |sessions| {
        sessions.remove(&session, &product_id)
    })
    .await
    {
        Ok(view) => (StatusCode::OK, Json(view)).into_response(),
        Err(response) => response,
    }
}

pub(crate) async fn clear_handler<R, S>(
    State(api): State<CompareApi<R, S>>,
    Path(session_id): Path<String>,
) -> Response
where
    R: ProductRepository + 'static,
    S: CompareStore + 'static,
{
    let session = SessionId(session_id);
    match with_sessions(api.sessions, move |sessions| sessions.clear(&session)).await {
        Ok(view) => (StatusCode::OK, Json(view)).into_response(),
        Err(response) => response,
    }
}

pub(crate) async fn modal_handler<R, S>(
    State(api): State<CompareApi<R, S>>,
    Path(session_id): Path<String>,
    request: Result<Json<ModalRequest>, JsonRejection>,
) -> Response
where
    R: ProductRepository + 'static,
    S: CompareStore + 'static,
{
    let Json(request) = match request {
        Ok(request) => request,
        Err(rejection) => return rejection_response(rejection),
    };

    let session = SessionId(session_id);
    match with_sessions(api.sessions, move |sessions| {
        sessions.set_modal_visible(&session, request.visible)
    })
    .await
    {
        Ok(view) => (StatusCode::OK, Json(view)).into_response(),
        Err(response) => response,
    }
}

pub(crate) async fn table_handler<R, S>(
    State(api): State<CompareApi<R, S>>,
    Path(session_id): Path<String>,
) -> Response
where
    R: ProductRepository + 'static,
    S: CompareStore + 'static,
{
    let session = SessionId(session_id);
    match with_sessions(api.sessions, move |sessions| sessions.table(&session)).await {
        Ok(table) => (StatusCode::OK, Json(table)).into_response(),
        Err(response) => response,
    }
}
