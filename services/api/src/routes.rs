use crate::infra::AppState;
use axum::extract::rejection::JsonRejection;
use axum::extract::Path;
use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::routing::{get, post};
use axum::{Extension, Json};
use homeservices::access::{GuardState, RouteGuardRequest};
use homeservices::boundary::{ErrorCategory, ExternalError};
use homeservices::orders::{order_router, OrderRepository, OrderService};
use homeservices::status::{EntityType, StatusBadge};
use serde_json::json;
use std::sync::Arc;
use tracing::debug;

pub(crate) fn with_marketplace_routes<R>(service: Arc<OrderService<R>>) -> axum::Router
where
    R: OrderRepository + 'static,
{
    order_router(service)
        .route("/health", get(healthcheck))
        .route("/ready", get(readiness_endpoint))
        .route("/metrics", get(metrics_endpoint))
        .route("/api/v1/statuses/:entity", get(status_catalog_endpoint))
        .route("/api/v1/statuses/:entity/:status", get(status_badge_endpoint))
        .route("/api/v1/access/decisions", post(access_decision_endpoint))
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

fn entity_from_path(raw: &str) -> Result<EntityType, ExternalError> {
    EntityType::parse(raw).ok_or_else(|| {
        ExternalError::new(
            ErrorCategory::NotFound,
            format!("unknown entity type '{raw}'"),
        )
    })
}

pub(crate) async fn status_catalog_endpoint(
    Extension(state): Extension<AppState>,
    Path(entity): Path<String>,
) -> Result<Json<Vec<StatusBadge>>, ExternalError> {
    let entity = entity_from_path(&entity)?;
    Ok(Json(state.registry.catalog(entity)))
}

pub(crate) async fn status_badge_endpoint(
    Extension(state): Extension<AppState>,
    Path((entity, status)): Path<(String, String)>,
) -> Result<Json<StatusBadge>, ExternalError> {
    let entity = entity_from_path(&entity)?;
    if !state.registry.is_known(entity, &status) {
        debug!(%entity, %status, "rendering fallback badge for unknown status");
    }
    Ok(Json(state.registry.badge(entity, &status)))
}

pub(crate) async fn access_decision_endpoint(
    Extension(state): Extension<AppState>,
    payload: Result<Json<RouteGuardRequest>, JsonRejection>,
) -> Result<Json<GuardState>, ExternalError> {
    let Json(request) =
        payload.map_err(|rejection| ExternalError::invalid_request(rejection.body_text()))?;
    Ok(Json(state.engine.decide(&request)))
}
