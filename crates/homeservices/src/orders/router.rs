use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::{HeaderMap, StatusCode},
    routing::{get, post},
    Json, Router,
};

use crate::access::Role;
use crate::boundary::ExternalError;

use super::domain::{
    ChatChannel, OrderId, OrderView, PlaceOrder, Principal, ReviewSubmission, TransitionRequest,
};
use super::repository::OrderRepository;
use super::service::OrderService;

pub const USER_ID_HEADER: &str = "x-user-id";
pub const USER_ROLE_HEADER: &str = "x-user-role";

/// Router builder exposing the order use-cases over HTTP.
pub fn order_router<R>(service: Arc<OrderService<R>>) -> Router
where
    R: OrderRepository + 'static,
{
    Router::new()
        .route("/api/v1/orders", post(place_handler::<R>))
        .route("/api/v1/orders/:order_id", get(order_handler::<R>))
        .route(
            "/api/v1/orders/:order_id/transitions",
            post(transition_handler::<R>),
        )
        .route("/api/v1/orders/:order_id/review", post(review_handler::<R>))
        .route("/api/v1/orders/:order_id/chat", get(chat_handler::<R>))
        .with_state(service)
}

/// Principal forwarded by the auth gateway.
pub(crate) fn principal_from(headers: &HeaderMap) -> Result<Principal, ExternalError> {
    let user_id = headers
        .get(USER_ID_HEADER)
        .and_then(|value| value.to_str().ok())
        .map(str::trim)
        .filter(|value| !value.is_empty())
        .ok_or_else(|| ExternalError::unauthorized("missing authenticated user"))?;

    let role = headers
        .get(USER_ROLE_HEADER)
        .and_then(|value| value.to_str().ok())
        .ok_or_else(|| ExternalError::unauthorized("missing user role"))?
        .parse::<Role>()
        .map_err(|err| ExternalError::unauthorized(err.to_string()))?;

    Ok(Principal::new(user_id, role))
}

fn json_body<T>(payload: Result<Json<T>, JsonRejection>) -> Result<T, ExternalError> {
    payload
        .map(|Json(body)| body)
        .map_err(|rejection| ExternalError::invalid_request(rejection.body_text()))
}

pub(crate) async fn place_handler<R>(
    State(service): State<Arc<OrderService<R>>>,
    headers: HeaderMap,
    payload: Result<Json<PlaceOrder>, JsonRejection>,
) -> Result<(StatusCode, Json<OrderView>), ExternalError>
where
    R: OrderRepository + 'static,
{
    let actor = principal_from(&headers)?;
    let request = json_body(payload)?;
    let record = service.place(&actor, request)?;
    Ok((StatusCode::CREATED, Json(service.view(&record))))
}

pub(crate) async fn order_handler<R>(
    State(service): State<Arc<OrderService<R>>>,
    headers: HeaderMap,
    Path(order_id): Path<String>,
) -> Result<Json<OrderView>, ExternalError>
where
    R: OrderRepository + 'static,
{
    let actor = principal_from(&headers)?;
    let record = service.get(&OrderId(order_id), &actor)?;
    Ok(Json(service.view(&record)))
}

pub(crate) async fn transition_handler<R>(
    State(service): State<Arc<OrderService<R>>>,
    headers: HeaderMap,
    Path(order_id): Path<String>,
    payload: Result<Json<TransitionRequest>, JsonRejection>,
) -> Result<Json<OrderView>, ExternalError>
where
    R: OrderRepository + 'static,
{
    let actor = principal_from(&headers)?;
    let TransitionRequest { action } = json_body(payload)?;
    let record = service.transition(&OrderId(order_id), &actor, action)?;
    Ok(Json(service.view(&record)))
}

pub(crate) async fn review_handler<R>(
    State(service): State<Arc<OrderService<R>>>,
    headers: HeaderMap,
    Path(order_id): Path<String>,
    payload: Result<Json<ReviewSubmission>, JsonRejection>,
) -> Result<(StatusCode, Json<OrderView>), ExternalError>
where
    R: OrderRepository + 'static,
{
    let actor = principal_from(&headers)?;
    let submission = json_body(payload)?;
    let record = service.submit_review(&OrderId(order_id), &actor, submission)?;
    Ok((StatusCode::CREATED, Json(service.view(&record))))
}

pub(crate) async fn chat_handler<R>(
    State(service): State<Arc<OrderService<R>>>,
    headers: HeaderMap,
    Path(order_id): Path<String>,
) -> Result<Json<ChatChannel>, ExternalError>
where
    R: OrderRepository + 'static,
{
    let actor = principal_from(&headers)?;
    let channel = service.open_chat(&OrderId(order_id), &actor)?;
    Ok(Json(channel))
}
