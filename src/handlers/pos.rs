// src/handlers/pos.rs

use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
};
use serde::Deserialize;
use utoipa::IntoParams;
use uuid::Uuid;
use validator::Validate;

use crate::{
    common::error::AppError,
    config::AppState,
    middleware::auth::AuthenticatedUser,
    models::order::{CancelOrderPayload, CreateOrderPayload, Order, OrderDetail, OrderStatus},
};

#[derive(Debug, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
pub struct OrderQuery {
    pub status: Option<OrderStatus>,
    pub page: Option<i64>,
    pub per_page: Option<i64>,
}

/// Checkout do caixa: baixa o estoque, grava o pedido e lança a venda no
/// financeiro, tudo na mesma transação.
#[utoipa::path(
    post,
    path = "/api/orders",
    tag = "POS",
    request_body = CreateOrderPayload,
    responses((status = 201, body = OrderDetail), (status = 400), (status = 404)),
    security(("api_jwt" = []))
)]
pub async fn create_order(
    State(app_state): State<AppState>,
    AuthenticatedUser(user): AuthenticatedUser,
    Json(payload): Json<CreateOrderPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let detail = app_state.pos_service.create_order(&user, &payload).await?;

    Ok((StatusCode::CREATED, Json(detail)))
}

#[utoipa::path(
    get,
    path = "/api/orders",
    tag = "POS",
    params(OrderQuery),
    responses((status = 200, body = Vec<Order>)),
    security(("api_jwt" = []))
)]
pub async fn list_orders(
    State(app_state): State<AppState>,
    Query(query): Query<OrderQuery>,
) -> Result<Json<Vec<Order>>, AppError> {
    let orders = app_state
        .pos_service
        .list_orders(query.status, query.page, query.per_page)
        .await?;
    Ok(Json(orders))
}

#[utoipa::path(
    get,
    path = "/api/orders/{id}",
    tag = "POS",
    params(("id" = Uuid, Path)),
    responses((status = 200, body = OrderDetail), (status = 404)),
    security(("api_jwt" = []))
)]
pub async fn get_order(
    State(app_state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<OrderDetail>, AppError> {
    let detail = app_state.pos_service.get_order_detail(id).await?;
    Ok(Json(detail))
}

#[utoipa::path(
    post,
    path = "/api/orders/{id}/cancel",
    tag = "POS",
    params(("id" = Uuid, Path)),
    request_body = CancelOrderPayload,
    responses((status = 200, body = Order), (status = 400), (status = 404)),
    security(("api_jwt" = []))
)]
pub async fn cancel_order(
    State(app_state): State<AppState>,
    AuthenticatedUser(user): AuthenticatedUser,
    Path(id): Path<Uuid>,
    Json(payload): Json<CancelOrderPayload>,
) -> Result<Json<Order>, AppError> {
    let order = app_state
        .pos_service
        .cancel_order(&user, id, payload.reason.as_deref())
        .await?;
    Ok(Json(order))
}
