// src/handlers/suppliers.rs

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
};
use uuid::Uuid;
use validator::Validate;

use crate::{
    common::error::AppError,
    config::AppState,
    middleware::auth::{AuthenticatedUser, require_admin},
    models::supplier::{CreateSupplierPayload, Supplier, UpdateSupplierPayload},
};

#[utoipa::path(
    get,
    path = "/api/suppliers",
    tag = "Suppliers",
    responses((status = 200, body = Vec<Supplier>)),
    security(("api_jwt" = []))
)]
pub async fn get_suppliers(
    State(app_state): State<AppState>,
) -> Result<Json<Vec<Supplier>>, AppError> {
    let suppliers = app_state.supplier_service.get_suppliers().await?;
    Ok(Json(suppliers))
}

#[utoipa::path(
    get,
    path = "/api/suppliers/{id}",
    tag = "Suppliers",
    params(("id" = Uuid, Path)),
    responses((status = 200, body = Supplier), (status = 404)),
    security(("api_jwt" = []))
)]
pub async fn get_supplier(
    State(app_state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Supplier>, AppError> {
    let supplier = app_state.supplier_service.get_supplier(id).await?;
    Ok(Json(supplier))
}

#[utoipa::path(
    post,
    path = "/api/suppliers",
    tag = "Suppliers",
    request_body = CreateSupplierPayload,
    responses((status = 201, body = Supplier), (status = 409)),
    security(("api_jwt" = []))
)]
pub async fn create_supplier(
    State(app_state): State<AppState>,
    AuthenticatedUser(user): AuthenticatedUser,
    Json(payload): Json<CreateSupplierPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let supplier = app_state
        .supplier_service
        .create_supplier(&user, &payload)
        .await?;

    Ok((StatusCode::CREATED, Json(supplier)))
}

#[utoipa::path(
    put,
    path = "/api/suppliers/{id}",
    tag = "Suppliers",
    params(("id" = Uuid, Path)),
    request_body = UpdateSupplierPayload,
    responses((status = 200, body = Supplier), (status = 404)),
    security(("api_jwt" = []))
)]
pub async fn update_supplier(
    State(app_state): State<AppState>,
    AuthenticatedUser(user): AuthenticatedUser,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateSupplierPayload>,
) -> Result<Json<Supplier>, AppError> {
    payload.validate()?;

    let supplier = app_state
        .supplier_service
        .update_supplier(&user, id, &payload)
        .await?;

    Ok(Json(supplier))
}

#[utoipa::path(
    delete,
    path = "/api/suppliers/{id}",
    tag = "Suppliers",
    params(("id" = Uuid, Path)),
    responses((status = 204), (status = 400), (status = 403), (status = 404)),
    security(("api_jwt" = []))
)]
pub async fn delete_supplier(
    State(app_state): State<AppState>,
    AuthenticatedUser(user): AuthenticatedUser,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    require_admin(&user)?;

    app_state.supplier_service.delete_supplier(&user, id).await?;

    Ok(StatusCode::NO_CONTENT)
}
