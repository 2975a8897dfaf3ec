// src/handlers/inventory.rs

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
    middleware::auth::{AuthenticatedUser, require_admin},
    models::inventory::{
        Category, CreateCategoryPayload, CreateProductPayload, Product, RecordMovementPayload,
        StockMovement, UpdateProductPayload,
    },
};

#[derive(Debug, Deserialize, IntoParams)]
pub struct ProductQuery {
    /// Busca por nome ou SKU (ILIKE).
    pub search: Option<String>,
}

#[derive(Debug, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
pub struct MovementQuery {
    pub product_id: Option<Uuid>,
    pub page: Option<i64>,
    pub per_page: Option<i64>,
}

// --- PRODUTOS ---

#[utoipa::path(
    get,
    path = "/api/products",
    tag = "Inventory",
    params(ProductQuery),
    responses((status = 200, body = Vec<Product>)),
    security(("api_jwt" = []))
)]
pub async fn get_products(
    State(app_state): State<AppState>,
    Query(query): Query<ProductQuery>,
) -> Result<Json<Vec<Product>>, AppError> {
    let products = app_state
        .inventory_service
        .get_products(query.search.as_deref())
        .await?;
    Ok(Json(products))
}

#[utoipa::path(
    get,
    path = "/api/products/low-stock",
    tag = "Inventory",
    responses((status = 200, body = Vec<Product>)),
    security(("api_jwt" = []))
)]
pub async fn get_low_stock_products(
    State(app_state): State<AppState>,
) -> Result<Json<Vec<Product>>, AppError> {
    let products = app_state.inventory_service.get_low_stock_products().await?;
    Ok(Json(products))
}

#[utoipa::path(
    get,
    path = "/api/products/{id}",
    tag = "Inventory",
    params(("id" = Uuid, Path)),
    responses((status = 200, body = Product), (status = 404)),
    security(("api_jwt" = []))
)]
pub async fn get_product(
    State(app_state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Product>, AppError> {
    let product = app_state.inventory_service.get_product(id).await?;
    Ok(Json(product))
}

#[utoipa::path(
    post,
    path = "/api/products",
    tag = "Inventory",
    request_body = CreateProductPayload,
    responses((status = 201, body = Product), (status = 409)),
    security(("api_jwt" = []))
)]
pub async fn create_product(
    State(app_state): State<AppState>,
    AuthenticatedUser(user): AuthenticatedUser,
    Json(payload): Json<CreateProductPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let product = app_state
        .inventory_service
        .create_product(&user, &payload)
        .await?;

    Ok((StatusCode::CREATED, Json(product)))
}

#[utoipa::path(
    put,
    path = "/api/products/{id}",
    tag = "Inventory",
    params(("id" = Uuid, Path)),
    request_body = UpdateProductPayload,
    responses((status = 200, body = Product), (status = 404)),
    security(("api_jwt" = []))
)]
pub async fn update_product(
    State(app_state): State<AppState>,
    AuthenticatedUser(user): AuthenticatedUser,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateProductPayload>,
) -> Result<Json<Product>, AppError> {
    payload.validate()?;

    let product = app_state
        .inventory_service
        .update_product(&user, id, &payload)
        .await?;

    Ok(Json(product))
}

#[utoipa::path(
    delete,
    path = "/api/products/{id}",
    tag = "Inventory",
    params(("id" = Uuid, Path)),
    responses((status = 204), (status = 403), (status = 404)),
    security(("api_jwt" = []))
)]
pub async fn delete_product(
    State(app_state): State<AppState>,
    AuthenticatedUser(user): AuthenticatedUser,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    require_admin(&user)?;

    app_state.inventory_service.delete_product(&user, id).await?;

    Ok(StatusCode::NO_CONTENT)
}

// --- CATEGORIAS ---

#[utoipa::path(
    get,
    path = "/api/categories",
    tag = "Inventory",
    responses((status = 200, body = Vec<Category>)),
    security(("api_jwt" = []))
)]
pub async fn get_categories(
    State(app_state): State<AppState>,
) -> Result<Json<Vec<Category>>, AppError> {
    let categories = app_state.inventory_service.get_categories().await?;
    Ok(Json(categories))
}

#[utoipa::path(
    post,
    path = "/api/categories",
    tag = "Inventory",
    request_body = CreateCategoryPayload,
    responses((status = 201, body = Category)),
    security(("api_jwt" = []))
)]
pub async fn create_category(
    State(app_state): State<AppState>,
    AuthenticatedUser(user): AuthenticatedUser,
    Json(payload): Json<CreateCategoryPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let category = app_state
        .inventory_service
        .create_category(&user, &payload)
        .await?;

    Ok((StatusCode::CREATED, Json(category)))
}

// --- MOVIMENTAÇÕES DE ESTOQUE ---

#[utoipa::path(
    get,
    path = "/api/stock-movements",
    tag = "Inventory",
    params(MovementQuery),
    responses((status = 200, body = Vec<StockMovement>)),
    security(("api_jwt" = []))
)]
pub async fn list_movements(
    State(app_state): State<AppState>,
    Query(query): Query<MovementQuery>,
) -> Result<Json<Vec<StockMovement>>, AppError> {
    let movements = app_state
        .inventory_service
        .list_movements(query.product_id, query.page, query.per_page)
        .await?;
    Ok(Json(movements))
}

#[utoipa::path(
    post,
    path = "/api/stock-movements",
    tag = "Inventory",
    request_body = RecordMovementPayload,
    responses((status = 201, body = StockMovement), (status = 400), (status = 404)),
    security(("api_jwt" = []))
)]
pub async fn record_movement(
    State(app_state): State<AppState>,
    AuthenticatedUser(user): AuthenticatedUser,
    Json(payload): Json<RecordMovementPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let movement = app_state
        .inventory_service
        .record_movement(&user, &payload)
        .await?;

    Ok((StatusCode::CREATED, Json(movement)))
}
