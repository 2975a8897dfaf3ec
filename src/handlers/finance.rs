// src/handlers/finance.rs

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
    models::finance::{
        CreateTransactionPayload, FinancialSummary, SummaryQuery, Transaction,
        TransactionCategory, TransactionType, UpdateTransactionPayload,
    },
};

#[derive(Debug, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
pub struct TransactionQuery {
    #[serde(rename = "type")]
    pub transaction_type: Option<TransactionType>,
    pub category: Option<TransactionCategory>,
    pub page: Option<i64>,
    pub per_page: Option<i64>,
}

#[utoipa::path(
    post,
    path = "/api/transactions",
    tag = "Finance",
    request_body = CreateTransactionPayload,
    responses((status = 201, body = Transaction)),
    security(("api_jwt" = []))
)]
pub async fn create_transaction(
    State(app_state): State<AppState>,
    AuthenticatedUser(user): AuthenticatedUser,
    Json(payload): Json<CreateTransactionPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let transaction = app_state
        .finance_service
        .create_transaction(&user, &payload)
        .await?;

    Ok((StatusCode::CREATED, Json(transaction)))
}

#[utoipa::path(
    get,
    path = "/api/transactions",
    tag = "Finance",
    params(TransactionQuery),
    responses((status = 200, body = Vec<Transaction>)),
    security(("api_jwt" = []))
)]
pub async fn list_transactions(
    State(app_state): State<AppState>,
    Query(query): Query<TransactionQuery>,
) -> Result<Json<Vec<Transaction>>, AppError> {
    let transactions = app_state
        .finance_service
        .list_transactions(query.transaction_type, query.category, query.page, query.per_page)
        .await?;
    Ok(Json(transactions))
}

#[utoipa::path(
    put,
    path = "/api/transactions/{id}",
    tag = "Finance",
    params(("id" = Uuid, Path)),
    request_body = UpdateTransactionPayload,
    responses((status = 200, body = Transaction), (status = 404)),
    security(("api_jwt" = []))
)]
pub async fn update_transaction(
    State(app_state): State<AppState>,
    AuthenticatedUser(user): AuthenticatedUser,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateTransactionPayload>,
) -> Result<Json<Transaction>, AppError> {
    payload.validate()?;

    let transaction = app_state
        .finance_service
        .update_transaction(&user, id, &payload)
        .await?;

    Ok(Json(transaction))
}

#[utoipa::path(
    delete,
    path = "/api/transactions/{id}",
    tag = "Finance",
    params(("id" = Uuid, Path)),
    responses((status = 204), (status = 403), (status = 404)),
    security(("api_jwt" = []))
)]
pub async fn delete_transaction(
    State(app_state): State<AppState>,
    AuthenticatedUser(user): AuthenticatedUser,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    require_admin(&user)?;

    app_state.finance_service.delete_transaction(&user, id).await?;

    Ok(StatusCode::NO_CONTENT)
}

#[utoipa::path(
    get,
    path = "/api/transactions/summary",
    tag = "Finance",
    params(SummaryQuery),
    responses((status = 200, body = FinancialSummary), (status = 400)),
    security(("api_jwt" = []))
)]
pub async fn get_summary(
    State(app_state): State<AppState>,
    Query(query): Query<SummaryQuery>,
) -> Result<Json<FinancialSummary>, AppError> {
    let summary = app_state.finance_service.get_summary(&query).await?;
    Ok(Json(summary))
}
