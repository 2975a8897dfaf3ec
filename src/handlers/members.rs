// src/handlers/members.rs

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
};
use validator::Validate;

use crate::{
    common::error::AppError,
    config::AppState,
    middleware::auth::AuthenticatedUser,
    models::{
        finance::Transaction,
        member::{MemberMovementPayload, MemberStatement, MemberSummary},
    },
};

#[utoipa::path(
    get,
    path = "/api/members",
    tag = "Members",
    responses((status = 200, body = Vec<MemberSummary>)),
    security(("api_jwt" = []))
)]
pub async fn list_members(
    State(app_state): State<AppState>,
) -> Result<Json<Vec<MemberSummary>>, AppError> {
    let members = app_state.member_service.list_members().await?;
    Ok(Json(members))
}

// O "id" do sócio é o próprio nome gravado na descrição dos lançamentos.
#[utoipa::path(
    get,
    path = "/api/members/{name}",
    tag = "Members",
    params(("name" = String, Path)),
    responses((status = 200, body = MemberStatement), (status = 404)),
    security(("api_jwt" = []))
)]
pub async fn get_statement(
    State(app_state): State<AppState>,
    Path(name): Path<String>,
) -> Result<Json<MemberStatement>, AppError> {
    let statement = app_state.member_service.get_statement(&name).await?;
    Ok(Json(statement))
}

#[utoipa::path(
    post,
    path = "/api/members/deposits",
    tag = "Members",
    request_body = MemberMovementPayload,
    responses((status = 201, body = Transaction)),
    security(("api_jwt" = []))
)]
pub async fn record_deposit(
    State(app_state): State<AppState>,
    AuthenticatedUser(user): AuthenticatedUser,
    Json(payload): Json<MemberMovementPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let transaction = app_state
        .member_service
        .record_deposit(&user, &payload)
        .await?;

    Ok((StatusCode::CREATED, Json(transaction)))
}

#[utoipa::path(
    post,
    path = "/api/members/withdrawals",
    tag = "Members",
    request_body = MemberMovementPayload,
    responses((status = 201, body = Transaction)),
    security(("api_jwt" = []))
)]
pub async fn record_withdrawal(
    State(app_state): State<AppState>,
    AuthenticatedUser(user): AuthenticatedUser,
    Json(payload): Json<MemberMovementPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let transaction = app_state
        .member_service
        .record_withdrawal(&user, &payload)
        .await?;

    Ok((StatusCode::CREATED, Json(transaction)))
}
