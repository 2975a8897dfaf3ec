// src/handlers/reports.rs

use axum::{Json, extract::State};

use crate::{
    common::error::AppError,
    config::AppState,
    models::report::{DashboardSummary, SalesChartEntry, TopProductEntry},
};

#[utoipa::path(
    get,
    path = "/api/reports/summary",
    tag = "Reports",
    responses((status = 200, body = DashboardSummary)),
    security(("api_jwt" = []))
)]
pub async fn get_summary(
    State(app_state): State<AppState>,
) -> Result<Json<DashboardSummary>, AppError> {
    let summary = app_state.report_service.get_summary().await?;
    Ok(Json(summary))
}

#[utoipa::path(
    get,
    path = "/api/reports/sales-chart",
    tag = "Reports",
    responses((status = 200, body = Vec<SalesChartEntry>)),
    security(("api_jwt" = []))
)]
pub async fn get_sales_chart(
    State(app_state): State<AppState>,
) -> Result<Json<Vec<SalesChartEntry>>, AppError> {
    let entries = app_state.report_service.get_sales_chart().await?;
    Ok(Json(entries))
}

#[utoipa::path(
    get,
    path = "/api/reports/top-products",
    tag = "Reports",
    responses((status = 200, body = Vec<TopProductEntry>)),
    security(("api_jwt" = []))
)]
pub async fn get_top_products(
    State(app_state): State<AppState>,
) -> Result<Json<Vec<TopProductEntry>>, AppError> {
    let products = app_state.report_service.get_top_products().await?;
    Ok(Json(products))
}
