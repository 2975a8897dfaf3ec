// src/models/report.rs

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Serialize;
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;

// Indicadores do painel inicial.
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DashboardSummary {
    pub total_products: i64,
    pub low_stock_count: i64,
    pub today_sales_total: Decimal,
    pub today_order_count: i64,
    pub month_cash_in: Decimal,
    pub month_cash_out: Decimal,
    pub month_net_cash_flow: Decimal,
}

#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SalesChartEntry {
    pub day: NaiveDate,
    pub total: Decimal,
    pub order_count: i64,
}

#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TopProductEntry {
    pub product_id: Uuid,
    pub name: String,
    pub sku: String,
    pub quantity_sold: i64,
    pub revenue: Decimal,
}
