// src/db/report_repo.rs

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sqlx::PgPool;

use crate::{
    common::error::AppError,
    models::report::{SalesChartEntry, TopProductEntry},
};

#[derive(Clone)]
pub struct ReportRepository {
    pool: PgPool,
}

impl ReportRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn count_products(&self) -> Result<i64, AppError> {
        let count = sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*) FROM products WHERE deleted_at IS NULL",
        )
        .fetch_one(&self.pool)
        .await?;
        Ok(count)
    }

    pub async fn count_low_stock(&self) -> Result<i64, AppError> {
        // Mesmo predicado inclusivo do restante do sistema.
        let count = sqlx::query_scalar::<_, i64>(
            r#"
            SELECT COUNT(*) FROM products
            WHERE deleted_at IS NULL AND is_active AND stock <= min_stock
            "#,
        )
        .fetch_one(&self.pool)
        .await?;
        Ok(count)
    }

    /// Total vendido e número de pedidos COMPLETED na janela [start, end).
    pub async fn sales_between(
        &self,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<(Decimal, i64), AppError> {
        let row = sqlx::query_as::<_, (Option<Decimal>, i64)>(
            r#"
            SELECT SUM(total), COUNT(*)
            FROM orders
            WHERE status = 'COMPLETED' AND created_at >= $1 AND created_at < $2
            "#,
        )
        .bind(start)
        .bind(end)
        .fetch_one(&self.pool)
        .await?;
        Ok((row.0.unwrap_or(Decimal::ZERO), row.1))
    }

    pub async fn sales_chart_since(
        &self,
        start: DateTime<Utc>,
    ) -> Result<Vec<SalesChartEntry>, AppError> {
        let entries = sqlx::query_as::<_, SalesChartEntry>(
            r#"
            SELECT
                created_at::date AS day,
                SUM(total) AS total,
                COUNT(*) AS order_count
            FROM orders
            WHERE status = 'COMPLETED' AND created_at >= $1
            GROUP BY created_at::date
            ORDER BY day ASC
            "#,
        )
        .bind(start)
        .fetch_all(&self.pool)
        .await?;
        Ok(entries)
    }

    pub async fn top_products(&self, limit: i64) -> Result<Vec<TopProductEntry>, AppError> {
        let entries = sqlx::query_as::<_, TopProductEntry>(
            r#"
            SELECT
                p.id AS product_id,
                p.name,
                p.sku,
                SUM(oi.quantity)::bigint AS quantity_sold,
                SUM(oi.subtotal) AS revenue
            FROM order_items oi
            JOIN orders o ON o.id = oi.order_id
            JOIN products p ON p.id = oi.product_id
            WHERE o.status = 'COMPLETED'
            GROUP BY p.id, p.name, p.sku
            ORDER BY quantity_sold DESC
            LIMIT $1
            "#,
        )
        .bind(limit)
        .fetch_all(&self.pool)
        .await?;
        Ok(entries)
    }
}
