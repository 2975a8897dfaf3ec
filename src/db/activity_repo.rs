// src/db/activity_repo.rs

use sqlx::PgPool;
use uuid::Uuid;

use crate::{
    common::error::AppError,
    models::{
        activity::{ActivityAction, ActivityLog},
        auth::UserRole,
    },
};

#[derive(Clone)]
pub struct ActivityRepository {
    pool: PgPool,
}

impl ActivityRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    // Sempre fora da transação principal: a auditoria é melhor-esforço.
    pub async fn insert_log(
        &self,
        user_id: Uuid,
        username: &str,
        role: UserRole,
        action: ActivityAction,
        module: &str,
        description: &str,
    ) -> Result<ActivityLog, AppError> {
        let log = sqlx::query_as::<_, ActivityLog>(
            r#"
            INSERT INTO activity_logs (user_id, username, role, action, module, description)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING *
            "#,
        )
        .bind(user_id)
        .bind(username)
        .bind(role)
        .bind(action)
        .bind(module)
        .bind(description)
        .fetch_one(&self.pool)
        .await?;
        Ok(log)
    }

    pub async fn list_logs(
        &self,
        module: Option<&str>,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<ActivityLog>, AppError> {
        let logs = sqlx::query_as::<_, ActivityLog>(
            r#"
            SELECT * FROM activity_logs
            WHERE ($1::text IS NULL OR module = $1)
            ORDER BY created_at DESC
            LIMIT $2 OFFSET $3
            "#,
        )
        .bind(module)
        .bind(limit)
        .bind(offset)
        .fetch_all(&self.pool)
        .await?;
        Ok(logs)
    }
}
