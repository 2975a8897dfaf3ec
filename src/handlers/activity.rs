// src/handlers/activity.rs

use axum::{
    Json,
    extract::{Query, State},
};

use crate::{
    common::error::AppError,
    config::AppState,
    models::activity::{ActivityLog, ActivityQuery},
};

#[utoipa::path(
    get,
    path = "/api/activity-logs",
    tag = "Activity",
    params(ActivityQuery),
    responses((status = 200, body = Vec<ActivityLog>)),
    security(("api_jwt" = []))
)]
pub async fn list_logs(
    State(app_state): State<AppState>,
    Query(query): Query<ActivityQuery>,
) -> Result<Json<Vec<ActivityLog>>, AppError> {
    let logs = app_state
        .activity_service
        .list(query.module.as_deref(), query.page, query.per_page)
        .await?;
    Ok(Json(logs))
}
