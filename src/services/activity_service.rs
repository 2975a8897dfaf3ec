// src/services/activity_service.rs

use crate::{
    common::error::AppError,
    db::ActivityRepository,
    models::{
        activity::{ActivityAction, ActivityLog},
        auth::User,
    },
};

#[derive(Clone)]
pub struct ActivityService {
    repo: ActivityRepository,
}

impl ActivityService {
    pub fn new(repo: ActivityRepository) -> Self {
        Self { repo }
    }

    /// Grava uma entrada de auditoria. Melhor-esforço: roda sempre DEPOIS
    /// do commit da transação principal, e uma falha aqui não desfaz a
    /// mutação — só gera um warning no log.
    pub async fn log(
        &self,
        actor: &User,
        action: ActivityAction,
        module: &str,
        description: &str,
    ) {
        if let Err(e) = self
            .repo
            .insert_log(actor.id, &actor.username, actor.role, action, module, description)
            .await
        {
            tracing::warn!("Falha ao gravar log de atividade ({}): {}", module, e);
        }
    }

    pub async fn list(
        &self,
        module: Option<&str>,
        page: Option<i64>,
        per_page: Option<i64>,
    ) -> Result<Vec<ActivityLog>, AppError> {
        let per_page = per_page.unwrap_or(20).clamp(1, 100);
        let page = page.unwrap_or(1).max(1);
        self.repo.list_logs(module, per_page, (page - 1) * per_page).await
    }
}
