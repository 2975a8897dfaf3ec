// src/services/finance_service.rs

use chrono::Utc;
use uuid::Uuid;

use crate::{
    common::error::AppError,
    db::FinanceRepository,
    models::{
        activity::ActivityAction,
        auth::User,
        finance::{
            CashFlowStatus, CreateTransactionPayload, FinancialSummary, SummaryQuery,
            Transaction, TransactionCategory, TransactionType, UpdateTransactionPayload,
        },
    },
    services::activity_service::ActivityService,
};

#[derive(Clone)]
pub struct FinanceService {
    repo: FinanceRepository,
    activity: ActivityService,
}

impl FinanceService {
    pub fn new(repo: FinanceRepository, activity: ActivityService) -> Self {
        Self { repo, activity }
    }

    pub async fn create_transaction(
        &self,
        actor: &User,
        payload: &CreateTransactionPayload,
    ) -> Result<Transaction, AppError> {
        let transaction = self
            .repo
            .insert_transaction(
                self.repo.pool(),
                payload.transaction_type,
                payload.category,
                payload.amount,
                &payload.description,
                payload.supplier_id,
                payload.reference_id,
                actor.id,
            )
            .await?;

        self.activity
            .log(
                actor,
                ActivityAction::Create,
                "finance",
                &format!("Lançou {} de {}", payload.description, payload.amount),
            )
            .await;

        Ok(transaction)
    }

    pub async fn update_transaction(
        &self,
        actor: &User,
        id: Uuid,
        payload: &UpdateTransactionPayload,
    ) -> Result<Transaction, AppError> {
        // Linhas já soft-deletadas não aparecem nem podem ser alteradas.
        let transaction = self
            .repo
            .update_transaction(id, payload)
            .await?
            .ok_or_else(|| AppError::NotFound("Lançamento não encontrado.".into()))?;

        self.activity
            .log(
                actor,
                ActivityAction::Update,
                "finance",
                &format!("Atualizou o lançamento '{}'", transaction.description),
            )
            .await;

        Ok(transaction)
    }

    pub async fn delete_transaction(&self, actor: &User, id: Uuid) -> Result<(), AppError> {
        let transaction = self
            .repo
            .get_transaction(id)
            .await?
            .ok_or_else(|| AppError::NotFound("Lançamento não encontrado.".into()))?;

        let affected = self.repo.soft_delete_transaction(id).await?;
        if affected == 0 {
            return Err(AppError::NotFound("Lançamento não encontrado.".into()));
        }

        self.activity
            .log(
                actor,
                ActivityAction::Delete,
                "finance",
                &format!("Removeu o lançamento '{}'", transaction.description),
            )
            .await;

        Ok(())
    }

    pub async fn list_transactions(
        &self,
        transaction_type: Option<TransactionType>,
        category: Option<TransactionCategory>,
        page: Option<i64>,
        per_page: Option<i64>,
    ) -> Result<Vec<Transaction>, AppError> {
        let per_page = per_page.unwrap_or(20).clamp(1, 100);
        let page = page.unwrap_or(1).max(1);
        self.repo
            .list_transactions(transaction_type, category, per_page, (page - 1) * per_page)
            .await
    }

    /// Resumo de caixa por período (hoje/semana/mês/custom): entradas,
    /// saídas, fluxo líquido e o flag superávit/déficit.
    pub async fn get_summary(&self, query: &SummaryQuery) -> Result<FinancialSummary, AppError> {
        let today = Utc::now().date_naive();
        let (start, end) = query
            .period
            .bounds(today, query.start_date, query.end_date)
            .ok_or_else(|| {
                AppError::BadRequest(
                    "O período 'custom' exige startDate e endDate.".into(),
                )
            })?;

        let total_cash_in = self
            .repo
            .sum_amount_between(TransactionType::CashIn, start, end)
            .await?;
        let total_cash_out = self
            .repo
            .sum_amount_between(TransactionType::CashOut, start, end)
            .await?;
        let net_cash_flow = total_cash_in - total_cash_out;

        Ok(FinancialSummary {
            total_cash_in,
            total_cash_out,
            net_cash_flow,
            status: CashFlowStatus::from_net(net_cash_flow),
            start_date: start,
            end_date: end,
        })
    }
}
