// src/db/finance_repo.rs

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sqlx::{Executor, PgPool, Postgres};
use uuid::Uuid;

use crate::{
    common::error::AppError,
    models::finance::{Transaction, TransactionCategory, TransactionType, UpdateTransactionPayload},
};

#[derive(Clone)]
pub struct FinanceRepository {
    pool: PgPool,
}

impl FinanceRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    /// Lança uma linha no livro-caixa. Recebe executor para poder rodar
    /// dentro da transação do checkout.
    #[allow(clippy::too_many_arguments)]
    pub async fn insert_transaction<'e, E>(
        &self,
        executor: E,
        transaction_type: TransactionType,
        category: TransactionCategory,
        amount: Decimal,
        description: &str,
        supplier_id: Option<Uuid>,
        reference_id: Option<Uuid>,
        created_by: Uuid,
    ) -> Result<Transaction, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let transaction = sqlx::query_as::<_, Transaction>(
            r#"
            INSERT INTO transactions
                (transaction_type, category, amount, description,
                 supplier_id, reference_id, created_by)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING *
            "#,
        )
        .bind(transaction_type)
        .bind(category)
        .bind(amount)
        .bind(description)
        .bind(supplier_id)
        .bind(reference_id)
        .bind(created_by)
        .fetch_one(executor)
        .await?;
        Ok(transaction)
    }

    pub async fn get_transaction(&self, id: Uuid) -> Result<Option<Transaction>, AppError> {
        let transaction = sqlx::query_as::<_, Transaction>(
            "SELECT * FROM transactions WHERE id = $1 AND deleted_at IS NULL",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(transaction)
    }

    pub async fn list_transactions(
        &self,
        transaction_type: Option<TransactionType>,
        category: Option<TransactionCategory>,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<Transaction>, AppError> {
        let transactions = sqlx::query_as::<_, Transaction>(
            r#"
            SELECT * FROM transactions
            WHERE deleted_at IS NULL
              AND ($1::transaction_type IS NULL OR transaction_type = $1)
              AND ($2::transaction_category IS NULL OR category = $2)
            ORDER BY created_at DESC
            LIMIT $3 OFFSET $4
            "#,
        )
        .bind(transaction_type)
        .bind(category)
        .bind(limit)
        .bind(offset)
        .fetch_all(&self.pool)
        .await?;
        Ok(transactions)
    }

    pub async fn update_transaction(
        &self,
        id: Uuid,
        payload: &UpdateTransactionPayload,
    ) -> Result<Option<Transaction>, AppError> {
        let transaction = sqlx::query_as::<_, Transaction>(
            r#"
            UPDATE transactions SET
                transaction_type = $2, category = $3, amount = $4,
                description = $5, supplier_id = $6
            WHERE id = $1 AND deleted_at IS NULL
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(payload.transaction_type)
        .bind(payload.category)
        .bind(payload.amount)
        .bind(&payload.description)
        .bind(payload.supplier_id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(transaction)
    }

    pub async fn soft_delete_transaction(&self, id: Uuid) -> Result<u64, AppError> {
        let result = sqlx::query(
            "UPDATE transactions SET deleted_at = now() WHERE id = $1 AND deleted_at IS NULL",
        )
        .bind(id)
        .execute(&self.pool)
        .await?;
        Ok(result.rows_affected())
    }

    /// Soma dos lançamentos de um tipo dentro da janela [start, end).
    pub async fn sum_amount_between(
        &self,
        transaction_type: TransactionType,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<Decimal, AppError> {
        let sum = sqlx::query_scalar::<_, Option<Decimal>>(
            r#"
            SELECT SUM(amount) FROM transactions
            WHERE deleted_at IS NULL
              AND transaction_type = $1
              AND created_at >= $2 AND created_at < $3
            "#,
        )
        .bind(transaction_type)
        .bind(start)
        .bind(end)
        .fetch_one(&self.pool)
        .await?;
        Ok(sum.unwrap_or(Decimal::ZERO))
    }

    // ---
    // Consultas do livro de sócios (identidade via descrição)
    // ---

    /// Lançamentos de um sócio específico: casamento exato com as duas
    /// descrições possíveis (depósito e saque).
    pub async fn get_transactions_by_descriptions(
        &self,
        deposit_description: &str,
        withdrawal_description: &str,
    ) -> Result<Vec<Transaction>, AppError> {
        let transactions = sqlx::query_as::<_, Transaction>(
            r#"
            SELECT * FROM transactions
            WHERE deleted_at IS NULL AND description IN ($1, $2)
            ORDER BY created_at DESC
            "#,
        )
        .bind(deposit_description)
        .bind(withdrawal_description)
        .fetch_all(&self.pool)
        .await?;
        Ok(transactions)
    }

    /// Todos os lançamentos de sócios (para montar o diretório).
    pub async fn get_member_ledger(
        &self,
        deposit_prefix: &str,
        withdrawal_prefix: &str,
    ) -> Result<Vec<Transaction>, AppError> {
        let deposit_pattern = format!("{deposit_prefix}%");
        let withdrawal_pattern = format!("{withdrawal_prefix}%");
        let transactions = sqlx::query_as::<_, Transaction>(
            r#"
            SELECT * FROM transactions
            WHERE deleted_at IS NULL
              AND (description LIKE $1 OR description LIKE $2)
            ORDER BY created_at ASC
            "#,
        )
        .bind(deposit_pattern)
        .bind(withdrawal_pattern)
        .fetch_all(&self.pool)
        .await?;
        Ok(transactions)
    }
}
