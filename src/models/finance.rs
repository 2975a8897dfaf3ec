// src/models/finance.rs

use chrono::{DateTime, Datelike, Days, NaiveDate, NaiveTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;
use validator::{Validate, ValidationError};

// --- Enums (Mapeando o Postgres) ---

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[sqlx(type_name = "transaction_type", rename_all = "SCREAMING_SNAKE_CASE")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TransactionType {
    CashIn,
    CashOut,
    Transfer,
    Adjustment,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[sqlx(type_name = "transaction_category", rename_all = "SCREAMING_SNAKE_CASE")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TransactionCategory {
    Sales,
    Purchase,
    Operational,
    MemberDeposit,
    MemberWithdrawal,
    Other,
}

// --- Livro-caixa ---
// Tabela única de caixa do sistema: vendas do PDV e depósitos/saques de
// sócios entram aqui como efeito colateral, não como saldos separados.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    pub id: Uuid,
    pub transaction_type: TransactionType,
    pub category: TransactionCategory,

    #[schema(example = "150000.00")]
    pub amount: Decimal,
    pub description: String,

    pub supplier_id: Option<Uuid>,
    // Vínculo opcional com a origem (ex.: id do pedido de venda).
    pub reference_id: Option<Uuid>,

    pub created_by: Uuid,
    #[schema(ignore)]
    pub deleted_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

// --- Payloads ---

fn validate_positive(val: &Decimal) -> Result<(), ValidationError> {
    if *val <= Decimal::ZERO {
        let mut err = ValidationError::new("range");
        err.message = Some("O valor deve ser maior que zero.".into());
        return Err(err);
    }
    Ok(())
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateTransactionPayload {
    pub transaction_type: TransactionType,
    pub category: TransactionCategory,

    #[validate(custom(function = "validate_positive"))]
    pub amount: Decimal,

    #[validate(length(min = 1, message = "A descrição é obrigatória."))]
    pub description: String,

    pub supplier_id: Option<Uuid>,
    pub reference_id: Option<Uuid>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateTransactionPayload {
    pub transaction_type: TransactionType,
    pub category: TransactionCategory,

    #[validate(custom(function = "validate_positive"))]
    pub amount: Decimal,

    #[validate(length(min = 1, message = "A descrição é obrigatória."))]
    pub description: String,

    pub supplier_id: Option<Uuid>,
}

// --- Resumo por período ---

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum SummaryPeriod {
    Today,
    Week,
    Month,
    Custom,
}

impl SummaryPeriod {
    /// Janela [início, fim) do período, ancorada em `today`.
    /// `Custom` exige as duas datas (inclusivas) e devolve `None` sem elas.
    pub fn bounds(
        &self,
        today: NaiveDate,
        from: Option<NaiveDate>,
        to: Option<NaiveDate>,
    ) -> Option<(DateTime<Utc>, DateTime<Utc>)> {
        let start_of = |d: NaiveDate| d.and_time(NaiveTime::MIN).and_utc();
        let tomorrow = today.checked_add_days(Days::new(1))?;

        let (start, end) = match self {
            SummaryPeriod::Today => (today, tomorrow),
            SummaryPeriod::Week => (today.checked_sub_days(Days::new(6))?, tomorrow),
            SummaryPeriod::Month => (today.with_day(1)?, tomorrow),
            SummaryPeriod::Custom => {
                let (from, to) = (from?, to?);
                (from, to.checked_add_days(Days::new(1))?)
            }
        };
        Some((start_of(start), start_of(end)))
    }
}

#[derive(Debug, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
pub struct SummaryQuery {
    pub period: SummaryPeriod,
    // Apenas para `period=custom` (datas inclusivas).
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum CashFlowStatus {
    Surplus,
    Deficit,
}

impl CashFlowStatus {
    pub fn from_net(net: Decimal) -> Self {
        if net >= Decimal::ZERO {
            CashFlowStatus::Surplus
        } else {
            CashFlowStatus::Deficit
        }
    }
}

#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct FinancialSummary {
    pub total_cash_in: Decimal,
    pub total_cash_out: Decimal,
    pub net_cash_flow: Decimal,
    pub status: CashFlowStatus,
    pub start_date: DateTime<Utc>,
    pub end_date: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    #[test]
    fn janela_de_hoje_cobre_um_dia() {
        let (start, end) = SummaryPeriod::Today.bounds(d(2026, 8, 29), None, None).unwrap();
        assert_eq!(start.date_naive(), d(2026, 8, 29));
        assert_eq!(end.date_naive(), d(2026, 8, 30));
    }

    #[test]
    fn janela_da_semana_cobre_sete_dias() {
        let (start, end) = SummaryPeriod::Week.bounds(d(2026, 8, 29), None, None).unwrap();
        assert_eq!(start.date_naive(), d(2026, 8, 23));
        assert_eq!(end.date_naive(), d(2026, 8, 30));
    }

    #[test]
    fn janela_do_mes_comeca_no_dia_primeiro() {
        let (start, _) = SummaryPeriod::Month.bounds(d(2026, 8, 29), None, None).unwrap();
        assert_eq!(start.date_naive(), d(2026, 8, 1));
    }

    #[test]
    fn janela_custom_exige_as_duas_datas() {
        assert!(SummaryPeriod::Custom.bounds(d(2026, 8, 29), Some(d(2026, 8, 1)), None).is_none());

        let (start, end) = SummaryPeriod::Custom
            .bounds(d(2026, 8, 29), Some(d(2026, 8, 1)), Some(d(2026, 8, 15)))
            .unwrap();
        assert_eq!(start.date_naive(), d(2026, 8, 1));
        // Fim exclusivo: o dia 15 inteiro entra na janela.
        assert_eq!(end.date_naive(), d(2026, 8, 16));
    }

    #[test]
    fn fluxo_zero_ainda_eh_superavit() {
        assert_eq!(CashFlowStatus::from_net(Decimal::ZERO), CashFlowStatus::Surplus);
        assert_eq!(CashFlowStatus::from_net(Decimal::from(-1)), CashFlowStatus::Deficit);
        assert_eq!(CashFlowStatus::from_net(Decimal::from(1)), CashFlowStatus::Surplus);
    }
}
