// src/models/member.rs
//
// Sócio não tem tabela própria: a identidade é o nome em texto livre
// embutido na descrição do lançamento de caixa. O saldo é sempre
// reconstruído na leitura, nunca armazenado.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::{Validate, ValidationError};

use crate::models::finance::{Transaction, TransactionType};

// Formato legado das descrições no livro-caixa. Mudar esses textos quebra a
// extração de sócios de todo o histórico existente.
pub const DEPOSIT_PREFIX: &str = "Setoran Anggota - ";
pub const WITHDRAWAL_PREFIX: &str = "Penarikan Anggota - ";

pub fn deposit_description(member_name: &str) -> String {
    format!("{DEPOSIT_PREFIX}{member_name}")
}

pub fn withdrawal_description(member_name: &str) -> String {
    format!("{WITHDRAWAL_PREFIX}{member_name}")
}

/// Extrai o nome do sócio de uma descrição de depósito ou saque.
/// Devolve `None` para lançamentos que não seguem o formato.
pub fn member_name_from_description(description: &str) -> Option<&str> {
    description
        .strip_prefix(DEPOSIT_PREFIX)
        .or_else(|| description.strip_prefix(WITHDRAWAL_PREFIX))
        .filter(|name| !name.is_empty())
}

/// Saldo do sócio: Σ depósitos − Σ saques dos lançamentos que casam com o
/// padrão de descrição. Lançamentos soft-deletados já chegam filtrados.
pub fn compute_balance(transactions: &[Transaction]) -> Decimal {
    transactions
        .iter()
        .map(|t| match t.transaction_type {
            TransactionType::CashIn => t.amount,
            TransactionType::CashOut => -t.amount,
            _ => Decimal::ZERO,
        })
        .sum()
}

// --- Tipos de resposta ---

#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct MemberSummary {
    pub name: String,
    pub balance: Decimal,
    pub total_deposits: Decimal,
    pub total_withdrawals: Decimal,
    pub last_activity: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct MemberStatement {
    pub name: String,
    pub balance: Decimal,
    pub transactions: Vec<Transaction>,
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
pub struct MemberMovementPayload {
    #[validate(length(min = 1, message = "O nome do sócio é obrigatório."))]
    pub member_name: String,

    #[validate(custom(function = "validate_positive"))]
    pub amount: Decimal,

    #[validate(length(min = 1, message = "A forma de pagamento é obrigatória."))]
    pub payment_method: String,

    pub notes: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::finance::TransactionCategory;
    use uuid::Uuid;

    fn tx(transaction_type: TransactionType, amount: i64, description: &str) -> Transaction {
        Transaction {
            id: Uuid::new_v4(),
            transaction_type,
            category: match transaction_type {
                TransactionType::CashIn => TransactionCategory::MemberDeposit,
                _ => TransactionCategory::MemberWithdrawal,
            },
            amount: Decimal::from(amount),
            description: description.to_string(),
            supplier_id: None,
            reference_id: None,
            created_by: Uuid::new_v4(),
            deleted_at: None,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn descricao_ida_e_volta() {
        let desc = deposit_description("Budi Santoso");
        assert_eq!(desc, "Setoran Anggota - Budi Santoso");
        assert_eq!(member_name_from_description(&desc), Some("Budi Santoso"));

        let desc = withdrawal_description("Budi Santoso");
        assert_eq!(member_name_from_description(&desc), Some("Budi Santoso"));
    }

    #[test]
    fn descricao_fora_do_formato_nao_extrai_socio() {
        assert_eq!(member_name_from_description("Venda ORD-20260829-0001"), None);
        assert_eq!(member_name_from_description("Setoran Anggota - "), None);
    }

    #[test]
    fn nome_contendo_o_delimitador_sobrevive() {
        // " - " dentro do nome não quebra a extração: só o prefixo é removido.
        let desc = deposit_description("Toko A - Filial B");
        assert_eq!(member_name_from_description(&desc), Some("Toko A - Filial B"));
    }

    #[test]
    fn saldo_soma_depositos_e_subtrai_saques() {
        let txs = vec![
            tx(TransactionType::CashIn, 100_000, "Setoran Anggota - Budi"),
            tx(TransactionType::CashIn, 50_000, "Setoran Anggota - Budi"),
            tx(TransactionType::CashOut, 30_000, "Penarikan Anggota - Budi"),
        ];
        assert_eq!(compute_balance(&txs), Decimal::from(120_000));
    }

    #[test]
    fn saque_maior_que_o_saldo_gera_saldo_negativo() {
        // Não existe trava de saldo: o livro apenas registra.
        let txs = vec![
            tx(TransactionType::CashIn, 10_000, "Setoran Anggota - Budi"),
            tx(TransactionType::CashOut, 25_000, "Penarikan Anggota - Budi"),
        ];
        assert_eq!(compute_balance(&txs), Decimal::from(-15_000));
    }
}
