// src/services/member_service.rs
//
// O "cadastro" de sócios é virtual: tudo vem do livro-caixa. Depósito e
// saque são lançamentos comuns com uma descrição em formato fixo; saldo e
// extrato são reconstruídos na leitura.

use std::collections::BTreeMap;

use rust_decimal::Decimal;

use crate::{
    common::error::AppError,
    db::FinanceRepository,
    models::{
        activity::ActivityAction,
        auth::User,
        finance::{Transaction, TransactionCategory, TransactionType},
        member::{
            DEPOSIT_PREFIX, MemberMovementPayload, MemberStatement, MemberSummary,
            WITHDRAWAL_PREFIX, compute_balance, deposit_description,
            member_name_from_description, withdrawal_description,
        },
    },
    services::activity_service::ActivityService,
};

// A forma de pagamento e a anotação não têm coluna própria no livro-caixa;
// ficam registradas na trilha de auditoria.
fn with_notes(line: String, notes: Option<&str>) -> String {
    match notes.map(str::trim) {
        Some(notes) if !notes.is_empty() => format!("{line} ({notes})"),
        _ => line,
    }
}

#[derive(Clone)]
pub struct MemberService {
    finance_repo: FinanceRepository,
    activity: ActivityService,
}

impl MemberService {
    pub fn new(finance_repo: FinanceRepository, activity: ActivityService) -> Self {
        Self { finance_repo, activity }
    }

    pub async fn record_deposit(
        &self,
        actor: &User,
        payload: &MemberMovementPayload,
    ) -> Result<Transaction, AppError> {
        let description = deposit_description(payload.member_name.trim());
        let transaction = self
            .finance_repo
            .insert_transaction(
                self.finance_repo.pool(),
                TransactionType::CashIn,
                TransactionCategory::MemberDeposit,
                payload.amount,
                &description,
                None,
                None,
                actor.id,
            )
            .await?;

        self.activity
            .log(
                actor,
                ActivityAction::Create,
                "member",
                &with_notes(
                    format!(
                        "Depósito de {} para o sócio '{}' via {}",
                        payload.amount, payload.member_name, payload.payment_method
                    ),
                    payload.notes.as_deref(),
                ),
            )
            .await;

        Ok(transaction)
    }

    // Sem trava de saldo: o sistema registra o saque mesmo que ultrapasse o
    // total depositado (não existe saldo armazenado para conferir).
    pub async fn record_withdrawal(
        &self,
        actor: &User,
        payload: &MemberMovementPayload,
    ) -> Result<Transaction, AppError> {
        let description = withdrawal_description(payload.member_name.trim());
        let transaction = self
            .finance_repo
            .insert_transaction(
                self.finance_repo.pool(),
                TransactionType::CashOut,
                TransactionCategory::MemberWithdrawal,
                payload.amount,
                &description,
                None,
                None,
                actor.id,
            )
            .await?;

        self.activity
            .log(
                actor,
                ActivityAction::Create,
                "member",
                &with_notes(
                    format!(
                        "Saque de {} do sócio '{}' via {}",
                        payload.amount, payload.member_name, payload.payment_method
                    ),
                    payload.notes.as_deref(),
                ),
            )
            .await;

        Ok(transaction)
    }

    /// Extrato de um sócio: casamento exato da descrição de depósito/saque.
    pub async fn get_statement(&self, member_name: &str) -> Result<MemberStatement, AppError> {
        let name = member_name.trim();
        let transactions = self
            .finance_repo
            .get_transactions_by_descriptions(
                &deposit_description(name),
                &withdrawal_description(name),
            )
            .await?;

        if transactions.is_empty() {
            return Err(AppError::NotFound("Sócio não encontrado.".into()));
        }

        let balance = compute_balance(&transactions);
        Ok(MemberStatement { name: name.to_string(), balance, transactions })
    }

    /// Diretório de sócios: varre o livro-caixa e agrupa por nome extraído
    /// da descrição.
    pub async fn list_members(&self) -> Result<Vec<MemberSummary>, AppError> {
        let ledger = self
            .finance_repo
            .get_member_ledger(DEPOSIT_PREFIX, WITHDRAWAL_PREFIX)
            .await?;

        let mut members: BTreeMap<String, MemberSummary> = BTreeMap::new();
        for transaction in &ledger {
            let Some(name) = member_name_from_description(&transaction.description) else {
                continue;
            };

            let entry = members.entry(name.to_string()).or_insert_with(|| MemberSummary {
                name: name.to_string(),
                balance: Decimal::ZERO,
                total_deposits: Decimal::ZERO,
                total_withdrawals: Decimal::ZERO,
                last_activity: transaction.created_at,
            });

            match transaction.transaction_type {
                TransactionType::CashIn => {
                    entry.balance += transaction.amount;
                    entry.total_deposits += transaction.amount;
                }
                TransactionType::CashOut => {
                    entry.balance -= transaction.amount;
                    entry.total_withdrawals += transaction.amount;
                }
                _ => {}
            }

            if transaction.created_at > entry.last_activity {
                entry.last_activity = transaction.created_at;
            }
        }

        Ok(members.into_values().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn anotacao_entra_na_trilha_quando_presente() {
        assert_eq!(
            with_notes("Depósito de 10000 para o sócio 'Budi' via CASH".into(), Some("mensalidade")),
            "Depósito de 10000 para o sócio 'Budi' via CASH (mensalidade)"
        );
        assert_eq!(
            with_notes("Saque de 5000 do sócio 'Budi' via CASH".into(), None),
            "Saque de 5000 do sócio 'Budi' via CASH"
        );
        // Anotação em branco não polui a trilha.
        assert_eq!(with_notes("Depósito de 10000".into(), Some("   ")), "Depósito de 10000");
    }
}
