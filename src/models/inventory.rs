// src/models/inventory.rs

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::{Validate, ValidationError};

// --- Categorias ---
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Category {
    pub id: Uuid,
    pub name: String,
    pub description: Option<String>,
    #[schema(ignore)]
    pub deleted_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

// --- Produtos ---
// O `stock` é um total corrente derivado: só muda via movimentações de
// estoque, checkout ou cancelamento — nunca por edição direta.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: Uuid,
    pub sku: String,
    pub name: String,
    pub description: Option<String>,
    pub category_id: Option<Uuid>,
    pub supplier_id: Option<Uuid>,

    #[schema(example = "12000.00")]
    pub purchase_price: Decimal,
    #[schema(example = "15000.00")]
    pub selling_price: Decimal,

    pub stock: i32,
    pub min_stock: i32,

    pub is_active: bool,
    #[schema(ignore)]
    pub deleted_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Product {
    /// Predicado único de estoque baixo: `stock <= min_stock` (inclusivo).
    /// Alertas, listagens e o dashboard usam sempre esta comparação.
    pub fn is_low_stock(&self) -> bool {
        self.stock <= self.min_stock
    }
}

// --- Movimentações de Estoque ---

/// Atenção: `Adjustment` sempre INCREMENTA o estoque, igual a `In`.
/// Ajuste negativo só existe via `Out`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[sqlx(type_name = "stock_movement_type", rename_all = "SCREAMING_SNAKE_CASE")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum StockMovementType {
    In,
    Out,
    Adjustment,
}

impl StockMovementType {
    /// Efeito da movimentação sobre o saldo (quantity é sempre positiva).
    pub fn signed_delta(&self, quantity: i32) -> i32 {
        match self {
            StockMovementType::In | StockMovementType::Adjustment => quantity,
            StockMovementType::Out => -quantity,
        }
    }
}

// Trilha de auditoria do estoque: apenas INSERT, nunca UPDATE/DELETE.
// O efeito acumulado destas linhas precisa bater com `Product.stock`.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct StockMovement {
    pub id: Uuid,
    pub product_id: Uuid,
    pub movement_type: StockMovementType,
    pub quantity: i32,
    pub notes: Option<String>,
    pub created_by: Uuid,
    pub created_at: DateTime<Utc>,
}

// --- Payloads ---

fn validate_not_negative(val: &Decimal) -> Result<(), ValidationError> {
    if val.is_sign_negative() {
        let mut err = ValidationError::new("range");
        err.message = Some("O valor não pode ser negativo.".into());
        return Err(err);
    }
    Ok(())
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateProductPayload {
    #[validate(length(min = 1, message = "O SKU é obrigatório."))]
    pub sku: String,

    #[validate(length(min = 1, message = "O nome é obrigatório."))]
    pub name: String,

    pub description: Option<String>,
    pub category_id: Option<Uuid>,
    pub supplier_id: Option<Uuid>,

    #[validate(custom(function = "validate_not_negative"))]
    pub purchase_price: Decimal,
    #[validate(custom(function = "validate_not_negative"))]
    pub selling_price: Decimal,

    #[validate(range(min = 0, message = "O estoque inicial não pode ser negativo."))]
    #[serde(default)]
    pub stock: i32,

    #[validate(range(min = 0, message = "O estoque mínimo não pode ser negativo."))]
    #[serde(default)]
    pub min_stock: i32,
}

// Atualização nunca toca em `stock`; isso é papel das movimentações.
#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateProductPayload {
    #[validate(length(min = 1, message = "O SKU é obrigatório."))]
    pub sku: String,

    #[validate(length(min = 1, message = "O nome é obrigatório."))]
    pub name: String,

    pub description: Option<String>,
    pub category_id: Option<Uuid>,
    pub supplier_id: Option<Uuid>,

    #[validate(custom(function = "validate_not_negative"))]
    pub purchase_price: Decimal,
    #[validate(custom(function = "validate_not_negative"))]
    pub selling_price: Decimal,

    #[validate(range(min = 0, message = "O estoque mínimo não pode ser negativo."))]
    pub min_stock: i32,

    pub is_active: bool,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateCategoryPayload {
    #[validate(length(min = 1, message = "O nome é obrigatório."))]
    pub name: String,
    pub description: Option<String>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RecordMovementPayload {
    pub product_id: Uuid,
    pub movement_type: StockMovementType,

    #[validate(range(min = 1, message = "A quantidade deve ser no mínimo 1."))]
    pub quantity: i32,

    pub notes: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use proptest::prelude::*;

    fn product_with_stock(stock: i32, min_stock: i32) -> Product {
        Product {
            id: Uuid::new_v4(),
            sku: "SKU-1".into(),
            name: "Beras 5kg".into(),
            description: None,
            category_id: None,
            supplier_id: None,
            purchase_price: Decimal::ZERO,
            selling_price: Decimal::ZERO,
            stock,
            min_stock,
            is_active: true,
            deleted_at: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn estoque_baixo_eh_inclusivo() {
        assert!(product_with_stock(5, 5).is_low_stock());
        assert!(product_with_stock(1, 5).is_low_stock());
        assert!(!product_with_stock(6, 5).is_low_stock());
    }

    #[test]
    fn preco_negativo_eh_recusado_no_cadastro() {
        let mut payload = CreateProductPayload {
            sku: "SKU-1".into(),
            name: "Beras 5kg".into(),
            description: None,
            category_id: None,
            supplier_id: None,
            purchase_price: Decimal::from(-1),
            selling_price: Decimal::from(15000),
            stock: 0,
            min_stock: 0,
        };
        assert!(payload.validate().is_err());

        payload.purchase_price = Decimal::from(12000);
        payload.selling_price = Decimal::from(-15000);
        assert!(payload.validate().is_err());

        // Zero é aceito (produto sem preço definido ainda).
        payload.selling_price = Decimal::ZERO;
        assert!(payload.validate().is_ok());
    }

    #[test]
    fn preco_negativo_eh_recusado_na_atualizacao() {
        let payload = UpdateProductPayload {
            sku: "SKU-1".into(),
            name: "Beras 5kg".into(),
            description: None,
            category_id: None,
            supplier_id: None,
            purchase_price: Decimal::from(12000),
            selling_price: Decimal::from(-1),
            min_stock: 0,
            is_active: true,
        };
        assert!(payload.validate().is_err());
    }

    #[test]
    fn sequencia_de_saidas_cruza_o_limiar_de_estoque_baixo() {
        // Estoque 10, mínimo 5: sai 4 → 6 (ainda normal); sai 5 → 1 (baixo).
        let mut product = product_with_stock(10, 5);

        product.stock += StockMovementType::Out.signed_delta(4);
        assert_eq!(product.stock, 6);
        assert!(!product.is_low_stock());

        product.stock += StockMovementType::Out.signed_delta(5);
        assert_eq!(product.stock, 1);
        assert!(product.is_low_stock());
    }

    #[test]
    fn ajuste_incrementa_como_entrada() {
        assert_eq!(StockMovementType::In.signed_delta(4), 4);
        assert_eq!(StockMovementType::Adjustment.signed_delta(4), 4);
        assert_eq!(StockMovementType::Out.signed_delta(4), -4);
    }

    proptest! {
        // Saldo reconstruído a partir do livro-razão:
        // stock == inicial + Σ(IN/ADJUSTMENT) − Σ(OUT), recusando saídas
        // que deixariam o saldo negativo (que é o que o serviço faz).
        #[test]
        fn saldo_igual_soma_das_movimentacoes(
            inicial in 0i32..1000,
            movimentos in prop::collection::vec((0u8..3, 1i32..50), 0..64),
        ) {
            let mut saldo = inicial;
            let mut entradas = 0i64;
            let mut saidas = 0i64;

            for (tipo, qtd) in movimentos {
                let tipo = match tipo {
                    0 => StockMovementType::In,
                    1 => StockMovementType::Adjustment,
                    _ => StockMovementType::Out,
                };
                if tipo == StockMovementType::Out && qtd > saldo {
                    // Saída recusada: nada muda.
                    continue;
                }
                saldo += tipo.signed_delta(qtd);
                match tipo {
                    StockMovementType::Out => saidas += qtd as i64,
                    _ => entradas += qtd as i64,
                }
            }

            prop_assert!(saldo >= 0);
            prop_assert_eq!(saldo as i64, inicial as i64 + entradas - saidas);
        }
    }
}
