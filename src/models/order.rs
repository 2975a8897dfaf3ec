// src/models/order.rs

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::{Validate, ValidationError};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[sqlx(type_name = "order_status", rename_all = "SCREAMING_SNAKE_CASE")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OrderStatus {
    Pending,
    Processing,
    Completed,
    Cancelled,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    pub id: Uuid,
    #[schema(example = "ORD-20260829-0001")]
    pub order_number: String,
    pub customer_name: Option<String>,

    pub subtotal: Decimal,
    pub discount: Decimal,
    pub tax: Decimal,
    pub total: Decimal,

    pub payment_method: String,
    pub payment_amount: Decimal,
    pub change_amount: Decimal,

    pub status: OrderStatus,
    pub created_by: Uuid,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct OrderItem {
    pub id: Uuid,
    pub order_id: Uuid,
    pub product_id: Uuid,
    pub quantity: i32,
    // Preço congelado no momento da venda.
    pub price: Decimal,
    pub subtotal: Decimal,
}

// Item com o nome do produto (resultado de JOIN, para o frontend).
#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct OrderItemDetail {
    pub id: Uuid,
    pub order_id: Uuid,
    pub product_id: Uuid,
    pub product_name: String,
    pub product_sku: String,
    pub quantity: i32,
    pub price: Decimal,
    pub subtotal: Decimal,
}

// Pedido completo devolvido pelo checkout e pela consulta de detalhe.
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct OrderDetail {
    #[serde(flatten)]
    pub order: Order,
    pub items: Vec<OrderItemDetail>,
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
pub struct OrderItemPayload {
    pub product_id: Uuid,

    #[validate(range(min = 1, message = "A quantidade deve ser no mínimo 1."))]
    pub quantity: i32,

    // O caixa envia o preço de venda corrente; o sistema confia nele e não
    // reconsulta o cadastro do produto.
    #[validate(custom(function = "validate_positive"))]
    pub price: Decimal,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateOrderPayload {
    pub customer_name: Option<String>,

    // `nested` propaga a validação para cada item do carrinho.
    #[validate(nested)]
    pub items: Vec<OrderItemPayload>,

    #[validate(length(min = 1, message = "A forma de pagamento é obrigatória."))]
    pub payment_method: String,

    #[validate(custom(function = "validate_positive"))]
    pub payment_amount: Decimal,

    #[validate(custom(function = "validate_not_negative"))]
    #[serde(default)]
    pub discount: Decimal,

    #[validate(custom(function = "validate_not_negative"))]
    #[serde(default)]
    pub tax: Decimal,
}

#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CancelOrderPayload {
    pub reason: Option<String>,
}

// --- Matemática do checkout (pura, testável) ---

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CheckoutTotals {
    pub subtotal: Decimal,
    pub total: Decimal,
    pub change: Decimal,
}

impl CreateOrderPayload {
    /// subtotal = Σ(preço × qtde); total = subtotal − desconto + imposto;
    /// troco = valor pago − total. Troco negativo é recusado antes de
    /// qualquer escrita no banco.
    pub fn compute_totals(&self) -> CheckoutTotals {
        let subtotal: Decimal = self
            .items
            .iter()
            .map(|item| item.price * Decimal::from(item.quantity))
            .sum();
        let total = subtotal - self.discount + self.tax;
        let change = self.payment_amount - total;
        CheckoutTotals { subtotal, total, change }
    }
}

/// Número legível do pedido: `ORD-{aaaa}{mm}{dd}-{sequência diária:04}`.
pub fn format_order_number(date: NaiveDate, daily_sequence: i64) -> String {
    format!("ORD-{}-{:04}", date.format("%Y%m%d"), daily_sequence)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn payload(items: Vec<(i64, i32)>, discount: i64, tax: i64, payment: i64) -> CreateOrderPayload {
        CreateOrderPayload {
            customer_name: None,
            items: items
                .into_iter()
                .map(|(price, quantity)| OrderItemPayload {
                    product_id: Uuid::new_v4(),
                    quantity,
                    price: Decimal::from(price),
                })
                .collect(),
            payment_method: "CASH".into(),
            payment_amount: Decimal::from(payment),
            discount: Decimal::from(discount),
            tax: Decimal::from(tax),
        }
    }

    #[test]
    fn totais_do_carrinho() {
        // Carrinho: 2 × 10000 + 1 × 5000, desconto 1000, pago 30000.
        let totals = payload(vec![(10000, 2), (5000, 1)], 1000, 0, 30000).compute_totals();
        assert_eq!(totals.subtotal, Decimal::from(25000));
        assert_eq!(totals.total, Decimal::from(24000));
        assert_eq!(totals.change, Decimal::from(6000));
    }

    #[test]
    fn pagamento_insuficiente_gera_troco_negativo() {
        let totals = payload(vec![(10000, 2), (5000, 1)], 1000, 0, 20000).compute_totals();
        assert_eq!(totals.total, Decimal::from(24000));
        assert!(totals.change < Decimal::ZERO);
    }

    #[test]
    fn imposto_entra_no_total() {
        let totals = payload(vec![(10000, 1)], 0, 500, 11000).compute_totals();
        assert_eq!(totals.total, Decimal::from(10500));
        assert_eq!(totals.change, Decimal::from(500));
    }

    #[test]
    fn item_com_quantidade_ou_preco_invalido_eh_recusado() {
        // As regras por item precisam valer através do payload do pedido,
        // não só no item isolado.
        let mut p = payload(vec![(10000, 2)], 0, 0, 30000);
        p.items.push(OrderItemPayload {
            product_id: Uuid::new_v4(),
            quantity: -3,
            price: Decimal::from(-500),
        });
        assert!(p.validate().is_err());

        let p = payload(vec![(0, 1)], 0, 0, 1000);
        assert!(p.validate().is_err());

        let p = payload(vec![(10000, 0)], 0, 0, 1000);
        assert!(p.validate().is_err());

        let p = payload(vec![(10000, 1)], 0, 0, 10000);
        assert!(p.validate().is_ok());
    }

    #[test]
    fn formato_do_numero_do_pedido() {
        let date = NaiveDate::from_ymd_opt(2026, 8, 29).unwrap();
        assert_eq!(format_order_number(date, 1), "ORD-20260829-0001");
        assert_eq!(format_order_number(date, 123), "ORD-20260829-0123");
        assert_eq!(format_order_number(date, 10000), "ORD-20260829-10000");
    }
}
