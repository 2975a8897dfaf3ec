// src/services/pos_service.rs

use chrono::{NaiveTime, Utc};
use rust_decimal::Decimal;
use sqlx::PgPool;
use uuid::Uuid;

use crate::{
    common::error::AppError,
    db::{FinanceRepository, InventoryRepository, OrderRepository},
    models::{
        activity::ActivityAction,
        auth::User,
        finance::{TransactionCategory, TransactionType},
        inventory::StockMovementType,
        order::{
            CreateOrderPayload, Order, OrderDetail, OrderStatus, format_order_number,
        },
    },
    services::activity_service::ActivityService,
};

#[derive(Clone)]
pub struct PosService {
    order_repo: OrderRepository,
    inventory_repo: InventoryRepository,
    finance_repo: FinanceRepository,
    activity: ActivityService,
    pool: PgPool,
}

impl PosService {
    pub fn new(
        order_repo: OrderRepository,
        inventory_repo: InventoryRepository,
        finance_repo: FinanceRepository,
        activity: ActivityService,
        pool: PgPool,
    ) -> Self {
        Self { order_repo, inventory_repo, finance_repo, activity, pool }
    }

    // --- CHECKOUT ---
    //
    // Uma única transação cobre: pedido, itens, baixa de estoque,
    // movimentações OUT e o lançamento de caixa da venda. Qualquer falha
    // no meio (produto inexistente, saldo insuficiente) desfaz tudo:
    // nunca fica pedido parcial, baixa parcial ou lançamento órfão.
    pub async fn create_order(
        &self,
        actor: &User,
        payload: &CreateOrderPayload,
    ) -> Result<OrderDetail, AppError> {
        if payload.items.is_empty() {
            return Err(AppError::BadRequest("O carrinho não pode estar vazio.".into()));
        }

        // Os preços vêm do caixa (preço de venda corrente); o total é
        // recalculado aqui e o pagamento é validado ANTES de abrir a
        // transação.
        let totals = payload.compute_totals();
        if totals.change < Decimal::ZERO {
            return Err(AppError::BadRequest(format!(
                "Pagamento insuficiente: total {}, recebido {}.",
                totals.total, payload.payment_amount
            )));
        }

        let mut tx = self.pool.begin().await?;

        // Sequência diária do número do pedido, contada dentro da transação.
        // O índice único em order_number transforma uma corrida perdida em
        // rollback do checkout, nunca em número duplicado.
        let today = Utc::now().date_naive();
        let start = today.and_time(NaiveTime::MIN).and_utc();
        let tomorrow = today
            .succ_opt()
            .ok_or_else(|| anyhow::anyhow!("overflow de data no número do pedido"))?;
        let end = tomorrow.and_time(NaiveTime::MIN).and_utc();
        let sequence = self.order_repo.count_orders_between(&mut *tx, start, end).await? + 1;
        let order_number = format_order_number(today, sequence);

        // Venda de balcão é concluída na hora: nasce COMPLETED, sem estado
        // PENDING intermediário.
        let order = self
            .order_repo
            .insert_order(
                &mut *tx,
                &order_number,
                payload.customer_name.as_deref(),
                totals.subtotal,
                payload.discount,
                payload.tax,
                totals.total,
                &payload.payment_method,
                payload.payment_amount,
                totals.change,
                OrderStatus::Completed,
                actor.id,
            )
            .await?;

        for item in &payload.items {
            let product = self
                .inventory_repo
                .get_product_with(&mut *tx, item.product_id)
                .await?
                .ok_or_else(|| {
                    AppError::NotFound(format!("Produto {} não encontrado.", item.product_id))
                })?;

            let ok = self
                .inventory_repo
                .try_decrement_stock(&mut *tx, product.id, item.quantity)
                .await?;
            if !ok {
                return Err(AppError::BadRequest(format!(
                    "Estoque insuficiente para '{}': disponível {}, solicitado {}.",
                    product.name, product.stock, item.quantity
                )));
            }

            let line_subtotal = item.price * Decimal::from(item.quantity);
            self.order_repo
                .insert_order_item(
                    &mut *tx,
                    order.id,
                    product.id,
                    item.quantity,
                    item.price,
                    line_subtotal,
                )
                .await?;

            self.inventory_repo
                .insert_movement(
                    &mut *tx,
                    product.id,
                    StockMovementType::Out,
                    item.quantity,
                    Some(&format!("Venda {order_number}")),
                    actor.id,
                )
                .await?;
        }

        // A venda entra no livro-caixa único do sistema.
        self.finance_repo
            .insert_transaction(
                &mut *tx,
                TransactionType::CashIn,
                TransactionCategory::Sales,
                totals.total,
                &format!("Venda {order_number}"),
                None,
                Some(order.id),
                actor.id,
            )
            .await?;

        tx.commit().await?;

        self.activity
            .log(
                actor,
                ActivityAction::Create,
                "pos",
                &format!("Registrou a venda {} (total {})", order_number, totals.total),
            )
            .await;

        let items = self.order_repo.get_order_item_details(order.id).await?;
        Ok(OrderDetail { order, items })
    }

    // --- CANCELAMENTO ---
    //
    // Devolve o estoque de cada item exatamente uma vez, com movimentação
    // IN compensatória. O lançamento de caixa da venda NÃO é estornado:
    // o dinheiro já entrou fisicamente no caixa e um eventual acerto é
    // feito como lançamento manual.
    pub async fn cancel_order(
        &self,
        actor: &User,
        id: Uuid,
        reason: Option<&str>,
    ) -> Result<Order, AppError> {
        let mut tx = self.pool.begin().await?;

        let mut order = self
            .order_repo
            .get_order_with(&mut *tx, id)
            .await?
            .ok_or_else(|| AppError::NotFound("Pedido não encontrado.".into()))?;

        if order.status == OrderStatus::Cancelled {
            return Err(AppError::BadRequest("Este pedido já foi cancelado.".into()));
        }

        self.order_repo
            .set_status(&mut *tx, order.id, OrderStatus::Cancelled)
            .await?;

        let notes = match reason {
            Some(reason) => format!("Cancelamento {} ({})", order.order_number, reason),
            None => format!("Cancelamento {}", order.order_number),
        };

        let items = self.order_repo.get_order_items(&mut *tx, order.id).await?;
        for item in &items {
            self.inventory_repo
                .increment_stock(&mut *tx, item.product_id, item.quantity)
                .await?;
            self.inventory_repo
                .insert_movement(
                    &mut *tx,
                    item.product_id,
                    StockMovementType::In,
                    item.quantity,
                    Some(&notes),
                    actor.id,
                )
                .await?;
        }

        tx.commit().await?;

        self.activity
            .log(
                actor,
                ActivityAction::Update,
                "pos",
                &format!("Cancelou a venda {}", order.order_number),
            )
            .await;

        order.status = OrderStatus::Cancelled;
        Ok(order)
    }

    pub async fn get_order_detail(&self, id: Uuid) -> Result<OrderDetail, AppError> {
        let order = self
            .order_repo
            .get_order(id)
            .await?
            .ok_or_else(|| AppError::NotFound("Pedido não encontrado.".into()))?;
        let items = self.order_repo.get_order_item_details(order.id).await?;
        Ok(OrderDetail { order, items })
    }

    pub async fn list_orders(
        &self,
        status: Option<OrderStatus>,
        page: Option<i64>,
        per_page: Option<i64>,
    ) -> Result<Vec<Order>, AppError> {
        let per_page = per_page.unwrap_or(20).clamp(1, 100);
        let page = page.unwrap_or(1).max(1);
        self.order_repo
            .list_orders(status, per_page, (page - 1) * per_page)
            .await
    }
}
