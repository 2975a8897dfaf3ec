// src/services/inventory_service.rs

use sqlx::PgPool;
use uuid::Uuid;

use crate::{
    common::error::AppError,
    db::InventoryRepository,
    models::{
        activity::ActivityAction,
        auth::User,
        inventory::{
            Category, CreateCategoryPayload, CreateProductPayload, Product, RecordMovementPayload,
            StockMovement, StockMovementType, UpdateProductPayload,
        },
    },
    services::activity_service::ActivityService,
};

#[derive(Clone)]
pub struct InventoryService {
    repo: InventoryRepository,
    activity: ActivityService,
    pool: PgPool,
}

impl InventoryService {
    pub fn new(repo: InventoryRepository, activity: ActivityService, pool: PgPool) -> Self {
        Self { repo, activity, pool }
    }

    // --- MOVIMENTAÇÃO DE ESTOQUE ---
    //
    // Inserção no livro-razão + ajuste do saldo em UMA transação: ou os dois
    // entram, ou nenhum. A saída usa baixa condicional, então saldo
    // insuficiente aborta tudo sem nada persistido.
    pub async fn record_movement(
        &self,
        actor: &User,
        payload: &RecordMovementPayload,
    ) -> Result<StockMovement, AppError> {
        let mut tx = self.pool.begin().await?;

        let product = self
            .repo
            .get_product_with(&mut *tx, payload.product_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Produto não encontrado.".into()))?;

        match payload.movement_type {
            StockMovementType::Out => {
                let ok = self
                    .repo
                    .try_decrement_stock(&mut *tx, product.id, payload.quantity)
                    .await?;
                if !ok {
                    return Err(AppError::BadRequest(format!(
                        "Estoque insuficiente para '{}': disponível {}, solicitado {}.",
                        product.name, product.stock, payload.quantity
                    )));
                }
            }
            // ADJUSTMENT incrementa igual a IN (ajuste negativo só via OUT).
            StockMovementType::In | StockMovementType::Adjustment => {
                self.repo
                    .increment_stock(&mut *tx, product.id, payload.quantity)
                    .await?;
            }
        }

        let movement = self
            .repo
            .insert_movement(
                &mut *tx,
                product.id,
                payload.movement_type,
                payload.quantity,
                payload.notes.as_deref(),
                actor.id,
            )
            .await?;

        tx.commit().await?;

        self.activity
            .log(
                actor,
                ActivityAction::Create,
                "inventory",
                &format!(
                    "Movimentação {:?} de {} unidade(s) do produto '{}'",
                    payload.movement_type, payload.quantity, product.name
                ),
            )
            .await;

        Ok(movement)
    }

    pub async fn list_movements(
        &self,
        product_id: Option<Uuid>,
        page: Option<i64>,
        per_page: Option<i64>,
    ) -> Result<Vec<StockMovement>, AppError> {
        let per_page = per_page.unwrap_or(20).clamp(1, 100);
        let page = page.unwrap_or(1).max(1);
        self.repo
            .list_movements(product_id, per_page, (page - 1) * per_page)
            .await
    }

    // --- PRODUTOS ---

    pub async fn create_product(
        &self,
        actor: &User,
        payload: &CreateProductPayload,
    ) -> Result<Product, AppError> {
        let mut tx = self.pool.begin().await?;

        let product = self.repo.create_product(&mut *tx, payload).await?;

        // Estoque inicial entra no livro-razão para o saldo ser sempre
        // reconstruível a partir das movimentações.
        if payload.stock > 0 {
            self.repo
                .insert_movement(
                    &mut *tx,
                    product.id,
                    StockMovementType::In,
                    payload.stock,
                    Some("Estoque inicial"),
                    actor.id,
                )
                .await?;
        }

        tx.commit().await?;

        self.activity
            .log(
                actor,
                ActivityAction::Create,
                "inventory",
                &format!("Cadastrou o produto '{}' (SKU {})", product.name, product.sku),
            )
            .await;

        Ok(product)
    }

    pub async fn update_product(
        &self,
        actor: &User,
        id: Uuid,
        payload: &UpdateProductPayload,
    ) -> Result<Product, AppError> {
        let product = self
            .repo
            .update_product(id, payload)
            .await?
            .ok_or_else(|| AppError::NotFound("Produto não encontrado.".into()))?;

        self.activity
            .log(
                actor,
                ActivityAction::Update,
                "inventory",
                &format!("Atualizou o produto '{}'", product.name),
            )
            .await;

        Ok(product)
    }

    pub async fn delete_product(&self, actor: &User, id: Uuid) -> Result<(), AppError> {
        let product = self
            .repo
            .get_product(id)
            .await?
            .ok_or_else(|| AppError::NotFound("Produto não encontrado.".into()))?;

        let affected = self.repo.soft_delete_product(id).await?;
        if affected == 0 {
            return Err(AppError::NotFound("Produto não encontrado.".into()));
        }

        self.activity
            .log(
                actor,
                ActivityAction::Delete,
                "inventory",
                &format!("Removeu o produto '{}'", product.name),
            )
            .await;

        Ok(())
    }

    pub async fn get_products(&self, search: Option<&str>) -> Result<Vec<Product>, AppError> {
        self.repo.get_products(search).await
    }

    pub async fn get_product(&self, id: Uuid) -> Result<Product, AppError> {
        self.repo
            .get_product(id)
            .await?
            .ok_or_else(|| AppError::NotFound("Produto não encontrado.".into()))
    }

    pub async fn get_low_stock_products(&self) -> Result<Vec<Product>, AppError> {
        self.repo.get_low_stock_products().await
    }

    // --- CATEGORIAS ---

    pub async fn create_category(
        &self,
        actor: &User,
        payload: &CreateCategoryPayload,
    ) -> Result<Category, AppError> {
        let category = self
            .repo
            .create_category(&payload.name, payload.description.as_deref())
            .await?;

        self.activity
            .log(
                actor,
                ActivityAction::Create,
                "inventory",
                &format!("Cadastrou a categoria '{}'", category.name),
            )
            .await;

        Ok(category)
    }

    pub async fn get_categories(&self) -> Result<Vec<Category>, AppError> {
        self.repo.get_categories().await
    }
}
