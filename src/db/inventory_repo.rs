// src/db/inventory_repo.rs

use sqlx::{Executor, PgPool, Postgres};
use uuid::Uuid;

use crate::{
    common::error::AppError,
    models::inventory::{
        Category, CreateProductPayload, Product, StockMovement, StockMovementType,
        UpdateProductPayload,
    },
};

#[derive(Clone)]
pub struct InventoryRepository {
    pool: PgPool,
}

impl InventoryRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    // ---
    // Funções de "Leitura" (Getters)
    // ---
    // Leituras simples usam a pool principal; tudo que roda dentro de uma
    // transação recebe o executor genérico.

    pub async fn get_products(&self, search: Option<&str>) -> Result<Vec<Product>, AppError> {
        let products = match search {
            Some(term) => {
                let pattern = format!("%{term}%");
                sqlx::query_as::<_, Product>(
                    r#"
                    SELECT * FROM products
                    WHERE deleted_at IS NULL AND (name ILIKE $1 OR sku ILIKE $1)
                    ORDER BY name ASC
                    "#,
                )
                .bind(pattern)
                .fetch_all(&self.pool)
                .await?
            }
            None => {
                sqlx::query_as::<_, Product>(
                    "SELECT * FROM products WHERE deleted_at IS NULL ORDER BY name ASC",
                )
                .fetch_all(&self.pool)
                .await?
            }
        };
        Ok(products)
    }

    pub async fn get_product(&self, id: Uuid) -> Result<Option<Product>, AppError> {
        let product = sqlx::query_as::<_, Product>(
            "SELECT * FROM products WHERE id = $1 AND deleted_at IS NULL",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(product)
    }

    pub async fn get_product_with<'e, E>(
        &self,
        executor: E,
        id: Uuid,
    ) -> Result<Option<Product>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let product = sqlx::query_as::<_, Product>(
            "SELECT * FROM products WHERE id = $1 AND deleted_at IS NULL",
        )
        .bind(id)
        .fetch_optional(executor)
        .await?;
        Ok(product)
    }

    pub async fn get_low_stock_products(&self) -> Result<Vec<Product>, AppError> {
        // Mesma comparação inclusiva usada em Product::is_low_stock.
        let products = sqlx::query_as::<_, Product>(
            r#"
            SELECT * FROM products
            WHERE deleted_at IS NULL AND is_active AND stock <= min_stock
            ORDER BY name ASC
            "#,
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(products)
    }

    pub async fn get_categories(&self) -> Result<Vec<Category>, AppError> {
        let categories = sqlx::query_as::<_, Category>(
            "SELECT * FROM categories WHERE deleted_at IS NULL ORDER BY name ASC",
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(categories)
    }

    pub async fn list_movements(
        &self,
        product_id: Option<Uuid>,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<StockMovement>, AppError> {
        let movements = match product_id {
            Some(pid) => {
                sqlx::query_as::<_, StockMovement>(
                    r#"
                    SELECT * FROM stock_movements
                    WHERE product_id = $1
                    ORDER BY created_at DESC
                    LIMIT $2 OFFSET $3
                    "#,
                )
                .bind(pid)
                .bind(limit)
                .bind(offset)
                .fetch_all(&self.pool)
                .await?
            }
            None => {
                sqlx::query_as::<_, StockMovement>(
                    "SELECT * FROM stock_movements ORDER BY created_at DESC LIMIT $1 OFFSET $2",
                )
                .bind(limit)
                .bind(offset)
                .fetch_all(&self.pool)
                .await?
            }
        };
        Ok(movements)
    }

    // ---
    // Funções de "Escrita"
    // ---

    pub async fn create_category(
        &self,
        name: &str,
        description: Option<&str>,
    ) -> Result<Category, AppError> {
        let category = sqlx::query_as::<_, Category>(
            r#"
            INSERT INTO categories (name, description)
            VALUES ($1, $2)
            RETURNING *
            "#,
        )
        .bind(name)
        .bind(description)
        .fetch_one(&self.pool)
        .await?;
        Ok(category)
    }

    pub async fn create_product<'e, E>(
        &self,
        executor: E,
        payload: &CreateProductPayload,
    ) -> Result<Product, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        sqlx::query_as::<_, Product>(
            r#"
            INSERT INTO products
                (sku, name, description, category_id, supplier_id,
                 purchase_price, selling_price, stock, min_stock)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            RETURNING *
            "#,
        )
        .bind(&payload.sku)
        .bind(&payload.name)
        .bind(payload.description.as_deref())
        .bind(payload.category_id)
        .bind(payload.supplier_id)
        .bind(payload.purchase_price)
        .bind(payload.selling_price)
        .bind(payload.stock)
        .bind(payload.min_stock)
        .fetch_one(executor)
        .await
        .map_err(|e| {
            if let sqlx::Error::Database(db_err) = &e {
                if db_err.is_unique_violation() {
                    return AppError::Conflict(format!("O SKU '{}' já está em uso.", payload.sku));
                }
            }
            e.into()
        })
    }

    // Nunca altera `stock`: o saldo só muda pelo livro de movimentações.
    pub async fn update_product(
        &self,
        id: Uuid,
        payload: &UpdateProductPayload,
    ) -> Result<Option<Product>, AppError> {
        sqlx::query_as::<_, Product>(
            r#"
            UPDATE products SET
                sku = $2, name = $3, description = $4, category_id = $5,
                supplier_id = $6, purchase_price = $7, selling_price = $8,
                min_stock = $9, is_active = $10, updated_at = now()
            WHERE id = $1 AND deleted_at IS NULL
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(&payload.sku)
        .bind(&payload.name)
        .bind(payload.description.as_deref())
        .bind(payload.category_id)
        .bind(payload.supplier_id)
        .bind(payload.purchase_price)
        .bind(payload.selling_price)
        .bind(payload.min_stock)
        .bind(payload.is_active)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            if let sqlx::Error::Database(db_err) = &e {
                if db_err.is_unique_violation() {
                    return AppError::Conflict(format!("O SKU '{}' já está em uso.", payload.sku));
                }
            }
            e.into()
        })
    }

    pub async fn soft_delete_product(&self, id: Uuid) -> Result<u64, AppError> {
        let result = sqlx::query(
            "UPDATE products SET deleted_at = now() WHERE id = $1 AND deleted_at IS NULL",
        )
        .bind(id)
        .execute(&self.pool)
        .await?;
        Ok(result.rows_affected())
    }

    /// Baixa condicional de estoque: só afeta a linha se houver saldo.
    /// Devolve `false` (zero linhas) quando o saldo é insuficiente — o
    /// chamador decide abortar a transação.
    pub async fn try_decrement_stock<'e, E>(
        &self,
        executor: E,
        product_id: Uuid,
        quantity: i32,
    ) -> Result<bool, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let result = sqlx::query(
            r#"
            UPDATE products
            SET stock = stock - $2, updated_at = now()
            WHERE id = $1 AND deleted_at IS NULL AND stock >= $2
            "#,
        )
        .bind(product_id)
        .bind(quantity)
        .execute(executor)
        .await?;
        Ok(result.rows_affected() == 1)
    }

    pub async fn increment_stock<'e, E>(
        &self,
        executor: E,
        product_id: Uuid,
        quantity: i32,
    ) -> Result<u64, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        // Sem filtro de deleted_at: o estorno de um cancelamento precisa
        // devolver saldo mesmo que o produto tenha sido deletado depois da
        // venda, senão o livro-razão deixa de bater.
        let result = sqlx::query(
            r#"
            UPDATE products
            SET stock = stock + $2, updated_at = now()
            WHERE id = $1
            "#,
        )
        .bind(product_id)
        .bind(quantity)
        .execute(executor)
        .await?;
        Ok(result.rows_affected())
    }

    /// Registra uma movimentação no livro-razão de estoque (auditoria).
    pub async fn insert_movement<'e, E>(
        &self,
        executor: E,
        product_id: Uuid,
        movement_type: StockMovementType,
        quantity: i32,
        notes: Option<&str>,
        created_by: Uuid,
    ) -> Result<StockMovement, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let movement = sqlx::query_as::<_, StockMovement>(
            r#"
            INSERT INTO stock_movements (product_id, movement_type, quantity, notes, created_by)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING *
            "#,
        )
        .bind(product_id)
        .bind(movement_type)
        .bind(quantity)
        .bind(notes)
        .bind(created_by)
        .fetch_one(executor)
        .await?;
        Ok(movement)
    }
}
