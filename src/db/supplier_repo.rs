// src/db/supplier_repo.rs

use sqlx::PgPool;
use uuid::Uuid;

use crate::{
    common::error::AppError,
    models::supplier::{CreateSupplierPayload, Supplier, UpdateSupplierPayload},
};

#[derive(Clone)]
pub struct SupplierRepository {
    pool: PgPool,
}

impl SupplierRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn get_suppliers(&self) -> Result<Vec<Supplier>, AppError> {
        let suppliers = sqlx::query_as::<_, Supplier>(
            "SELECT * FROM suppliers WHERE deleted_at IS NULL ORDER BY name ASC",
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(suppliers)
    }

    pub async fn get_supplier(&self, id: Uuid) -> Result<Option<Supplier>, AppError> {
        let supplier = sqlx::query_as::<_, Supplier>(
            "SELECT * FROM suppliers WHERE id = $1 AND deleted_at IS NULL",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(supplier)
    }

    pub async fn create_supplier(
        &self,
        payload: &CreateSupplierPayload,
    ) -> Result<Supplier, AppError> {
        sqlx::query_as::<_, Supplier>(
            r#"
            INSERT INTO suppliers (name, contact_person, phone, email, address)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING *
            "#,
        )
        .bind(&payload.name)
        .bind(&payload.contact_person)
        .bind(&payload.phone)
        .bind(payload.email.as_deref())
        .bind(payload.address.as_deref())
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            if let sqlx::Error::Database(db_err) = &e {
                if db_err.is_unique_violation() {
                    return AppError::Conflict(format!(
                        "Já existe um fornecedor chamado '{}'.",
                        payload.name
                    ));
                }
            }
            e.into()
        })
    }

    pub async fn update_supplier(
        &self,
        id: Uuid,
        payload: &UpdateSupplierPayload,
    ) -> Result<Option<Supplier>, AppError> {
        sqlx::query_as::<_, Supplier>(
            r#"
            UPDATE suppliers SET
                name = $2, contact_person = $3, phone = $4, email = $5,
                address = $6, is_active = $7, updated_at = now()
            WHERE id = $1 AND deleted_at IS NULL
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(&payload.name)
        .bind(&payload.contact_person)
        .bind(&payload.phone)
        .bind(payload.email.as_deref())
        .bind(payload.address.as_deref())
        .bind(payload.is_active)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            if let sqlx::Error::Database(db_err) = &e {
                if db_err.is_unique_violation() {
                    return AppError::Conflict(format!(
                        "Já existe um fornecedor chamado '{}'.",
                        payload.name
                    ));
                }
            }
            e.into()
        })
    }

    pub async fn soft_delete_supplier(&self, id: Uuid) -> Result<u64, AppError> {
        let result = sqlx::query(
            "UPDATE suppliers SET deleted_at = now() WHERE id = $1 AND deleted_at IS NULL",
        )
        .bind(id)
        .execute(&self.pool)
        .await?;
        Ok(result.rows_affected())
    }

    /// Quantos produtos não deletados ainda apontam para o fornecedor.
    /// Enquanto for > 0 a exclusão é recusada.
    pub async fn count_owned_products(&self, supplier_id: Uuid) -> Result<i64, AppError> {
        let count = sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*) FROM products WHERE supplier_id = $1 AND deleted_at IS NULL",
        )
        .bind(supplier_id)
        .fetch_one(&self.pool)
        .await?;
        Ok(count)
    }
}
