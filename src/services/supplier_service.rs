// src/services/supplier_service.rs

use uuid::Uuid;

use crate::{
    common::error::AppError,
    db::SupplierRepository,
    models::{
        activity::ActivityAction,
        auth::User,
        supplier::{CreateSupplierPayload, Supplier, UpdateSupplierPayload},
    },
    services::activity_service::ActivityService,
};

#[derive(Clone)]
pub struct SupplierService {
    repo: SupplierRepository,
    activity: ActivityService,
}

impl SupplierService {
    pub fn new(repo: SupplierRepository, activity: ActivityService) -> Self {
        Self { repo, activity }
    }

    pub async fn create_supplier(
        &self,
        actor: &User,
        payload: &CreateSupplierPayload,
    ) -> Result<Supplier, AppError> {
        let supplier = self.repo.create_supplier(payload).await?;

        self.activity
            .log(
                actor,
                ActivityAction::Create,
                "supplier",
                &format!("Cadastrou o fornecedor '{}'", supplier.name),
            )
            .await;

        Ok(supplier)
    }

    pub async fn update_supplier(
        &self,
        actor: &User,
        id: Uuid,
        payload: &UpdateSupplierPayload,
    ) -> Result<Supplier, AppError> {
        let supplier = self
            .repo
            .update_supplier(id, payload)
            .await?
            .ok_or_else(|| AppError::NotFound("Fornecedor não encontrado.".into()))?;

        self.activity
            .log(
                actor,
                ActivityAction::Update,
                "supplier",
                &format!("Atualizou o fornecedor '{}'", supplier.name),
            )
            .await;

        Ok(supplier)
    }

    pub async fn delete_supplier(&self, actor: &User, id: Uuid) -> Result<(), AppError> {
        let supplier = self
            .repo
            .get_supplier(id)
            .await?
            .ok_or_else(|| AppError::NotFound("Fornecedor não encontrado.".into()))?;

        // Trava de exclusão: fornecedor com produtos ativos não sai.
        let owned = self.repo.count_owned_products(id).await?;
        if owned > 0 {
            return Err(AppError::BadRequest(format!(
                "O fornecedor '{}' ainda possui {} produto(s) ativo(s).",
                supplier.name, owned
            )));
        }

        let affected = self.repo.soft_delete_supplier(id).await?;
        if affected == 0 {
            return Err(AppError::NotFound("Fornecedor não encontrado.".into()));
        }

        self.activity
            .log(
                actor,
                ActivityAction::Delete,
                "supplier",
                &format!("Removeu o fornecedor '{}'", supplier.name),
            )
            .await;

        Ok(())
    }

    pub async fn get_suppliers(&self) -> Result<Vec<Supplier>, AppError> {
        self.repo.get_suppliers().await
    }

    pub async fn get_supplier(&self, id: Uuid) -> Result<Supplier, AppError> {
        self.repo
            .get_supplier(id)
            .await?
            .ok_or_else(|| AppError::NotFound("Fornecedor não encontrado.".into()))
    }
}
