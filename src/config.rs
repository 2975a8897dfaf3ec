// src/config.rs

use sqlx::{PgPool, postgres::PgPoolOptions};
use std::{env, time::Duration};

use crate::{
    db::{
        ActivityRepository, FinanceRepository, InventoryRepository, OrderRepository,
        ReportRepository, SupplierRepository, UserRepository,
    },
    services::{
        activity_service::ActivityService, auth::AuthService, finance_service::FinanceService,
        inventory_service::InventoryService, member_service::MemberService,
        pos_service::PosService, report_service::ReportService,
        supplier_service::SupplierService,
    },
};

#[derive(Clone)]
pub struct AppState {
    pub db_pool: PgPool,
    pub jwt_secret: String,
    pub auth_service: AuthService,
    pub inventory_service: InventoryService,
    pub pos_service: PosService,
    pub finance_service: FinanceService,
    pub member_service: MemberService,
    pub supplier_service: SupplierService,
    pub activity_service: ActivityService,
    pub report_service: ReportService,
}

impl AppState {
    pub async fn new() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();

        let database_url = env::var("DATABASE_URL").expect("DATABASE_URL deve ser definida");
        let jwt_secret = env::var("JWT_SECRET").expect("JWT_SECRET deve ser definido");

        let db_pool = PgPoolOptions::new()
            .max_connections(5)
            .acquire_timeout(Duration::from_secs(3))
            .connect(&database_url)
            .await?;

        tracing::info!("✅ Conexão com o banco de dados estabelecida com sucesso!");

        // --- Monta o gráfico de dependências ---
        let user_repo = UserRepository::new(db_pool.clone());
        let inventory_repo = InventoryRepository::new(db_pool.clone());
        let order_repo = OrderRepository::new(db_pool.clone());
        let finance_repo = FinanceRepository::new(db_pool.clone());
        let supplier_repo = SupplierRepository::new(db_pool.clone());
        let activity_repo = ActivityRepository::new(db_pool.clone());
        let report_repo = ReportRepository::new(db_pool.clone());

        let activity_service = ActivityService::new(activity_repo);
        let auth_service =
            AuthService::new(user_repo, activity_service.clone(), jwt_secret.clone());
        let inventory_service = InventoryService::new(
            inventory_repo.clone(),
            activity_service.clone(),
            db_pool.clone(),
        );
        let pos_service = PosService::new(
            order_repo,
            inventory_repo,
            finance_repo.clone(),
            activity_service.clone(),
            db_pool.clone(),
        );
        let finance_service = FinanceService::new(finance_repo.clone(), activity_service.clone());
        let member_service = MemberService::new(finance_repo.clone(), activity_service.clone());
        let supplier_service = SupplierService::new(supplier_repo, activity_service.clone());
        let report_service = ReportService::new(report_repo, finance_repo);

        Ok(Self {
            db_pool,
            jwt_secret,
            auth_service,
            inventory_service,
            pos_service,
            finance_service,
            member_service,
            supplier_service,
            activity_service,
            report_service,
        })
    }
}
