//src/main.rs

use axum::{
    Router,
    middleware as axum_middleware,
    routing::{get, post, put},
};
use tokio::net::TcpListener;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

mod common;
mod config;
mod db;
mod docs;
mod handlers;
mod middleware;
mod models;
mod services;

use crate::config::AppState;
use crate::middleware::auth::auth_guard;

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt().with_target(false).compact().init();

    // .expect() é bom aqui: se a configuração falhar, a aplicação não deve iniciar.
    let app_state = AppState::new()
        .await
        .expect("Falha ao inicializar o estado da aplicação.");

    // Roda as migrações do SQLx na inicialização
    sqlx::migrate!()
        .run(&app_state.db_pool)
        .await
        .expect("Falha ao rodar as migrações do banco de dados.");

    tracing::info!("✅ Migrações do banco de dados executadas com sucesso!");

    // Rotas de autenticação públicas (só o login; o cadastro de operadores
    // é feito por um ADMIN já logado)
    let auth_routes = Router::new().route("/auth/login", post(handlers::auth::login));

    // Todo o resto exige Bearer token válido
    let protected_routes = Router::new()
        // --- Auth ---
        .route("/auth/register", post(handlers::auth::register))
        .route("/auth/logout", post(handlers::auth::logout))
        .route("/auth/me", get(handlers::auth::get_me))
        // --- Inventory ---
        .route(
            "/products",
            post(handlers::inventory::create_product).get(handlers::inventory::get_products),
        )
        .route(
            "/products/low-stock",
            get(handlers::inventory::get_low_stock_products),
        )
        .route(
            "/products/{id}",
            get(handlers::inventory::get_product)
                .put(handlers::inventory::update_product)
                .delete(handlers::inventory::delete_product),
        )
        .route(
            "/categories",
            post(handlers::inventory::create_category).get(handlers::inventory::get_categories),
        )
        .route(
            "/stock-movements",
            post(handlers::inventory::record_movement).get(handlers::inventory::list_movements),
        )
        // --- POS ---
        .route(
            "/orders",
            post(handlers::pos::create_order).get(handlers::pos::list_orders),
        )
        .route("/orders/{id}", get(handlers::pos::get_order))
        .route("/orders/{id}/cancel", post(handlers::pos::cancel_order))
        // --- Finance ---
        .route(
            "/transactions",
            post(handlers::finance::create_transaction).get(handlers::finance::list_transactions),
        )
        .route("/transactions/summary", get(handlers::finance::get_summary))
        .route(
            "/transactions/{id}",
            put(handlers::finance::update_transaction)
                .delete(handlers::finance::delete_transaction),
        )
        // --- Members ---
        .route("/members", get(handlers::members::list_members))
        .route("/members/deposits", post(handlers::members::record_deposit))
        .route(
            "/members/withdrawals",
            post(handlers::members::record_withdrawal),
        )
        .route("/members/{name}", get(handlers::members::get_statement))
        // --- Suppliers ---
        .route(
            "/suppliers",
            post(handlers::suppliers::create_supplier).get(handlers::suppliers::get_suppliers),
        )
        .route(
            "/suppliers/{id}",
            get(handlers::suppliers::get_supplier)
                .put(handlers::suppliers::update_supplier)
                .delete(handlers::suppliers::delete_supplier),
        )
        // --- Activity ---
        .route("/activity-logs", get(handlers::activity::list_logs))
        // --- Reports ---
        .route("/reports/summary", get(handlers::reports::get_summary))
        .route(
            "/reports/sales-chart",
            get(handlers::reports::get_sales_chart),
        )
        .route(
            "/reports/top-products",
            get(handlers::reports::get_top_products),
        )
        .layer(axum_middleware::from_fn_with_state(
            app_state.clone(),
            auth_guard,
        ));

    // Combina tudo no router principal
    let app = Router::new()
        .route("/api/health", get(|| async { "OK" }))
        .nest("/api", auth_routes.merge(protected_routes))
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", docs::ApiDoc::openapi()))
        .with_state(app_state);

    // Inicia o servidor
    let port = std::env::var("APP_PORT").unwrap_or_else(|_| "3000".to_string());
    let addr = format!("0.0.0.0:{port}");
    let listener = TcpListener::bind(&addr)
        .await
        .expect("Falha ao iniciar o listener TCP");
    tracing::info!("🚀 Servidor escutando em {}", listener.local_addr().unwrap());
    axum::serve(listener, app)
        .await
        .expect("Erro no servidor Axum");
}
