// src/docs.rs

use utoipa::OpenApi;
use utoipa::openapi::security::{Http, HttpAuthScheme, SecurityScheme};

use crate::handlers;
use crate::models;

#[derive(OpenApi)]
#[openapi(
    paths(
        // --- Auth ---
        handlers::auth::register,
        handlers::auth::login,
        handlers::auth::logout,
        handlers::auth::get_me,

        // --- Inventory ---
        handlers::inventory::get_products,
        handlers::inventory::get_low_stock_products,
        handlers::inventory::get_product,
        handlers::inventory::create_product,
        handlers::inventory::update_product,
        handlers::inventory::delete_product,
        handlers::inventory::get_categories,
        handlers::inventory::create_category,
        handlers::inventory::list_movements,
        handlers::inventory::record_movement,

        // --- POS ---
        handlers::pos::create_order,
        handlers::pos::list_orders,
        handlers::pos::get_order,
        handlers::pos::cancel_order,

        // --- Finance ---
        handlers::finance::create_transaction,
        handlers::finance::list_transactions,
        handlers::finance::update_transaction,
        handlers::finance::delete_transaction,
        handlers::finance::get_summary,

        // --- Members ---
        handlers::members::list_members,
        handlers::members::get_statement,
        handlers::members::record_deposit,
        handlers::members::record_withdrawal,

        // --- Suppliers ---
        handlers::suppliers::get_suppliers,
        handlers::suppliers::get_supplier,
        handlers::suppliers::create_supplier,
        handlers::suppliers::update_supplier,
        handlers::suppliers::delete_supplier,

        // --- Activity ---
        handlers::activity::list_logs,

        // --- Reports ---
        handlers::reports::get_summary,
        handlers::reports::get_sales_chart,
        handlers::reports::get_top_products,
    ),
    components(
        schemas(
            // --- Auth ---
            models::auth::UserRole,
            models::auth::User,
            models::auth::RegisterUserPayload,
            models::auth::LoginUserPayload,
            models::auth::AuthResponse,

            // --- Inventory ---
            models::inventory::Category,
            models::inventory::Product,
            models::inventory::StockMovementType,
            models::inventory::StockMovement,
            models::inventory::CreateProductPayload,
            models::inventory::UpdateProductPayload,
            models::inventory::CreateCategoryPayload,
            models::inventory::RecordMovementPayload,

            // --- POS ---
            models::order::OrderStatus,
            models::order::Order,
            models::order::OrderItem,
            models::order::OrderItemDetail,
            models::order::OrderDetail,
            models::order::OrderItemPayload,
            models::order::CreateOrderPayload,
            models::order::CancelOrderPayload,

            // --- Finance ---
            models::finance::TransactionType,
            models::finance::TransactionCategory,
            models::finance::Transaction,
            models::finance::CreateTransactionPayload,
            models::finance::UpdateTransactionPayload,
            models::finance::SummaryPeriod,
            models::finance::CashFlowStatus,
            models::finance::FinancialSummary,

            // --- Members ---
            models::member::MemberSummary,
            models::member::MemberStatement,
            models::member::MemberMovementPayload,

            // --- Suppliers ---
            models::supplier::Supplier,
            models::supplier::CreateSupplierPayload,
            models::supplier::UpdateSupplierPayload,

            // --- Activity ---
            models::activity::ActivityAction,
            models::activity::ActivityLog,

            // --- Reports ---
            models::report::DashboardSummary,
            models::report::SalesChartEntry,
            models::report::TopProductEntry,
        )
    ),
    tags(
        (name = "Auth", description = "Autenticação e Operadores"),
        (name = "Inventory", description = "Produtos, Categorias e Movimentações de Estoque"),
        (name = "POS", description = "Caixa: Checkout e Pedidos"),
        (name = "Finance", description = "Lançamentos de Caixa e Resumos"),
        (name = "Members", description = "Depósitos e Saques de Sócios"),
        (name = "Suppliers", description = "Gestão de Fornecedores"),
        (name = "Activity", description = "Trilha de Auditoria"),
        (name = "Reports", description = "Indicadores e Gráficos Gerenciais")
    ),
    modifiers(&SecurityAddon)
)]
pub struct ApiDoc;

struct SecurityAddon;

impl utoipa::Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi.components.get_or_insert_with(Default::default);
        components.add_security_scheme(
            "api_jwt",
            SecurityScheme::Http(
                Http::new(HttpAuthScheme::Bearer)
            ),
        );
    }
}
