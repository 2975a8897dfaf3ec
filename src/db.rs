pub mod activity_repo;
pub mod finance_repo;
pub mod inventory_repo;
pub mod order_repo;
pub mod report_repo;
pub mod supplier_repo;
pub mod user_repo;

pub use activity_repo::ActivityRepository;
pub use finance_repo::FinanceRepository;
pub use inventory_repo::InventoryRepository;
pub use order_repo::OrderRepository;
pub use report_repo::ReportRepository;
pub use supplier_repo::SupplierRepository;
pub use user_repo::UserRepository;
