pub mod activity_service;
pub mod auth;
pub mod finance_service;
pub mod inventory_service;
pub mod member_service;
pub mod pos_service;
pub mod report_service;
pub mod supplier_service;
