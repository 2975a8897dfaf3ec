pub mod activity;
pub mod auth;
pub mod finance;
pub mod inventory;
pub mod member;
pub mod order;
pub mod report;
pub mod supplier;
