pub mod activity;
pub mod auth;
pub mod finance;
pub mod inventory;
pub mod members;
pub mod pos;
pub mod reports;
pub mod suppliers;
