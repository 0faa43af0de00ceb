//! Domain aggregates exposed by the storefront service layer.

pub mod auth;
pub mod product;
pub mod sort;
pub mod types;
pub mod user;
