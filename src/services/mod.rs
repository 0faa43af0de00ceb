pub mod auth;
pub mod errors;
pub mod home;
pub mod listing;
pub mod product;
pub mod profile;
pub mod search;

pub use errors::{ServiceError, ServiceResult};
