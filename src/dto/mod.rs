//! DTO modules that bridge services with whatever renders the pages.

pub mod api;
pub mod home;
pub mod listing;
pub mod product;
pub mod profile;
pub mod search;
