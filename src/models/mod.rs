//! Plain data models shared by the binary entry points.

pub mod config;
