//! Shared building blocks for the chat and admin services.

pub mod config;
pub mod errors;
pub mod middleware;
pub mod models;
pub mod response;
pub mod store;
