// shop/src/services/mod.rs

//! Storage-facing services used by the HTTP handlers.

pub mod auth_service;
pub mod booking_service;
pub mod catalog_service;
pub mod session_store;
