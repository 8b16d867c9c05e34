// shop/src/web/handlers/mod.rs

pub mod account_handlers;
pub mod booking_handlers;
pub mod product_handlers;
