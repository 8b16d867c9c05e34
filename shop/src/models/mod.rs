// shop/src/models/mod.rs

//! Contains data structures representing database entities.

pub mod booking;
pub mod product;
pub mod session;
pub mod user;

// Re-export the model structs for convenient access
pub use booking::{Booking, NewBooking};
pub use product::Product;
pub use session::Session;
pub use user::User;
