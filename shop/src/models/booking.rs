// shop/src/models/booking.rs

use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::FromRow;

#[derive(Debug, Clone, Serialize, FromRow)]
pub struct Booking {
  pub id: i64,
  pub name: String,
  pub email: String,
  pub phone: String,
  pub address: String,
  pub product_id: i64,
  pub created_at: DateTime<Utc>, // Set once at insert
  pub feedback: String,
}

/// A booking that passed form validation and is ready to insert.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewBooking {
  pub name: String,
  pub email: String,
  pub phone: String,
  pub address: String,
  pub product_id: i64,
  pub feedback: String,
}
