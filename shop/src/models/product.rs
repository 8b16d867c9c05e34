// shop/src/models/product.rs

use serde::Serialize;
use sqlx::FromRow;
use std::fmt;

#[derive(Debug, Clone, Serialize, FromRow)]
pub struct Product {
  pub id: i64,
  pub name: String,
  pub price: f64,
  pub stock: i64, // Not decremented by bookings
  pub image: String, // URL or static path
}

impl fmt::Display for Product {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(&self.name)
  }
}
