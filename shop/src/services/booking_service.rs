// shop/src/services/booking_service.rs

use crate::errors::{AppError, Result};
use crate::models::{Booking, NewBooking};
use chrono::Utc;
use sqlx::SqlitePool;
use tracing::{info, instrument};

/// Inserts a validated booking. `created_at` is assigned here and never updated.
///
/// Product stock is left untouched. A product deleted since the caller looked
/// it up surfaces as `AppError::NotFound`.
#[instrument(name = "booking_service::create_booking", skip(pool, booking), fields(product_id = booking.product_id))]
pub async fn create_booking(pool: &SqlitePool, booking: &NewBooking) -> Result<Booking> {
  let created: Booking = sqlx::query_as(
    "INSERT INTO bookings (name, email, phone, address, product_id, created_at, feedback) \
     VALUES (?, ?, ?, ?, ?, ?, ?) \
     RETURNING id, name, email, phone, address, product_id, created_at, feedback",
  )
  .bind(&booking.name)
  .bind(&booking.email)
  .bind(&booking.phone)
  .bind(&booking.address)
  .bind(booking.product_id)
  .bind(Utc::now())
  .bind(&booking.feedback)
  .fetch_one(pool)
  .await
  .map_err(|e| {
    if let sqlx::Error::Database(db_err) = &e {
      if db_err.is_foreign_key_violation() {
        return AppError::NotFound(format!("Product {} not found", booking.product_id));
      }
    }
    AppError::Sqlx(e)
  })?;

  info!(booking_id = created.id, "Booking stored.");
  Ok(created)
}

pub async fn list_bookings_for_product(pool: &SqlitePool, product_id: i64) -> Result<Vec<Booking>> {
  let bookings = sqlx::query_as(
    "SELECT id, name, email, phone, address, product_id, created_at, feedback \
     FROM bookings WHERE product_id = ? ORDER BY id ASC",
  )
  .bind(product_id)
  .fetch_all(pool)
  .await?;
  Ok(bookings)
}
