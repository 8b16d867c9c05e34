// shop/src/models/session.rs

use chrono::{DateTime, Utc};
use sqlx::FromRow;

/// A server-side session row. The `id` is the opaque token stored in the cookie.
#[derive(Debug, Clone, FromRow)]
pub struct Session {
  pub id: String,
  pub user_id: Option<i64>, // None for anonymous sessions carrying only a notice
  pub flash: Option<String>,
  pub created_at: DateTime<Utc>,
  pub expires_at: DateTime<Utc>,
}

impl Session {
  pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
    self.expires_at <= now
  }
}
