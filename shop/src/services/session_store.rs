// shop/src/services/session_store.rs

//! Server-side sessions keyed by an opaque cookie token.
//!
//! A session either identifies a signed-in user or is anonymous and only
//! carries a pending flash notice across a redirect.

use crate::errors::Result;
use crate::models::Session;
use chrono::{DateTime, Duration, Utc};
use sqlx::SqlitePool;
use tracing::{debug, info, instrument};
use uuid::Uuid;

const SESSION_COLUMNS: &str = "id, user_id, flash, created_at, expires_at";

fn new_session_id() -> String {
  Uuid::new_v4().simple().to_string()
}

/// Creates a session that expires `ttl` from now. Sessions that have already
/// expired are purged first, so the table stays bounded while the server runs.
#[instrument(name = "session_store::create_session", skip(pool))]
pub async fn create_session(pool: &SqlitePool, user_id: Option<i64>, ttl: Duration) -> Result<Session> {
  let now = Utc::now();
  purge_expired(pool, now).await?;
  let session: Session = sqlx::query_as(&format!(
    "INSERT INTO sessions (id, user_id, flash, created_at, expires_at) VALUES (?, ?, NULL, ?, ?) RETURNING {}",
    SESSION_COLUMNS
  ))
  .bind(new_session_id())
  .bind(user_id)
  .bind(now)
  .bind(now + ttl)
  .fetch_one(pool)
  .await?;
  debug!(anonymous = user_id.is_none(), "Session created.");
  Ok(session)
}

/// Loads a live session. Unknown and expired ids both yield `None`.
pub async fn load_session(pool: &SqlitePool, session_id: &str, now: DateTime<Utc>) -> Result<Option<Session>> {
  let session: Option<Session> = sqlx::query_as(&format!("SELECT {} FROM sessions WHERE id = ?", SESSION_COLUMNS))
    .bind(session_id)
    .fetch_optional(pool)
    .await?;
  Ok(session.filter(|s| !s.is_expired(now)))
}

/// Binds a fresh session to `user_id`, discarding the previous one so the
/// token seen before login never becomes authenticated.
#[instrument(name = "session_store::login", skip(pool, previous_id))]
pub async fn login(pool: &SqlitePool, previous_id: Option<&str>, user_id: i64, ttl: Duration) -> Result<Session> {
  if let Some(previous_id) = previous_id {
    destroy_session(pool, previous_id).await?;
  }
  let session = create_session(pool, Some(user_id), ttl).await?;
  info!(user_id, "User session established.");
  Ok(session)
}

/// Deletes the session if it exists. Deleting a missing session is not an error.
#[instrument(name = "session_store::destroy_session", skip(pool, session_id))]
pub async fn destroy_session(pool: &SqlitePool, session_id: &str) -> Result<()> {
  let result = sqlx::query("DELETE FROM sessions WHERE id = ?")
    .bind(session_id)
    .execute(pool)
    .await?;
  debug!(removed = result.rows_affected(), "Session destroyed.");
  Ok(())
}

/// Stores a one-time notice on the current session. When there is none, an
/// anonymous session living for `anonymous_ttl` is created to carry it.
/// Returns the id the cookie must carry.
#[instrument(name = "session_store::push_flash", skip(pool, current_id))]
pub async fn push_flash(
  pool: &SqlitePool,
  current_id: Option<&str>,
  message: &str,
  anonymous_ttl: Duration,
) -> Result<String> {
  if let Some(current_id) = current_id {
    if load_session(pool, current_id, Utc::now()).await?.is_some() {
      sqlx::query("UPDATE sessions SET flash = ? WHERE id = ?")
        .bind(message)
        .bind(current_id)
        .execute(pool)
        .await?;
      return Ok(current_id.to_string());
    }
  }

  let session = create_session(pool, None, anonymous_ttl).await?;
  sqlx::query("UPDATE sessions SET flash = ? WHERE id = ?")
    .bind(message)
    .bind(&session.id)
    .execute(pool)
    .await?;
  Ok(session.id)
}

/// Reads and clears the pending notice. A second call returns `None`.
pub async fn take_flash(pool: &SqlitePool, session_id: &str) -> Result<Option<String>> {
  let mut tx = pool.begin().await?;
  let flash: Option<Option<String>> = sqlx::query_scalar("SELECT flash FROM sessions WHERE id = ?")
    .bind(session_id)
    .fetch_optional(&mut *tx)
    .await?;
  let flash = flash.flatten();
  if flash.is_some() {
    sqlx::query("UPDATE sessions SET flash = NULL WHERE id = ?")
      .bind(session_id)
      .execute(&mut *tx)
      .await?;
  }
  tx.commit().await?;
  Ok(flash)
}

/// Removes every session whose expiry has passed. Returns how many were removed.
#[instrument(name = "session_store::purge_expired", skip(pool))]
pub async fn purge_expired(pool: &SqlitePool, now: DateTime<Utc>) -> Result<u64> {
  let result = sqlx::query("DELETE FROM sessions WHERE expires_at <= ?")
    .bind(now)
    .execute(pool)
    .await?;
  if result.rows_affected() > 0 {
    info!(removed = result.rows_affected(), "Purged expired sessions.");
  }
  Ok(result.rows_affected())
}
