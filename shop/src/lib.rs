// shop/src/lib.rs

//! A small shop: product catalog, booking form and session-based accounts,
//! served with actix-web over SQLite.

pub mod config;
pub mod db;
pub mod errors;
pub mod forms;
pub mod models;
pub mod services;
pub mod state;
pub mod web;

use std::sync::Arc;

use crate::config::AppConfig;
use crate::errors::Result;
use crate::state::AppState;

/// Opens the database, makes sure the schema exists, seeds the demo catalog
/// when configured, and drops sessions that expired while the server was down.
pub async fn bootstrap(config: Arc<AppConfig>) -> Result<AppState> {
  let db_pool = db::connect(&config).await?;
  tracing::info!("Successfully connected to the database.");

  db::init_schema(&db_pool).await?;

  if config.seed_db {
    db::seed_products(&db_pool).await?;
  }

  services::session_store::purge_expired(&db_pool, chrono::Utc::now()).await?;

  Ok(AppState::new(db_pool, config))
}
