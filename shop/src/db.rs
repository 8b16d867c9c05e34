// shop/src/db.rs

//! Database bootstrap: pool creation, schema, and optional demo catalog.

use crate::config::AppConfig;
use crate::errors::Result;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::SqlitePool;
use std::str::FromStr;
use tracing::{debug, info, instrument};

const SCHEMA: &str = r#"
CREATE TABLE IF NOT EXISTS products (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    name TEXT NOT NULL CHECK (length(name) <= 200),
    price REAL NOT NULL,
    stock INTEGER NOT NULL,
    image TEXT NOT NULL CHECK (length(image) <= 3000)
);

CREATE TABLE IF NOT EXISTS bookings (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    name TEXT NOT NULL,
    email TEXT NOT NULL,
    phone TEXT NOT NULL,
    address TEXT NOT NULL,
    product_id INTEGER NOT NULL,
    created_at TEXT NOT NULL,
    feedback TEXT NOT NULL DEFAULT '',
    FOREIGN KEY (product_id) REFERENCES products (id) ON DELETE CASCADE
);

CREATE INDEX IF NOT EXISTS idx_bookings_product_id ON bookings (product_id);

-- Username uniqueness lives here, not in a check-then-insert.
CREATE TABLE IF NOT EXISTS users (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    username TEXT NOT NULL UNIQUE,
    password_hash TEXT NOT NULL,
    created_at TEXT NOT NULL
);

CREATE TABLE IF NOT EXISTS sessions (
    id TEXT PRIMARY KEY,
    user_id INTEGER,
    flash TEXT,
    created_at TEXT NOT NULL,
    expires_at TEXT NOT NULL,
    FOREIGN KEY (user_id) REFERENCES users (id) ON DELETE CASCADE
);

CREATE INDEX IF NOT EXISTS idx_sessions_expires_at ON sessions (expires_at);
"#;

/// Demo catalog inserted by `seed_products`: (name, price, stock, image).
const DEMO_PRODUCTS: &[(&str, f64, i64, &str)] = &[
  ("Canvas Backpack", 49.99, 12, "/static/img/backpack.jpg"),
  ("Steel Water Bottle", 19.5, 40, "/static/img/bottle.jpg"),
  ("Wireless Headphones", 89.0, 7, "/static/img/headphones.jpg"),
  ("Desk Lamp", 34.25, 15, "/static/img/lamp.jpg"),
];

/// Opens the SQLite pool described by the config. Foreign keys are enforced on every connection.
#[instrument(name = "db::connect", skip(config), fields(max_connections = config.database_max_connections))]
pub async fn connect(config: &AppConfig) -> Result<SqlitePool> {
  debug!("Opening database pool.");
  let options = SqliteConnectOptions::from_str(&config.database_url)?
    .create_if_missing(true)
    .foreign_keys(true);

  let mut pool_options = SqlitePoolOptions::new().max_connections(config.database_max_connections);
  if config.database_url.contains(":memory:") {
    // An in-memory database lives exactly as long as its connection.
    pool_options = pool_options.idle_timeout(None).max_lifetime(None);
  }
  let pool = pool_options.connect_with(options).await?;
  Ok(pool)
}

#[instrument(name = "db::init_schema", skip(pool))]
pub async fn init_schema(pool: &SqlitePool) -> Result<()> {
  debug!("Executing CREATE TABLE statements if tables do not exist.");
  sqlx::raw_sql(SCHEMA).execute(pool).await?;
  info!("Database schema is ready.");
  Ok(())
}

/// Inserts the demo catalog when the products table is empty. Returns the number of rows inserted.
#[instrument(name = "db::seed_products", skip(pool))]
pub async fn seed_products(pool: &SqlitePool) -> Result<u64> {
  let existing: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM products").fetch_one(pool).await?;
  if existing > 0 {
    info!(existing, "Catalog already has products, skipping seed.");
    return Ok(0);
  }

  let mut tx = pool.begin().await?;
  for (name, price, stock, image) in DEMO_PRODUCTS {
    sqlx::query("INSERT INTO products (name, price, stock, image) VALUES (?, ?, ?, ?)")
      .bind(name)
      .bind(price)
      .bind(stock)
      .bind(image)
      .execute(&mut *tx)
      .await?;
  }
  tx.commit().await?;

  let inserted = DEMO_PRODUCTS.len() as u64;
  info!(inserted, "Seeded demo catalog.");
  Ok(inserted)
}
