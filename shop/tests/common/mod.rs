// tests/common/mod.rs
#![allow(dead_code, unused_macros)] // Not every test file uses every helper

use actix_web::cookie::Cookie;
use actix_web::dev::ServiceResponse;
use actix_web::http::header::LOCATION;
use once_cell::sync::Lazy;
use shop::config::AppConfig;
use shop::state::AppState;
use sqlx::SqlitePool;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::Level;

pub const COOKIE_NAME: &str = "shop_session";

/// Builds the full route table over `$state`, the same way `main` does.
macro_rules! init_app {
  ($state:expr) => {
    actix_web::test::init_service(
      actix_web::App::new()
        .app_data(actix_web::web::Data::new($state.clone()))
        .configure(shop::web::configure_app_routes),
    )
    .await
  };
}

// --- Helper for Tracing Setup (call once per test run if needed) ---
static TRACING_INIT: Lazy<()> = Lazy::new(|| {
  tracing_subscriber::fmt()
    .with_max_level(Level::DEBUG)
    .with_test_writer() // Important for tests to capture output
    .try_init()
    .ok(); // Allow multiple initializations in tests (ok if fails)
});

pub fn setup_tracing() {
  Lazy::force(&TRACING_INIT);
}

/// Fresh in-memory store with the schema applied and no rows.
pub async fn test_state() -> AppState {
  test_state_with(AppConfig::for_tests()).await
}

pub async fn test_state_with(config: AppConfig) -> AppState {
  setup_tracing();
  shop::bootstrap(Arc::new(config))
    .await
    .expect("bootstrap should succeed")
}

/// On-disk store with several pooled connections, for tests that need
/// statements to really run side by side. Remove the returned file when done.
pub async fn file_backed_state(max_connections: u32) -> (AppState, PathBuf) {
  let path = std::env::temp_dir().join(format!("shop-test-{}.db", uuid::Uuid::new_v4().simple()));
  let config = AppConfig {
    database_url: format!("sqlite://{}?mode=rwc", path.display()),
    database_max_connections: max_connections,
    ..AppConfig::for_tests()
  };
  (test_state_with(config).await, path)
}

pub fn remove_db_file(path: &Path) {
  for suffix in ["", "-wal", "-shm"] {
    let _ = std::fs::remove_file(format!("{}{}", path.display(), suffix));
  }
}

pub async fn insert_product(pool: &SqlitePool, name: &str, price: f64, stock: i64) -> i64 {
  sqlx::query_scalar("INSERT INTO products (name, price, stock, image) VALUES (?, ?, ?, ?) RETURNING id")
    .bind(name)
    .bind(price)
    .bind(stock)
    .bind(format!("/static/img/{}.jpg", name.to_lowercase().replace(' ', "-")))
    .fetch_one(pool)
    .await
    .expect("insert product")
}

pub async fn count_rows(pool: &SqlitePool, table: &str) -> i64 {
  sqlx::query_scalar(&format!("SELECT COUNT(*) FROM {}", table))
    .fetch_one(pool)
    .await
    .expect("count rows")
}

pub fn location<B>(resp: &ServiceResponse<B>) -> Option<String> {
  resp
    .headers()
    .get(LOCATION)
    .and_then(|v| v.to_str().ok())
    .map(String::from)
}

/// Value of the session cookie set by the response, if it set one.
pub fn set_session_cookie<B>(resp: &ServiceResponse<B>) -> Option<Cookie<'static>> {
  resp
    .response()
    .cookies()
    .find(|c| c.name() == COOKIE_NAME)
    .map(|c| c.into_owned())
}

pub fn session_cookie(value: &str) -> Cookie<'static> {
  Cookie::new(COOKIE_NAME, value.to_string())
}

pub async fn body_string<B>(resp: ServiceResponse<B>) -> String
where
  B: actix_web::body::MessageBody,
{
  let bytes = actix_web::test::read_body(resp).await;
  String::from_utf8(bytes.to_vec()).expect("utf-8 body")
}
