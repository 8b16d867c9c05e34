// shop/src/config.rs

use crate::errors::{AppError, Result}; // Use AppError specific Result
use chrono::Duration;
use dotenvy::dotenv;
use std::env;

#[derive(Debug, Clone)] // Clone is useful if parts of config are passed around
pub struct AppConfig {
  pub server_host: String,
  pub server_port: u16,
  pub database_url: String,
  pub database_max_connections: u32,

  // Session cookie settings
  pub session_cookie_name: String,
  pub session_ttl_hours: i64,
  pub session_cookie_secure: bool,
  // Lifetime of anonymous sessions that only carry a notice across a redirect
  pub flash_ttl_secs: i64,

  // Optional: for seeding the demo catalog on startup
  pub seed_db: bool,
}

impl AppConfig {
  pub fn from_env() -> Result<Self> {
    dotenv().ok(); // Load .env file if present

    let get_env = |var_name: &str| {
      env::var(var_name).map_err(|e| AppError::Config(format!("Missing environment variable '{}': {}", var_name, e)))
    };

    let server_host = get_env("SERVER_HOST").unwrap_or_else(|_| "127.0.0.1".to_string());
    let server_port = get_env("SERVER_PORT")
      .unwrap_or_else(|_| "8080".to_string())
      .parse::<u16>()
      .map_err(|e| AppError::Config(format!("Invalid SERVER_PORT: {}", e)))?;
    let database_url = get_env("DATABASE_URL").unwrap_or_else(|_| "sqlite://shop.db?mode=rwc".to_string());
    let database_max_connections = get_env("DATABASE_MAX_CONNECTIONS")
      .unwrap_or_else(|_| "5".to_string())
      .parse::<u32>()
      .map_err(|e| AppError::Config(format!("Invalid DATABASE_MAX_CONNECTIONS: {}", e)))?;

    let session_cookie_name = get_env("SESSION_COOKIE_NAME").unwrap_or_else(|_| "shop_session".to_string());
    if session_cookie_name.is_empty() {
      return Err(AppError::Config("SESSION_COOKIE_NAME cannot be empty".to_string()));
    }
    let session_ttl_hours = get_env("SESSION_TTL_HOURS")
      .unwrap_or_else(|_| "336".to_string())
      .parse::<i64>()
      .map_err(|e| AppError::Config(format!("Invalid SESSION_TTL_HOURS: {}", e)))?;
    if session_ttl_hours <= 0 {
      return Err(AppError::Config("SESSION_TTL_HOURS must be positive".to_string()));
    }
    let session_cookie_secure = get_env("SESSION_COOKIE_SECURE")
      .unwrap_or_else(|_| "false".to_string())
      .parse::<bool>()
      .map_err(|e| AppError::Config(format!("Invalid SESSION_COOKIE_SECURE value: {}", e)))?;

    let flash_ttl_secs = get_env("FLASH_TTL_SECS")
      .unwrap_or_else(|_| "600".to_string())
      .parse::<i64>()
      .map_err(|e| AppError::Config(format!("Invalid FLASH_TTL_SECS: {}", e)))?;
    if flash_ttl_secs <= 0 {
      return Err(AppError::Config("FLASH_TTL_SECS must be positive".to_string()));
    }

    let seed_db = get_env("SEED_DB")
      .unwrap_or_else(|_| "false".to_string())
      .parse::<bool>()
      .map_err(|e| AppError::Config(format!("Invalid SEED_DB value: {}", e)))?;

    tracing::info!("Application configuration loaded successfully.");

    Ok(Self {
      server_host,
      server_port,
      database_url,
      database_max_connections,
      session_cookie_name,
      session_ttl_hours,
      session_cookie_secure,
      flash_ttl_secs,
      seed_db,
    })
  }

  /// In-memory database, single connection so every query sees the same store.
  pub fn for_tests() -> Self {
    Self {
      server_host: "127.0.0.1".to_string(),
      server_port: 0,
      database_url: "sqlite::memory:".to_string(),
      database_max_connections: 1,
      session_cookie_name: "shop_session".to_string(),
      session_ttl_hours: 1,
      session_cookie_secure: false,
      flash_ttl_secs: 600,
      seed_db: false,
    }
  }

  pub fn session_ttl(&self) -> Duration {
    Duration::hours(self.session_ttl_hours)
  }

  pub fn flash_ttl(&self) -> Duration {
    Duration::seconds(self.flash_ttl_secs)
  }

  pub fn server_address(&self) -> String {
    format!("{}:{}", self.server_host, self.server_port)
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use serial_test::serial;

  const VARS: &[&str] = &[
    "SERVER_HOST",
    "SERVER_PORT",
    "DATABASE_URL",
    "DATABASE_MAX_CONNECTIONS",
    "SESSION_COOKIE_NAME",
    "SESSION_TTL_HOURS",
    "SESSION_COOKIE_SECURE",
    "FLASH_TTL_SECS",
    "SEED_DB",
  ];

  fn clear_env() {
    for var in VARS {
      env::remove_var(var);
    }
  }

  #[test]
  #[serial]
  fn defaults_apply_when_nothing_is_set() {
    clear_env();
    let cfg = AppConfig::from_env().expect("defaults should load");
    assert_eq!(cfg.server_address(), "127.0.0.1:8080");
    assert_eq!(cfg.database_url, "sqlite://shop.db?mode=rwc");
    assert_eq!(cfg.session_cookie_name, "shop_session");
    assert_eq!(cfg.session_ttl(), Duration::hours(336));
    assert_eq!(cfg.flash_ttl(), Duration::minutes(10));
    assert!(!cfg.session_cookie_secure);
    assert!(!cfg.seed_db);
  }

  #[test]
  #[serial]
  fn invalid_port_is_a_config_error() {
    clear_env();
    env::set_var("SERVER_PORT", "not-a-port");
    let result = AppConfig::from_env();
    clear_env();
    assert!(matches!(result, Err(AppError::Config(m)) if m.contains("SERVER_PORT")));
  }

  #[test]
  #[serial]
  fn non_positive_session_ttl_is_rejected() {
    clear_env();
    env::set_var("SESSION_TTL_HOURS", "0");
    let result = AppConfig::from_env();
    clear_env();
    assert!(matches!(result, Err(AppError::Config(_))));
  }

  #[test]
  #[serial]
  fn flash_ttl_must_be_positive() {
    clear_env();
    env::set_var("FLASH_TTL_SECS", "0");
    let result = AppConfig::from_env();
    clear_env();
    assert!(matches!(result, Err(AppError::Config(m)) if m.contains("FLASH_TTL_SECS")));
  }
}
