// shop/src/services/auth_service.rs

//! Account services: password hashing, user creation and credential checks.

use crate::errors::AppError; // Application-specific error type
use crate::models::User;
use argon2::{
  password_hash::{
    rand_core::OsRng, // For generating random salts
    PasswordHash,
    PasswordHasher,   // The main trait for hashing
    PasswordVerifier, // The main trait for verifying
    SaltString,
  },
  Argon2, // The Argon2 algorithm instance
};
use chrono::Utc;
use sqlx::SqlitePool;
use tracing::{debug, error, info, instrument, warn};

/// Longest username accepted at registration.
pub const MAX_USERNAME_LEN: usize = 150;

/// Hashes a plain-text password using Argon2.
///
/// Returns the PHC-formatted hash string, or `AppError::Validation` when the
/// password is empty.
#[instrument(name = "auth_service::hash_password", skip(password), err(Display))]
pub fn hash_password(password: &str) -> Result<String, AppError> {
  debug!("Attempting to hash password.");
  if password.is_empty() {
    error!("Password hashing failed: Password cannot be empty.");
    return Err(AppError::Validation(
      "Password cannot be empty for hashing.".to_string(),
    ));
  }

  let salt = SaltString::generate(&mut OsRng);
  let argon2_hasher = Argon2::default();

  match argon2_hasher.hash_password(password.as_bytes(), &salt) {
    Ok(password_hash_obj) => {
      debug!("Password hashed successfully.");
      Ok(password_hash_obj.to_string())
    }
    Err(argon_err) => {
      error!(error = %argon_err, "Argon2 password hashing failed.");
      Err(AppError::Internal(format!(
        "Password hashing process failed: {}",
        argon_err
      )))
    }
  }
}

/// Verifies a plain-text password against a stored Argon2 hash.
///
/// `Ok(false)` means the password does not match. An unparsable stored hash
/// is an internal error.
#[instrument(name = "auth_service::verify_password", skip(hashed_password_str, provided_password), err(Display), fields(hash_len = hashed_password_str.len()))]
pub fn verify_password(hashed_password_str: &str, provided_password: &str) -> Result<bool, AppError> {
  debug!("Attempting to verify password.");
  if hashed_password_str.is_empty() {
    error!("Password verification failed: Stored hash string is empty.");
    return Err(AppError::Internal("Invalid stored password format (empty).".to_string()));
  }
  if provided_password.is_empty() {
    debug!("Password verification failed: Provided password is empty.");
    return Ok(false);
  }

  let parsed_hash = PasswordHash::new(hashed_password_str).map_err(|parse_err| {
    error!(error = %parse_err, "Failed to parse stored password hash string.");
    AppError::Internal(format!("Invalid stored password hash format: {}", parse_err))
  })?;

  match Argon2::default().verify_password(provided_password.as_bytes(), &parsed_hash) {
    Ok(()) => {
      debug!("Password verification successful: Passwords match.");
      Ok(true)
    }
    Err(argon2::password_hash::Error::Password) => {
      debug!("Password verification failed: Passwords do not match.");
      Ok(false)
    }
    Err(other_argon_err) => {
      error!(error = %other_argon_err, "Argon2 password verification process encountered an error.");
      Err(AppError::Internal(format!(
        "Password verification process failed: {}",
        other_argon_err
      )))
    }
  }
}

/// Creates a user with a hashed password.
///
/// There is no existence pre-check: the UNIQUE constraint on `users.username`
/// decides, and a violation comes back as `AppError::UsernameTaken`.
#[instrument(name = "auth_service::create_user", skip(pool, password))]
pub async fn create_user(pool: &SqlitePool, username: &str, password: &str) -> Result<User, AppError> {
  if username.trim().is_empty() || password.is_empty() {
    warn!("Registration attempted with blank username or password.");
    return Err(AppError::Validation("Username and password are required".to_string()));
  }
  if username.chars().count() > MAX_USERNAME_LEN {
    warn!("Registration attempted with an overlong username.");
    return Err(AppError::Validation(format!(
      "Username must be at most {} characters",
      MAX_USERNAME_LEN
    )));
  }

  let hashed_password = hash_password(password)?;

  match sqlx::query_as::<_, User>(
    "INSERT INTO users (username, password_hash, created_at) VALUES (?, ?, ?) RETURNING id, username, password_hash, created_at",
  )
  .bind(username)
  .bind(hashed_password)
  .bind(Utc::now())
  .fetch_one(pool)
  .await
  {
    Ok(new_user) => {
      info!(user_id = new_user.id, "User created successfully.");
      Ok(new_user)
    }
    Err(sqlx_error) if AppError::is_unique_violation(&sqlx_error) => {
      warn!("Attempt to register an existing username.");
      Err(AppError::UsernameTaken(username.to_string()))
    }
    Err(sqlx_error) => {
      error!(error = %sqlx_error, "Database error while creating user.");
      Err(AppError::Sqlx(sqlx_error))
    }
  }
}

/// Checks a username/password pair.
///
/// Unknown usernames and wrong passwords both yield `Ok(None)`, so callers
/// cannot tell them apart.
#[instrument(name = "auth_service::authenticate", skip(pool, password))]
pub async fn authenticate(pool: &SqlitePool, username: &str, password: &str) -> Result<Option<User>, AppError> {
  let user = sqlx::query_as::<_, User>(
    "SELECT id, username, password_hash, created_at FROM users WHERE username = ?",
  )
  .bind(username)
  .fetch_optional(pool)
  .await?;

  let Some(user) = user else {
    warn!("User not found during login.");
    return Ok(None);
  };

  if verify_password(&user.password_hash, password)? {
    info!(user_id = user.id, "Credentials verified.");
    Ok(Some(user))
  } else {
    warn!(user_id = user.id, "Password mismatch during login.");
    Ok(None)
  }
}

/// Looks up a user by id, used to resolve the user attached to a session.
pub async fn find_user(pool: &SqlitePool, user_id: i64) -> Result<Option<User>, AppError> {
  let user = sqlx::query_as::<_, User>("SELECT id, username, password_hash, created_at FROM users WHERE id = ?")
    .bind(user_id)
    .fetch_optional(pool)
    .await?;
  Ok(user)
}
