// shop/src/web/session.rs

//! Request-scoped session context and the cookies that carry it.

use actix_web::cookie::{time::Duration as CookieDuration, Cookie, SameSite};
use actix_web::dev::Payload;
use actix_web::{web, FromRequest, HttpRequest};
use chrono::Utc;
use futures_util::future::{FutureExt, LocalBoxFuture};
use sqlx::SqlitePool;
use tracing::{debug, warn};

use crate::config::AppConfig;
use crate::errors::{AppError, Result};
use crate::services::{auth_service, session_store};
use crate::state::AppState;

/// The signed-in user attached to a live session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionUser {
  pub id: i64,
  pub username: String,
}

/// What the request's session cookie resolves to.
///
/// Handlers receive this explicitly and hand any session change back through
/// the response cookies; nothing about the session lives in global state.
#[derive(Debug, Clone, Default)]
pub struct CurrentSession {
  /// Raw cookie value, even when it names no live session.
  pub cookie_token: Option<String>,
  /// Id of the live session, if the cookie named one.
  pub session_id: Option<String>,
  pub user: Option<SessionUser>,
}

impl CurrentSession {
  pub fn is_authenticated(&self) -> bool {
    self.user.is_some()
  }

  /// Consumes the pending notice, if any.
  pub async fn take_flash(&self, pool: &SqlitePool) -> Result<Option<String>> {
    match &self.session_id {
      Some(id) => session_store::take_flash(pool, id).await,
      None => Ok(None),
    }
  }

  async fn resolve(state: web::Data<AppState>, cookie_token: Option<String>) -> Result<Self> {
    let Some(token) = cookie_token else {
      return Ok(Self::default());
    };

    let Some(session) = session_store::load_session(&state.db_pool, &token, Utc::now()).await? else {
      debug!("Session cookie names no live session.");
      return Ok(Self {
        cookie_token: Some(token),
        ..Self::default()
      });
    };

    let user = match session.user_id {
      Some(user_id) => auth_service::find_user(&state.db_pool, user_id)
        .await?
        .map(|u| SessionUser {
          id: u.id,
          username: u.username,
        }),
      None => None,
    };

    Ok(Self {
      cookie_token: Some(token),
      session_id: Some(session.id),
      user,
    })
  }
}

impl FromRequest for CurrentSession {
  type Error = AppError;
  type Future = LocalBoxFuture<'static, Result<Self, Self::Error>>;

  fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
    let Some(state) = req.app_data::<web::Data<AppState>>().cloned() else {
      warn!("CurrentSession extractor: AppState is not registered.");
      return async { Err(AppError::Internal("Application state is not configured.".to_string())) }.boxed_local();
    };
    let cookie_token = req
      .cookie(&state.config.session_cookie_name)
      .map(|c| c.value().to_string())
      .filter(|v| !v.is_empty());

    Self::resolve(state, cookie_token).boxed_local()
  }
}

/// Cookie carrying `session_id` for the configured session lifetime.
pub fn session_cookie(config: &AppConfig, session_id: &str) -> Cookie<'static> {
  Cookie::build(config.session_cookie_name.clone(), session_id.to_string())
    .path("/")
    .http_only(true)
    .same_site(SameSite::Lax)
    .secure(config.session_cookie_secure)
    .max_age(CookieDuration::hours(config.session_ttl_hours))
    .finish()
}

/// Cookie instructing the browser to drop the session cookie.
pub fn removal_cookie(config: &AppConfig) -> Cookie<'static> {
  let mut cookie = Cookie::build(config.session_cookie_name.clone(), "")
    .path("/")
    .http_only(true)
    .same_site(SameSite::Lax)
    .finish();
  cookie.make_removal();
  cookie
}
