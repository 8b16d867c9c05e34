// shop/src/web/handlers/account_handlers.rs

use actix_web::{web, HttpResponse};
use tracing::{info, instrument, warn};

use crate::errors::AppError;
use crate::forms::CredentialsPayload;
use crate::services::{auth_service, session_store};
use crate::state::AppState;
use crate::web::session::{removal_cookie, session_cookie};
use crate::web::{html, see_other, views, CurrentSession};

pub const LOGIN_PATH: &str = "/buy/login/";
pub const REGISTER_PATH: &str = "/buy/register/";

pub const INVALID_CREDENTIALS: &str = "Invalid Credentials";
pub const USERNAME_TAKEN: &str = "Username Already Exist";

/// GET /buy/register/
#[instrument(name = "handler::register_form", skip(app_state, session))]
pub async fn register_form_handler(
  app_state: web::Data<AppState>,
  session: CurrentSession,
) -> Result<HttpResponse, AppError> {
  let flash = session.take_flash(&app_state.db_pool).await?;
  Ok(html(views::register_page(session.user.as_ref(), flash.as_deref())))
}

/// POST /buy/register/ : create the account, or bounce back with a notice.
#[instrument(
    name = "handler::register",
    skip(app_state, session, form),
    fields(username = %form.username)
)]
pub async fn register_handler(
  app_state: web::Data<AppState>,
  session: CurrentSession,
  form: web::Form<CredentialsPayload>,
) -> Result<HttpResponse, AppError> {
  info!("Registration attempt.");

  let notice = match auth_service::create_user(&app_state.db_pool, &form.username, &form.password).await {
    Ok(user) => {
      info!(user_id = user.id, "Registration successful.");
      return Ok(see_other(LOGIN_PATH).finish());
    }
    Err(AppError::UsernameTaken(_)) => USERNAME_TAKEN.to_string(),
    Err(AppError::Validation(message)) => message,
    Err(app_err) => {
      warn!("Registration failed: {:?}", app_err);
      return Err(app_err);
    }
  };

  redirect_with_notice(&app_state, &session, REGISTER_PATH, &notice).await
}

/// GET /buy/login/
#[instrument(name = "handler::login_form", skip(app_state, session))]
pub async fn login_form_handler(
  app_state: web::Data<AppState>,
  session: CurrentSession,
) -> Result<HttpResponse, AppError> {
  let flash = session.take_flash(&app_state.db_pool).await?;
  Ok(html(views::login_page(session.user.as_ref(), flash.as_deref())))
}

/// POST /buy/login/ : on success a fresh session replaces whatever the
/// browser held before.
#[instrument(
    name = "handler::login",
    skip(app_state, session, form),
    fields(username = %form.username)
)]
pub async fn login_handler(
  app_state: web::Data<AppState>,
  session: CurrentSession,
  form: web::Form<CredentialsPayload>,
) -> Result<HttpResponse, AppError> {
  info!("Login attempt.");

  match auth_service::authenticate(&app_state.db_pool, &form.username, &form.password).await? {
    Some(user) => {
      let new_session = session_store::login(
        &app_state.db_pool,
        session.cookie_token.as_deref(),
        user.id,
        app_state.config.session_ttl(),
      )
      .await?;
      info!(user_id = user.id, "Login successful.");
      Ok(
        see_other("/")
          .cookie(session_cookie(&app_state.config, &new_session.id))
          .finish(),
      )
    }
    None => {
      warn!("Login rejected.");
      redirect_with_notice(&app_state, &session, LOGIN_PATH, INVALID_CREDENTIALS).await
    }
  }
}

/// GET /buy/logout/ : always ends up signed out at `/`, whatever the cookie held.
#[instrument(name = "handler::logout", skip(app_state, session), fields(authenticated = session.is_authenticated()))]
pub async fn logout_handler(
  app_state: web::Data<AppState>,
  session: CurrentSession,
) -> Result<HttpResponse, AppError> {
  if let Some(token) = session.cookie_token.as_deref() {
    session_store::destroy_session(&app_state.db_pool, token).await?;
  }
  if let Some(user) = &session.user {
    info!(user_id = user.id, "User logged out.");
  }
  Ok(see_other("/").cookie(removal_cookie(&app_state.config)).finish())
}

async fn redirect_with_notice(
  app_state: &AppState,
  session: &CurrentSession,
  location: &str,
  notice: &str,
) -> Result<HttpResponse, AppError> {
  let session_id = session_store::push_flash(
    &app_state.db_pool,
    session.session_id.as_deref(),
    notice,
    app_state.config.flash_ttl(),
  )
  .await?;
  Ok(
    see_other(location)
      .cookie(session_cookie(&app_state.config, &session_id))
      .finish(),
  )
}
