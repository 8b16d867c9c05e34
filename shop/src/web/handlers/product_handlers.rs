// shop/src/web/handlers/product_handlers.rs

use actix_web::{web, HttpResponse};
use tracing::{info, instrument};

use crate::errors::AppError;
use crate::services::catalog_service;
use crate::state::AppState;
use crate::web::{html, views, CurrentSession};

/// GET / : the whole catalog. An empty catalog is an empty list, not an error.
#[instrument(name = "handler::index", skip(app_state, session), fields(authenticated = session.is_authenticated()))]
pub async fn index_handler(
  app_state: web::Data<AppState>,
  session: CurrentSession,
) -> Result<HttpResponse, AppError> {
  let products = catalog_service::list_products(&app_state.db_pool).await?;
  let flash = session.take_flash(&app_state.db_pool).await?;
  info!("Listing {} products.", products.len());

  Ok(html(views::index_page(&products, session.user.as_ref(), flash.as_deref())))
}
