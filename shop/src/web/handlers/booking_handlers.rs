// shop/src/web/handlers/booking_handlers.rs

use actix_web::{web, HttpResponse};
use tracing::{info, instrument, warn};

use crate::errors::AppError;
use crate::forms::BookingFormPayload;
use crate::services::{booking_service, catalog_service};
use crate::state::AppState;
use crate::web::{html, views, CurrentSession};

/// GET /buy/ : an empty booking form.
#[instrument(name = "handler::booking_form", skip(app_state, session))]
pub async fn booking_form_handler(
  app_state: web::Data<AppState>,
  session: CurrentSession,
) -> Result<HttpResponse, AppError> {
  render_form(&app_state, &session).await
}

/// POST /buy/ : validate, store, confirm. Any invalid submission gets the
/// blank form back and nothing is stored.
#[instrument(name = "handler::submit_booking", skip(app_state, session, form))]
pub async fn submit_booking_handler(
  app_state: web::Data<AppState>,
  session: CurrentSession,
  form: web::Form<BookingFormPayload>,
) -> Result<HttpResponse, AppError> {
  let new_booking = match form.validate() {
    Ok(b) => b,
    Err(reason) => {
      warn!(?reason, "Booking submission rejected.");
      return render_form(&app_state, &session).await;
    }
  };

  let Some(product) = catalog_service::find_product(&app_state.db_pool, new_booking.product_id).await? else {
    warn!(product_id = new_booking.product_id, "Booking references an unknown product.");
    return render_form(&app_state, &session).await;
  };

  let booking = match booking_service::create_booking(&app_state.db_pool, &new_booking).await {
    Ok(b) => b,
    Err(AppError::NotFound(reason)) => {
      warn!(%reason, "Product vanished before the booking was stored.");
      return render_form(&app_state, &session).await;
    }
    Err(e) => return Err(e),
  };
  info!(booking_id = booking.id, product_id = product.id, "Booking submitted.");

  Ok(html(views::confirmation_page(&booking, &product, session.user.as_ref())))
}

async fn render_form(app_state: &AppState, session: &CurrentSession) -> Result<HttpResponse, AppError> {
  let products = catalog_service::list_products(&app_state.db_pool).await?;
  let flash = session.take_flash(&app_state.db_pool).await?;
  Ok(html(views::booking_form_page(&products, session.user.as_ref(), flash.as_deref())))
}
