// shop/src/web/mod.rs

pub mod handlers;
pub mod routes;
pub mod session;
pub mod views;

pub use routes::configure_app_routes;
pub use session::{CurrentSession, SessionUser};

use actix_web::http::header::{self, ContentType};
use actix_web::{HttpResponse, HttpResponseBuilder};

/// 200 response with an HTML body.
pub(crate) fn html(body: String) -> HttpResponse {
  HttpResponse::Ok().insert_header(ContentType::html()).body(body)
}

/// 303 redirect; callers may still attach cookies before finishing.
pub(crate) fn see_other(location: &str) -> HttpResponseBuilder {
  let mut builder = HttpResponse::SeeOther();
  builder.insert_header((header::LOCATION, location.to_string()));
  builder
}
