// shop/src/web/routes.rs

use actix_web::web;

use crate::web::handlers::{account_handlers, booking_handlers, product_handlers};

async fn health_check_handler() -> actix_web::HttpResponse {
  actix_web::HttpResponse::Ok().json(serde_json::json!({ "status": "ok" }))
}

// Called from `main.rs` (and the integration tests) to configure services for the Actix App.
pub fn configure_app_routes(cfg: &mut web::ServiceConfig) {
  cfg
    .route("/health", web::get().to(health_check_handler))
    .service(web::resource("/").route(web::get().to(product_handlers::index_handler)))
    .service(
      web::scope("/buy")
        .service(
          web::resource("/")
            .route(web::get().to(booking_handlers::booking_form_handler))
            .route(web::post().to(booking_handlers::submit_booking_handler)),
        )
        .service(
          web::resource("/register/")
            .route(web::get().to(account_handlers::register_form_handler))
            .route(web::post().to(account_handlers::register_handler)),
        )
        .service(
          web::resource("/login/")
            .route(web::get().to(account_handlers::login_form_handler))
            .route(web::post().to(account_handlers::login_handler)),
        )
        .service(web::resource("/logout/").route(web::get().to(account_handlers::logout_handler))),
    );
}
