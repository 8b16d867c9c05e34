// tests/booking_tests.rs
#[macro_use]
mod common;

use actix_web::http::StatusCode;
use actix_web::test;
use common::*;
use shop::services::booking_service;

fn booking_form(product: &str) -> Vec<(&'static str, String)> {
  vec![
    ("name", "Alice".to_string()),
    ("email", "a@x.com".to_string()),
    ("phone", "555".to_string()),
    ("address", "1 Main St".to_string()),
    ("product", product.to_string()),
    ("feedback", String::new()),
  ]
}

async fn seed_three(pool: &sqlx::SqlitePool) -> i64 {
  insert_product(pool, "Backpack", 49.99, 12).await;
  insert_product(pool, "Bottle", 19.5, 40).await;
  insert_product(pool, "Headphones", 89.0, 7).await
}

#[actix_web::test]
async fn get_renders_an_empty_form_listing_products() {
  let state = test_state().await;
  seed_three(&state.db_pool).await;
  let app = init_app!(state);

  let resp = test::call_service(&app, test::TestRequest::get().uri("/buy/").to_request()).await;
  assert_eq!(resp.status(), StatusCode::OK);
  let body = body_string(resp).await;
  assert!(body.contains(r#"<form method="post" action="/buy/">"#));
  assert!(body.contains(r#"<option value="3">Headphones</option>"#));
}

#[actix_web::test]
async fn valid_submission_persists_a_booking_and_confirms() {
  let state = test_state().await;
  let product_id = seed_three(&state.db_pool).await;
  assert_eq!(product_id, 3);
  let app = init_app!(state);

  let req = test::TestRequest::post()
    .uri("/buy/")
    .set_form(booking_form("3"))
    .to_request();
  let resp = test::call_service(&app, req).await;
  assert_eq!(resp.status(), StatusCode::OK);
  let body = body_string(resp).await;
  assert!(body.contains("Thank you, Alice!"));
  assert!(body.contains("Headphones"));

  let bookings = booking_service::list_bookings_for_product(&state.db_pool, 3).await.unwrap();
  assert_eq!(bookings.len(), 1);
  let booking = &bookings[0];
  assert_eq!(booking.name, "Alice");
  assert_eq!(booking.email, "a@x.com");
  assert_eq!(booking.phone, "555");
  assert_eq!(booking.address, "1 Main St");
  assert_eq!(booking.feedback, "");
  assert!(booking.created_at <= chrono::Utc::now());
}

#[actix_web::test]
async fn missing_required_field_stores_nothing_and_rerenders_form() {
  let state = test_state().await;
  seed_three(&state.db_pool).await;
  let app = init_app!(state);

  for field in ["name", "email", "phone", "address", "product"] {
    let form: Vec<_> = booking_form("3").into_iter().filter(|(k, _)| *k != field).collect();
    let req = test::TestRequest::post().uri("/buy/").set_form(form).to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK, "dropping {field}");
    let body = body_string(resp).await;
    assert!(body.contains(r#"<form method="post" action="/buy/">"#), "dropping {field}");
    assert!(!body.contains("Thank you"), "dropping {field}");
  }

  assert_eq!(count_rows(&state.db_pool, "bookings").await, 0);
}

#[actix_web::test]
async fn unknown_product_stores_nothing() {
  let state = test_state().await;
  seed_three(&state.db_pool).await;
  let app = init_app!(state);

  for product in ["99", "0", "-1", "abc"] {
    let req = test::TestRequest::post()
      .uri("/buy/")
      .set_form(booking_form(product))
      .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    assert!(!body_string(resp).await.contains("Thank you"));
  }

  assert_eq!(count_rows(&state.db_pool, "bookings").await, 0);
}

#[actix_web::test]
async fn legacy_amount_field_names_the_product() {
  let state = test_state().await;
  seed_three(&state.db_pool).await;
  let app = init_app!(state);

  let form: Vec<_> = booking_form("2")
    .into_iter()
    .map(|(k, v)| if k == "product" { ("amount", v) } else { (k, v) })
    .collect();
  let req = test::TestRequest::post().uri("/buy/").set_form(form).to_request();
  let resp = test::call_service(&app, req).await;
  assert_eq!(resp.status(), StatusCode::OK);

  let bookings = booking_service::list_bookings_for_product(&state.db_pool, 2).await.unwrap();
  assert_eq!(bookings.len(), 1);
}

#[actix_web::test]
async fn booking_leaves_stock_unchanged() {
  let state = test_state().await;
  let product_id = seed_three(&state.db_pool).await;
  let app = init_app!(state);

  for _ in 0..2 {
    let req = test::TestRequest::post()
      .uri("/buy/")
      .set_form(booking_form(&product_id.to_string()))
      .to_request();
    test::call_service(&app, req).await;
  }

  let stock: i64 = sqlx::query_scalar("SELECT stock FROM products WHERE id = ?")
    .bind(product_id)
    .fetch_one(&state.db_pool)
    .await
    .unwrap();
  assert_eq!(stock, 7);
  assert_eq!(count_rows(&state.db_pool, "bookings").await, 2);
}

#[actix_web::test]
async fn deleting_a_product_deletes_its_bookings() {
  let state = test_state().await;
  let product_id = seed_three(&state.db_pool).await;
  let app = init_app!(state);

  let req = test::TestRequest::post()
    .uri("/buy/")
    .set_form(booking_form(&product_id.to_string()))
    .to_request();
  test::call_service(&app, req).await;
  let req = test::TestRequest::post().uri("/buy/").set_form(booking_form("1")).to_request();
  test::call_service(&app, req).await;
  assert_eq!(count_rows(&state.db_pool, "bookings").await, 2);

  sqlx::query("DELETE FROM products WHERE id = ?")
    .bind(product_id)
    .execute(&state.db_pool)
    .await
    .unwrap();

  assert_eq!(count_rows(&state.db_pool, "bookings").await, 1);
  assert!(booking_service::list_bookings_for_product(&state.db_pool, product_id)
    .await
    .unwrap()
    .is_empty());
}
