// shop/src/services/catalog_service.rs

use crate::errors::Result;
use crate::models::Product;
use sqlx::SqlitePool;
use tracing::{debug, instrument};

/// Every product in the catalog, oldest first. No filtering or pagination.
#[instrument(name = "catalog_service::list_products", skip(pool))]
pub async fn list_products(pool: &SqlitePool) -> Result<Vec<Product>> {
  let products: Vec<Product> = sqlx::query_as("SELECT id, name, price, stock, image FROM products ORDER BY id ASC")
    .fetch_all(pool)
    .await?;
  debug!(count = products.len(), "Fetched products.");
  Ok(products)
}

#[instrument(name = "catalog_service::find_product", skip(pool))]
pub async fn find_product(pool: &SqlitePool, product_id: i64) -> Result<Option<Product>> {
  let product = sqlx::query_as("SELECT id, name, price, stock, image FROM products WHERE id = ?")
    .bind(product_id)
    .fetch_optional(pool)
    .await?;
  Ok(product)
}
