//! Product Repository

use super::{RepoError, RepoResult};
use shared::models::{ColorVariant, Product, ProductCreate, sale_price_for};
use sqlx::SqlitePool;

const PRODUCT_SELECT: &str = "SELECT id, name, description, price, sale_percentage, sale_price, image, colors, category_id, collection_id, archived, version, created_at, updated_at FROM product";

pub async fn find_all(pool: &SqlitePool) -> RepoResult<Vec<Product>> {
    let sql = format!("{PRODUCT_SELECT} WHERE archived = 0 ORDER BY created_at DESC");
    let rows = sqlx::query_as::<_, Product>(&sql).fetch_all(pool).await?;
    Ok(rows)
}

pub async fn find_by_id(pool: &SqlitePool, id: i64) -> RepoResult<Option<Product>> {
    let sql = format!("{PRODUCT_SELECT} WHERE id = ?");
    let row = sqlx::query_as::<_, Product>(&sql)
        .bind(id)
        .fetch_optional(pool)
        .await?;
    Ok(row)
}

pub async fn create(pool: &SqlitePool, data: ProductCreate) -> RepoResult<Product> {
    let now = shared::util::now_millis();
    let id = shared::util::snowflake_id();
    let sale_price = sale_price_for(data.price, data.sale_percentage);
    let colors = serde_json::to_string(&data.colors)?;

    sqlx::query(
        "INSERT INTO product (id, name, description, price, sale_percentage, sale_price, image, colors, category_id, collection_id, archived, version, created_at, updated_at) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, 0, 0, ?11, ?11)",
    )
    .bind(id)
    .bind(&data.name)
    .bind(&data.description)
    .bind(data.price)
    .bind(data.sale_percentage)
    .bind(sale_price)
    .bind(&data.image)
    .bind(colors)
    .bind(data.category_id)
    .bind(data.collection_id)
    .bind(now)
    .execute(pool)
    .await?;

    find_by_id(pool, id)
        .await?
        .ok_or_else(|| RepoError::Database("Failed to create product".into()))
}

/// Set the sale percentage and re-derive `sale_price` in the same write
///
/// Returns `None` when the product does not exist.
pub async fn update_sale(
    pool: &SqlitePool,
    id: i64,
    sale_percentage: f64,
) -> RepoResult<Option<Product>> {
    let Some(current) = find_by_id(pool, id).await? else {
        return Ok(None);
    };
    let sale_price = sale_price_for(current.price, sale_percentage);

    sqlx::query(
        "UPDATE product SET sale_percentage = ?1, sale_price = ?2, updated_at = ?3 WHERE id = ?4",
    )
    .bind(sale_percentage)
    .bind(sale_price)
    .bind(shared::util::now_millis())
    .bind(id)
    .execute(pool)
    .await?;

    find_by_id(pool, id).await
}

/// Replace the embedded colors if the row is still at `expected_version`
///
/// Returns `false` when another writer got there first.
pub async fn update_colors_if_version(
    pool: &SqlitePool,
    id: i64,
    colors: &[ColorVariant],
    expected_version: i64,
) -> RepoResult<bool> {
    let now = shared::util::now_millis();
    let colors = serde_json::to_string(colors)?;
    let rows = sqlx::query(
        "UPDATE product SET colors = ?1, version = version + 1, updated_at = ?2 WHERE id = ?3 AND version = ?4",
    )
    .bind(colors)
    .bind(now)
    .bind(id)
    .bind(expected_version)
    .execute(pool)
    .await?;
    Ok(rows.rows_affected() > 0)
}
