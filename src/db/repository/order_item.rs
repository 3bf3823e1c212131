//! Order Items Repository

use sqlx::SqliteConnection;
use uuid::Uuid;

use crate::db::models::{OrderItem, OrderItemUpdateRequest};
use crate::utils::{AppError, AppResult};

const COLUMNS: &str = "order_item_id, order_id, product_name, quantity, unit_price, total_price";

#[derive(sqlx::FromRow)]
struct OrderItemRow {
    order_item_id: String,
    order_id: String,
    product_name: String,
    quantity: i32,
    unit_price: f64,
    total_price: f64,
}

impl TryFrom<OrderItemRow> for OrderItem {
    type Error = AppError;

    fn try_from(row: OrderItemRow) -> Result<Self, Self::Error> {
        let order_item_id = Uuid::parse_str(&row.order_item_id).map_err(|e| {
            AppError::database(format!("Corrupt order_item_id in order_items table: {e}"))
        })?;
        let order_id = Uuid::parse_str(&row.order_id).map_err(|e| {
            AppError::database(format!("Corrupt order_id in order_items table: {e}"))
        })?;
        Ok(OrderItem {
            order_item_id,
            order_id,
            product_name: row.product_name,
            quantity: row.quantity,
            unit_price: row.unit_price,
            total_price: row.total_price,
        })
    }
}

pub async fn insert(conn: &mut SqliteConnection, item: &OrderItem) -> AppResult<u64> {
    let result = sqlx::query(
        "INSERT INTO order_items \
         (order_item_id, order_id, product_name, quantity, unit_price, total_price) \
         VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
    )
    .bind(item.order_item_id.to_string())
    .bind(item.order_id.to_string())
    .bind(&item.product_name)
    .bind(item.quantity)
    .bind(item.unit_price)
    .bind(item.total_price)
    .execute(&mut *conn)
    .await?;
    Ok(result.rows_affected())
}

pub async fn find_by_id(
    conn: &mut SqliteConnection,
    order_item_id: Uuid,
) -> AppResult<Option<OrderItem>> {
    let row = sqlx::query_as::<_, OrderItemRow>(&format!(
        "SELECT {COLUMNS} FROM order_items WHERE order_item_id = ?1"
    ))
    .bind(order_item_id.to_string())
    .fetch_optional(&mut *conn)
    .await?;
    row.map(OrderItem::try_from).transpose()
}

pub async fn find_by_order_id(
    conn: &mut SqliteConnection,
    order_id: Uuid,
) -> AppResult<Vec<OrderItem>> {
    let rows = sqlx::query_as::<_, OrderItemRow>(&format!(
        "SELECT {COLUMNS} FROM order_items WHERE order_id = ?1"
    ))
    .bind(order_id.to_string())
    .fetch_all(&mut *conn)
    .await?;
    rows.into_iter().map(OrderItem::try_from).collect()
}

pub async fn find_all(conn: &mut SqliteConnection) -> AppResult<Vec<OrderItem>> {
    let rows = sqlx::query_as::<_, OrderItemRow>(&format!("SELECT {COLUMNS} FROM order_items"))
        .fetch_all(&mut *conn)
        .await?;
    rows.into_iter().map(OrderItem::try_from).collect()
}

/// Replace the mutable fields of an item, matched on both item and order id.
///
/// Returns the previous `total_price` so the caller can compute the delta
/// without a second read, or `None` if no matching row exists.
pub async fn update(
    conn: &mut SqliteConnection,
    request: &OrderItemUpdateRequest,
) -> AppResult<Option<f64>> {
    let old_total: Option<f64> = sqlx::query_scalar(
        "SELECT total_price FROM order_items WHERE order_item_id = ?1 AND order_id = ?2",
    )
    .bind(request.order_item_id.to_string())
    .bind(request.order_id.to_string())
    .fetch_optional(&mut *conn)
    .await?;

    let Some(old_total) = old_total else {
        return Ok(None);
    };

    sqlx::query(
        "UPDATE order_items SET product_name = ?1, quantity = ?2, unit_price = ?3, total_price = ?4 \
         WHERE order_item_id = ?5 AND order_id = ?6",
    )
    .bind(&request.product_name)
    .bind(request.quantity)
    .bind(request.unit_price)
    .bind(request.total_price)
    .bind(request.order_item_id.to_string())
    .bind(request.order_id.to_string())
    .execute(&mut *conn)
    .await?;

    Ok(Some(old_total))
}

pub async fn delete(conn: &mut SqliteConnection, order_item_id: Uuid) -> AppResult<u64> {
    let result = sqlx::query("DELETE FROM order_items WHERE order_item_id = ?1")
        .bind(order_item_id.to_string())
        .execute(&mut *conn)
        .await?;
    Ok(result.rows_affected())
}

/// Bulk delete of an order's items.
///
/// Returns the affected row count and the sum of `total_price` removed, so
/// the caller can adjust the parent total without a second read.
pub async fn delete_by_order_id(
    conn: &mut SqliteConnection,
    order_id: Uuid,
) -> AppResult<(u64, f64)> {
    let removed_total: f64 = sqlx::query_scalar(
        "SELECT COALESCE(SUM(total_price), 0) FROM order_items WHERE order_id = ?1",
    )
    .bind(order_id.to_string())
    .fetch_one(&mut *conn)
    .await?;

    let result = sqlx::query("DELETE FROM order_items WHERE order_id = ?1")
        .bind(order_id.to_string())
        .execute(&mut *conn)
        .await?;

    Ok((result.rows_affected(), removed_total))
}
