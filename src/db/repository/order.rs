//! Orders Repository

use chrono::NaiveDate;
use sqlx::SqliteConnection;
use uuid::Uuid;

use crate::db::models::Order;
use crate::utils::{AppError, AppResult};

const COLUMNS: &str = "order_id, order_number, customer_name, order_date, total_amount";

/// Raw row shape; ids and dates are stored as TEXT
#[derive(sqlx::FromRow)]
struct OrderRow {
    order_id: String,
    order_number: String,
    customer_name: String,
    order_date: String,
    total_amount: f64,
}

impl TryFrom<OrderRow> for Order {
    type Error = AppError;

    fn try_from(row: OrderRow) -> Result<Self, Self::Error> {
        let order_id = Uuid::parse_str(&row.order_id)
            .map_err(|e| AppError::database(format!("Corrupt order_id in orders table: {e}")))?;
        let order_date = NaiveDate::parse_from_str(&row.order_date, "%Y-%m-%d")
            .map_err(|e| AppError::database(format!("Corrupt order_date in orders table: {e}")))?;
        Ok(Order {
            order_id,
            order_number: row.order_number,
            customer_name: row.customer_name,
            order_date,
            total_amount: row.total_amount,
        })
    }
}

/// Stage a new order row; identity and number are minted by the caller
pub async fn insert(conn: &mut SqliteConnection, order: &Order) -> AppResult<u64> {
    let result = sqlx::query(
        "INSERT INTO orders (order_id, order_number, customer_name, order_date, total_amount) \
         VALUES (?1, ?2, ?3, ?4, ?5)",
    )
    .bind(order.order_id.to_string())
    .bind(&order.order_number)
    .bind(&order.customer_name)
    .bind(order.order_date.format("%Y-%m-%d").to_string())
    .bind(order.total_amount)
    .execute(&mut *conn)
    .await?;
    Ok(result.rows_affected())
}

pub async fn find_by_id(conn: &mut SqliteConnection, order_id: Uuid) -> AppResult<Option<Order>> {
    let row = sqlx::query_as::<_, OrderRow>(&format!(
        "SELECT {COLUMNS} FROM orders WHERE order_id = ?1"
    ))
    .bind(order_id.to_string())
    .fetch_optional(&mut *conn)
    .await?;
    row.map(Order::try_from).transpose()
}

pub async fn find_all(conn: &mut SqliteConnection) -> AppResult<Vec<Order>> {
    let rows = sqlx::query_as::<_, OrderRow>(&format!("SELECT {COLUMNS} FROM orders"))
        .fetch_all(&mut *conn)
        .await?;
    rows.into_iter().map(Order::try_from).collect()
}

/// Replace the mutable fields (customer name, total amount) of a tracked row
pub async fn update(conn: &mut SqliteConnection, order: &Order) -> AppResult<u64> {
    let result = sqlx::query(
        "UPDATE orders SET customer_name = ?1, total_amount = ?2 WHERE order_id = ?3",
    )
    .bind(&order.customer_name)
    .bind(order.total_amount)
    .bind(order.order_id.to_string())
    .execute(&mut *conn)
    .await?;
    Ok(result.rows_affected())
}

/// Set the derived total directly; used by the delta paths after
/// recomputing through `money` arithmetic
pub async fn update_total_amount(
    conn: &mut SqliteConnection,
    order_id: Uuid,
    total_amount: f64,
) -> AppResult<u64> {
    let result = sqlx::query("UPDATE orders SET total_amount = ?1 WHERE order_id = ?2")
        .bind(total_amount)
        .bind(order_id.to_string())
        .execute(&mut *conn)
        .await?;
    Ok(result.rows_affected())
}

pub async fn delete(conn: &mut SqliteConnection, order_id: Uuid) -> AppResult<u64> {
    let result = sqlx::query("DELETE FROM orders WHERE order_id = ?1")
        .bind(order_id.to_string())
        .execute(&mut *conn)
        .await?;
    Ok(result.rows_affected())
}
