//! Per-year sequence counters for order numbers

use sqlx::SqliteConnection;

use crate::utils::AppResult;

/// Atomically increment the counter for a year and return the new value.
///
/// Must run inside the same transaction as the order insert that consumes
/// the value: SQLite serializes writers, so the read-modify-write via
/// RETURNING can never hand the same value to two creations. The
/// insert-or-ignore seeds a fresh year at 0 without racing concurrent
/// creations on the primary key.
pub async fn next_value(conn: &mut SqliteConnection, year: i32) -> AppResult<i64> {
    sqlx::query("INSERT INTO sequence_counters (year, next_value) VALUES (?1, 0) ON CONFLICT(year) DO NOTHING")
        .bind(year)
        .execute(&mut *conn)
        .await?;

    let next = sqlx::query_scalar::<_, i64>(
        "UPDATE sequence_counters SET next_value = next_value + 1 WHERE year = ?1 RETURNING next_value",
    )
    .bind(year)
    .fetch_one(&mut *conn)
    .await?;

    Ok(next)
}
