//! Event handlers keeping order totals and item lifecycles consistent

use async_trait::async_trait;
use sqlx::SqliteConnection;

use super::{EventHandler, OrderEvent};
use crate::db::repository;
use crate::money;
use crate::utils::{AppError, AppResult};

/// Applies an item-price delta to the parent order's total.
///
/// The referenced order must still exist at dispatch time; its absence is a
/// logic error the publisher should have prevented by checking first.
pub struct TotalAmountHandler;

#[async_trait]
impl EventHandler for TotalAmountHandler {
    async fn handle(&self, conn: &mut SqliteConnection, event: &OrderEvent) -> AppResult<u64> {
        let OrderEvent::ItemChanged {
            order_id,
            delta_amount,
        } = event
        else {
            return Ok(0);
        };

        let order = repository::order::find_by_id(conn, *order_id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("Order {order_id} not found")))?;

        let new_total = money::to_f64(money::to_decimal(order.total_amount) + delta_amount);
        tracing::debug!(order_id = %order_id, delta = %delta_amount, new_total, "applying total delta");
        repository::order::update_total_amount(conn, *order_id, new_total).await
    }
}

/// Deletes every item of a removed order, one by one.
pub struct ItemCleanupHandler;

#[async_trait]
impl EventHandler for ItemCleanupHandler {
    async fn handle(&self, conn: &mut SqliteConnection, event: &OrderEvent) -> AppResult<u64> {
        let OrderEvent::OrderRemoved { order_id } = event else {
            return Ok(0);
        };

        let items = repository::order_item::find_by_order_id(conn, *order_id).await?;
        let mut rows = 0;
        for item in items {
            rows += repository::order_item::delete(conn, item.order_item_id).await?;
        }
        tracing::debug!(order_id = %order_id, rows, "cleaned up items of removed order");
        Ok(rows)
    }
}
