//! In-process notification relay
//!
//! Synchronous publish/subscribe used to cascade an item-price change into
//! an order-total update, and an order removal into item cleanup. Dispatch
//! is same-task and ordered: every handler runs on the publisher's open
//! transaction before `publish` returns, so cascades commit atomically with
//! the publishing operation. Not a queue: no retry, no durability.

mod handlers;

pub use handlers::{ItemCleanupHandler, TotalAmountHandler};

use std::sync::Arc;

use async_trait::async_trait;
use rust_decimal::Decimal;
use sqlx::SqliteConnection;
use uuid::Uuid;

use crate::utils::AppResult;

/// Notifications published by the application services
#[derive(Debug, Clone)]
pub enum OrderEvent {
    /// An item was added or updated and its line total changed by `delta_amount`
    ItemChanged { order_id: Uuid, delta_amount: Decimal },
    /// An order is being removed; its items must go with it
    OrderRemoved { order_id: Uuid },
}

#[async_trait]
pub trait EventHandler: Send + Sync {
    /// React to an event on the publisher's live transaction.
    ///
    /// Returns the number of rows staged so the enclosing unit of work can
    /// account for them.
    async fn handle(&self, conn: &mut SqliteConnection, event: &OrderEvent) -> AppResult<u64>;
}

/// Registry of handlers, dispatched in subscription order
#[derive(Default)]
pub struct EventBus {
    handlers: Vec<Arc<dyn EventHandler>>,
}

impl EventBus {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn subscribe(&mut self, handler: Arc<dyn EventHandler>) {
        self.handlers.push(handler);
    }

    /// Dispatch to every subscriber sequentially; the first failure aborts
    /// the publishing operation (and with it the whole transaction).
    pub async fn publish(
        &self,
        conn: &mut SqliteConnection,
        event: &OrderEvent,
    ) -> AppResult<u64> {
        let mut rows = 0;
        for handler in &self.handlers {
            rows += handler.handle(conn, event).await?;
        }
        Ok(rows)
    }
}
