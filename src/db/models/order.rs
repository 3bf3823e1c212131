//! Order Model

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{OrderItemAddRequest, OrderItemResponse};

/// Order entity
///
/// `total_amount` is derived state: it must equal the sum of `total_price`
/// over the items currently attached to the order. All mutations keep it
/// in sync by applying deltas rather than rescanning the items.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Order {
    pub order_id: Uuid,
    /// Human-readable per-year number, e.g. `Order_2026_00001`; immutable
    pub order_number: String,
    pub customer_name: String,
    pub order_date: NaiveDate,
    pub total_amount: f64,
}

/// Create order payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderAddRequest {
    pub customer_name: String,
    #[serde(default)]
    pub order_items: Vec<OrderItemAddRequest>,
}

/// Update order payload
///
/// Overwrites customer name and total amount directly. The total override
/// bypasses the item-sum derivation; it is the correction escape hatch and
/// the only path allowed to set the total non-derivationally.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderUpdateRequest {
    pub order_id: Uuid,
    pub customer_name: String,
    pub total_amount: f64,
}

/// Order response with nested item responses
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderResponse {
    pub order_id: Uuid,
    pub order_number: String,
    pub customer_name: String,
    pub order_date: NaiveDate,
    pub total_amount: f64,
    pub order_items: Vec<OrderItemResponse>,
}

impl OrderResponse {
    pub fn from_order(order: Order, order_items: Vec<OrderItemResponse>) -> Self {
        Self {
            order_id: order.order_id,
            order_number: order.order_number,
            customer_name: order.customer_name,
            order_date: order.order_date,
            total_amount: order.total_amount,
            order_items,
        }
    }
}

impl From<Order> for OrderResponse {
    fn from(order: Order) -> Self {
        Self::from_order(order, Vec::new())
    }
}
