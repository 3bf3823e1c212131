//! Order Item Model

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Order item entity
///
/// `total_price` is caller-supplied, not computed from quantity x unit_price
/// (discounts are the caller's business); it is range-checked only.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderItem {
    pub order_item_id: Uuid,
    pub order_id: Uuid,
    pub product_name: String,
    pub quantity: i32,
    pub unit_price: f64,
    pub total_price: f64,
}

/// Create order-item payload
///
/// `order_id` is optional in the body: nested items of a create-order
/// request omit it, the standalone add-item endpoint requires it to match
/// the path.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderItemAddRequest {
    #[serde(default)]
    pub order_id: Option<Uuid>,
    pub product_name: String,
    pub quantity: i32,
    pub unit_price: f64,
    pub total_price: f64,
}

/// Update order-item payload (full replacement of mutable fields)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderItemUpdateRequest {
    pub order_id: Uuid,
    pub order_item_id: Uuid,
    pub product_name: String,
    pub quantity: i32,
    pub unit_price: f64,
    pub total_price: f64,
}

/// Order-item response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderItemResponse {
    pub order_item_id: Uuid,
    pub order_id: Uuid,
    pub product_name: String,
    pub quantity: i32,
    pub unit_price: f64,
    pub total_price: f64,
}

impl From<OrderItem> for OrderItemResponse {
    fn from(item: OrderItem) -> Self {
        Self {
            order_item_id: item.order_item_id,
            order_id: item.order_id,
            product_name: item.product_name,
            quantity: item.quantity,
            unit_price: item.unit_price,
            total_price: item.total_price,
        }
    }
}
