//! Domain entities and request/response payloads

mod order;
mod order_item;

pub use order::{Order, OrderAddRequest, OrderResponse, OrderUpdateRequest};
pub use order_item::{
    OrderItem, OrderItemAddRequest, OrderItemResponse, OrderItemUpdateRequest,
};
