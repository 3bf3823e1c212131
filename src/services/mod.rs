//! Application services
//!
//! Thin orchestrators over the repositories and the event bus; they own the
//! fetch-check-mutate-commit order of every operation and the delta rules
//! that keep `total_amount` equal to the sum of item line totals.

mod order_items;
mod orders;

pub use order_items::OrderItemService;
pub use orders::OrderService;
