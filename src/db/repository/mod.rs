//! Repository Module
//!
//! CRUD access to the orders, order_items and sequence_counters tables.
//! Functions take `&mut SqliteConnection` so they run against either a
//! pooled connection (reads) or the unit-of-work transaction (writes).
//! Absence is a normal outcome here: lookups return `Option`, never an
//! error.

pub mod order;
pub mod order_item;
pub mod sequence;
