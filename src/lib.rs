//! Orders Server - order-management backend
//!
//! Customers place orders composed of line items; each order tracks a
//! running total derived from its items. The hard part is keeping that
//! total consistent: every item add/update/delete applies a signed delta
//! inside one transaction, and order numbers come from an atomic per-year
//! sequence counter.
//!
//! # Module structure
//!
//! ```text
//! src/
//! ├── core/      # configuration, server state
//! ├── api/       # HTTP routers and handlers
//! ├── services/  # application services (orchestration + total rules)
//! ├── events/    # synchronous in-process notification relay
//! ├── db/        # SQLite pool, unit of work, repositories, models
//! ├── money/     # Decimal arithmetic at the storage boundary
//! └── utils/     # errors, logging, validation
//! ```

pub mod api;
pub mod core;
pub mod db;
pub mod events;
pub mod money;
pub mod services;
pub mod utils;

// Re-export public types
pub use crate::core::{Config, ServerState};
pub use utils::logger::init_logger_with_file;
pub use utils::{AppError, AppResult};
