use std::sync::Arc;

use crate::core::Config;
use crate::db::DbService;
use crate::events::{EventBus, ItemCleanupHandler, TotalAmountHandler};
use crate::utils::AppResult;

/// Server state shared by every request handler
///
/// Cloning is shallow: the pool and the event bus live behind Arcs.
#[derive(Clone)]
pub struct ServerState {
    pub config: Arc<Config>,
    pub db: DbService,
    pub events: Arc<EventBus>,
}

impl ServerState {
    /// Open the database, run migrations and wire up the event subscribers
    pub async fn initialize(config: &Config) -> AppResult<Self> {
        let db = DbService::new(&config.database_path).await?;

        let mut events = EventBus::new();
        events.subscribe(Arc::new(TotalAmountHandler));
        events.subscribe(Arc::new(ItemCleanupHandler));

        Ok(Self {
            config: Arc::new(config.clone()),
            db,
            events: Arc::new(events),
        })
    }
}
