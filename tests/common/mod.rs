//! Shared test setup: a real server state on a throwaway SQLite database

use orders_server::{Config, ServerState};
use tempfile::TempDir;

/// Initialize a fresh state; the returned TempDir must stay alive for the
/// duration of the test.
pub async fn test_state() -> (ServerState, TempDir) {
    let dir = tempfile::tempdir().expect("create temp dir");
    let db_path = dir.path().join("orders.db");
    let config = Config::with_overrides(db_path.to_str().expect("utf-8 temp path"), 0);
    let state = ServerState::initialize(&config)
        .await
        .expect("initialize server state");
    (state, dir)
}
