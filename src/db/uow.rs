//! Unit of work
//!
//! Wraps one sqlx transaction. Every write of a service-level operation is
//! staged through the same unit of work and committed exactly once at the
//! end, so a mid-operation failure leaves no partial state.

use sqlx::{Sqlite, SqliteConnection, Transaction};

use super::DbService;
use crate::utils::{AppError, AppResult};

pub struct UnitOfWork {
    tx: Transaction<'static, Sqlite>,
    rows_affected: u64,
}

impl UnitOfWork {
    /// Open a transaction against the pool
    pub async fn begin(db: &DbService) -> AppResult<Self> {
        let tx = db
            .pool
            .begin()
            .await
            .map_err(|e| AppError::database(format!("Failed to begin transaction: {e}")))?;
        Ok(Self {
            tx,
            rows_affected: 0,
        })
    }

    /// The live connection; repository calls within this unit of work go through it
    pub fn conn(&mut self) -> &mut SqliteConnection {
        &mut self.tx
    }

    /// Record rows staged by a repository call
    pub fn record(&mut self, rows: u64) {
        self.rows_affected += rows;
    }

    /// Commit all staged changes; returns the count of affected rows.
    ///
    /// On failure the transaction is rolled back in full by the sqlx drop
    /// guard and a generic persistence error is surfaced.
    pub async fn commit(self) -> AppResult<u64> {
        self.tx
            .commit()
            .await
            .map_err(|e| AppError::database(format!("Can't commit transaction to database: {e}")))?;
        Ok(self.rows_affected)
    }
}
