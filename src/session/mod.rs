//! Connection lifecycle for one unit of work.
//!
//! A [`Session`] opens a connection for every call and releases it afterwards,
//! unless a transaction is active, in which case the transaction's connection is
//! pinned and reused until commit or rollback.

mod command;
mod crud;
mod tx;

use tracing::{debug, warn};

pub use command::Command;

use crate::config::StoreConfig;
use crate::error::SqlDaoError;
use crate::params::{Param, bind_params};
use crate::store::StoreConnection;
use crate::types::{DatabaseType, StatementKind};

/// Transaction state of a session.
#[derive(Debug, Default)]
enum TxState {
    #[default]
    Idle,
    Active(StoreConnection),
}

/// Executes statements against a configured store.
///
/// A session owns at most one live connection, and every operation takes
/// `&mut self`, so calls run one at a time in the order they are made.
#[derive(Debug)]
pub struct Session {
    config: StoreConfig,
    tx: TxState,
}

impl Session {
    #[must_use]
    pub fn new(config: impl Into<StoreConfig>) -> Self {
        Self {
            config: config.into(),
            tx: TxState::Idle,
        }
    }

    #[must_use]
    pub fn config(&self) -> &StoreConfig {
        &self.config
    }

    #[must_use]
    pub fn db_type(&self) -> DatabaseType {
        self.config.db_type()
    }

    #[must_use]
    pub fn in_transaction(&self) -> bool {
        matches!(self.tx, TxState::Active(_))
    }

    /// Run `step` against a command configured with `sql`, `kind` and a freshly
    /// bound copy of `params`.
    ///
    /// Outside a transaction a connection is opened for this call and closed on
    /// every exit path; inside one the pinned connection is used and left open.
    /// Errors from `step` are returned unchanged.
    ///
    /// # Errors
    /// Returns `SqlDaoError` if the connection cannot be opened or closed, or
    /// whatever `step` returns.
    pub fn execute<R, F>(
        &mut self,
        sql: &str,
        params: &[Param],
        kind: StatementKind,
        step: F,
    ) -> Result<R, SqlDaoError>
    where
        F: FnOnce(&mut Command<'_>) -> Result<R, SqlDaoError>,
    {
        let bound = bind_params(params);
        debug!(
            kind = ?kind,
            sql = %sql,
            params = bound.len(),
            in_transaction = self.in_transaction(),
            "Executing statement"
        );

        if let TxState::Active(conn) = &mut self.tx {
            let mut command = Command::new(conn, sql, kind, bound);
            return step(&mut command);
        }

        let mut conn = self.config.connect()?;
        debug!(db_type = ?conn.db_type(), "Connection opened");
        let outcome = {
            let mut command = Command::new(&mut conn, sql, kind, bound);
            step(&mut command)
        };
        release(conn, outcome)
    }
}

/// Close `conn` and combine the close result with the outcome of the work done on it.
///
/// A failed close is reported when the work succeeded; when the work already
/// failed, its error wins and the close failure is only logged.
fn release<R>(
    conn: StoreConnection,
    outcome: Result<R, SqlDaoError>,
) -> Result<R, SqlDaoError> {
    match (conn.close(), outcome) {
        (Ok(()), outcome) => {
            debug!("Connection released");
            outcome
        }
        (Err(close_err), Ok(_)) => Err(close_err),
        (Err(close_err), Err(err)) => {
            warn!(error = %close_err, "Failed to close connection after error");
            Err(err)
        }
    }
}

impl Drop for Session {
    fn drop(&mut self) {
        if let TxState::Active(mut conn) = std::mem::take(&mut self.tx) {
            warn!("Session dropped with an active transaction; rolling back");
            if let Err(err) = conn.rollback() {
                warn!(error = %err, "Rollback on drop failed");
            }
            if let Err(err) = conn.close() {
                warn!(error = %err, "Failed to close connection on drop");
            }
        }
    }
}
