use tracing::{debug, warn};

use super::{Session, TxState, release};
use crate::error::SqlDaoError;
use crate::store::StoreConnection;

impl Session {
    /// Open a connection, start a transaction on it and pin it to this session.
    ///
    /// # Errors
    /// Returns `SqlDaoError::TransactionStateError` if a transaction is already
    /// active, or the connection/BEGIN error.
    pub fn begin_transaction(&mut self) -> Result<(), SqlDaoError> {
        if self.in_transaction() {
            return Err(SqlDaoError::TransactionStateError(
                "a transaction is already active on this session".into(),
            ));
        }

        let mut conn = self.config.connect()?;
        if let Err(err) = conn.begin() {
            if let Err(close_err) = conn.close() {
                warn!(error = %close_err, "Failed to close connection after BEGIN failed");
            }
            return Err(err);
        }

        debug!(db_type = ?conn.db_type(), "Transaction started");
        self.tx = TxState::Active(conn);
        Ok(())
    }

    /// Commit the active transaction and release its connection.
    ///
    /// The session is idle afterwards even if the commit fails.
    ///
    /// # Errors
    /// Returns `SqlDaoError::TransactionStateError` if no transaction is active,
    /// or the COMMIT/close error.
    pub fn commit(&mut self) -> Result<(), SqlDaoError> {
        let mut conn = self.take_pinned("commit")?;
        let outcome = conn.commit();
        debug!(ok = outcome.is_ok(), "Transaction committed");
        release(conn, outcome)
    }

    /// Roll back the active transaction and release its connection.
    ///
    /// The session is idle afterwards even if the rollback fails.
    ///
    /// # Errors
    /// Returns `SqlDaoError::TransactionStateError` if no transaction is active,
    /// or the ROLLBACK/close error.
    pub fn rollback(&mut self) -> Result<(), SqlDaoError> {
        let mut conn = self.take_pinned("rollback")?;
        let outcome = conn.rollback();
        debug!(ok = outcome.is_ok(), "Transaction rolled back");
        release(conn, outcome)
    }

    fn take_pinned(&mut self, operation: &str) -> Result<StoreConnection, SqlDaoError> {
        match std::mem::take(&mut self.tx) {
            TxState::Active(conn) => Ok(conn),
            TxState::Idle => Err(SqlDaoError::TransactionStateError(format!(
                "cannot {operation}: no transaction is active"
            ))),
        }
    }
}
