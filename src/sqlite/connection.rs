use std::fmt;
use std::time::Duration;

use rusqlite::{Connection, OpenFlags};

use super::config::SqliteOptions;
use super::params::bind_named;
use super::query::build_result_set;
use crate::error::SqlDaoError;
use crate::params::Param;
use crate::results::{DataSet, ResultSet};
use crate::types::StatementKind;

/// One open `SQLite` connection plus its transaction flag.
pub struct SqliteConnection {
    conn: Connection,
    db_path: String,
    in_transaction: bool,
}

impl SqliteConnection {
    /// Open a connection with the given options.
    ///
    /// # Errors
    /// Returns `SqlDaoError::ConnectionError` if the database cannot be opened.
    pub fn open(opts: &SqliteOptions) -> Result<Self, SqlDaoError> {
        let mut flags = OpenFlags::SQLITE_OPEN_READ_WRITE
            | OpenFlags::SQLITE_OPEN_URI
            | OpenFlags::SQLITE_OPEN_NO_MUTEX;
        if opts.create_if_missing {
            flags |= OpenFlags::SQLITE_OPEN_CREATE;
        }

        let conn = Connection::open_with_flags(&opts.db_path, flags).map_err(|e| {
            SqlDaoError::ConnectionError(format!(
                "Failed to open SQLite database {}: {e}",
                opts.db_path
            ))
        })?;
        conn.busy_timeout(Duration::from_millis(opts.busy_timeout_ms))?;

        Ok(Self {
            conn,
            db_path: opts.db_path.clone(),
            in_transaction: false,
        })
    }

    fn ensure_text(kind: StatementKind) -> Result<(), SqlDaoError> {
        match kind {
            StatementKind::Text => Ok(()),
            StatementKind::StoredProcedure => Err(SqlDaoError::Unimplemented(
                "SQLite has no stored procedures".into(),
            )),
        }
    }

    /// Execute a statement and return the number of rows it changed.
    ///
    /// # Errors
    /// Returns `SqlDaoError` if preparing, binding or executing fails.
    pub fn execute_dml(
        &mut self,
        query: &str,
        kind: StatementKind,
        params: &[Param],
    ) -> Result<usize, SqlDaoError> {
        Self::ensure_text(kind)?;
        let mut stmt = self.conn.prepare(query)?;
        bind_named(&mut stmt, params)?;
        Ok(stmt.raw_execute()?)
    }

    /// Execute a query and materialize its rows.
    ///
    /// # Errors
    /// Returns `SqlDaoError` if preparing, binding or reading rows fails.
    pub fn execute_select(
        &mut self,
        query: &str,
        kind: StatementKind,
        params: &[Param],
    ) -> Result<ResultSet, SqlDaoError> {
        Self::ensure_text(kind)?;
        let mut stmt = self.conn.prepare(query)?;
        bind_named(&mut stmt, params)?;
        build_result_set(&mut stmt)
    }

    /// `SQLite` statements produce a single result set.
    ///
    /// # Errors
    /// Same as [`SqliteConnection::execute_select`].
    pub fn execute_tabular(
        &mut self,
        query: &str,
        kind: StatementKind,
        params: &[Param],
    ) -> Result<DataSet, SqlDaoError> {
        let table = self.execute_select(query, kind, params)?;
        Ok(DataSet::new(vec![table]))
    }

    /// Begin a transaction on this connection.
    ///
    /// # Errors
    /// Returns `SqlDaoError` if the transaction cannot be started or is already active.
    pub fn begin(&mut self) -> Result<(), SqlDaoError> {
        if self.in_transaction {
            return Err(SqlDaoError::TransactionStateError(
                "SQLite transaction already in progress".into(),
            ));
        }
        self.conn.execute_batch("BEGIN")?;
        self.in_transaction = true;
        Ok(())
    }

    /// Commit the open transaction.
    ///
    /// # Errors
    /// Returns `SqlDaoError` if committing fails or no transaction is active.
    pub fn commit(&mut self) -> Result<(), SqlDaoError> {
        if !self.in_transaction {
            return Err(SqlDaoError::TransactionStateError(
                "SQLite transaction not active".into(),
            ));
        }
        self.conn.execute_batch("COMMIT")?;
        self.in_transaction = false;
        Ok(())
    }

    /// Roll back the open transaction.
    ///
    /// # Errors
    /// Returns `SqlDaoError` if rolling back fails or no transaction is active.
    pub fn rollback(&mut self) -> Result<(), SqlDaoError> {
        if !self.in_transaction {
            return Err(SqlDaoError::TransactionStateError(
                "SQLite transaction not active".into(),
            ));
        }
        self.conn.execute_batch("ROLLBACK")?;
        self.in_transaction = false;
        Ok(())
    }

    /// Close the connection, surfacing any error rusqlite reports.
    ///
    /// # Errors
    /// Returns `SqlDaoError::ConnectionError` if `SQLite` refuses to close.
    pub fn close(self) -> Result<(), SqlDaoError> {
        let db_path = self.db_path;
        self.conn.close().map_err(|(_, e)| {
            SqlDaoError::ConnectionError(format!("Failed to close SQLite database {db_path}: {e}"))
        })
    }
}

impl fmt::Debug for SqliteConnection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SqliteConnection")
            .field("db_path", &self.db_path)
            .field("in_transaction", &self.in_transaction)
            .finish()
    }
}
