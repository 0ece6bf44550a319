use std::fmt;

#[cfg(feature = "mssql")]
use crate::mssql::MssqlConnection;
#[cfg(feature = "sqlite")]
use crate::sqlite::SqliteConnection;

use crate::error::SqlDaoError;
use crate::params::Param;
use crate::results::{DataSet, ResultSet};
use crate::types::{DatabaseType, StatementKind};

/// A live connection to one of the supported stores.
pub enum StoreConnection {
    #[cfg(feature = "sqlite")]
    Sqlite(SqliteConnection),
    #[cfg(feature = "mssql")]
    Mssql(MssqlConnection),
}

impl StoreConnection {
    #[must_use]
    pub fn db_type(&self) -> DatabaseType {
        match self {
            #[cfg(feature = "sqlite")]
            StoreConnection::Sqlite(_) => DatabaseType::Sqlite,
            #[cfg(feature = "mssql")]
            StoreConnection::Mssql(_) => DatabaseType::Mssql,
        }
    }

    /// Run a statement and return the affected-row count.
    ///
    /// # Errors
    /// Returns `SqlDaoError` if the backend rejects or fails the statement.
    pub fn execute_dml(
        &mut self,
        query: &str,
        kind: StatementKind,
        params: &[Param],
    ) -> Result<usize, SqlDaoError> {
        match self {
            #[cfg(feature = "sqlite")]
            StoreConnection::Sqlite(conn) => conn.execute_dml(query, kind, params),
            #[cfg(feature = "mssql")]
            StoreConnection::Mssql(conn) => conn.execute_dml(query, kind, params),
        }
    }

    /// Run a query and return its first result set.
    ///
    /// # Errors
    /// Returns `SqlDaoError` if the backend rejects or fails the query.
    pub fn execute_select(
        &mut self,
        query: &str,
        kind: StatementKind,
        params: &[Param],
    ) -> Result<ResultSet, SqlDaoError> {
        match self {
            #[cfg(feature = "sqlite")]
            StoreConnection::Sqlite(conn) => conn.execute_select(query, kind, params),
            #[cfg(feature = "mssql")]
            StoreConnection::Mssql(conn) => conn.execute_select(query, kind, params),
        }
    }

    /// Run a query and return every result set it produced.
    ///
    /// # Errors
    /// Returns `SqlDaoError` if the backend rejects or fails the query.
    pub fn execute_tabular(
        &mut self,
        query: &str,
        kind: StatementKind,
        params: &[Param],
    ) -> Result<DataSet, SqlDaoError> {
        match self {
            #[cfg(feature = "sqlite")]
            StoreConnection::Sqlite(conn) => conn.execute_tabular(query, kind, params),
            #[cfg(feature = "mssql")]
            StoreConnection::Mssql(conn) => conn.execute_tabular(query, kind, params),
        }
    }

    /// # Errors
    /// Returns `SqlDaoError` if a transaction is already open or BEGIN fails.
    pub fn begin(&mut self) -> Result<(), SqlDaoError> {
        match self {
            #[cfg(feature = "sqlite")]
            StoreConnection::Sqlite(conn) => conn.begin(),
            #[cfg(feature = "mssql")]
            StoreConnection::Mssql(conn) => conn.begin(),
        }
    }

    /// # Errors
    /// Returns `SqlDaoError` if no transaction is open or COMMIT fails.
    pub fn commit(&mut self) -> Result<(), SqlDaoError> {
        match self {
            #[cfg(feature = "sqlite")]
            StoreConnection::Sqlite(conn) => conn.commit(),
            #[cfg(feature = "mssql")]
            StoreConnection::Mssql(conn) => conn.commit(),
        }
    }

    /// # Errors
    /// Returns `SqlDaoError` if no transaction is open or ROLLBACK fails.
    pub fn rollback(&mut self) -> Result<(), SqlDaoError> {
        match self {
            #[cfg(feature = "sqlite")]
            StoreConnection::Sqlite(conn) => conn.rollback(),
            #[cfg(feature = "mssql")]
            StoreConnection::Mssql(conn) => conn.rollback(),
        }
    }

    /// Release the connection.
    ///
    /// # Errors
    /// Returns `SqlDaoError` if the driver reports a failure while closing.
    pub fn close(self) -> Result<(), SqlDaoError> {
        match self {
            #[cfg(feature = "sqlite")]
            StoreConnection::Sqlite(conn) => conn.close(),
            #[cfg(feature = "mssql")]
            StoreConnection::Mssql(conn) => conn.close(),
        }
    }
}

impl fmt::Debug for StoreConnection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            #[cfg(feature = "sqlite")]
            Self::Sqlite(conn) => f.debug_tuple("Sqlite").field(conn).finish(),
            #[cfg(feature = "mssql")]
            Self::Mssql(conn) => f.debug_tuple("Mssql").field(conn).finish(),
        }
    }
}
