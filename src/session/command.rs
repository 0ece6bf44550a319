use crate::error::SqlDaoError;
use crate::params::Param;
use crate::results::{DataSet, ResultSet};
use crate::store::StoreConnection;
use crate::types::{RowValues, StatementKind};

/// One configured statement, ready to run on a live connection.
///
/// Created per call by [`Session::execute`](crate::Session::execute); the
/// parameters are already bound and belong to this command alone.
#[derive(Debug)]
pub struct Command<'a> {
    conn: &'a mut StoreConnection,
    sql: &'a str,
    kind: StatementKind,
    params: Vec<Param>,
}

impl<'a> Command<'a> {
    pub(crate) fn new(
        conn: &'a mut StoreConnection,
        sql: &'a str,
        kind: StatementKind,
        params: Vec<Param>,
    ) -> Self {
        Self {
            conn,
            sql,
            kind,
            params,
        }
    }

    #[must_use]
    pub fn sql(&self) -> &str {
        self.sql
    }

    #[must_use]
    pub fn kind(&self) -> StatementKind {
        self.kind
    }

    #[must_use]
    pub fn params(&self) -> &[Param] {
        &self.params
    }

    /// Run the statement and return how many rows it changed.
    ///
    /// # Errors
    /// Returns `SqlDaoError` if the store fails the statement.
    pub fn execute_non_query(&mut self) -> Result<usize, SqlDaoError> {
        self.conn.execute_dml(self.sql, self.kind, &self.params)
    }

    /// First column of the first row, or `None` when no row came back.
    ///
    /// # Errors
    /// Returns `SqlDaoError` if the store fails the query.
    pub fn execute_scalar(&mut self) -> Result<Option<RowValues>, SqlDaoError> {
        let result_set = self.execute_result_set()?;
        Ok(result_set.scalar().cloned())
    }

    /// Run the query and return its first result set.
    ///
    /// # Errors
    /// Returns `SqlDaoError` if the store fails the query.
    pub fn execute_result_set(&mut self) -> Result<ResultSet, SqlDaoError> {
        self.conn.execute_select(self.sql, self.kind, &self.params)
    }

    /// Run the query and return every result set it produced.
    ///
    /// # Errors
    /// Returns `SqlDaoError` if the store fails the query.
    pub fn execute_tabular(&mut self) -> Result<DataSet, SqlDaoError> {
        self.conn.execute_tabular(self.sql, self.kind, &self.params)
    }
}
