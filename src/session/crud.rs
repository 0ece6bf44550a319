use tracing::debug;

use super::Session;
use crate::entity::Entity;
use crate::error::SqlDaoError;
use crate::params::Param;
use crate::query_builder::{
    delete_statement, insert_statement, select_statement, update_statement,
};
use crate::results::{DataSet, map_rows};
use crate::types::{RowValues, StatementKind};

impl Session {
    /// Run a statement and return the affected-row count.
    ///
    /// # Errors
    /// Returns `SqlDaoError` if the connection or the statement fails.
    pub fn execute_non_query(
        &mut self,
        sql: &str,
        params: &[Param],
        kind: StatementKind,
    ) -> Result<usize, SqlDaoError> {
        self.execute(sql, params, kind, |cmd| cmd.execute_non_query())
    }

    /// Run a query and return the first column of its first row.
    ///
    /// # Errors
    /// Returns `SqlDaoError` if the connection or the query fails.
    pub fn execute_scalar(
        &mut self,
        sql: &str,
        params: &[Param],
        kind: StatementKind,
    ) -> Result<Option<RowValues>, SqlDaoError> {
        self.execute(sql, params, kind, |cmd| cmd.execute_scalar())
    }

    /// Run a query and map each row onto a fresh `E`.
    ///
    /// # Errors
    /// Returns `SqlDaoError::MappingError` if a column has no matching field,
    /// `SqlDaoError::TypeMismatch` if a value does not fit its field, or the
    /// connection/query error.
    pub fn execute_reader<E: Entity>(
        &mut self,
        sql: &str,
        params: &[Param],
        kind: StatementKind,
    ) -> Result<Vec<E>, SqlDaoError> {
        self.execute(sql, params, kind, |cmd| map_rows(cmd.execute_result_set()?))
    }

    /// Run a query and return all of its result sets as raw rows.
    ///
    /// # Errors
    /// Returns `SqlDaoError` if the connection or the query fails.
    pub fn execute_tabular(
        &mut self,
        sql: &str,
        params: &[Param],
        kind: StatementKind,
    ) -> Result<DataSet, SqlDaoError> {
        self.execute(sql, params, kind, |cmd| cmd.execute_tabular())
    }

    /// Insert `entity`, writing only its populated fields.
    ///
    /// Returns `false` unless exactly one row was inserted.
    ///
    /// # Errors
    /// Returns `SqlDaoError::NothingToWrite` if no field is populated, or the
    /// connection/statement error.
    pub fn add<E: Entity>(&mut self, entity: &E) -> Result<bool, SqlDaoError> {
        let statement = insert_statement(entity)?;
        let affected =
            self.execute_non_query(&statement.query, &statement.params, StatementKind::Text)?;
        Ok(check_affected::<E>("add", affected, affected == 1))
    }

    /// Delete every row matching the populated fields of `filter`.
    ///
    /// Returns `false` when nothing was deleted.
    ///
    /// # Errors
    /// Returns `SqlDaoError::EmptyFilter` if no field is populated, or the
    /// connection/statement error.
    pub fn delete<E: Entity>(&mut self, filter: &E) -> Result<bool, SqlDaoError> {
        let statement = delete_statement(filter)?;
        let affected =
            self.execute_non_query(&statement.query, &statement.params, StatementKind::Text)?;
        Ok(check_affected::<E>("delete", affected, affected > 0))
    }

    /// Update the row whose `key` column equals the entity's key value.
    ///
    /// Only populated non-key fields are written; the rest of the row is left as is.
    /// Returns `false` unless exactly one row was updated.
    ///
    /// # Errors
    /// Returns `SqlDaoError::UnknownField`, `MissingKey` or `NothingToWrite` when the
    /// statement cannot be built, or the connection/statement error.
    pub fn update<E: Entity>(&mut self, entity: &E, key: &str) -> Result<bool, SqlDaoError> {
        let statement = update_statement(entity, key)?;
        let affected =
            self.execute_non_query(&statement.query, &statement.params, StatementKind::Text)?;
        Ok(check_affected::<E>("update", affected, affected == 1))
    }

    /// Select every row matching the populated fields of `filter`.
    ///
    /// A filter with nothing populated selects the whole table.
    ///
    /// # Errors
    /// Same as [`Session::execute_reader`].
    pub fn query<E: Entity>(&mut self, filter: &E) -> Result<Vec<E>, SqlDaoError> {
        let statement = select_statement(filter);
        self.execute_reader(&statement.query, &statement.params, StatementKind::Text)
    }
}

fn check_affected<E: Entity>(operation: &'static str, affected: usize, ok: bool) -> bool {
    if !ok {
        debug!(
            entity = E::TYPE_NAME,
            operation,
            affected,
            "Affected row count did not match"
        );
    }
    ok
}
