use tiberius::Query;
use tokio::runtime::{Builder, Runtime};

use super::client::{MssqlClient, create_mssql_client};
use super::config::MssqlOptions;
use super::params::{bind_query_params, positional_command};
use super::query::build_data_set;
use crate::error::SqlDaoError;
use crate::params::Param;
use crate::results::{DataSet, ResultSet};
use crate::types::StatementKind;

/// A blocking SQL Server connection.
///
/// tiberius is async, so each connection carries a current-thread runtime and
/// drives every call to completion before returning.
pub struct MssqlConnection {
    runtime: Runtime,
    client: MssqlClient,
    in_transaction: bool,
}

impl MssqlConnection {
    /// Connect with the given options.
    ///
    /// # Errors
    /// Returns `SqlDaoError::ConnectionError` if the runtime cannot be built or the
    /// server is unreachable.
    pub fn open(opts: &MssqlOptions) -> Result<Self, SqlDaoError> {
        let runtime = Builder::new_current_thread()
            .enable_all()
            .build()
            .map_err(|e| SqlDaoError::ConnectionError(format!("Failed to build runtime: {e}")))?;
        let client = runtime.block_on(create_mssql_client(opts))?;
        Ok(Self {
            runtime,
            client,
            in_transaction: false,
        })
    }

    /// Execute a statement and return the total rows affected.
    ///
    /// # Errors
    /// Returns `SqlDaoError` if execution fails or the count does not fit `usize`.
    pub fn execute_dml(
        &mut self,
        query: &str,
        kind: StatementKind,
        params: &[Param],
    ) -> Result<usize, SqlDaoError> {
        let command = positional_command(query, kind, params)?;
        let query_builder = bind_query_params(&command, params);
        let Self { runtime, client, .. } = self;
        let exec_result = runtime.block_on(query_builder.execute(client))?;

        let rows_affected: u64 = exec_result.rows_affected().iter().sum();
        usize::try_from(rows_affected).map_err(|e| {
            SqlDaoError::ExecutionError(format!("Invalid rows affected count: {e}"))
        })
    }

    /// Execute a query and return its first result set.
    ///
    /// # Errors
    /// Same as [`MssqlConnection::execute_tabular`].
    pub fn execute_select(
        &mut self,
        query: &str,
        kind: StatementKind,
        params: &[Param],
    ) -> Result<ResultSet, SqlDaoError> {
        let data_set = self.execute_tabular(query, kind, params)?;
        Ok(data_set.tables.into_iter().next().unwrap_or_default())
    }

    /// Execute a query and return every result set it produced.
    ///
    /// # Errors
    /// Returns `SqlDaoError` if execution or row extraction fails.
    pub fn execute_tabular(
        &mut self,
        query: &str,
        kind: StatementKind,
        params: &[Param],
    ) -> Result<DataSet, SqlDaoError> {
        let command = positional_command(query, kind, params)?;
        let query_builder = bind_query_params(&command, params);
        let Self { runtime, client, .. } = self;
        runtime.block_on(async move {
            let stream = query_builder.query(client).await?;
            build_data_set(stream).await
        })
    }

    fn simple(&mut self, sql: &'static str) -> Result<(), SqlDaoError> {
        let Self { runtime, client, .. } = self;
        runtime.block_on(Query::new(sql).execute(client))?;
        Ok(())
    }

    /// Begin a transaction.
    ///
    /// # Errors
    /// Returns `SqlDaoError` if one is already active or the server rejects it.
    pub fn begin(&mut self) -> Result<(), SqlDaoError> {
        if self.in_transaction {
            return Err(SqlDaoError::TransactionStateError(
                "MSSQL transaction already in progress".into(),
            ));
        }
        self.simple("BEGIN TRANSACTION")?;
        self.in_transaction = true;
        Ok(())
    }

    /// Commit the transaction.
    ///
    /// # Errors
    /// Returns `SqlDaoError` if no transaction is active or commit fails.
    pub fn commit(&mut self) -> Result<(), SqlDaoError> {
        if !self.in_transaction {
            return Err(SqlDaoError::TransactionStateError(
                "MSSQL transaction not active".into(),
            ));
        }
        self.simple("COMMIT TRANSACTION")?;
        self.in_transaction = false;
        Ok(())
    }

    /// Roll back the transaction.
    ///
    /// # Errors
    /// Returns `SqlDaoError` if no transaction is active or rollback fails.
    pub fn rollback(&mut self) -> Result<(), SqlDaoError> {
        if !self.in_transaction {
            return Err(SqlDaoError::TransactionStateError(
                "MSSQL transaction not active".into(),
            ));
        }
        self.simple("ROLLBACK TRANSACTION")?;
        self.in_transaction = false;
        Ok(())
    }

    /// Close the connection gracefully.
    ///
    /// # Errors
    /// Returns `SqlDaoError` if the server does not acknowledge the close.
    pub fn close(self) -> Result<(), SqlDaoError> {
        let Self {
            runtime, client, ..
        } = self;
        runtime.block_on(client.close())?;
        Ok(())
    }
}

impl std::fmt::Debug for MssqlConnection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MssqlConnection")
            .field("client", &"<TiberiusClient>")
            .field("in_transaction", &self.in_transaction)
            .finish()
    }
}
