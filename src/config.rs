use serde::{Deserialize, Serialize};

#[cfg(feature = "mssql")]
use crate::mssql::{MssqlOptions, MssqlOptionsBuilder};
#[cfg(feature = "sqlite")]
use crate::sqlite::{SqliteOptions, SqliteOptionsBuilder};

use crate::error::SqlDaoError;
use crate::store::StoreConnection;
use crate::types::DatabaseType;

/// Where a session connects.
///
/// The value is held by the session and every connection it opens is built from it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum StoreConfig {
    #[cfg(feature = "sqlite")]
    Sqlite(SqliteOptions),
    #[cfg(feature = "mssql")]
    Mssql(MssqlOptions),
}

impl StoreConfig {
    /// Start a fluent `SQLite` configuration for the database at `db_path`.
    #[cfg(feature = "sqlite")]
    #[must_use]
    pub fn sqlite_builder(db_path: impl Into<String>) -> SqliteOptionsBuilder {
        SqliteOptionsBuilder::new(db_path)
    }

    /// Start a fluent SQL Server configuration.
    #[cfg(feature = "mssql")]
    #[must_use]
    pub fn mssql_builder(
        server: String,
        database: String,
        user: String,
        password: String,
    ) -> MssqlOptionsBuilder {
        MssqlOptionsBuilder::new(server, database, user, password)
    }

    #[must_use]
    pub fn db_type(&self) -> DatabaseType {
        match self {
            #[cfg(feature = "sqlite")]
            StoreConfig::Sqlite(_) => DatabaseType::Sqlite,
            #[cfg(feature = "mssql")]
            StoreConfig::Mssql(_) => DatabaseType::Mssql,
        }
    }

    /// Open a new connection to the configured store.
    ///
    /// # Errors
    /// Returns `SqlDaoError::ConnectionError` (or the driver error) if the store
    /// cannot be reached.
    pub fn connect(&self) -> Result<StoreConnection, SqlDaoError> {
        match self {
            #[cfg(feature = "sqlite")]
            StoreConfig::Sqlite(opts) => {
                crate::sqlite::SqliteConnection::open(opts).map(StoreConnection::Sqlite)
            }
            #[cfg(feature = "mssql")]
            StoreConfig::Mssql(opts) => {
                crate::mssql::MssqlConnection::open(opts).map(StoreConnection::Mssql)
            }
        }
    }
}

#[cfg(feature = "sqlite")]
impl From<SqliteOptions> for StoreConfig {
    fn from(opts: SqliteOptions) -> Self {
        StoreConfig::Sqlite(opts)
    }
}

#[cfg(feature = "mssql")]
impl From<MssqlOptions> for StoreConfig {
    fn from(opts: MssqlOptions) -> Self {
        StoreConfig::Mssql(opts)
    }
}

#[cfg(all(test, feature = "sqlite"))]
mod tests {
    use super::*;

    #[test]
    fn sqlite_builder_produces_sqlite_config() {
        let config = StoreConfig::sqlite_builder("app.db")
            .busy_timeout_ms(250)
            .create_if_missing(false)
            .build();
        assert_eq!(config.db_type(), DatabaseType::Sqlite);
        let StoreConfig::Sqlite(opts) = &config else {
            panic!("expected sqlite config");
        };
        assert_eq!(opts.db_path, "app.db");
        assert_eq!(opts.busy_timeout_ms, 250);
        assert!(!opts.create_if_missing);
    }

    #[test]
    fn options_round_trip_through_json() {
        let config: StoreConfig = SqliteOptions::new("data/app.db").into();
        let json = serde_json::to_string(&config).unwrap();
        let back: StoreConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(back, config);
    }

    #[test]
    fn connect_fails_for_missing_file_without_create() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("absent.db");
        let config = StoreConfig::sqlite_builder(path.to_string_lossy())
            .create_if_missing(false)
            .build();
        let err = config.connect().unwrap_err();
        assert!(matches!(err, SqlDaoError::ConnectionError(_)));
    }
}
