use thiserror::Error;

#[cfg(feature = "sqlite")]
use rusqlite;
#[cfg(feature = "mssql")]
use tiberius;

use crate::entity::FieldKind;

#[derive(Debug, Error)]
pub enum SqlDaoError {
    #[cfg(feature = "sqlite")]
    #[error(transparent)]
    SqliteError(#[from] rusqlite::Error),

    #[cfg(feature = "mssql")]
    #[error(transparent)]
    MssqlError(#[from] tiberius::error::Error),

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Connection error: {0}")]
    ConnectionError(String),

    #[error("Parameter error: {0}")]
    ParameterError(String),

    #[error("SQL execution error: {0}")]
    ExecutionError(String),

    /// A result column has no field of the same name (case-insensitive) on the entity.
    #[error("column `{column}` has no matching field on entity `{entity}`")]
    MappingError { column: String, entity: &'static str },

    /// A column value could not be stored in the entity field it maps to.
    #[error("field `{entity}.{field}` expects {expected:?} but the store returned {found}")]
    TypeMismatch {
        entity: &'static str,
        field: &'static str,
        expected: FieldKind,
        found: &'static str,
    },

    #[error("Transaction state error: {0}")]
    TransactionStateError(String),

    #[error("key field `{key}` is not populated on entity `{entity}`")]
    MissingKey { entity: &'static str, key: String },

    #[error("entity `{entity}` has no field named `{field}`")]
    UnknownField { entity: &'static str, field: String },

    #[error("refusing to delete from `{entity}` without any populated filter field")]
    EmptyFilter { entity: &'static str },

    #[error("{operation} on `{entity}` has no populated fields to write")]
    NothingToWrite {
        entity: &'static str,
        operation: &'static str,
    },

    #[error("Unimplemented feature: {0}")]
    Unimplemented(String),
}
