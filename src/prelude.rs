//! Convenient imports for common functionality.
//!
//! This module re-exports the most commonly used types and functions
//! to make it easier to get started with the library.

pub use crate::config::StoreConfig;
pub use crate::dao::Dao;
pub use crate::entity;
pub use crate::entity::{Entity, FieldKind, FieldValue};
pub use crate::error::SqlDaoError;
pub use crate::params::{Param, ParamDirection};
pub use crate::query_builder::QueryAndParams;
pub use crate::results::{CustomDbRow, DataSet, ResultSet};
pub use crate::session::{Command, Session};
pub use crate::types::{DatabaseType, RowValues, StatementKind};

#[cfg(feature = "mssql")]
pub use crate::mssql::{MssqlOptions, MssqlOptionsBuilder};
#[cfg(feature = "sqlite")]
pub use crate::sqlite::{SqliteOptions, SqliteOptionsBuilder};
