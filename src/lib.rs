//! Entity-driven data access for `SQLite` and SQL Server.
//!
//! Declare a record with [`entity!`]; its type name is the table and its field
//! names are the columns. [`Session`] (or the typed [`Dao`]) then derives
//! INSERT / UPDATE / DELETE / SELECT statements from whichever fields are
//! populated, runs raw SQL with named `@param` placeholders, maps rows back onto
//! entities, and pins one connection for the length of a transaction.
//!
//! A field is populated when it holds a value that is not NULL and, for numeric
//! fields, not zero.

pub mod config;
pub mod dao;
pub mod entity;
pub mod error;
#[cfg(feature = "mssql")]
pub mod mssql;
pub mod params;
pub mod prelude;
pub mod query_builder;
pub mod results;
pub mod session;
#[cfg(feature = "sqlite")]
pub mod sqlite;
pub mod store;
pub mod translation;
pub mod types;

pub use config::StoreConfig;
pub use dao::Dao;
pub use error::SqlDaoError;
pub use params::{Param, ParamDirection};
pub use query_builder::QueryAndParams;
pub use results::{CustomDbRow, DataSet, ResultSet};
pub use session::{Command, Session};
pub use store::StoreConnection;
pub use types::{DatabaseType, RowValues, StatementKind};
