// MSSQL module - provides SQL Server-specific database functionality
//
// - config: Connection options
// - client: Raw client creation
// - params: Positional rewriting and binding of named parameters
// - query: Result extraction, one result set per server result
// - connection: Blocking execution and transaction control

pub mod client;
pub mod config;
pub mod connection;
pub mod params;
pub mod query;

// Re-export the public API
pub use client::{MssqlClient, create_mssql_client};
pub use config::{MssqlOptions, MssqlOptionsBuilder};
pub use connection::MssqlConnection;
pub use query::build_data_set;
