// SQLite module - provides SQLite-specific database functionality
//
// - config: Connection options
// - params: Conversion and named binding of parameters
// - query: Result extraction and building
// - connection: Statement execution and transaction control

pub mod config;
pub mod connection;
pub mod params;
pub mod query;

// Re-export the public API
pub use config::{SqliteOptions, SqliteOptionsBuilder};
pub use connection::SqliteConnection;
pub use query::build_result_set;
