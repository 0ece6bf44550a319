use serde::{Deserialize, Serialize};

use crate::config::StoreConfig;

/// Options for opening `SQLite` connections.
///
/// Every call outside a transaction opens and closes its own connection, so the
/// database should live in a file: a plain `:memory:` database would start empty
/// on every call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SqliteOptions {
    pub db_path: String,
    /// How long a statement waits on a locked database before failing.
    pub busy_timeout_ms: u64,
    /// Create the database file when it does not exist.
    pub create_if_missing: bool,
}

impl SqliteOptions {
    #[must_use]
    pub fn new(db_path: impl Into<String>) -> Self {
        Self {
            db_path: db_path.into(),
            busy_timeout_ms: 5_000,
            create_if_missing: true,
        }
    }
}

/// Fluent builder for `SQLite` options.
#[derive(Debug, Clone)]
pub struct SqliteOptionsBuilder {
    opts: SqliteOptions,
}

impl SqliteOptionsBuilder {
    #[must_use]
    pub fn new(db_path: impl Into<String>) -> Self {
        Self {
            opts: SqliteOptions::new(db_path),
        }
    }

    #[must_use]
    pub fn busy_timeout_ms(mut self, busy_timeout_ms: u64) -> Self {
        self.opts.busy_timeout_ms = busy_timeout_ms;
        self
    }

    #[must_use]
    pub fn create_if_missing(mut self, create_if_missing: bool) -> Self {
        self.opts.create_if_missing = create_if_missing;
        self
    }

    #[must_use]
    pub fn finish(self) -> SqliteOptions {
        self.opts
    }

    /// Wrap the options in a [`StoreConfig`].
    #[must_use]
    pub fn build(self) -> StoreConfig {
        StoreConfig::Sqlite(self.finish())
    }
}
