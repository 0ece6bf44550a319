#![allow(dead_code)]

use chrono::NaiveDateTime;
use sql_dao::prelude::*;
use tempfile::TempDir;

entity! {
    #[derive(Debug, Default, Clone, PartialEq)]
    pub struct User {
        pub UserId: Option<i64>,
        pub UserName: Option<String>,
        pub UserPassword: Option<String>,
        pub Age: Option<i64>,
        pub IsActive: Option<bool>,
        pub CreatedAt: Option<NaiveDateTime>,
    }
}

entity! {
    #[derive(Debug, Default, Clone, PartialEq)]
    pub struct AuditLog {
        pub AuditLogId: Option<i64>,
        pub UserName: Option<String>,
        pub Action: Option<String>,
    }
}

const SCHEMA: &[&str] = &[
    "CREATE TABLE [User] (
        UserId INTEGER PRIMARY KEY AUTOINCREMENT,
        UserName TEXT NOT NULL,
        UserPassword TEXT,
        Age INTEGER,
        IsActive INTEGER,
        CreatedAt TEXT
    )",
    "CREATE TABLE [AuditLog] (
        AuditLogId INTEGER PRIMARY KEY AUTOINCREMENT,
        UserName TEXT NOT NULL,
        Action TEXT NOT NULL
    )",
];

/// A file-backed database that lives as long as the value.
pub struct TestDb {
    _dir: TempDir,
    pub config: StoreConfig,
}

impl TestDb {
    pub fn session(&self) -> Session {
        Session::new(self.config.clone())
    }

    pub fn dao<E: Entity>(&self) -> Dao<E> {
        Dao::new(self.config.clone())
    }
}

pub fn test_db(name: &str) -> Result<TestDb, Box<dyn std::error::Error>> {
    let dir = tempfile::tempdir()?;
    let path = dir.path().join(format!("{name}.db"));
    let config = StoreConfig::sqlite_builder(path.to_string_lossy()).build();

    let mut session = Session::new(config.clone());
    for ddl in SCHEMA {
        session.execute_non_query(ddl, &[], StatementKind::Text)?;
    }

    Ok(TestDb { _dir: dir, config })
}

pub fn user(name: &str) -> User {
    User {
        UserName: Some(name.to_string()),
        ..User::default()
    }
}

pub fn count_rows(session: &mut Session, table: &str) -> Result<i64, SqlDaoError> {
    let sql = format!("SELECT COUNT(*) FROM [{table}]");
    let value = session.execute_scalar(&sql, &[], StatementKind::Text)?;
    Ok(value.and_then(|v| v.as_int().copied()).unwrap_or_default())
}
