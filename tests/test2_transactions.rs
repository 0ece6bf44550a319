#![cfg(feature = "sqlite")]

mod common;

use common::{AuditLog, User, count_rows, test_db, user};
use sql_dao::prelude::*;

#[test]
fn rollback_discards_writes() -> Result<(), Box<dyn std::error::Error>> {
    let db = test_db("tx_rollback")?;
    let mut users = db.dao::<User>();

    users.begin_transaction()?;
    assert!(users.in_transaction());
    assert!(users.add(&user("ghost"))?);
    // Same pinned connection, so the uncommitted row is visible here.
    assert_eq!(users.query(&user("ghost"))?.len(), 1);
    users.rollback()?;
    assert!(!users.in_transaction());

    assert!(users.query(&user("ghost"))?.is_empty());
    Ok(())
}

#[test]
fn commit_persists_writes() -> Result<(), Box<dyn std::error::Error>> {
    let db = test_db("tx_commit")?;
    let mut users = db.dao::<User>();

    users.begin_transaction()?;
    assert!(users.add(&user("kept"))?);
    assert!(users.add(&user("also kept"))?);
    users.commit()?;

    let mut other = db.session();
    assert_eq!(count_rows(&mut other, "User")?, 2);
    Ok(())
}

#[test]
fn transaction_state_is_enforced() -> Result<(), Box<dyn std::error::Error>> {
    let db = test_db("tx_state")?;
    let mut session = db.session();

    assert!(matches!(
        session.commit(),
        Err(SqlDaoError::TransactionStateError(_))
    ));
    assert!(matches!(
        session.rollback(),
        Err(SqlDaoError::TransactionStateError(_))
    ));

    session.begin_transaction()?;
    assert!(matches!(
        session.begin_transaction(),
        Err(SqlDaoError::TransactionStateError(_))
    ));
    // The first transaction is still usable.
    assert!(session.in_transaction());
    session.rollback()?;

    assert!(matches!(
        session.rollback(),
        Err(SqlDaoError::TransactionStateError(_))
    ));
    Ok(())
}

#[test]
fn failed_statement_keeps_the_transaction_open() -> Result<(), Box<dyn std::error::Error>> {
    let db = test_db("tx_failure")?;
    let mut session = db.session();

    session.begin_transaction()?;
    assert!(session.add(&user("before"))?);
    let err = session.execute_non_query("INSERT INTO [Missing] (x) VALUES (1)", &[], StatementKind::Text);
    assert!(matches!(err, Err(SqlDaoError::SqliteError(_))));
    assert!(session.in_transaction());
    session.rollback()?;

    assert_eq!(count_rows(&mut session, "User")?, 0);
    Ok(())
}

#[test]
fn dropping_a_session_rolls_back() -> Result<(), Box<dyn std::error::Error>> {
    let db = test_db("tx_drop")?;
    {
        let mut users = db.dao::<User>();
        users.begin_transaction()?;
        assert!(users.add(&user("dropped"))?);
    }

    let mut session = db.session();
    assert_eq!(count_rows(&mut session, "User")?, 0);
    Ok(())
}

#[test]
fn one_transaction_spans_several_entity_types() -> Result<(), Box<dyn std::error::Error>> {
    let db = test_db("tx_shared")?;

    let mut users = db.dao::<User>();
    users.begin_transaction()?;
    assert!(users.add(&user("frank"))?);

    let mut audit: Dao<AuditLog> = users.retype();
    assert!(audit.in_transaction());
    assert!(audit.add(&AuditLog {
        UserName: Some("frank".into()),
        Action: Some("signup".into()),
        ..AuditLog::default()
    })?);
    audit.commit()?;

    let mut session = audit.into_session();
    assert_eq!(count_rows(&mut session, "User")?, 1);
    assert_eq!(count_rows(&mut session, "AuditLog")?, 1);
    Ok(())
}

#[test]
fn shared_transaction_rolls_back_every_table() -> Result<(), Box<dyn std::error::Error>> {
    let db = test_db("tx_shared_rollback")?;

    let mut session = db.session();
    session.begin_transaction()?;
    let mut users: Dao<User> = Dao::from_session(session);
    assert!(users.add(&user("gina"))?);
    let mut audit = users.retype::<AuditLog>();
    assert!(audit.add(&AuditLog {
        UserName: Some("gina".into()),
        Action: Some("signup".into()),
        ..AuditLog::default()
    })?);
    audit.rollback()?;

    let mut session = audit.into_session();
    assert_eq!(count_rows(&mut session, "User")?, 0);
    assert_eq!(count_rows(&mut session, "AuditLog")?, 0);
    Ok(())
}
