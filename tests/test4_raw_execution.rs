#![cfg(feature = "sqlite")]

mod common;

use common::{User, count_rows, test_db, user};
use sql_dao::prelude::*;

const LOGIN: &str =
    "SELECT * FROM [User] WHERE [UserName]=@UserName AND [UserPassword]=@UserPassword";

#[test]
fn non_query_reports_affected_rows() -> Result<(), Box<dyn std::error::Error>> {
    let db = test_db("raw_non_query")?;
    let mut session = db.session();
    assert_eq!(session.config(), &db.config);
    assert_eq!(session.db_type(), DatabaseType::Sqlite);

    let inserted = session.execute_non_query(
        "INSERT INTO [User] (UserName, Age) VALUES ('a', 1), ('b', 2), ('c', 3)",
        &[],
        StatementKind::Text,
    )?;
    assert_eq!(inserted, 3);

    let updated = session.execute_non_query(
        "UPDATE [User] SET Age = Age + 1 WHERE Age >= @MinAge",
        &[Param::input("@MinAge", RowValues::Int(2))],
        StatementKind::Text,
    )?;
    assert_eq!(updated, 2);
    Ok(())
}

#[test]
fn scalar_returns_first_cell_or_none() -> Result<(), Box<dyn std::error::Error>> {
    let db = test_db("raw_scalar")?;
    let mut session = db.session();
    assert!(session.add(&User { Age: Some(33), ..user("jack") })?);

    let age = session.execute_scalar(
        "SELECT Age, UserName FROM [User] WHERE UserName=@UserName",
        &[Param::input("@UserName", RowValues::Text("jack".into()))],
        StatementKind::Text,
    )?;
    assert_eq!(age, Some(RowValues::Int(33)));

    let none = session.execute_scalar(
        "SELECT Age FROM [User] WHERE UserName='nobody'",
        &[],
        StatementKind::Text,
    )?;
    assert_eq!(none, None);
    Ok(())
}

#[test]
fn login_query_matches_only_the_right_password() -> Result<(), Box<dyn std::error::Error>> {
    let db = test_db("raw_login")?;
    let mut users = db.dao::<User>();
    assert!(users.add(&User {
        UserPassword: Some("hunter2".into()),
        ..user("kate")
    })?);

    let login = |password: &str| {
        vec![
            Param::input("@UserName", RowValues::Text("kate".into())),
            Param::input("@UserPassword", RowValues::Text(password.into())),
        ]
    };

    let hit = users.execute_reader(LOGIN, &login("hunter2"), StatementKind::Text)?;
    assert_eq!(hit.len(), 1);
    assert_eq!(hit[0].UserName.as_deref(), Some("kate"));

    let miss = users.execute_reader(LOGIN, &login("wrong"), StatementKind::Text)?;
    assert!(miss.is_empty());
    Ok(())
}

#[test]
fn null_parameters_are_sent_as_null() -> Result<(), Box<dyn std::error::Error>> {
    let db = test_db("raw_null")?;
    let mut session = db.session();
    session.execute_non_query(
        "INSERT INTO [User] (UserName, UserPassword) VALUES (@UserName, @UserPassword)",
        &[
            Param::input("@UserName", RowValues::Text("liam".into())),
            Param::input("@UserPassword", None),
        ],
        StatementKind::Text,
    )?;

    let nulls = session.execute_scalar(
        "SELECT COUNT(*) FROM [User] WHERE UserPassword IS NULL",
        &[],
        StatementKind::Text,
    )?;
    assert_eq!(nulls, Some(RowValues::Int(1)));
    Ok(())
}

#[test]
fn tabular_results_keep_column_names() -> Result<(), Box<dyn std::error::Error>> {
    let db = test_db("raw_tabular")?;
    let mut session = db.session();
    assert!(session.add(&User { Age: Some(8), ..user("mia") })?);
    assert!(session.add(&User { Age: Some(9), ..user("noah") })?);

    let data = session.execute_tabular(
        "SELECT UserName, Age FROM [User] ORDER BY UserName",
        &[],
        StatementKind::Text,
    )?;
    assert_eq!(data.len(), 1);
    let table = data.table(0).ok_or("missing table")?;
    let columns = table.get_column_names().ok_or("missing columns")?;
    assert_eq!(columns.as_slice(), ["UserName", "Age"]);
    assert_eq!(table.rows_affected, 2);
    assert_eq!(
        table.results[1].get("age"),
        Some(&RowValues::Int(9))
    );
    assert_eq!(
        table.results[0].get("UserName").and_then(RowValues::as_text),
        Some("mia")
    );
    Ok(())
}

#[test]
fn custom_steps_run_against_the_configured_command() -> Result<(), Box<dyn std::error::Error>> {
    let db = test_db("raw_custom")?;
    let mut session = db.session();
    for (name, age) in [("o", 10), ("p", 20), ("q", 30)] {
        assert!(session.add(&User { Age: Some(age), ..user(name) })?);
    }

    let total = session.execute(
        "SELECT Age FROM [User] WHERE Age > @Floor",
        &[Param::input("@Floor", RowValues::Int(15))],
        StatementKind::Text,
        |cmd| {
            assert_eq!(cmd.params().len(), 1);
            let rows = cmd.execute_result_set()?;
            Ok(rows
                .results
                .iter()
                .filter_map(|r| r.get_by_index(0).and_then(RowValues::as_int).copied())
                .sum::<i64>())
        },
    )?;
    assert_eq!(total, 50);
    Ok(())
}

#[test]
fn unsupported_commands_are_reported() -> Result<(), Box<dyn std::error::Error>> {
    let db = test_db("raw_unsupported")?;
    let mut session = db.session();

    let err = session
        .execute_non_query("dbo.DoThing", &[], StatementKind::StoredProcedure)
        .unwrap_err();
    assert!(matches!(err, SqlDaoError::Unimplemented(_)));

    let out = Param::with_direction("@Total", None, ParamDirection::Output);
    let err = session
        .execute_scalar("SELECT COUNT(*) FROM [User]", &[out], StatementKind::Text)
        .unwrap_err();
    assert!(matches!(err, SqlDaoError::Unimplemented(_)));

    // Failures release the connection; the session is still usable.
    assert_eq!(count_rows(&mut session, "User")?, 0);
    Ok(())
}
