#![cfg(feature = "sqlite")]

mod common;

use common::{User, test_db, user};
use sql_dao::prelude::*;

entity! {
    #[derive(Debug, Default, Clone, PartialEq)]
    pub struct Score {
        pub ScoreId: i64,
        pub Points: i64,
    }
}

#[test]
fn unmatched_column_fails_the_read() -> Result<(), Box<dyn std::error::Error>> {
    let db = test_db("map_unmatched")?;
    let mut users = db.dao::<User>();
    assert!(users.add(&user("henry"))?);

    let err = users
        .execute_reader("SELECT UserId, 1 AS Extra FROM [User]", &[], StatementKind::Text)
        .unwrap_err();
    match err {
        SqlDaoError::MappingError { column, entity } => {
            assert_eq!(column, "Extra");
            assert_eq!(entity, "User");
        }
        other => panic!("unexpected error: {other:?}"),
    }
    Ok(())
}

#[test]
fn columns_match_fields_ignoring_case() -> Result<(), Box<dyn std::error::Error>> {
    let db = test_db("map_case")?;
    let mut users = db.dao::<User>();
    assert!(users.add(&User { Age: Some(7), ..user("ivy") })?);

    let found = users.execute_reader(
        "SELECT username AS username, AGE AS AGE FROM [User]",
        &[],
        StatementKind::Text,
    )?;
    assert_eq!(found.len(), 1);
    assert_eq!(found[0].UserName.as_deref(), Some("ivy"));
    assert_eq!(found[0].Age, Some(7));
    // Columns that were not selected stay empty.
    assert_eq!(found[0].UserId, None);
    Ok(())
}

#[test]
fn rows_keep_store_order() -> Result<(), Box<dyn std::error::Error>> {
    let db = test_db("map_order")?;
    let mut users = db.dao::<User>();
    for (name, age) in [("a", 3), ("b", 1), ("c", 2)] {
        assert!(users.add(&User { Age: Some(age), ..user(name) })?);
    }

    let found = users.execute_reader(
        "SELECT UserName, Age FROM [User] ORDER BY Age DESC",
        &[],
        StatementKind::Text,
    )?;
    let names: Vec<_> = found.iter().filter_map(|u| u.UserName.as_deref()).collect();
    assert_eq!(names, ["a", "c", "b"]);
    Ok(())
}

#[test]
fn null_into_required_field_is_a_type_mismatch() -> Result<(), Box<dyn std::error::Error>> {
    let db = test_db("map_null")?;
    let mut session = db.session();
    session.execute_non_query(
        "CREATE TABLE [Score] (ScoreId INTEGER PRIMARY KEY, Points INTEGER)",
        &[],
        StatementKind::Text,
    )?;
    session.execute_non_query(
        "INSERT INTO [Score] (ScoreId, Points) VALUES (@ScoreId, @Points)",
        &[
            Param::input("@ScoreId", RowValues::Int(1)),
            Param::input("@Points", None),
        ],
        StatementKind::Text,
    )?;

    let err = session.query(&Score::default()).unwrap_err();
    match err {
        SqlDaoError::TypeMismatch {
            entity,
            field,
            expected,
            found,
        } => {
            assert_eq!(entity, "Score");
            assert_eq!(field, "Points");
            assert_eq!(expected, FieldKind::Int);
            assert_eq!(found, "null");
        }
        other => panic!("unexpected error: {other:?}"),
    }
    Ok(())
}

#[test]
fn required_fields_map_when_present() -> Result<(), Box<dyn std::error::Error>> {
    let db = test_db("map_required")?;
    let mut session = db.session();
    session.execute_non_query(
        "CREATE TABLE [Score] (ScoreId INTEGER PRIMARY KEY, Points INTEGER)",
        &[],
        StatementKind::Text,
    )?;
    assert!(session.add(&Score {
        ScoreId: 5,
        Points: 12,
    })?);

    let found = session.query(&Score {
        ScoreId: 5,
        ..Score::default()
    })?;
    assert_eq!(found, [Score { ScoreId: 5, Points: 12 }]);
    Ok(())
}
