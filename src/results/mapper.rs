use crate::entity::Entity;
use crate::error::SqlDaoError;

use super::{CustomDbRow, ResultSet};

/// Build one entity from a row.
///
/// Each column is matched to a field ignoring ASCII case. A column without a field
/// fails the whole read; a NULL column leaves an optional field empty.
///
/// # Errors
/// - `SqlDaoError::MappingError` for a column with no matching field
/// - `SqlDaoError::TypeMismatch` when a value does not fit its field
pub fn map_row<E: Entity>(row: &CustomDbRow) -> Result<E, SqlDaoError> {
    let mut entity = E::default();
    for (column, value) in row.columns() {
        let field = E::field_for_column(column).ok_or_else(|| SqlDaoError::MappingError {
            column: column.to_string(),
            entity: E::TYPE_NAME,
        })?;
        (field.set)(&mut entity, value.clone()).map_err(|found| SqlDaoError::TypeMismatch {
            entity: E::TYPE_NAME,
            field: field.name,
            expected: field.kind,
            found: found.type_name(),
        })?;
    }
    Ok(entity)
}

/// Map every row of a result set, preserving row order.
///
/// # Errors
/// Returns the first mapping failure; no partial list is returned.
pub fn map_rows<E: Entity>(result_set: ResultSet) -> Result<Vec<E>, SqlDaoError> {
    let mut entities = Vec::with_capacity(result_set.results.len());
    for row in &result_set.results {
        entities.push(map_row::<E>(row)?);
    }
    Ok(entities)
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::entity;
    use crate::types::RowValues;

    entity! {
        #[derive(Debug, Default, PartialEq)]
        pub struct Topic {
            pub TopicId: Option<i32>,
            pub Subject: Option<String>,
            pub Replies: i64,
        }
    }

    fn result_set(columns: &[&str], rows: Vec<Vec<RowValues>>) -> ResultSet {
        let mut rs = ResultSet::with_capacity(rows.len());
        rs.set_column_names(Arc::new(columns.iter().map(|c| (*c).to_string()).collect()));
        for row in rows {
            rs.add_row_values(row);
        }
        rs
    }

    #[test]
    fn maps_rows_in_order_ignoring_column_case() {
        let rs = result_set(
            &["topicid", "SUBJECT", "Replies"],
            vec![
                vec![
                    RowValues::Int(1),
                    RowValues::Text("first".into()),
                    RowValues::Int(4),
                ],
                vec![RowValues::Int(2), RowValues::Null, RowValues::Int(0)],
            ],
        );
        let topics: Vec<Topic> = map_rows(rs).unwrap();
        assert_eq!(
            topics,
            vec![
                Topic {
                    TopicId: Some(1),
                    Subject: Some("first".into()),
                    Replies: 4,
                },
                Topic {
                    TopicId: Some(2),
                    Subject: None,
                    Replies: 0,
                },
            ]
        );
    }

    #[test]
    fn unmatched_column_is_a_mapping_error() {
        let rs = result_set(
            &["TopicId", "Author"],
            vec![vec![RowValues::Int(1), RowValues::Text("x".into())]],
        );
        match map_rows::<Topic>(rs) {
            Err(SqlDaoError::MappingError { column, entity }) => {
                assert_eq!(column, "Author");
                assert_eq!(entity, "Topic");
            }
            other => panic!("expected mapping error, got {other:?}"),
        }
    }

    #[test]
    fn null_into_required_field_is_a_type_mismatch() {
        let rs = result_set(&["Replies"], vec![vec![RowValues::Null]]);
        let err = map_rows::<Topic>(rs).unwrap_err();
        assert!(matches!(
            err,
            SqlDaoError::TypeMismatch {
                field: "Replies",
                found: "null",
                ..
            }
        ));
    }
}
