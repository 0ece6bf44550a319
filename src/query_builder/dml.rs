use crate::entity::{Entity, is_populated, populated_fields};
use crate::error::SqlDaoError;
use crate::params::Param;

use super::{QueryAndParams, conjunction, quote_ident, to_param};

/// `INSERT INTO [T] ([a],[b]) VALUES (@a,@b)` over the populated fields.
///
/// # Errors
/// Returns `SqlDaoError::NothingToWrite` when no field is populated.
pub fn insert_statement<E: Entity>(entity: &E) -> Result<QueryAndParams, SqlDaoError> {
    let fields = populated_fields(entity);
    if fields.is_empty() {
        return Err(SqlDaoError::NothingToWrite {
            entity: E::TYPE_NAME,
            operation: "insert",
        });
    }

    let columns: Vec<String> = fields.iter().map(|f| quote_ident(f.name)).collect();
    let values: Vec<String> = fields.iter().map(|f| Param::placeholder(f.name)).collect();
    let query = format!(
        "INSERT INTO {} ({}) VALUES ({})",
        quote_ident(E::TYPE_NAME),
        columns.join(","),
        values.join(",")
    );

    Ok(QueryAndParams::new(
        query,
        fields.iter().map(to_param).collect(),
    ))
}

/// `DELETE FROM [T] WHERE [a]=@a AND [b]=@b`; every populated field is a filter.
///
/// # Errors
/// Returns `SqlDaoError::EmptyFilter` when no field is populated.
pub fn delete_statement<E: Entity>(entity: &E) -> Result<QueryAndParams, SqlDaoError> {
    let fields = populated_fields(entity);
    if fields.is_empty() {
        return Err(SqlDaoError::EmptyFilter {
            entity: E::TYPE_NAME,
        });
    }

    let query = format!(
        "DELETE FROM {} WHERE {}",
        quote_ident(E::TYPE_NAME),
        conjunction(&fields)
    );
    Ok(QueryAndParams::new(
        query,
        fields.iter().map(to_param).collect(),
    ))
}

/// `UPDATE [T] SET [a]=@a,[b]=@b WHERE [key]=@key`.
///
/// Populated non-key fields become SET targets; the key is the only predicate.
/// Parameters follow statement order, so the key comes last.
///
/// # Errors
/// - `SqlDaoError::UnknownField` if `key` is not a field of `E`
/// - `SqlDaoError::MissingKey` if the key field is not populated
/// - `SqlDaoError::NothingToWrite` if no other field is populated
pub fn update_statement<E: Entity>(entity: &E, key: &str) -> Result<QueryAndParams, SqlDaoError> {
    let key_field = E::field(key).ok_or_else(|| SqlDaoError::UnknownField {
        entity: E::TYPE_NAME,
        field: key.to_string(),
    })?;
    let key_value = (key_field.get)(entity);
    if !is_populated(key_value.as_ref()) {
        return Err(SqlDaoError::MissingKey {
            entity: E::TYPE_NAME,
            key: key.to_string(),
        });
    }

    let targets: Vec<_> = populated_fields(entity)
        .into_iter()
        .filter(|f| f.name != key_field.name)
        .collect();
    if targets.is_empty() {
        return Err(SqlDaoError::NothingToWrite {
            entity: E::TYPE_NAME,
            operation: "update",
        });
    }

    let assignments: Vec<String> = targets
        .iter()
        .map(|f| format!("{}={}", quote_ident(f.name), Param::placeholder(f.name)))
        .collect();
    let query = format!(
        "UPDATE {} SET {} WHERE {}={}",
        quote_ident(E::TYPE_NAME),
        assignments.join(","),
        quote_ident(key_field.name),
        Param::placeholder(key_field.name)
    );

    let mut params: Vec<Param> = targets.iter().map(to_param).collect();
    params.push(Param::input(Param::placeholder(key_field.name), key_value));
    Ok(QueryAndParams::new(query, params))
}
