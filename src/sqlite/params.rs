use rusqlite::Statement;

use crate::error::SqlDaoError;
use crate::params::Param;
use crate::types::RowValues;

/// Convert a single `RowValue` to a rusqlite `Value`.
#[must_use]
pub fn row_value_to_sqlite_value(value: &RowValues) -> rusqlite::types::Value {
    match value {
        RowValues::Int(i) => rusqlite::types::Value::Integer(*i),
        RowValues::Float(f) => rusqlite::types::Value::Real(*f),
        RowValues::Text(s) => rusqlite::types::Value::Text(s.clone()),
        RowValues::Bool(b) => rusqlite::types::Value::Integer(i64::from(*b)),
        RowValues::Timestamp(dt) => {
            rusqlite::types::Value::Text(dt.format("%F %T%.f").to_string())
        }
        RowValues::Null => rusqlite::types::Value::Null,
        RowValues::JSON(jval) => rusqlite::types::Value::Text(jval.to_string()),
        RowValues::Blob(bytes) => rusqlite::types::Value::Blob(bytes.clone()),
    }
}

/// Bind named parameters onto a prepared statement.
///
/// `SQLite` understands `@name` natively. A parameter the statement does not
/// reference is skipped; a placeholder nobody binds stays NULL.
///
/// # Errors
/// Returns `SqlDaoError::Unimplemented` for output parameters and propagates
/// binding failures from rusqlite.
pub fn bind_named(stmt: &mut Statement<'_>, params: &[Param]) -> Result<(), SqlDaoError> {
    for param in params {
        if !param.direction.sends_value() {
            return Err(SqlDaoError::Unimplemented(format!(
                "SQLite cannot return {:?} parameter {}",
                param.direction, param.name
            )));
        }
        let name = Param::placeholder(param.bare_name());
        if let Some(idx) = stmt.parameter_index(&name)? {
            tracing::trace!(
                param = %name,
                index = idx,
                value = ?param.bound_value(),
                "binding sqlite parameter"
            );
            let value = row_value_to_sqlite_value(param.bound_value());
            stmt.raw_bind_parameter(idx, value)?;
        }
    }
    Ok(())
}
