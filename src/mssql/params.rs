use std::borrow::Cow;

use tiberius::Query;

use crate::error::SqlDaoError;
use crate::params::Param;
use crate::translation::translate_named_placeholders;
use crate::types::{RowValues, StatementKind};

/// Turn command text plus named parameters into the positional form tiberius binds.
///
/// Text statements get their `@name` placeholders rewritten to `@P<n>`; a stored
/// procedure name becomes `EXEC name @a=@P1, @b=@P2`.
///
/// # Errors
/// Returns `SqlDaoError::Unimplemented` for output parameters.
pub fn positional_command<'a>(
    query: &'a str,
    kind: StatementKind,
    params: &[Param],
) -> Result<Cow<'a, str>, SqlDaoError> {
    if let Some(p) = params.iter().find(|p| !p.direction.sends_value()) {
        return Err(SqlDaoError::Unimplemented(format!(
            "SQL Server {:?} parameter {} is not supported",
            p.direction, p.name
        )));
    }

    match kind {
        StatementKind::Text => {
            let names: Vec<&str> = params.iter().map(|p| p.name.as_str()).collect();
            Ok(translate_named_placeholders(query, &names))
        }
        StatementKind::StoredProcedure => {
            let args: Vec<String> = params
                .iter()
                .enumerate()
                .map(|(i, p)| format!("{}=@P{}", Param::placeholder(p.bare_name()), i + 1))
                .collect();
            if args.is_empty() {
                Ok(Cow::Owned(format!("EXEC {query}")))
            } else {
                Ok(Cow::Owned(format!("EXEC {query} {}", args.join(", "))))
            }
        }
    }
}

/// Bind parameters directly to the query for SQL Server
pub fn bind_query_params<'a>(query: &'a str, params: &[Param]) -> Query<'a> {
    let mut query_builder = Query::new(query);

    for (pos, param) in params.iter().enumerate() {
        tracing::trace!(
            param = %param.name,
            position = pos + 1,
            value = ?param.bound_value(),
            "binding mssql parameter"
        );
        match param.bound_value() {
            RowValues::Int(i) => query_builder.bind(*i),
            RowValues::Float(f) => query_builder.bind(*f),
            RowValues::Text(s) => query_builder.bind(s.clone()),
            RowValues::Bool(b) => query_builder.bind(*b),
            RowValues::Timestamp(dt) => {
                query_builder.bind(dt.format("%Y-%m-%dT%H:%M:%S%.f").to_string());
            }
            RowValues::Null => query_builder.bind(Option::<String>::None),
            RowValues::JSON(jsval) => query_builder.bind(jsval.to_string()),
            RowValues::Blob(bytes) => query_builder.bind(bytes.clone()),
        }
    }

    query_builder
}
