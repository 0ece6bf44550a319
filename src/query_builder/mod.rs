//! SQL text derived from an entity's populated fields.
//!
//! Tables and columns are bracket-quoted (`[User]`, `[UserName]`) and every value
//! travels as a named parameter `@<field>`; no value is ever spliced into the text.

use crate::entity::PopulatedField;
use crate::params::Param;

mod dml;
mod select;

pub use dml::{delete_statement, insert_statement, update_statement};
pub use select::select_statement;

/// A query and its parameters bundled together
#[derive(Debug, Clone, PartialEq)]
pub struct QueryAndParams {
    /// The SQL query string
    pub query: String,
    /// The parameters to be bound to the query
    pub params: Vec<Param>,
}

impl QueryAndParams {
    /// Create a new `QueryAndParams` with the given query string and parameters
    pub fn new(query: impl Into<String>, params: Vec<Param>) -> Self {
        Self {
            query: query.into(),
            params,
        }
    }

    /// Create a new `QueryAndParams` with no parameters
    pub fn new_without_params(query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            params: Vec::new(),
        }
    }
}

pub(crate) fn quote_ident(name: &str) -> String {
    format!("[{name}]")
}

fn to_param(field: &PopulatedField) -> Param {
    Param::input(Param::placeholder(field.name), field.value.clone())
}

/// `[a]=@a AND [b]=@b`
fn conjunction(fields: &[PopulatedField]) -> String {
    fields
        .iter()
        .map(|f| format!("{}={}", quote_ident(f.name), Param::placeholder(f.name)))
        .collect::<Vec<_>>()
        .join(" AND ")
}
