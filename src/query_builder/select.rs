use crate::entity::{Entity, populated_fields};

use super::{QueryAndParams, conjunction, quote_ident, to_param};

/// `SELECT * FROM [T] WHERE [a]=@a AND [b]=@b` over the populated fields.
///
/// An entity with no populated field selects the whole table.
pub fn select_statement<E: Entity>(filter: &E) -> QueryAndParams {
    let fields = populated_fields(filter);
    let table = quote_ident(E::TYPE_NAME);
    if fields.is_empty() {
        return QueryAndParams::new_without_params(format!("SELECT * FROM {table}"));
    }

    QueryAndParams::new(
        format!("SELECT * FROM {table} WHERE {}", conjunction(&fields)),
        fields.iter().map(to_param).collect(),
    )
}
