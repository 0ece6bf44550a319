use super::Entity;
use crate::types::RowValues;

/// A field that takes part in a generated statement.
#[derive(Debug, Clone, PartialEq)]
pub struct PopulatedField {
    pub name: &'static str,
    pub value: RowValues,
}

/// Whether a field value counts as populated.
///
/// Absent and null values are empty, and so is any numeric value equal to zero.
/// Everything else is populated, including `false`, empty strings and timestamps.
#[must_use]
pub fn is_populated(value: Option<&RowValues>) -> bool {
    match value {
        None | Some(RowValues::Null) => false,
        Some(v) => v.as_number().is_none_or(|n| n != 0.0),
    }
}

/// Populated fields of `entity`, in descriptor order.
pub fn populated_fields<E: Entity>(entity: &E) -> Vec<PopulatedField> {
    E::fields()
        .iter()
        .filter_map(|field| {
            let value = (field.get)(entity);
            if is_populated(value.as_ref()) {
                value.map(|value| PopulatedField {
                    name: field.name,
                    value,
                })
            } else {
                None
            }
        })
        .collect()
}
