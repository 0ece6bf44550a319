//! Entity descriptors.
//!
//! An entity is a plain record whose type name is the table name and whose field
//! names are the column names. The descriptor is built once per type and lists,
//! in declaration order, each field's name, kind, getter and setter. The
//! [`entity!`](crate::entity!) macro writes the descriptor for a struct; it can also
//! be implemented by hand.

mod inspect;
mod macros;
mod value;

pub use inspect::{PopulatedField, is_populated, populated_fields};
pub use value::FieldValue;

use serde::{Deserialize, Serialize};

use crate::types::RowValues;

/// Kind tag of an entity field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FieldKind {
    Int,
    Float,
    Text,
    Bool,
    Timestamp,
    Json,
    Blob,
}

impl FieldKind {
    #[must_use]
    pub fn is_numeric(self) -> bool {
        matches!(self, FieldKind::Int | FieldKind::Float)
    }
}

/// Reads a field; `None` means the field holds no value.
pub type Getter<E> = fn(&E) -> Option<RowValues>;

/// Writes a field. On failure the rejected value is handed back.
pub type Setter<E> = fn(&mut E, RowValues) -> Result<(), RowValues>;

/// One field of an entity descriptor.
pub struct Field<E> {
    pub name: &'static str,
    pub kind: FieldKind,
    pub get: Getter<E>,
    pub set: Setter<E>,
}

impl<E> Field<E> {
    pub const fn new(
        name: &'static str,
        kind: FieldKind,
        get: Getter<E>,
        set: Setter<E>,
    ) -> Self {
        Self {
            name,
            kind,
            get,
            set,
        }
    }
}

impl<E> std::fmt::Debug for Field<E> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Field")
            .field("name", &self.name)
            .field("kind", &self.kind)
            .finish_non_exhaustive()
    }
}

/// A record type the engine can read, write and construct.
///
/// `Default` provides the blank instance the mapper fills from a row.
pub trait Entity: Default + 'static {
    /// Simple type name, used verbatim as the table name.
    const TYPE_NAME: &'static str;

    /// Descriptor fields in stable declaration order.
    fn fields() -> &'static [Field<Self>];

    /// Field with exactly this name.
    fn field(name: &str) -> Option<&'static Field<Self>> {
        Self::fields().iter().find(|f| f.name == name)
    }

    /// Field whose name matches a result column, ignoring ASCII case.
    fn field_for_column(column: &str) -> Option<&'static Field<Self>> {
        Self::fields()
            .iter()
            .find(|f| f.name.eq_ignore_ascii_case(column))
    }
}
