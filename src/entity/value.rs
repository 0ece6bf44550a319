use chrono::NaiveDateTime;
use serde_json::Value as JsonValue;

use super::FieldKind;
use crate::types::RowValues;

/// Conversion between an entity field type and [`RowValues`].
///
/// `to_value` returns `None` when the field holds nothing (an empty `Option`).
/// `from_value` hands the value back when it cannot be stored in `Self`.
pub trait FieldValue: Sized {
    const KIND: FieldKind;

    fn to_value(&self) -> Option<RowValues>;

    /// # Errors
    /// Returns the rejected value when it does not fit this field type.
    fn from_value(value: RowValues) -> Result<Self, RowValues>;
}

impl<T: FieldValue> FieldValue for Option<T> {
    const KIND: FieldKind = T::KIND;

    fn to_value(&self) -> Option<RowValues> {
        self.as_ref().and_then(FieldValue::to_value)
    }

    fn from_value(value: RowValues) -> Result<Self, RowValues> {
        if value.is_null() {
            Ok(None)
        } else {
            T::from_value(value).map(Some)
        }
    }
}

macro_rules! int_field {
    ($($t:ty),*) => {
        $(
            impl FieldValue for $t {
                const KIND: FieldKind = FieldKind::Int;

                fn to_value(&self) -> Option<RowValues> {
                    Some(RowValues::Int(i64::from(*self)))
                }

                fn from_value(value: RowValues) -> Result<Self, RowValues> {
                    match value {
                        RowValues::Int(i) => <$t>::try_from(i).map_err(|_| RowValues::Int(i)),
                        RowValues::Bool(b) => Ok(<$t>::from(b)),
                        other => Err(other),
                    }
                }
            }
        )*
    };
}

int_field!(i8, i16, i32, i64, u8, u16, u32);

impl FieldValue for f64 {
    const KIND: FieldKind = FieldKind::Float;

    fn to_value(&self) -> Option<RowValues> {
        Some(RowValues::Float(*self))
    }

    fn from_value(value: RowValues) -> Result<Self, RowValues> {
        match value {
            RowValues::Float(f) => Ok(f),
            #[allow(clippy::cast_precision_loss)]
            RowValues::Int(i) => Ok(i as f64),
            other => Err(other),
        }
    }
}

impl FieldValue for f32 {
    const KIND: FieldKind = FieldKind::Float;

    fn to_value(&self) -> Option<RowValues> {
        Some(RowValues::Float(f64::from(*self)))
    }

    #[allow(clippy::cast_possible_truncation, clippy::cast_precision_loss)]
    fn from_value(value: RowValues) -> Result<Self, RowValues> {
        match value {
            RowValues::Float(f) => Ok(f as f32),
            RowValues::Int(i) => Ok(i as f32),
            other => Err(other),
        }
    }
}

impl FieldValue for bool {
    const KIND: FieldKind = FieldKind::Bool;

    fn to_value(&self) -> Option<RowValues> {
        Some(RowValues::Bool(*self))
    }

    fn from_value(value: RowValues) -> Result<Self, RowValues> {
        match value.as_bool() {
            Some(b) => Ok(*b),
            None => Err(value),
        }
    }
}

impl FieldValue for String {
    const KIND: FieldKind = FieldKind::Text;

    fn to_value(&self) -> Option<RowValues> {
        Some(RowValues::Text(self.clone()))
    }

    fn from_value(value: RowValues) -> Result<Self, RowValues> {
        match value {
            RowValues::Text(s) => Ok(s),
            RowValues::JSON(j) => Ok(j.to_string()),
            other => Err(other),
        }
    }
}

impl FieldValue for NaiveDateTime {
    const KIND: FieldKind = FieldKind::Timestamp;

    fn to_value(&self) -> Option<RowValues> {
        Some(RowValues::Timestamp(*self))
    }

    fn from_value(value: RowValues) -> Result<Self, RowValues> {
        match value.as_timestamp() {
            Some(dt) => Ok(dt),
            None => Err(value),
        }
    }
}

impl FieldValue for JsonValue {
    const KIND: FieldKind = FieldKind::Json;

    fn to_value(&self) -> Option<RowValues> {
        Some(RowValues::JSON(self.clone()))
    }

    fn from_value(value: RowValues) -> Result<Self, RowValues> {
        match value {
            RowValues::JSON(j) => Ok(j),
            RowValues::Text(s) => serde_json::from_str(&s).map_err(|_| RowValues::Text(s)),
            other => Err(other),
        }
    }
}

impl FieldValue for Vec<u8> {
    const KIND: FieldKind = FieldKind::Blob;

    fn to_value(&self) -> Option<RowValues> {
        Some(RowValues::Blob(self.clone()))
    }

    fn from_value(value: RowValues) -> Result<Self, RowValues> {
        match value {
            RowValues::Blob(b) => Ok(b),
            other => Err(other),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn integers_reject_out_of_range_values() {
        assert_eq!(i32::from_value(RowValues::Int(7)), Ok(7));
        assert_eq!(
            i32::from_value(RowValues::Int(i64::MAX)),
            Err(RowValues::Int(i64::MAX))
        );
        assert_eq!(u8::from_value(RowValues::Int(-1)), Err(RowValues::Int(-1)));
    }

    #[test]
    fn non_optional_fields_reject_null() {
        assert_eq!(String::from_value(RowValues::Null), Err(RowValues::Null));
        assert_eq!(i64::from_value(RowValues::Null), Err(RowValues::Null));
        assert_eq!(Option::<i64>::from_value(RowValues::Null), Ok(None));
    }

    #[test]
    fn sqlite_storage_classes_are_accepted() {
        // SQLite returns booleans as integers and timestamps as text
        assert_eq!(bool::from_value(RowValues::Int(1)), Ok(true));
        let ts = NaiveDateTime::from_value(RowValues::Text("2024-03-01 12:00:00".into())).unwrap();
        assert_eq!(ts.to_string(), "2024-03-01 12:00:00");
        let json = JsonValue::from_value(RowValues::Text(r#"{"a":1}"#.into())).unwrap();
        assert_eq!(json["a"], 1);
        assert_eq!(f64::from_value(RowValues::Int(3)), Ok(3.0));
    }

    #[test]
    fn empty_option_has_no_value() {
        let empty: Option<String> = None;
        assert_eq!(empty.to_value(), None);
        assert_eq!(
            Some(String::new()).to_value(),
            Some(RowValues::Text(String::new()))
        );
    }
}
