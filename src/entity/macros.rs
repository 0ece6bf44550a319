/// Declare an entity struct together with its descriptor.
///
/// The struct name becomes the table name and each field name becomes a column
/// name, so fields are usually spelled the way the columns are (`non_snake_case`
/// is allowed on the generated struct). Every field type must implement
/// [`FieldValue`](crate::entity::FieldValue) and the struct must be `Default`.
///
/// ```rust
/// use sql_dao::entity;
/// use sql_dao::entity::Entity;
///
/// entity! {
///     #[derive(Debug, Default, Clone)]
///     pub struct User {
///         pub UserId: Option<i32>,
///         pub UserName: Option<String>,
///     }
/// }
///
/// assert_eq!(User::TYPE_NAME, "User");
/// assert_eq!(User::fields().len(), 2);
/// ```
#[macro_export]
macro_rules! entity {
    (
        $(#[$meta:meta])*
        $vis:vis struct $name:ident {
            $(
                $(#[$fmeta:meta])*
                $fvis:vis $field:ident : $ty:ty
            ),* $(,)?
        }
    ) => {
        $(#[$meta])*
        #[allow(non_snake_case)]
        $vis struct $name {
            $(
                $(#[$fmeta])*
                $fvis $field : $ty,
            )*
        }

        impl $crate::entity::Entity for $name {
            const TYPE_NAME: &'static str = stringify!($name);

            fn fields() -> &'static [$crate::entity::Field<Self>] {
                static FIELDS: ::std::sync::OnceLock<::std::vec::Vec<$crate::entity::Field<$name>>> =
                    ::std::sync::OnceLock::new();
                FIELDS.get_or_init(|| {
                    ::std::vec![
                        $(
                            $crate::entity::Field::new(
                                stringify!($field),
                                <$ty as $crate::entity::FieldValue>::KIND,
                                |e: &$name| $crate::entity::FieldValue::to_value(&e.$field),
                                |e: &mut $name, v: $crate::RowValues| {
                                    e.$field = <$ty as $crate::entity::FieldValue>::from_value(v)?;
                                    ::std::result::Result::Ok(())
                                },
                            ),
                        )*
                    ]
                })
            }
        }
    };
}
