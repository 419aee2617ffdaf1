//! Target models: the static field tables the populator binds against.
//!
//! A model is any type implementing [`Model`]. The trait exposes a table of
//! [`FieldDescriptor`]s built once per type, and hands out a [`Slot`] for a
//! field by identifier. [`model!`](crate::model!) generates both from a plain
//! struct definition; hand-written implementations work the same way.

use std::fmt;

use crate::coerce::Coerce;

/// Semantic type of a field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    String,
    Integer,
    Boolean,
    List,
    Nested,
}

impl fmt::Display for FieldKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            FieldKind::String => "string",
            FieldKind::Integer => "integer",
            FieldKind::Boolean => "boolean",
            FieldKind::List => "list",
            FieldKind::Nested => "nested",
        };
        f.write_str(name)
    }
}

/// How a model field is addressed and what it holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldDescriptor {
    /// Declared identifier; also the implicit alias.
    pub ident: &'static str,
    /// Explicit alias, if any.
    pub alias: Option<&'static str>,
    pub kind: FieldKind,
}

impl FieldDescriptor {
    pub const fn new(ident: &'static str, alias: Option<&'static str>, kind: FieldKind) -> Self {
        Self { ident, alias, kind }
    }

    /// Whether a (lower-cased) path segment addresses this field.
    pub fn matches(&self, segment: &str) -> bool {
        self.alias.is_some_and(|alias| folds_to(alias, segment)) || folds_to(self.ident, segment)
    }
}

/// Case-insensitive comparison against an already lower-cased segment.
fn folds_to(name: &str, segment: &str) -> bool {
    name.chars().flat_map(char::to_lowercase).eq(segment.chars())
}

/// Mutable access to one field during binding.
pub enum Slot<'a> {
    /// Scalar or list field.
    Leaf(&'a mut dyn Coerce),
    /// Nested model.
    Nested(&'a mut dyn Model),
}

/// A structure the populator can bind values onto.
pub trait Model {
    /// Declared name of the model, compared case-insensitively against the
    /// document's root keys.
    fn name(&self) -> &'static str;

    /// Field table, in declaration order.
    fn fields(&self) -> &'static [FieldDescriptor];

    /// Access the field with the given identifier.
    fn field_mut(&mut self, ident: &str) -> Option<Slot<'_>>;
}

/// A type that can occupy a model field.
pub trait Bindable {
    const KIND: FieldKind;

    fn slot(&mut self) -> Slot<'_>;
}

/// Declare a struct together with its [`Model`] and [`Bindable`]
/// implementations.
///
/// Every field type must implement [`Bindable`]: the supported leaf types, or
/// another struct declared with this macro. An explicit alias follows the type
/// as `as "alias"`.
///
/// ```rust
/// libyamlite::model! {
///     #[derive(Debug, Default)]
///     pub struct Rotation {
///         pub max_size: String,
///         pub max_files: i64 as "files",
///     }
/// }
///
/// let mut rotation = Rotation::default();
/// libyamlite::from_str(&mut rotation, "max_size: 10MB\nfiles: 5").unwrap();
/// assert_eq!(rotation.max_size, "10MB");
/// assert_eq!(rotation.max_files, 5);
/// ```
#[macro_export]
macro_rules! model {
    (@alias) => {
        ::core::option::Option::None
    };
    (@alias $alias:literal) => {
        ::core::option::Option::Some($alias)
    };
    (
        $(#[$meta:meta])*
        $vis:vis struct $name:ident {
            $(
                $(#[$fmeta:meta])*
                $fvis:vis $field:ident : $ty:ty $(as $alias:literal)?
            ),* $(,)?
        }
    ) => {
        $(#[$meta])*
        $vis struct $name {
            $(
                $(#[$fmeta])*
                $fvis $field: $ty,
            )*
        }

        impl $crate::Model for $name {
            fn name(&self) -> &'static str {
                stringify!($name)
            }

            fn fields(&self) -> &'static [$crate::FieldDescriptor] {
                const FIELDS: &[$crate::FieldDescriptor] = &[
                    $(
                        $crate::FieldDescriptor::new(
                            stringify!($field),
                            $crate::model!(@alias $($alias)?),
                            <$ty as $crate::Bindable>::KIND,
                        ),
                    )*
                ];
                FIELDS
            }

            fn field_mut(&mut self, ident: &str) -> ::core::option::Option<$crate::Slot<'_>> {
                match ident {
                    $(
                        stringify!($field) => ::core::option::Option::Some(
                            $crate::Bindable::slot(&mut self.$field),
                        ),
                    )*
                    _ => ::core::option::Option::None,
                }
            }
        }

        impl $crate::Bindable for $name {
            const KIND: $crate::FieldKind = $crate::FieldKind::Nested;

            fn slot(&mut self) -> $crate::Slot<'_> {
                $crate::Slot::Nested(self)
            }
        }
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    crate::model! {
        #[derive(Debug, Default)]
        struct Caching {
            enabled: bool,
            kind: String as "type",
            port: u16,
        }
    }

    #[test]
    fn test_descriptor_table() {
        let caching = Caching::default();
        assert_eq!(caching.name(), "Caching");
        assert_eq!(
            caching.fields(),
            &[
                FieldDescriptor::new("enabled", None, FieldKind::Boolean),
                FieldDescriptor::new("kind", Some("type"), FieldKind::String),
                FieldDescriptor::new("port", None, FieldKind::Integer),
            ]
        );
    }

    #[test]
    fn test_matches_alias_or_ident() {
        let field = FieldDescriptor::new("MaxFiles", Some("max_files"), FieldKind::Integer);
        assert!(field.matches("maxfiles"));
        assert!(field.matches("max_files"));
        assert!(!field.matches("files"));
    }

    #[test]
    fn test_field_mut_by_ident() {
        let mut caching = Caching::default();
        assert!(matches!(caching.field_mut("kind"), Some(Slot::Leaf(_))));
        assert!(caching.field_mut("type").is_none());
        assert!(matches!(caching.slot(), Slot::Nested(_)));
    }
}
