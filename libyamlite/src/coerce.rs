//! Conversion of resolved values into typed leaf fields.
//!
//! Supported leaf types:
//! - `String`
//! - `bool` (`true` / `false`, any case)
//! - every primitive integer and [`BigInt`], parsed in base 10
//! - `Vec<String>`
//! - `Option<T>` of any of the above

use num_bigint::BigInt;
use num_traits::{Num, Zero};
use thiserror::Error;

use crate::document::EntryValue;
use crate::model::{Bindable, FieldKind, Slot};

/// A value that does not fit the field it addresses.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("expected {expected}, found {found:?}")]
pub struct CoerceError {
    pub expected: FieldKind,
    pub found: String,
}

impl CoerceError {
    fn new(expected: FieldKind, value: &EntryValue) -> Self {
        Self {
            expected,
            found: value.describe(),
        }
    }
}

/// A leaf field that can be assigned from a resolved value.
pub trait Coerce {
    /// Convert `value` and store it.
    fn coerce(&mut self, value: &EntryValue) -> Result<(), CoerceError>;

    /// Store the zero value.
    fn reset(&mut self);
}

impl Coerce for String {
    fn coerce(&mut self, value: &EntryValue) -> Result<(), CoerceError> {
        let s = value
            .as_str()
            .ok_or_else(|| CoerceError::new(FieldKind::String, value))?;
        *self = s.to_string();
        Ok(())
    }

    fn reset(&mut self) {
        self.clear();
    }
}

impl Coerce for bool {
    fn coerce(&mut self, value: &EntryValue) -> Result<(), CoerceError> {
        let s = value.as_str().map(str::trim).unwrap_or_default();
        *self = if s.eq_ignore_ascii_case("true") {
            true
        } else if s.eq_ignore_ascii_case("false") {
            false
        } else {
            return Err(CoerceError::new(FieldKind::Boolean, value));
        };
        Ok(())
    }

    fn reset(&mut self) {
        *self = false;
    }
}

impl Coerce for Vec<String> {
    fn coerce(&mut self, value: &EntryValue) -> Result<(), CoerceError> {
        let items = value
            .as_sequence()
            .ok_or_else(|| CoerceError::new(FieldKind::List, value))?;
        *self = items.to_vec();
        Ok(())
    }

    fn reset(&mut self) {
        self.clear();
    }
}

impl<T: Coerce + Default> Coerce for Option<T> {
    fn coerce(&mut self, value: &EntryValue) -> Result<(), CoerceError> {
        let mut inner = T::default();
        inner.coerce(value)?;
        *self = Some(inner);
        Ok(())
    }

    fn reset(&mut self) {
        *self = None;
    }
}

/// Parse a base-10 integer of any width.
fn parse_integer<T: Num>(value: &EntryValue) -> Result<T, CoerceError> {
    value
        .as_str()
        .and_then(|s| T::from_str_radix(s.trim(), 10).ok())
        .ok_or_else(|| CoerceError::new(FieldKind::Integer, value))
}

macro_rules! integer_leaf {
    ($($t:ty),* $(,)?) => {
        $(
            impl Coerce for $t {
                fn coerce(&mut self, value: &EntryValue) -> Result<(), CoerceError> {
                    *self = parse_integer(value)?;
                    Ok(())
                }

                fn reset(&mut self) {
                    *self = <$t>::zero();
                }
            }

            impl Bindable for $t {
                const KIND: FieldKind = FieldKind::Integer;

                fn slot(&mut self) -> Slot<'_> {
                    Slot::Leaf(self)
                }
            }
        )*
    };
}

integer_leaf!(i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize, BigInt);

impl Bindable for String {
    const KIND: FieldKind = FieldKind::String;

    fn slot(&mut self) -> Slot<'_> {
        Slot::Leaf(self)
    }
}

impl Bindable for bool {
    const KIND: FieldKind = FieldKind::Boolean;

    fn slot(&mut self) -> Slot<'_> {
        Slot::Leaf(self)
    }
}

impl Bindable for Vec<String> {
    const KIND: FieldKind = FieldKind::List;

    fn slot(&mut self) -> Slot<'_> {
        Slot::Leaf(self)
    }
}

impl<T: Coerce + Bindable + Default> Bindable for Option<T> {
    const KIND: FieldKind = T::KIND;

    fn slot(&mut self) -> Slot<'_> {
        Slot::Leaf(self)
    }
}
