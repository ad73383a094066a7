//! Field enumeration: the storage handles a config struct hands to the binder.

use std::time::Duration;

use clap::ArgMatches;

use crate::convert::{self, ConversionError};
use crate::types::{FieldMeta, FlagKind};

/// A mutable borrow of one field's storage, tagged with its type.
///
/// The variants are exactly the supported field types. Adding a type means
/// adding a variant here, a [`FlagKind`], and a conversion routine.
#[derive(Debug)]
pub enum Slot<'a> {
    Bool(&'a mut bool),
    Text(&'a mut String),
    Int32(&'a mut i32),
    Int64(&'a mut i64),
    Duration(&'a mut Duration),
}

impl Slot<'_> {
    pub fn kind(&self) -> FlagKind {
        match self {
            Slot::Bool(_) => FlagKind::Bool,
            Slot::Text(_) => FlagKind::Text,
            Slot::Int32(_) => FlagKind::Int32,
            Slot::Int64(_) => FlagKind::Int64,
            Slot::Duration(_) => FlagKind::Duration,
        }
    }

    /// Convert `text` to this slot's type and store it.
    ///
    /// On error the slot is left untouched.
    pub fn assign(&mut self, text: &str) -> Result<(), ConversionError> {
        match self {
            Slot::Bool(p) => **p = convert::to_bool(text)?,
            Slot::Text(p) => **p = convert::to_text(text),
            Slot::Int32(p) => **p = convert::to_i32(text)?,
            Slot::Int64(p) => **p = convert::to_i64(text)?,
            Slot::Duration(p) => **p = convert::to_duration(text)?,
        }
        Ok(())
    }

    /// Copy the value clap parsed for `id`, if there is one.
    pub(crate) fn store_match(&mut self, matches: &ArgMatches, id: &str) {
        match self {
            Slot::Bool(p) => {
                if let Some(v) = matches.get_one::<bool>(id) {
                    **p = *v;
                }
            }
            Slot::Text(p) => {
                if let Some(v) = matches.get_one::<String>(id) {
                    (**p).clone_from(v);
                }
            }
            Slot::Int32(p) => {
                if let Some(v) = matches.get_one::<i32>(id) {
                    **p = *v;
                }
            }
            Slot::Int64(p) => {
                if let Some(v) = matches.get_one::<i64>(id) {
                    **p = *v;
                }
            }
            Slot::Duration(p) => {
                if let Some(v) = matches.get_one::<Duration>(id) {
                    **p = *v;
                }
            }
        }
    }
}

impl<'a> From<&'a mut bool> for Slot<'a> {
    fn from(p: &'a mut bool) -> Self {
        Slot::Bool(p)
    }
}

impl<'a> From<&'a mut String> for Slot<'a> {
    fn from(p: &'a mut String) -> Self {
        Slot::Text(p)
    }
}

impl<'a> From<&'a mut i32> for Slot<'a> {
    fn from(p: &'a mut i32) -> Self {
        Slot::Int32(p)
    }
}

impl<'a> From<&'a mut i64> for Slot<'a> {
    fn from(p: &'a mut i64) -> Self {
        Slot::Int64(p)
    }
}

impl<'a> From<&'a mut Duration> for Slot<'a> {
    fn from(p: &'a mut Duration) -> Self {
        Slot::Duration(p)
    }
}

/// Where a field's value lives, or why it can't be bound.
#[derive(Debug)]
pub enum Target<'a> {
    Slot(Slot<'a>),
    /// A field whose type is outside the supported set. It is skipped.
    Unsupported { type_name: &'static str },
}

/// One field of a config struct: its metadata and its storage.
#[derive(Debug)]
pub struct Field<'a> {
    pub meta: FieldMeta,
    pub target: Target<'a>,
}

impl<'a> Field<'a> {
    pub fn new(meta: FieldMeta, slot: impl Into<Slot<'a>>) -> Self {
        Self {
            meta,
            target: Target::Slot(slot.into()),
        }
    }

    pub fn unsupported(meta: FieldMeta, type_name: &'static str) -> Self {
        Self {
            meta,
            target: Target::Unsupported { type_name },
        }
    }
}

/// A struct whose fields can be bound to command-line flags.
///
/// Usually derived:
///
/// ```
/// # use std::time::Duration;
/// #[derive(confbind::Configurable, Default)]
/// struct Config {
///     #[flag(name = "addr", value = ":8000", usage = "Listen and serve address")]
///     addr: String,
///     #[flag(name = "timeout", value = "200ms")]
///     timeout: Duration,
/// }
/// ```
///
/// A hand-written impl lists the fields in declaration order:
///
/// ```
/// # use std::time::Duration;
/// use confbind::{Configurable, Field, FieldMeta};
///
/// struct Config {
///     addr: String,
///     timeout: Duration,
/// }
///
/// impl Configurable for Config {
///     fn fields(&mut self) -> Vec<Field<'_>> {
///         vec![
///             Field::new(FieldMeta::new("addr").value(":8000"), &mut self.addr),
///             Field::new(FieldMeta::new("timeout").value("200ms"), &mut self.timeout),
///         ]
///     }
/// }
/// ```
pub trait Configurable {
    /// Every field, in declaration order.
    fn fields(&mut self) -> Vec<Field<'_>>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn slot_kinds() {
        let mut b = false;
        let mut s = String::new();
        let mut i = 0i32;
        let mut l = 0i64;
        let mut d = Duration::ZERO;
        assert_eq!(Slot::from(&mut b).kind(), FlagKind::Bool);
        assert_eq!(Slot::from(&mut s).kind(), FlagKind::Text);
        assert_eq!(Slot::from(&mut i).kind(), FlagKind::Int32);
        assert_eq!(Slot::from(&mut l).kind(), FlagKind::Int64);
        assert_eq!(Slot::from(&mut d).kind(), FlagKind::Duration);
    }

    #[test]
    fn assign_writes_converted_value() {
        let mut timeout = Duration::ZERO;
        Slot::from(&mut timeout).assign("200ms").unwrap();
        assert_eq!(timeout, Duration::from_millis(200));
    }

    #[test]
    fn assign_empty_writes_zero() {
        let mut size = 17i32;
        Slot::from(&mut size).assign("").unwrap();
        assert_eq!(size, 0);
    }

    #[test]
    fn failed_assign_leaves_storage_untouched() {
        let mut size = 17i32;
        let err = Slot::from(&mut size).assign("abc").unwrap_err();
        assert_eq!(err.kind, FlagKind::Int32);
        assert_eq!(size, 17);
    }

    #[test]
    fn unsupported_field_keeps_type_name() {
        let field = Field::unsupported(FieldMeta::new("profit"), "u32");
        match field.target {
            Target::Unsupported { type_name } => assert_eq!(type_name, "u32"),
            Target::Slot(_) => panic!("expected unsupported target"),
        }
    }
}
