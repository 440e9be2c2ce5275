//! # RJS
//!
//! RJS is a self-describing binary serialisation format driven by an
//! extensible type registry. Every encoded value carries the short name of
//! its type, so a reader needs nothing beyond the registry itself: the wire
//! requires no schema and no out-of-band agreement.
//!
//! # Usage
//!
//! Build a [`Registry`](registry::Registry), hand values to
//! [`encode`](encoding::encode), and get them back with
//! [`decode`](encoding::decode):
//!
//! ```
//! use rjs::prelude::*;
//!
//! let registry = Registry::with_builtins();
//!
//! let value = Value::from(vec![
//!     Value::from("answer"),
//!     Value::from(42),
//!     Value::from(true),
//! ]);
//!
//! let encoded = encode_full(&registry, &value).unwrap();
//! let decoded = decode_full(&registry, encoded).unwrap();
//!
//! assert_eq!(decoded, value);
//! ```
//!
//! User types register at runtime. The simplest route is a named record with
//! positional fields:
//!
//! ```
//! use rjs::prelude::*;
//!
//! let mut registry = Registry::with_builtins();
//! registry.register_record("point", &["x", "y"]);
//!
//! let point = Value::from(Record::new("point", vec![Value::from(3), Value::from(4)]));
//!
//! let encoded = encode_with_header(&registry, &point).unwrap();
//! let back = decode_with_header(&registry, &mut ByteReader::from(encoded)).unwrap();
//!
//! assert_eq!(back, point);
//! ```
//!
//! Custom codecs and aliases go through
//! [`Registry::register`](registry::Registry::register) and
//! [`Registry::register_alias`](registry::Registry::register_alias); see the
//! [`registry`] module.
//!
//! # Specification
//!
//! This section describes the wire format. All integers are big-endian.
//!
//! ## Sizes
//!
//! A *size* is a non-negative integer written as its minimal big-endian digit
//! string, preceded by one `0xFF` continuation byte per digit after the
//! first. A digit string starting with `0xFF` gets one `0x00` pad byte so it
//! cannot be mistaken for a continuation byte; zero is a single `0x00` byte.
//! `L` digits therefore always occupy `2L - 1` bytes, and the encoding
//! terminates itself: `255` is `FF 00 FF`.
//!
//! ## Blobs and records
//!
//! A *blob* is a size followed by that many raw bytes. A *record*, the unit
//! of serialisation, is two blobs: the UTF-8 type name, then the payload.
//!
//! ## The header
//!
//! A durable stream opens with the magic token `RJS`, a two-byte format
//! version (currently `0`, matched exactly), and one record.
//!
//! ## Built-in payloads
//!
//! | type | payload |
//! | ---  | ---     |
//! | `none` | empty |
//! | `bool` | one byte, `01` true / `00` false; any nonzero byte reads as true |
//! | `int` | minimal-width two's-complement; zero is the empty string |
//! | `float` | eight bytes, IEEE-754 double bits |
//! | `complex` | two `float` records, real then imaginary |
//! | `bytes` | the bytes themselves |
//! | `str` | UTF-8 bytes |
//! | `list` | a size (the count), then one record per element |
//! | `map` | a size (the count), then key record, value record per entry |
//!
//! `tuple`, `set`, `frozenset`, and `deque` alias `list`; `ordmap` aliases
//! `map`. Aliases reuse the base payload encoding unchanged; only the name
//! blob differs.

#![warn(
    deprecated_in_future,
    unsafe_code,
    unused_labels,
    keyword_idents,
    missing_copy_implementations,
    missing_debug_implementations,
    macro_use_extern_crate,
    unreachable_pub,
    trivial_casts,
    trivial_numeric_casts,
    unused_extern_crates,
    unused_import_braces
)]

mod bindings;
pub mod encoding;
pub mod errors;
pub mod float;
pub mod int;
pub mod prelude;
pub mod registry;
pub mod rep;
mod util;
pub mod vecmap;

use bytes::Bytes;
use float::{Complex, Double};
use int::Int;
use num_bigint::BigInt;
use registry::TypeTag;
use rep::ValueRep;
use std::collections::VecDeque;
use vecmap::VecMap;

/// [`Value`] and its variants: everything the built-in bindings know how to
/// put on the wire, plus [`Record`] for user-registered types.
///
/// # Example
///
/// ```
/// use rjs::prelude::*;
///
/// let b = Value::Bool(true);
///
/// assert_eq!(b.to_bool(), Some(true));
/// ```
#[derive(Eq, PartialEq, Ord, PartialOrd, Clone, Hash, Debug)]
pub enum Value {
    /// The unit value.
    None,
    /// Boolean.
    Bool(bool),
    /// Signed integer of arbitrary magnitude.
    Int(Int),
    /// Double-precision float, stored as its bit pattern.
    Float(Double),
    /// Complex number.
    Complex(Complex),
    /// Bytestring.
    Bytes(Bytes),
    /// UTF-8 text.
    Str(String),
    /// Ordered sequence.
    List(Vec<Value>),
    /// Immutable sequence; aliases `list` on the wire.
    Tuple(Vec<Value>),
    /// Set; aliases `list` on the wire. Element order is whatever the
    /// producer held, so only the element values are meaningful.
    Set(Vec<Value>),
    /// Frozen set; aliases `list` on the wire.
    FrozenSet(Vec<Value>),
    /// Double-ended queue; aliases `list` on the wire.
    Deque(VecDeque<Value>),
    /// Association in insertion order.
    Map(VecMap<Value, Value>),
    /// Explicitly-ordered map; aliases `map` on the wire.
    OrdMap(VecMap<Value, Value>),
    /// An instance of a user-registered record type.
    Record(Record),
}

/// An instance of a named record type: the extension carrier for types
/// registered through
/// [`register_record`](registry::Registry::register_record) or
/// [`register_by_fields`](registry::Registry::register_by_fields).
///
/// Fields are positional; the registry's field list gives them names and
/// order.
#[derive(Eq, PartialEq, Ord, PartialOrd, Clone, Hash, Debug)]
pub struct Record {
    type_name: String,
    fields: Vec<Value>,
}

impl Record {
    /// Creates a record from its field values, in field order.
    pub fn new(type_name: impl Into<String>, fields: Vec<Value>) -> Record {
        Record {
            type_name: type_name.into(),
            fields,
        }
    }

    /// Creates an instance with every field set to [`Value::None`].
    ///
    /// This is the decoder's entry point: no validating construction runs,
    /// fields are assigned one by one afterwards.
    pub fn empty(type_name: impl Into<String>, arity: usize) -> Record {
        Record {
            type_name: type_name.into(),
            fields: vec![Value::None; arity],
        }
    }

    /// The name this record's type was registered under.
    pub fn type_name(&self) -> &str { &self.type_name }

    /// The field values, in field order.
    pub fn fields(&self) -> &[Value] { &self.fields }

    /// One field by position.
    pub fn field(&self, index: usize) -> Option<&Value> { self.fields.get(index) }

    /// Replaces one field by position. Out-of-range indices are ignored.
    pub fn set_field(&mut self, index: usize, value: Value) {
        if let Some(slot) = self.fields.get_mut(index) {
            *slot = value;
        }
    }

    /// Consumes the record, yielding its fields.
    pub fn into_fields(self) -> Vec<Value> { self.fields }
}

impl Value {
    /// The dispatch tag naming this value's exact type.
    ///
    /// # Example
    ///
    /// ```
    /// use rjs::prelude::*;
    ///
    /// assert_eq!(Value::from(1).type_tag(), TypeTag::Int);
    /// assert_eq!(Value::from(1).type_tag().name(), "int");
    /// ```
    pub fn type_tag(&self) -> TypeTag {
        match self {
            Value::None => TypeTag::None,
            Value::Bool(_) => TypeTag::Bool,
            Value::Int(_) => TypeTag::Int,
            Value::Float(_) => TypeTag::Float,
            Value::Complex(_) => TypeTag::Complex,
            Value::Bytes(_) => TypeTag::Bytes,
            Value::Str(_) => TypeTag::Str,
            Value::List(_) => TypeTag::List,
            Value::Tuple(_) => TypeTag::Tuple,
            Value::Set(_) => TypeTag::Set,
            Value::FrozenSet(_) => TypeTag::FrozenSet,
            Value::Deque(_) => TypeTag::Deque,
            Value::Map(_) => TypeTag::Map,
            Value::OrdMap(_) => TypeTag::OrdMap,
            Value::Record(record) => TypeTag::Named(record.type_name().to_string()),
        }
    }

    /// Converts a bytestring literal to a [`Value`].
    ///
    /// # Example
    ///
    /// ```
    /// use rjs::prelude::*;
    ///
    /// let ks = Value::from_static(b"this is an example");
    /// ```
    pub fn from_static(bytes: &'static [u8]) -> Value { Value::Bytes(Bytes::from_static(bytes)) }

    /// Indicates whether a value is [`Value::None`].
    pub fn is_none(&self) -> bool {
        match self {
            Value::None => true,
            _ => false,
        }
    }

    /// The boolean inside, if this is a [`Value::Bool`].
    pub fn to_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// A reference to the integer inside, if this is a [`Value::Int`].
    pub fn to_int(&self) -> Option<&Int> {
        match self {
            Value::Int(i) => Some(i),
            _ => None,
        }
    }

    /// The float inside, if this is a [`Value::Float`].
    pub fn to_f64(&self) -> Option<f64> {
        match self {
            Value::Float(d) => Some(d.to_f64()),
            _ => None,
        }
    }

    /// A reference to the bytes inside, if this is a [`Value::Bytes`].
    pub fn to_bytes(&self) -> Option<&Bytes> {
        match self {
            Value::Bytes(bytes) => Some(bytes),
            _ => None,
        }
    }

    /// A string slice, if this is a [`Value::Str`].
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Str(s) => Some(s),
            _ => None,
        }
    }

    /// Consumes the value, yielding the elements of a [`Value::List`].
    ///
    /// # Example
    ///
    /// ```
    /// use rjs::prelude::*;
    ///
    /// let ks = Value::from(vec![1, 2, 3]);
    ///
    /// assert_eq!(ks.into_list().unwrap().len(), 3);
    /// ```
    pub fn into_list(self) -> Option<Vec<Value>> {
        match self {
            Value::List(items) => Some(items),
            _ => None,
        }
    }

    /// Consumes the value, yielding the entries of a [`Value::Map`].
    pub fn into_map(self) -> Option<VecMap<Value, Value>> {
        match self {
            Value::Map(map) => Some(map),
            _ => None,
        }
    }

    /// Consumes the value, converting it to a value of type `T`.
    ///
    /// # Example
    ///
    /// ```
    /// use rjs::prelude::*;
    ///
    /// let ks = Value::from(1);
    ///
    /// let num: u8 = ks.into_rep().unwrap();
    /// assert_eq!(num, 1);
    /// ```
    pub fn into_rep<T: ValueRep>(self) -> Option<T> { T::from_value(self) }
}

// bool -> Value
from_fn!(Value, bool, Value::Bool);
try_from_ctor!(Value, bool, Bool);

// Int -> Value
from_fn!(Value, Int, Value::Int);
try_from_ctor!(Value, Int, Int);

// Double -> Value
from_fn!(Value, Double, Value::Float);
try_from_ctor!(Value, Double, Float);

// Complex -> Value
from_fn!(Value, Complex, Value::Complex);
try_from_ctor!(Value, Complex, Complex);

// Bytes -> Value
from_fn!(Value, Bytes, Value::Bytes);
try_from_ctor!(Value, Bytes, Bytes);

// String -> Value
from_fn!(Value, String, Value::Str);
try_from_ctor!(Value, String, Str);

// Record -> Value
from_fn!(Value, Record, Value::Record);
try_from_ctor!(Value, Record, Record);

try_from_ctor!(Value, Vec<Value>, List);
try_from_ctor!(Value, VecMap<Value, Value>, Map);

from_fn!(Value, (), |_| Value::None);

impl From<&str> for Value {
    fn from(s: &str) -> Value { Value::Str(s.to_string()) }
}

impl From<char> for Value {
    fn from(c: char) -> Value { Value::Str(c.to_string()) }
}

impl<T: Into<Value>> From<Vec<T>> for Value {
    fn from(v: Vec<T>) -> Value { Value::List(v.into_iter().map(T::into).collect()) }
}

impl<T: Into<Value>> From<VecDeque<T>> for Value {
    fn from(v: VecDeque<T>) -> Value { Value::Deque(v.into_iter().map(T::into).collect()) }
}

impl<T: Into<Value>> From<VecMap<Value, T>> for Value {
    fn from(m: VecMap<Value, T>) -> Value {
        Value::Map(m.into_iter().map(|(k, v)| (k, v.into())).collect())
    }
}

// Integers
compose_from!(Value, Int, BigInt);
compose_from!(Value, Int, isize);
compose_from!(Value, Int, usize);
compose_from!(Value, Int, i64);
compose_from!(Value, Int, u64);
compose_from!(Value, Int, i128);
compose_from!(Value, Int, u128);
from_prims!(Value);

// Floats
compose_from!(Value, Double, f64);

fn fmt_bytes(bytes: &Bytes) -> String {
    match std::str::from_utf8(bytes) {
        Ok(s) => format!("b\"{}\"", s),
        Err(_) => {
            let mut out = String::from("b\"");
            for byte in bytes.iter() {
                out.push_str(&format!("{:02x}", byte));
            }
            out.push('"');
            out
        }
    }
}

impl std::fmt::Display for Value {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        fn fmt_seq<'a>(
            f: &mut std::fmt::Formatter,
            open: &str,
            items: impl Iterator<Item = &'a Value>,
            close: &str,
        ) -> std::fmt::Result {
            f.write_str(open)?;
            for (i, item) in items.enumerate() {
                if i != 0 {
                    f.write_str(", ")?;
                }
                write!(f, "{}", item)?;
            }
            f.write_str(close)
        }

        fn fmt_map(
            f: &mut std::fmt::Formatter,
            open: &str,
            map: &VecMap<Value, Value>,
        ) -> std::fmt::Result {
            f.write_str(open)?;
            for (i, (k, v)) in map.iter().enumerate() {
                if i != 0 {
                    f.write_str(", ")?;
                }
                write!(f, "{}: {}", k, v)?;
            }
            f.write_str("}")
        }

        match self {
            Value::None => f.write_str("none"),
            Value::Bool(b) => f.write_str(if *b { "true" } else { "false" }),
            Value::Int(i) => write!(f, "{}", i),
            Value::Float(d) => write!(f, "{}", d),
            Value::Complex(c) => write!(f, "{}", c),
            Value::Bytes(bytes) => f.write_str(&fmt_bytes(bytes)),
            Value::Str(s) => write!(f, "\"{}\"", s),
            Value::List(items) => fmt_seq(f, "[", items.iter(), "]"),
            Value::Tuple(items) => fmt_seq(f, "(", items.iter(), ")"),
            Value::Set(items) => fmt_seq(f, "{", items.iter(), "}"),
            Value::FrozenSet(items) => fmt_seq(f, "frozen{", items.iter(), "}"),
            Value::Deque(items) => fmt_seq(f, "deque[", items.iter(), "]"),
            Value::Map(map) => fmt_map(f, "{", map),
            Value::OrdMap(map) => fmt_map(f, "ordmap{", map),
            Value::Record(record) => {
                f.write_str(record.type_name())?;
                fmt_seq(f, "(", record.fields().iter(), ")")
            }
        }
    }
}
