//! Failure conditions raised by the codec and the registry.
//!
//! Decoding has a single error kind, [`DeserialiseError`]; whatever goes wrong
//! mid-stream, the caller sees one enum and no partially-built value. Encoding
//! can only fail by meeting an unregistered type or a mis-shaped value
//! ([`SerialiseError`]), and alias registration can only fail by naming a base
//! type that has no binding yet ([`AliasError`]). Nothing in this crate
//! retries or recovers; every failure propagates to the immediate caller.

use crate::registry::TypeTag;
use failure::Fail;
use num_bigint::BigUint;
use std::str::Utf8Error;

/// An error encountered when decoding fails.
#[derive(Debug, Clone, PartialEq, Eq, Fail)]
pub enum DeserialiseError {
    /// The stream ended before a read could complete.
    #[fail(display = "tried to read {} bytes but only {} remained", needed, had)]
    UnexpectedEndOfInput { needed: usize, had: usize },

    /// A decoded length does not fit in a `usize` on this machine.
    #[fail(display = "length {} does not fit in a usize", _0)]
    OversizedLength(BigUint),

    /// A type name was not valid UTF-8.
    #[fail(display = "type name is not valid UTF-8: {}", _0)]
    InvalidTypeName(Utf8Error),

    /// A string payload was not valid UTF-8.
    #[fail(display = "string payload is not valid UTF-8: {}", _0)]
    InvalidString(Utf8Error),

    /// No binding is registered under the decoded type name.
    #[fail(display = "no binding registered under the name `{}`", _0)]
    UnknownType(String),

    /// The stream did not start with the `RJS` magic token.
    #[fail(display = "bad magic token {:x?}", _0)]
    BadMagic([u8; 3]),

    /// The stream's format version is not the one this crate writes.
    /// Matching is exact; there is no forward or backward compatibility.
    #[fail(display = "unsupported format version {}", _0)]
    UnsupportedVersion(u16),

    /// A decoded value had the wrong shape for the slot it was assigned to.
    #[fail(display = "expected a {} value, found `{}`", expected, found)]
    UnexpectedShape {
        expected: &'static str,
        found: String,
    },
}

/// An error encountered when encoding fails.
#[derive(Debug, Clone, PartialEq, Eq, Fail)]
pub enum SerialiseError {
    /// The value's exact type has no registry binding.
    #[fail(display = "no binding registered for type `{}`", _0)]
    UnregisteredType(TypeTag),

    /// An accessor or alias conversion was handed the wrong shape of value.
    #[fail(display = "expected a {} value, found `{}`", expected, found)]
    UnexpectedShape {
        expected: &'static str,
        found: TypeTag,
    },
}

/// Raised by [`register_alias`](crate::registry::Registry::register_alias)
/// when the base type has no prior binding.
#[derive(Debug, Clone, PartialEq, Eq, Fail)]
#[fail(display = "cannot alias `{}`: no binding for base type `{}`", alias, base)]
pub struct AliasError {
    pub alias: TypeTag,
    pub base: TypeTag,
}
