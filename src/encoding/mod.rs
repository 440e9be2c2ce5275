//! Wire codec: self-describing records and the durable-file header.
//!
//! Every value goes on the wire as a pair of blobs, the UTF-8 name of its
//! registered type and the payload produced by that type's binding:
//!
//! ```text
//! record := blob(type name) blob(payload)
//! ```
//!
//! Decoding reads the pair back and dispatches through the registry by name.
//! Container bindings call back into [`encode`]/[`decode`] for each element,
//! so nesting recurses naturally and every element is itself self-describing.
//!
//! For durable storage, [`encode_with_header`] prefixes a single record with
//! the `RJS` magic token and a two-byte big-endian format version.
//!
//! # Example
//!
//! ```
//! use rjs::prelude::*;
//!
//! let registry = Registry::with_builtins();
//!
//! let value = Value::from(vec![Value::from(1), Value::from("two")]);
//!
//! let out = &mut Vec::new();
//! encode(&registry, &value, out).unwrap();
//!
//! let decoded = decode_full(&registry, out.clone()).unwrap();
//! assert_eq!(decoded, value);
//! ```

mod constants;
pub mod varsize;

pub use constants::{CURRENT_VERSION, MAGIC};
pub use varsize::{
    put_blob, put_size, put_size_big, read_blob, read_size, read_size_big, ByteReader,
};

use crate::{
    errors::{DeserialiseError, SerialiseError},
    registry::Registry,
    Value,
};
use bytes::Bytes;

/// Encodes one value as a self-describing record, appending to `out`.
///
/// The value's exact type must have a binding; there is no dispatch through
/// any kind of type hierarchy.
///
/// # Example
///
/// ```
/// use rjs::prelude::*;
///
/// let registry = Registry::with_builtins();
///
/// let out = &mut Vec::new();
/// encode(&registry, &Value::None, out).unwrap();
///
/// // one blob holding "none", one empty payload blob
/// assert_eq!(*out, vec![4, b'n', b'o', b'n', b'e', 0]);
/// ```
pub fn encode(registry: &Registry, value: &Value, out: &mut Vec<u8>) -> Result<(), SerialiseError> {
    let binding = registry
        .binding_for(value)
        .ok_or_else(|| SerialiseError::UnregisteredType(value.type_tag()))?;
    put_blob(binding.type_name().as_bytes(), out);
    let payload = binding.encode_payload(registry, value)?;
    put_blob(&payload, out);
    Ok(())
}

/// [`encode`] into a fresh buffer.
pub fn encode_full(registry: &Registry, value: &Value) -> Result<Vec<u8>, SerialiseError> {
    let mut out = Vec::new();
    encode(registry, value, &mut out)?;
    Ok(out)
}

/// Decodes one self-describing record off the stream.
///
/// Reads the name blob and the payload blob, then dispatches to the first
/// binding whose name matches.
pub fn decode(registry: &Registry, input: &mut ByteReader) -> Result<Value, DeserialiseError> {
    let name_bytes = read_blob(input)?;
    let name = std::str::from_utf8(&name_bytes).map_err(DeserialiseError::InvalidTypeName)?;
    let payload = read_blob(input)?;
    let binding = registry
        .binding_named(name)
        .ok_or_else(|| DeserialiseError::UnknownType(name.to_string()))?;
    binding.decode_payload(registry, payload)
}

/// [`decode`] from anything that converts to [`Bytes`].
///
/// # Example
///
/// ```
/// use rjs::prelude::*;
///
/// let registry = Registry::with_builtins();
/// let encoded = encode_full(&registry, &Value::from(true)).unwrap();
///
/// assert_eq!(decode_full(&registry, encoded).unwrap(), Value::from(true));
/// ```
pub fn decode_full<B: Into<Bytes>>(
    registry: &Registry,
    bytes: B,
) -> Result<Value, DeserialiseError> {
    decode(registry, &mut ByteReader::new(bytes.into()))
}

/// Encodes a value for durable storage: magic token, format version, then
/// one record.
pub fn encode_with_header(registry: &Registry, value: &Value) -> Result<Vec<u8>, SerialiseError> {
    let mut out = Vec::with_capacity(16);
    out.extend_from_slice(&MAGIC);
    out.extend_from_slice(&CURRENT_VERSION.to_be_bytes());
    encode(registry, value, &mut out)?;
    Ok(out)
}

/// Decodes a headered stream.
///
/// Fails with [`DeserialiseError::BadMagic`] unless the stream opens with
/// `RJS`, and with [`DeserialiseError::UnsupportedVersion`] unless the
/// version equals [`CURRENT_VERSION`] exactly.
pub fn decode_with_header(
    registry: &Registry,
    input: &mut ByteReader,
) -> Result<Value, DeserialiseError> {
    let magic = input.read_many(3)?;
    if &magic[..] != &MAGIC[..] {
        return Err(DeserialiseError::BadMagic([magic[0], magic[1], magic[2]]));
    }
    let version_bytes = input.read_many(2)?;
    let version = u16::from_be_bytes([version_bytes[0], version_bytes[1]]);
    if version != CURRENT_VERSION {
        return Err(DeserialiseError::UnsupportedVersion(version));
    }
    decode(registry, input)
}
