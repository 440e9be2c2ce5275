//! Re-exports of the names most callers need.

pub use crate::{
    encoding::{
        decode, decode_full, decode_with_header, encode, encode_full, encode_with_header,
        ByteReader, CURRENT_VERSION, MAGIC,
    },
    errors::{AliasError, DeserialiseError, SerialiseError},
    float::{Complex, Double},
    int::Int,
    registry::{FieldBinding, Registry, TypeTag},
    rep::ValueRep,
    vecmap::VecMap,
    Record, Value,
};
pub use bytes::Bytes;
pub use num_bigint::BigInt;
