//! The built-in binding set installed by
//! [`Registry::with_builtins`](crate::registry::Registry::with_builtins).
//!
//! Scalars encode to fixed payloads; containers write a count followed by
//! their elements as full records, recursing through the top-level codec.
//! Tuples, sets, frozen sets, and deques are aliases over the `list` binding,
//! and `ordmap` is an alias over `map`: they reuse the base wire encoding
//! unchanged and differ only in the name blob.

use crate::{
    encoding::{self, put_size, read_size, ByteReader},
    errors::{DeserialiseError, SerialiseError},
    float::{Complex, Double},
    int::Int,
    registry::{FieldBinding, Registry, TypeTag},
    util::i64_to_digits,
    vecmap::VecMap,
    Value,
};
use bytes::Bytes;
use num_bigint::BigInt;

pub(crate) fn install(registry: &mut Registry) {
    registry.register(TypeTag::None, Box::new(encode_none), Box::new(decode_none));
    registry.register(TypeTag::Bool, Box::new(encode_bool), Box::new(decode_bool));
    registry.register(TypeTag::Int, Box::new(encode_int), Box::new(decode_int));
    registry.register(TypeTag::Float, Box::new(encode_float), Box::new(decode_float));
    registry.register(TypeTag::Bytes, Box::new(encode_bytes), Box::new(decode_bytes));
    registry.register(TypeTag::Str, Box::new(encode_str), Box::new(decode_str));
    registry.register(TypeTag::List, Box::new(encode_list), Box::new(decode_list));
    registry.register(TypeTag::Map, Box::new(encode_map), Box::new(decode_map));
    install_complex(registry);
    install_aliases(registry);
}

fn shape(expected: &'static str, found: &Value) -> SerialiseError {
    SerialiseError::UnexpectedShape {
        expected,
        found: found.type_tag(),
    }
}

fn decode_shape(expected: &'static str, found: &Value) -> DeserialiseError {
    DeserialiseError::UnexpectedShape {
        expected,
        found: found.type_tag().to_string(),
    }
}

fn encode_none(_: &Registry, value: &Value) -> Result<Vec<u8>, SerialiseError> {
    match value {
        Value::None => Ok(Vec::new()),
        other => Err(shape("none", other)),
    }
}

fn decode_none(_: &Registry, _payload: Bytes) -> Result<Value, DeserialiseError> {
    // A none record is all name, no payload; whatever payload is present is
    // not inspected.
    Ok(Value::None)
}

fn encode_bool(_: &Registry, value: &Value) -> Result<Vec<u8>, SerialiseError> {
    match value {
        Value::Bool(b) => Ok(vec![*b as u8]),
        other => Err(shape("bool", other)),
    }
}

fn decode_bool(_: &Registry, payload: Bytes) -> Result<Value, DeserialiseError> {
    let byte = ByteReader::new(payload).take_byte()?;
    Ok(Value::Bool(byte != 0))
}

fn encode_int(_: &Registry, value: &Value) -> Result<Vec<u8>, SerialiseError> {
    match value {
        Value::Int(Int::I64(i)) => Ok(i64_to_digits(*i).to_vec()),
        Value::Int(Int::Big(big)) => Ok(big.to_signed_bytes_be()),
        other => Err(shape("int", other)),
    }
}

fn decode_int(_: &Registry, payload: Bytes) -> Result<Value, DeserialiseError> {
    // Zero is the empty digit string. Note the asymmetry with the size
    // encoding, where zero occupies one byte.
    if payload.is_empty() {
        return Ok(Value::Int(Int::I64(0)));
    }
    Ok(Value::Int(Int::from(BigInt::from_signed_bytes_be(&payload))))
}

fn encode_float(_: &Registry, value: &Value) -> Result<Vec<u8>, SerialiseError> {
    match value {
        Value::Float(d) => Ok(d.bits().to_be_bytes().to_vec()),
        other => Err(shape("float", other)),
    }
}

fn decode_float(_: &Registry, payload: Bytes) -> Result<Value, DeserialiseError> {
    let bytes = ByteReader::new(payload).read_many(8)?;
    let mut bits = [0u8; 8];
    bits.copy_from_slice(&bytes);
    Ok(Value::Float(Double::from_bits(u64::from_be_bytes(bits))))
}

fn encode_bytes(_: &Registry, value: &Value) -> Result<Vec<u8>, SerialiseError> {
    match value {
        Value::Bytes(bytes) => Ok(bytes.to_vec()),
        other => Err(shape("bytes", other)),
    }
}

fn decode_bytes(_: &Registry, payload: Bytes) -> Result<Value, DeserialiseError> {
    Ok(Value::Bytes(payload))
}

fn encode_str(_: &Registry, value: &Value) -> Result<Vec<u8>, SerialiseError> {
    match value {
        Value::Str(s) => Ok(s.as_bytes().to_vec()),
        other => Err(shape("str", other)),
    }
}

fn decode_str(_: &Registry, payload: Bytes) -> Result<Value, DeserialiseError> {
    match std::str::from_utf8(&payload) {
        Ok(s) => Ok(Value::Str(s.to_string())),
        Err(e) => Err(DeserialiseError::InvalidString(e)),
    }
}

fn encode_list(registry: &Registry, value: &Value) -> Result<Vec<u8>, SerialiseError> {
    let items = match value {
        Value::List(items) => items,
        other => return Err(shape("list", other)),
    };
    let mut payload = Vec::new();
    put_size(items.len() as u64, &mut payload);
    for item in items {
        encoding::encode(registry, item, &mut payload)?;
    }
    Ok(payload)
}

fn decode_list(registry: &Registry, payload: Bytes) -> Result<Value, DeserialiseError> {
    let input = &mut ByteReader::new(payload);
    let count = read_size(input)?;
    let mut items = Vec::new();
    for _ in 0..count {
        items.push(encoding::decode(registry, input)?);
    }
    Ok(Value::List(items))
}

fn encode_map(registry: &Registry, value: &Value) -> Result<Vec<u8>, SerialiseError> {
    let map = match value {
        Value::Map(map) => map,
        other => return Err(shape("map", other)),
    };
    let mut payload = Vec::new();
    put_size(map.len() as u64, &mut payload);
    for (key, val) in map.iter() {
        encoding::encode(registry, key, &mut payload)?;
        encoding::encode(registry, val, &mut payload)?;
    }
    Ok(payload)
}

fn decode_map(registry: &Registry, payload: Bytes) -> Result<Value, DeserialiseError> {
    let input = &mut ByteReader::new(payload);
    let count = read_size(input)?;
    let mut map = VecMap::new();
    for _ in 0..count {
        let key = encoding::decode(registry, input)?;
        let val = encoding::decode(registry, input)?;
        map.insert(key, val);
    }
    Ok(Value::Map(map))
}

fn as_float(field_value: &Value) -> Result<Double, DeserialiseError> {
    match field_value {
        Value::Float(d) => Ok(*d),
        other => Err(decode_shape("float", other)),
    }
}

/// `complex` goes through the generic field-list machinery: its payload is
/// two full float records, `real` then `imag`.
fn install_complex(registry: &mut Registry) {
    let fields = vec![
        FieldBinding {
            name: "real",
            get: Box::new(|value| match value {
                Value::Complex(c) => Ok(Value::Float(c.re)),
                other => Err(shape("complex", other)),
            }),
            set: Box::new(|value, field_value| {
                let re = as_float(&field_value)?;
                match value {
                    Value::Complex(c) => {
                        c.re = re;
                        Ok(())
                    }
                    other => Err(decode_shape("complex", other)),
                }
            }),
        },
        FieldBinding {
            name: "imag",
            get: Box::new(|value| match value {
                Value::Complex(c) => Ok(Value::Float(c.im)),
                other => Err(shape("complex", other)),
            }),
            set: Box::new(|value, field_value| {
                let im = as_float(&field_value)?;
                match value {
                    Value::Complex(c) => {
                        c.im = im;
                        Ok(())
                    }
                    other => Err(decode_shape("complex", other)),
                }
            }),
        },
    ];
    registry.register_by_fields(
        TypeTag::Complex,
        fields,
        Box::new(|| Value::Complex(Complex::default())),
    );
}

fn install_aliases(registry: &mut Registry) {
    registry
        .register_alias(
            TypeTag::List,
            TypeTag::Tuple,
            Box::new(|value| match value {
                Value::Tuple(items) => Ok(Value::List(items.clone())),
                other => Err(shape("tuple", other)),
            }),
            Box::new(|value| match value {
                Value::List(items) => Ok(Value::Tuple(items)),
                other => Err(decode_shape("list", &other)),
            }),
        )
        .expect("list binding is installed before its aliases");

    registry
        .register_alias(
            TypeTag::List,
            TypeTag::Set,
            Box::new(|value| match value {
                Value::Set(items) => Ok(Value::List(items.clone())),
                other => Err(shape("set", other)),
            }),
            Box::new(|value| match value {
                Value::List(items) => Ok(Value::Set(items)),
                other => Err(decode_shape("list", &other)),
            }),
        )
        .expect("list binding is installed before its aliases");

    registry
        .register_alias(
            TypeTag::List,
            TypeTag::FrozenSet,
            Box::new(|value| match value {
                Value::FrozenSet(items) => Ok(Value::List(items.clone())),
                other => Err(shape("frozenset", other)),
            }),
            Box::new(|value| match value {
                Value::List(items) => Ok(Value::FrozenSet(items)),
                other => Err(decode_shape("list", &other)),
            }),
        )
        .expect("list binding is installed before its aliases");

    registry
        .register_alias(
            TypeTag::List,
            TypeTag::Deque,
            Box::new(|value| match value {
                Value::Deque(items) => Ok(Value::List(items.iter().cloned().collect())),
                other => Err(shape("deque", other)),
            }),
            Box::new(|value| match value {
                Value::List(items) => Ok(Value::Deque(items.into_iter().collect())),
                other => Err(decode_shape("list", &other)),
            }),
        )
        .expect("list binding is installed before its aliases");

    registry
        .register_alias(
            TypeTag::Map,
            TypeTag::OrdMap,
            Box::new(|value| match value {
                Value::OrdMap(map) => Ok(Value::Map(map.clone())),
                other => Err(shape("ordmap", other)),
            }),
            Box::new(|value| match value {
                Value::Map(map) => Ok(Value::OrdMap(map)),
                other => Err(decode_shape("map", &other)),
            }),
        )
        .expect("map binding is installed before its aliases");
}
