//! Wire-level checks: payload layouts, alias delegation, lookup order, and
//! the failure conditions a hostile or truncated stream has to hit.

use bytes::Bytes;
use num_bigint::BigInt;
use rjs::{
    encoding::{put_blob, put_size},
    prelude::*,
};
use std::collections::VecDeque;

fn record(name: &[u8], payload: &[u8]) -> Vec<u8> {
    let mut out = Vec::new();
    put_blob(name, &mut out);
    put_blob(payload, &mut out);
    out
}

#[test]
fn every_builtin_round_trips() {
    let registry = Registry::with_builtins();

    let values = vec![
        Value::None,
        Value::from(false),
        Value::from(true),
        Value::from(0),
        Value::from(255),
        Value::from(-129),
        Value::from(u64::max_value()),
        Value::from(BigInt::from(i64::min_value()) * BigInt::from(7)),
        Value::from(0.0),
        Value::from(-1.5),
        Value::Float(Double::from_bits(u64::max_value())), // a NaN pattern
        Value::Complex(Complex::new(3.0, -4.0)),
        Value::from_static(b"\x00\x01\x02"),
        Value::from(""),
        Value::from("snowman \u{2603}"),
        Value::from(vec![Value::from(1), Value::None]),
        Value::Tuple(vec![Value::from("a"), Value::from("b")]),
        Value::Set(vec![Value::from(1), Value::from(2)]),
        Value::FrozenSet(vec![Value::from(3)]),
        Value::Deque(VecDeque::from(vec![Value::from(4), Value::from(5)])),
        Value::Map(
            vec![(Value::from("k"), Value::from(9))]
                .into_iter()
                .collect(),
        ),
        Value::OrdMap(
            vec![(Value::from(1), Value::from("one"))]
                .into_iter()
                .collect(),
        ),
    ];

    for value in values {
        let encoded = encode_full(&registry, &value).unwrap();
        assert_eq!(
            decode_full(&registry, encoded).unwrap(),
            value,
            "round trip of {}",
            value
        );
    }
}

#[test]
fn aliases_reuse_the_base_payload() {
    let registry = Registry::with_builtins();

    let items = vec![Value::from(1), Value::from(2)];
    let as_list = encode_full(&registry, &Value::List(items.clone())).unwrap();
    let as_tuple = encode_full(&registry, &Value::Tuple(items)).unwrap();

    // strip each name blob; the payload blobs must be identical
    let list_payload = &as_list[1 + 4..];
    let tuple_payload = &as_tuple[1 + 5..];
    assert_eq!(list_payload, tuple_payload);

    assert_eq!(&as_tuple[..6], &[5, b't', b'u', b'p', b'l', b'e']);
}

#[test]
fn maps_preserve_insertion_order() {
    let registry = Registry::with_builtins();

    let forward: VecMap<Value, Value> = vec![
        (Value::from("z"), Value::from(1)),
        (Value::from("a"), Value::from(2)),
    ]
    .into_iter()
    .collect();

    let decoded = decode_full(
        &registry,
        encode_full(&registry, &Value::Map(forward.clone())).unwrap(),
    )
    .unwrap();

    let decoded_keys: Vec<String> = decoded
        .into_map()
        .unwrap()
        .into_iter()
        .map(|(k, _)| k.as_str().unwrap().to_string())
        .collect();
    assert_eq!(decoded_keys, vec!["z".to_string(), "a".to_string()]);
}

#[test]
fn records_round_trip_through_field_lists() {
    let mut registry = Registry::with_builtins();
    registry.register_record("point", &["x", "y"]);

    let point = Value::from(Record::new(
        "point",
        vec![Value::from(3), Value::from(-4)],
    ));
    let encoded = encode_full(&registry, &point).unwrap();
    assert_eq!(&encoded[..6], &[5, b'p', b'o', b'i', b'n', b't']);
    assert_eq!(decode_full(&registry, encoded).unwrap(), point);
}

#[test]
fn record_payloads_ignore_trailing_bytes() {
    let mut registry = Registry::with_builtins();
    registry.register_record("pair", &["a", "b"]);

    let mut payload = Vec::new();
    encode(&registry, &Value::from(1), &mut payload).unwrap();
    encode(&registry, &Value::from(2), &mut payload).unwrap();
    payload.extend_from_slice(b"trailing junk");

    let decoded = decode_full(&registry, record(b"pair", &payload)).unwrap();
    assert_eq!(
        decoded,
        Value::from(Record::new("pair", vec![Value::from(1), Value::from(2)]))
    );
}

#[test]
fn decode_resolves_name_collisions_to_the_first_binding() {
    let mut registry = Registry::with_builtins();

    registry.register(
        TypeTag::Named("shade".to_string()),
        Box::new(|_, _| Ok(Vec::new())),
        Box::new(|_, _| Ok(Value::from("first"))),
    );
    registry.register(
        TypeTag::Named("shade".to_string()),
        Box::new(|_, _| Ok(vec![0xAA])),
        Box::new(|_, _| Ok(Value::from("second"))),
    );

    // every call lands on the first binding, not just the first call
    for _ in 0..3 {
        let decoded = decode_full(&registry, record(b"shade", &[])).unwrap();
        assert_eq!(decoded, Value::from("first"));
    }
}

#[test]
fn encode_resolves_duplicate_tags_to_the_first_binding() {
    let mut registry = Registry::new();
    registry.register(
        TypeTag::Bool,
        Box::new(|_, _| Ok(vec![0x11])),
        Box::new(|_, _| Ok(Value::from(true))),
    );
    registry.register(
        TypeTag::Bool,
        Box::new(|_, _| Ok(vec![0x22])),
        Box::new(|_, _| Ok(Value::from(false))),
    );

    let encoded = encode_full(&registry, &Value::from(true)).unwrap();
    assert_eq!(encoded, record(b"bool", &[0x11]));
}

#[test]
fn a_user_name_can_shadow_nothing_but_itself() {
    // a later binding reusing a built-in name never wins decodes
    let mut registry = Registry::with_builtins();
    registry.register(
        TypeTag::Named("int".to_string()),
        Box::new(|_, _| Ok(Vec::new())),
        Box::new(|_, _| Ok(Value::from("impostor"))),
    );

    let decoded = decode_full(&registry, record(b"int", &[0x05])).unwrap();
    assert_eq!(decoded, Value::from(5));
}

#[test]
fn alias_registration_requires_a_base() {
    let mut registry = Registry::new();
    let err = registry
        .register_alias(
            TypeTag::Map,
            TypeTag::OrdMap,
            Box::new(|v| Ok(v.clone())),
            Box::new(Ok),
        )
        .unwrap_err();

    assert_eq!(
        err,
        AliasError {
            alias: TypeTag::OrdMap,
            base: TypeTag::Map,
        }
    );
}

#[test]
fn unregistered_values_do_not_encode() {
    let registry = Registry::new();
    assert_eq!(
        encode_full(&registry, &Value::from(1)).unwrap_err(),
        SerialiseError::UnregisteredType(TypeTag::Int)
    );
}

#[test]
fn truncated_streams_fail_with_end_of_input() {
    let registry = Registry::with_builtins();

    // a headered stream cut inside the magic, the version, and the record
    let full = encode_with_header(&registry, &Value::from("payload")).unwrap();
    for cut in 0..full.len() {
        let result = decode_with_header(
            &registry,
            &mut ByteReader::new(Bytes::from(full[..cut].to_vec())),
        );
        assert!(result.is_err(), "prefix of {} bytes decoded", cut);
    }
}

#[test]
fn bool_decodes_need_a_payload_byte() {
    let registry = Registry::with_builtins();
    assert_eq!(
        decode_full(&registry, record(b"bool", &[])).unwrap_err(),
        DeserialiseError::UnexpectedEndOfInput { needed: 1, had: 0 }
    );
}

#[test]
fn float_decodes_need_eight_payload_bytes() {
    let registry = Registry::with_builtins();
    assert_eq!(
        decode_full(&registry, record(b"float", &[0; 4])).unwrap_err(),
        DeserialiseError::UnexpectedEndOfInput { needed: 8, had: 4 }
    );
}

#[test]
fn str_decodes_validate_utf8() {
    let registry = Registry::with_builtins();
    match decode_full(&registry, record(b"str", &[0xC0, 0x80])).unwrap_err() {
        DeserialiseError::InvalidString(_) => {}
        other => panic!("expected InvalidString, got {:?}", other),
    }
}

#[test]
fn list_counts_are_promises() {
    let registry = Registry::with_builtins();

    // count says two elements, payload holds one
    let mut payload = Vec::new();
    put_size(2, &mut payload);
    encode(&registry, &Value::from(1), &mut payload).unwrap();

    assert!(decode_full(&registry, record(b"list", &payload)).is_err());
}

#[test]
fn the_zero_rules_do_not_mix() {
    let registry = Registry::with_builtins();

    // VarSize zero is one 0x00 byte; integer zero is an empty payload.
    let zero = encode_full(&registry, &Value::from(0)).unwrap();
    assert_eq!(zero, record(b"int", &[]));

    let empty_list = encode_full(&registry, &Value::List(Vec::new())).unwrap();
    assert_eq!(empty_list, record(b"list", &[0x00]));
}
