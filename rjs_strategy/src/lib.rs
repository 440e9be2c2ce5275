//! Proptest strategies for arbitrary [`Value`]s.

use bytes::Bytes;
use num_bigint::BigInt;
use num_traits::Num;
use proptest::prelude::*;
use rjs::prelude::*;

/// arbitrary BigInt for use with proptest
pub fn arb_bigint() -> impl Strategy<Value = BigInt> {
    "-?1[01]{63,90}".prop_map(|n| -> BigInt { BigInt::from_str_radix(&n, 2).unwrap() })
}

/// arbitrary Bytes for use with proptest
pub fn arb_bytes() -> impl Strategy<Value = Bytes> {
    prop::collection::vec(any::<u8>(), 0..64).prop_map(Bytes::from)
}

/// arbitrary integer Value of every width for use with proptest
pub fn arb_int() -> impl Strategy<Value = Value> {
    prop_oneof![
        any::<i64>().prop_map(Value::from),
        any::<u64>().prop_map(Value::from),
        any::<i128>().prop_map(Value::from),
        any::<u128>().prop_map(Value::from),
        any::<usize>().prop_map(Value::from),
        any::<isize>().prop_map(Value::from),
        arb_bigint().prop_map(Value::from),
    ]
}

/// arbitrary scalar Value for use with proptest
pub fn arb_scalar() -> impl Strategy<Value = Value> {
    prop_oneof![
        Just(Value::None),
        any::<bool>().prop_map(Value::from),
        ".*".prop_map(Value::from),
        any::<char>().prop_map(Value::from),
        any::<()>().prop_map(Value::from),
        arb_int(),
        // floats as raw bit patterns, so NaNs get exercised too
        any::<u64>().prop_map(|bits| Value::Float(Double::from_bits(bits))),
        (any::<u64>(), any::<u64>()).prop_map(|(re, im)| {
            Value::Complex(Complex {
                re: Double::from_bits(re),
                im: Double::from_bits(im),
            })
        }),
        arb_bytes().prop_map(Value::from),
    ]
}

/// arbitrary Value for use with proptest
pub fn arb_value() -> impl Strategy<Value = Value> {
    arb_scalar().prop_recursive(
        4,  // max depth
        32, // max nodes
        6,  // items per collection
        |inner| {
            prop_oneof![
                prop::collection::vec(inner.clone(), 0..6).prop_map(Value::List),
                prop::collection::vec(inner.clone(), 0..6).prop_map(Value::Tuple),
                prop::collection::vec(inner.clone(), 0..6).prop_map(Value::Set),
                prop::collection::vec(inner.clone(), 0..6).prop_map(Value::FrozenSet),
                prop::collection::vec(inner.clone(), 0..6)
                    .prop_map(|items| Value::Deque(items.into_iter().collect())),
                prop::collection::vec((inner.clone(), inner.clone()), 0..6)
                    .prop_map(|pairs| Value::Map(pairs.into_iter().collect())),
                prop::collection::vec((inner.clone(), inner), 0..6)
                    .prop_map(|pairs| Value::OrdMap(pairs.into_iter().collect())),
            ]
        },
    )
}
