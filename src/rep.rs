//! Conversions between native Rust types and [`Value`].
//!
//! [`ValueRep`] is the bridge most callers want: build values from plain Rust
//! data, and pull plain Rust data back out of decoded values without matching
//! on variants by hand.
//!
//! # Example
//!
//! ```
//! use rjs::prelude::*;
//!
//! let registry = Registry::with_builtins();
//!
//! let scores: Vec<u32> = vec![10, 20, 30];
//! let encoded = encode_full(&registry, &scores.to_value()).unwrap();
//!
//! let back: Vec<u32> = decode_full(&registry, encoded).unwrap().into_rep().unwrap();
//! assert_eq!(back, scores);
//! ```

use crate::{int::Int, vecmap::VecMap, Value};
use bytes::Bytes;
use std::convert::TryInto;

/// A type with a [`Value`] representation.
///
/// `from_value` returns `None` when the value has the wrong shape for the
/// target type; no coercion is attempted beyond integer width narrowing.
pub trait ValueRep: Clone + Sized {
    /// Converts a borrowed value.
    fn to_value(&self) -> Value { self.clone().into_value() }

    /// Consumes the value, converting it.
    fn into_value(self) -> Value { self.to_value() }

    /// Converts back from a [`Value`].
    fn from_value(value: Value) -> Option<Self>;
}

impl ValueRep for Value {
    fn into_value(self) -> Value { self }

    fn from_value(value: Value) -> Option<Value> { Some(value) }
}

macro_rules! rep_via_try_from {
    ($t:ty) => {
        impl ValueRep for $t {
            fn into_value(self) -> Value { self.into() }

            fn from_value(value: Value) -> Option<$t> { value.try_into().ok() }
        }
    };
}

rep_via_try_from!(bool);
rep_via_try_from!(Int);
rep_via_try_from!(Bytes);
rep_via_try_from!(String);
rep_via_try_from!(crate::float::Complex);
rep_via_try_from!(crate::Record);

impl ValueRep for i64 {
    fn into_value(self) -> Value { self.into() }

    fn from_value(value: Value) -> Option<i64> {
        match value {
            Value::Int(i) => i.to_i64(),
            _ => None,
        }
    }
}

impl ValueRep for u64 {
    fn into_value(self) -> Value { self.into() }

    fn from_value(value: Value) -> Option<u64> {
        match value {
            Value::Int(i) => i.to_u64(),
            _ => None,
        }
    }
}

impl ValueRep for i128 {
    fn into_value(self) -> Value { self.into() }

    fn from_value(value: Value) -> Option<i128> {
        match value {
            Value::Int(i) => i.to_i128(),
            _ => None,
        }
    }
}

impl ValueRep for u128 {
    fn into_value(self) -> Value { self.into() }

    fn from_value(value: Value) -> Option<u128> {
        match value {
            Value::Int(i) => i.to_u128(),
            _ => None,
        }
    }
}

macro_rules! rep_via_i64 {
    ($t:ty) => {
        impl ValueRep for $t {
            fn into_value(self) -> Value { self.into() }

            fn from_value(value: Value) -> Option<$t> {
                i64::from_value(value)?.try_into().ok()
            }
        }
    };
}

rep_via_i64!(i8);
rep_via_i64!(i16);
rep_via_i64!(i32);
rep_via_i64!(u8);
rep_via_i64!(u16);
rep_via_i64!(u32);
rep_via_i64!(isize);

impl ValueRep for usize {
    fn into_value(self) -> Value { self.into() }

    fn from_value(value: Value) -> Option<usize> { u64::from_value(value)?.try_into().ok() }
}

impl ValueRep for f64 {
    fn into_value(self) -> Value { self.into() }

    fn from_value(value: Value) -> Option<f64> { value.to_f64() }
}

impl ValueRep for () {
    fn into_value(self) -> Value { Value::None }

    fn from_value(value: Value) -> Option<()> {
        if value.is_none() {
            Some(())
        } else {
            None
        }
    }
}

impl ValueRep for char {
    fn into_value(self) -> Value { Value::Str(self.to_string()) }

    fn from_value(value: Value) -> Option<char> {
        let s = match value {
            Value::Str(s) => s,
            _ => return None,
        };
        let mut chars = s.chars();
        match (chars.next(), chars.next()) {
            (Some(c), None) => Some(c),
            _ => None,
        }
    }
}

impl<T: ValueRep> ValueRep for Vec<T> {
    fn to_value(&self) -> Value { Value::List(self.iter().map(T::to_value).collect()) }

    fn into_value(self) -> Value { Value::List(self.into_iter().map(T::into_value).collect()) }

    fn from_value(value: Value) -> Option<Self> {
        value.into_list()?.into_iter().map(T::from_value).collect()
    }
}

impl<T: ValueRep> ValueRep for VecMap<Value, T> {
    fn to_value(&self) -> Value {
        Value::Map(self.iter().map(|(k, v)| (k.clone(), v.to_value())).collect())
    }

    fn into_value(self) -> Value {
        Value::Map(self.into_iter().map(|(k, v)| (k, v.into_value())).collect())
    }

    fn from_value(value: Value) -> Option<Self> {
        value
            .into_map()?
            .into_iter()
            .map(|(k, v)| T::from_value(v).map(|v| (k, v)))
            .collect()
    }
}

impl<T: ValueRep> ValueRep for Option<T> {
    fn to_value(&self) -> Value {
        match self {
            Some(t) => t.to_value(),
            None => Value::None,
        }
    }

    fn into_value(self) -> Value {
        match self {
            Some(t) => t.into_value(),
            None => Value::None,
        }
    }

    fn from_value(value: Value) -> Option<Self> {
        if value.is_none() {
            Some(None)
        } else {
            T::from_value(value).map(Some)
        }
    }
}

impl<A: ValueRep, B: ValueRep> ValueRep for (A, B) {
    fn to_value(&self) -> Value { Value::Tuple(vec![self.0.to_value(), self.1.to_value()]) }

    fn into_value(self) -> Value { Value::Tuple(vec![self.0.into_value(), self.1.into_value()]) }

    fn from_value(value: Value) -> Option<Self> {
        let items = match value {
            Value::Tuple(items) => items,
            _ => return None,
        };
        if items.len() != 2 {
            return None;
        }
        let mut items = items.into_iter();
        let a = A::from_value(items.next()?)?;
        let b = B::from_value(items.next()?)?;
        Some((a, b))
    }
}

impl<A: ValueRep, B: ValueRep, C: ValueRep> ValueRep for (A, B, C) {
    fn to_value(&self) -> Value {
        Value::Tuple(vec![self.0.to_value(), self.1.to_value(), self.2.to_value()])
    }

    fn into_value(self) -> Value {
        Value::Tuple(vec![
            self.0.into_value(),
            self.1.into_value(),
            self.2.into_value(),
        ])
    }

    fn from_value(value: Value) -> Option<Self> {
        let items = match value {
            Value::Tuple(items) => items,
            _ => return None,
        };
        if items.len() != 3 {
            return None;
        }
        let mut items = items.into_iter();
        let a = A::from_value(items.next()?)?;
        let b = B::from_value(items.next()?)?;
        let c = C::from_value(items.next()?)?;
        Some((a, b, c))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn integer_narrowing_is_checked() {
        assert_eq!(u8::from_value(Value::from(255)), Some(255));
        assert_eq!(u8::from_value(Value::from(256)), None);
        assert_eq!(i8::from_value(Value::from(-128)), Some(-128));
        assert_eq!(u64::from_value(Value::from(-1)), None);
    }

    #[test]
    fn options_collapse_to_none() {
        assert_eq!(None::<u8>.into_value(), Value::None);
        assert_eq!(Option::<u8>::from_value(Value::None), Some(None));
        assert_eq!(Option::<u8>::from_value(Value::from(3)), Some(Some(3)));
    }

    #[test]
    fn tuples_are_tuples() {
        let v = (1u8, "x".to_string()).into_value();
        assert_eq!(
            v,
            Value::Tuple(vec![Value::from(1), Value::from("x")])
        );
        assert_eq!(<(u8, String)>::from_value(v), Some((1, "x".to_string())));
    }

    #[test]
    fn shape_mismatches_are_none() {
        assert_eq!(bool::from_value(Value::from(1)), None);
        assert_eq!(Vec::<u8>::from_value(Value::from("not a list")), None);
    }
}
