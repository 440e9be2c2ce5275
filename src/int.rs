use num_bigint::BigInt;
use num_traits::ToPrimitive;
use std::convert::TryFrom;

use crate::{from_as, from_fn, from_prims};

/// `Int`s are either `i64`s or big integers.
///
/// The `Big` variant only ever holds values outside `i64` range; the `From`
/// impls maintain this invariant, so equality between round-tripped values is
/// structural.
#[derive(Eq, PartialEq, Ord, PartialOrd, Clone, Hash, Debug)]
pub enum Int {
    I64(i64),
    Big(BigInt),
}

use Int::*;

from_fn!(Int, i64, I64);
from_fn!(Int, u64, |u: u64| {
    if u <= i64::max_value() as u64 {
        I64(u as i64)
    } else {
        Big(BigInt::from(u))
    }
});
from_fn!(Int, BigInt, |i: BigInt| {
    match i.to_i64() {
        Some(small) => I64(small),
        None => Big(i),
    }
});
from_fn!(Int, i128, |i: i128| Int::from(BigInt::from(i)));
from_fn!(Int, u128, |u: u128| Int::from(BigInt::from(u)));
from_prims!(Int);
from_as!(Int, usize, u64);
from_as!(Int, isize, i64);

impl From<Int> for BigInt {
    fn from(i: Int) -> BigInt {
        match i {
            I64(i) => BigInt::from(i),
            Big(i) => i,
        }
    }
}

impl TryFrom<Int> for i64 {
    type Error = Int;

    fn try_from(i: Int) -> Result<Self, Int> {
        match i {
            I64(i) => Ok(i),
            big => Err(big),
        }
    }
}

impl TryFrom<Int> for u64 {
    type Error = Int;

    fn try_from(n: Int) -> Result<Self, Int> {
        match n.to_u64() {
            Some(u) => Ok(u),
            None => Err(n),
        }
    }
}

impl Int {
    /// Produces an `i64` if the value fits, otherwise returns `None`.
    pub fn to_i64(&self) -> Option<i64> {
        match self {
            I64(i) => Some(*i),
            Big(_) => None,
        }
    }

    /// Produces a `u64` if the value is in range, otherwise returns `None`.
    pub fn to_u64(&self) -> Option<u64> {
        match self {
            I64(i) => {
                if *i >= 0 {
                    Some(*i as u64)
                } else {
                    None
                }
            }
            Big(i) => i.to_u64(),
        }
    }

    /// Produces an `i128` if the value fits, otherwise returns `None`.
    pub fn to_i128(&self) -> Option<i128> {
        match self {
            I64(i) => Some(*i as i128),
            Big(i) => i.to_i128(),
        }
    }

    /// Produces a `u128` if the value is in range, otherwise returns `None`.
    pub fn to_u128(&self) -> Option<u128> {
        match self {
            I64(i) => {
                if *i >= 0 {
                    Some(*i as u128)
                } else {
                    None
                }
            }
            Big(i) => i.to_u128(),
        }
    }
}

impl PartialEq<i64> for Int {
    fn eq(&self, other: &i64) -> bool {
        match self {
            I64(i) => i.eq(other),
            Big(_) => false,
        }
    }
}

impl PartialOrd<i64> for Int {
    fn partial_cmp(&self, other: &i64) -> Option<core::cmp::Ordering> {
        match self {
            I64(i) => i.partial_cmp(other),
            Big(i) => i.partial_cmp(&BigInt::from(*other)),
        }
    }
}

impl std::fmt::Display for Int {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            I64(i) => write!(f, "{}", i),
            Big(i) => write!(f, "{}", i),
        }
    }
}
