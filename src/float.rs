use std::fmt;

/// An IEEE-754 double stored as its raw bit pattern.
///
/// Keeping the bits rather than an `f64` gives [`Value`](crate::Value) total
/// equality, ordering, and hashing; NaN payloads survive round trips
/// bit-for-bit.
#[derive(Eq, PartialEq, Ord, PartialOrd, Clone, Copy, Hash, Debug, Default)]
pub struct Double(u64);

impl Double {
    /// Wraps a raw bit pattern.
    pub fn from_bits(bits: u64) -> Double { Double(bits) }

    /// The raw bit pattern.
    pub fn bits(self) -> u64 { self.0 }

    /// Reinterprets the bits as an `f64`.
    ///
    /// # Example
    ///
    /// ```
    /// use rjs::prelude::*;
    ///
    /// let d = Double::from(1.5);
    ///
    /// assert_eq!(d.to_f64(), 1.5);
    /// ```
    pub fn to_f64(self) -> f64 { f64::from_bits(self.0) }
}

impl From<f64> for Double {
    fn from(f: f64) -> Double { Double(f.to_bits()) }
}

impl From<Double> for f64 {
    fn from(d: Double) -> f64 { d.to_f64() }
}

impl fmt::Display for Double {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result { write!(f, "{}", self.to_f64()) }
}

/// A complex number as a pair of doubles.
#[derive(Eq, PartialEq, Ord, PartialOrd, Clone, Copy, Hash, Debug, Default)]
pub struct Complex {
    pub re: Double,
    pub im: Double,
}

impl Complex {
    /// Creates a complex number from its parts.
    ///
    /// # Example
    ///
    /// ```
    /// use rjs::prelude::*;
    ///
    /// let c = Complex::new(1.0, -2.0);
    ///
    /// assert_eq!(c.re.to_f64(), 1.0);
    /// assert_eq!(c.im.to_f64(), -2.0);
    /// ```
    pub fn new(re: f64, im: f64) -> Complex {
        Complex {
            re: re.into(),
            im: im.into(),
        }
    }
}

impl fmt::Display for Complex {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "({}{:+}i)", self.re.to_f64(), self.im.to_f64())
    }
}
