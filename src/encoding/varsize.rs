//! The self-terminating size encoding and the length-prefixed blob built on
//! it.
//!
//! A size is the minimal big-endian digit string of a non-negative integer,
//! preceded by one `0xFF` continuation byte per digit after the first. A
//! digit string whose own first digit is `0xFF` gets a `0x00` pad so the
//! reader can tell it apart from a continuation byte. Zero occupies a single
//! `0x00` byte; an empty encoding would be indistinguishable from
//! end-of-stream. An encoding of `L` digits is `2L - 1` bytes long in total.
//!
//! The reader counts continuation bytes rather than checking minimality, so
//! artificially widened encodings still decode to the right integer.

use super::constants::{SIZE_CONT, SIZE_PAD};
use crate::{errors::DeserialiseError, util::u64_to_digits_be};
use bytes::{Buf, Bytes};
use num_bigint::BigUint;
use num_traits::ToPrimitive;

/// A byte stream being decoded.
///
/// # Example
///
/// ```
/// use rjs::encoding::ByteReader;
///
/// let mut input = ByteReader::from(vec![1, 2, 3]);
///
/// assert_eq!(input.take_byte().unwrap(), 1);
/// assert_eq!(input.remaining(), 2);
/// ```
#[derive(Clone, Debug)]
pub struct ByteReader {
    buf: Bytes,
}

impl ByteReader {
    /// Wraps a buffer for reading.
    pub fn new(buf: Bytes) -> ByteReader { ByteReader { buf } }

    /// Bytes not yet consumed.
    pub fn remaining(&self) -> usize { self.buf.len() }

    /// Indicates whether the stream is exhausted.
    pub fn is_empty(&self) -> bool { self.buf.is_empty() }

    /// Takes the next byte off the stream.
    pub fn take_byte(&mut self) -> Result<u8, DeserialiseError> {
        if self.buf.is_empty() {
            Err(DeserialiseError::UnexpectedEndOfInput { needed: 1, had: 0 })
        } else {
            let byte = self.buf[0];
            self.buf.advance(1);
            Ok(byte)
        }
    }

    /// Takes exactly `count` bytes off the stream.
    pub fn read_many(&mut self, count: usize) -> Result<Bytes, DeserialiseError> {
        if self.buf.len() >= count {
            Ok(self.buf.split_to(count))
        } else {
            Err(DeserialiseError::UnexpectedEndOfInput {
                needed: count,
                had: self.buf.len(),
            })
        }
    }
}

impl From<Bytes> for ByteReader {
    fn from(buf: Bytes) -> ByteReader { ByteReader::new(buf) }
}

impl From<Vec<u8>> for ByteReader {
    fn from(buf: Vec<u8>) -> ByteReader { ByteReader::new(Bytes::from(buf)) }
}

impl From<&'static [u8]> for ByteReader {
    fn from(buf: &'static [u8]) -> ByteReader { ByteReader::new(Bytes::from_static(buf)) }
}

/// Writes `n` in the self-terminating size encoding.
///
/// # Example
///
/// ```
/// use rjs::encoding::put_size;
///
/// let mut out = Vec::new();
/// put_size(255, &mut out);
///
/// assert_eq!(out, vec![0xFF, 0x00, 0xFF]);
/// ```
pub fn put_size(n: u64, out: &mut Vec<u8>) { put_digits(&u64_to_digits_be(n), out) }

/// [`put_size`] for sizes beyond `u64`.
pub fn put_size_big(n: &BigUint, out: &mut Vec<u8>) { put_digits(&n.to_bytes_be(), out) }

fn put_digits(digits: &[u8], out: &mut Vec<u8>) {
    let pad = digits[0] == SIZE_CONT;
    let width = digits.len() + pad as usize;
    for _ in 0..width - 1 {
        out.push(SIZE_CONT);
    }
    if pad {
        out.push(SIZE_PAD);
    }
    out.extend_from_slice(digits);
}

/// Reads one size-encoded integer of arbitrary magnitude.
pub fn read_size_big(input: &mut ByteReader) -> Result<BigUint, DeserialiseError> {
    let mut extra = 0usize;
    let mut first = input.take_byte()?;
    while first == SIZE_CONT {
        extra += 1;
        first = input.take_byte()?;
    }
    let rest = input.read_many(extra)?;
    let mut digits = Vec::with_capacity(extra + 1);
    digits.push(first);
    digits.extend_from_slice(&rest);
    Ok(BigUint::from_bytes_be(&digits))
}

/// Reads a size that has to fit in a `usize`.
pub fn read_size(input: &mut ByteReader) -> Result<usize, DeserialiseError> {
    let n = read_size_big(input)?;
    match n.to_usize() {
        Some(size) => Ok(size),
        None => Err(DeserialiseError::OversizedLength(n)),
    }
}

/// Writes a size-prefixed blob.
pub fn put_blob(data: &[u8], out: &mut Vec<u8>) {
    put_size(data.len() as u64, out);
    out.extend_from_slice(data);
}

/// Reads a size-prefixed blob.
///
/// Fails if the stream holds fewer bytes than the prefix promises.
pub fn read_blob(input: &mut ByteReader) -> Result<Bytes, DeserialiseError> {
    let len = read_size(input)?;
    input.read_many(len)
}

#[cfg(test)]
mod tests {
    use super::*;
    use num_traits::One;

    fn size_round_trip(n: u64) -> Vec<u8> {
        let mut out = Vec::new();
        put_size(n, &mut out);
        let input = &mut ByteReader::from(out.clone());
        assert_eq!(read_size_big(input).unwrap(), BigUint::from(n));
        assert!(input.is_empty());
        out
    }

    #[test]
    fn sizes_round_trip_at_minimal_length() {
        let cases: &[(u64, usize)] = &[
            (0, 1),
            (1, 1),
            (127, 1),
            (254, 1),
            (255, 3),
            (256, 3),
            (65535, 5),
            (65536, 5),
            (u32::max_value() as u64, 9),
        ];
        for &(n, expected_len) in cases {
            let out = size_round_trip(n);
            assert_eq!(out.len(), expected_len, "encoding of {}", n);
        }
    }

    #[test]
    fn two_to_the_sixty_four_goes_through_the_big_path() {
        let n: BigUint = BigUint::one() << 64;
        let mut out = Vec::new();
        put_size_big(&n, &mut out);

        // nine digits, so seventeen bytes in all
        assert_eq!(out.len(), 17);
        assert_eq!(read_size_big(&mut ByteReader::from(out)).unwrap(), n);
    }

    #[test]
    fn a_leading_ff_digit_is_padded() {
        let mut out = Vec::new();
        put_size(255, &mut out);
        assert_eq!(out, vec![0xFF, 0x00, 0xFF]);

        let mut out = Vec::new();
        put_size(256, &mut out);
        assert_eq!(out, vec![0xFF, 0x01, 0x00]);
    }

    #[test]
    fn zero_is_one_zero_byte() {
        let mut out = Vec::new();
        put_size(0, &mut out);
        assert_eq!(out, vec![0x00]);
    }

    #[test]
    fn widened_encodings_still_decode() {
        // one digit, artificially padded out to three
        let input = &mut ByteReader::from(vec![0xFF, 0xFF, 0x00, 0x00, 0x2A]);
        assert_eq!(read_size(input).unwrap(), 42);

        let input = &mut ByteReader::from(vec![0xFF, 0x00, 0x01]);
        assert_eq!(read_size(input).unwrap(), 1);
    }

    #[test]
    fn truncated_sizes_fail() {
        assert!(read_size(&mut ByteReader::from(Vec::new())).is_err());
        assert!(read_size(&mut ByteReader::from(vec![0xFF])).is_err());
        assert!(read_size(&mut ByteReader::from(vec![0xFF, 0xFF, 0x01])).is_err());
    }

    #[test]
    fn blobs_round_trip() {
        let mut out = Vec::new();
        put_blob(b"hello", &mut out);
        assert_eq!(out[0], 5);

        let input = &mut ByteReader::from(out);
        assert_eq!(&read_blob(input).unwrap()[..], b"hello");
        assert!(input.is_empty());
    }

    #[test]
    fn short_blobs_fail() {
        // prefix promises five bytes, stream holds two
        let input = &mut ByteReader::from(vec![5, b'h', b'i']);
        assert_eq!(
            read_blob(input).unwrap_err(),
            DeserialiseError::UnexpectedEndOfInput { needed: 5, had: 2 }
        );
    }
}
