// SPDX-License-Identifier: Apache-2.0

//! Numeric literal classification.
//!
//! JSON numbers are scanned once and stored in the narrowest representation
//! that holds them exactly. Integers promote through the 16/32/64-bit widths
//! by magnitude; anything with a decimal point or exponent becomes an `f64`.
//! Magnitude loss is not an error: it yields a distinct overflow variant
//! that callers must check for before trusting the payload bits.

use core::fmt;

/// A classified JSON scalar.
///
/// The parser only ever produces `Null`, `Bool`, the 16/32/64-bit integer
/// variants, the overflow markers, and `Float64`. The 8-bit and `Float32`
/// variants exist so values of every native width can be wrapped via the
/// `From` conversions.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Number {
    /// JSON `null`.
    Null,
    /// JSON `true` or `false`.
    Bool(bool),
    Int8(i8),
    UInt8(u8),
    Int16(i16),
    UInt16(u16),
    Int32(i32),
    UInt32(u32),
    Int64(i64),
    UInt64(u64),
    /// A negative literal whose magnitude does not fit in `i64`. The payload
    /// holds the wrapped best-effort bits and must not be trusted.
    Int64Overflow(i64),
    /// A non-negative literal whose magnitude does not fit in `u64`. The
    /// payload holds the wrapped best-effort bits and must not be trusted.
    UInt64Overflow(u64),
    Float32(f32),
    Float64(f64),
}

impl Number {
    /// Parses the longest numeric-literal prefix of `text`.
    ///
    /// `text` must start at the first byte of the literal (a digit, `+`,
    /// `-`, or `.`). Returns the classified value and the count of bytes
    /// consumed, or the offset of the byte that made the literal invalid.
    /// Scanning stops cleanly at the first non-numeric byte; validating
    /// what follows the literal is the caller's business.
    pub fn parse(text: &[u8]) -> Result<(Number, usize), usize> {
        if text.is_empty() {
            return Err(0);
        }

        let mut value: u64 = 0;
        let mut overflowed = false;
        let mut dvalue: f64 = 0.0;
        let mut fraction_weight: f64 = 0.1;
        let mut exponent: i32 = 0;
        let mut negative_exponent = false;
        let mut exponent_digits: u8 = 0;

        let mut is_real = false;
        let mut dot_seen = false;
        let mut exponent_seen = false;

        let negative = text[0] == b'-';
        let mut i = usize::from(negative || text[0] == b'+');

        while i < text.len() {
            let c = text[i];
            match c {
                b'0'..=b'9' => {
                    let digit = u64::from(c - b'0');
                    if exponent_seen {
                        if exponent_digits > 1 {
                            // a third exponent digit is a hard error
                            return Err(i);
                        }
                        exponent = exponent * 10 + digit as i32;
                        exponent_digits += 1;
                    } else if is_real {
                        if dot_seen {
                            dvalue += digit as f64 * fraction_weight;
                            fraction_weight /= 10.0;
                        } else {
                            dvalue *= 10.0;
                            dvalue += digit as f64;
                        }
                    } else {
                        let next = value.wrapping_mul(10).wrapping_add(digit);
                        if next < value {
                            overflowed = true;
                        }
                        value = next;
                    }
                }
                b'.' => {
                    if dot_seen || exponent_seen {
                        return Err(i);
                    }
                    dot_seen = true;
                    if !is_real {
                        dvalue = value as f64;
                    }
                    is_real = true;
                }
                b'e' | b'E' => {
                    // One byte of lookahead: the marker is only consumed when
                    // a digit or a sign follows. A sign is consumed together
                    // with the marker.
                    match text.get(i + 1) {
                        Some(&next) if next.is_ascii_digit() || next == b'+' || next == b'-' => {
                            negative_exponent = next == b'-';
                            if !next.is_ascii_digit() {
                                i += 1;
                            }
                        }
                        _ => return Err(i),
                    }
                    if exponent_seen {
                        return Err(i);
                    }
                    exponent_seen = true;
                    if !is_real {
                        dvalue = value as f64;
                    }
                    is_real = true;
                }
                _ => break,
            }
            i += 1;
        }

        if i == 0 {
            // the first byte was not numeric at all
            return Err(0);
        }

        if is_real {
            if negative {
                dvalue = -dvalue;
            }
            if exponent_seen && exponent != 0 {
                // Repeated multiply/divide rather than powi; keeps the exact
                // rounding behavior stable across platforms.
                let mut e = if negative_exponent { -exponent } else { exponent };
                while e > 0 {
                    dvalue *= 10.0;
                    e -= 1;
                }
                while e < 0 {
                    dvalue /= 10.0;
                    e += 1;
                }
            }
            Ok((Number::Float64(dvalue), i))
        } else if negative {
            // Negation that does not come out negative means the magnitude
            // left the i64 range; that includes `-0`.
            let signed = (value as i64).wrapping_neg();
            let number = if overflowed || signed >= 0 {
                Number::Int64Overflow(signed)
            } else if signed < i64::from(i32::MIN) {
                Number::Int64(signed)
            } else if signed < i64::from(i16::MIN) {
                Number::Int32(signed as i32)
            } else {
                Number::Int16(signed as i16)
            };
            Ok((number, i))
        } else {
            let number = if overflowed {
                Number::UInt64Overflow(value)
            } else if value > u64::from(u32::MAX) {
                Number::UInt64(value)
            } else if value > u64::from(u16::MAX) {
                Number::UInt32(value as u32)
            } else {
                Number::UInt16(value as u16)
            };
            Ok((number, i))
        }
    }

    /// Returns true for [`Number::Null`].
    pub fn is_null(&self) -> bool {
        matches!(self, Number::Null)
    }

    /// Returns true when the literal's magnitude was lost during parsing.
    pub fn is_overflow(&self) -> bool {
        matches!(self, Number::Int64Overflow(_) | Number::UInt64Overflow(_))
    }

    /// The value as an `i64`, if it is an integer that fits.
    pub fn as_i64(&self) -> Option<i64> {
        match *self {
            Number::Int8(v) => Some(i64::from(v)),
            Number::UInt8(v) => Some(i64::from(v)),
            Number::Int16(v) => Some(i64::from(v)),
            Number::UInt16(v) => Some(i64::from(v)),
            Number::Int32(v) => Some(i64::from(v)),
            Number::UInt32(v) => Some(i64::from(v)),
            Number::Int64(v) => Some(v),
            Number::UInt64(v) => i64::try_from(v).ok(),
            _ => None,
        }
    }

    /// The value as a `u64`, if it is a non-negative integer.
    pub fn as_u64(&self) -> Option<u64> {
        match *self {
            Number::UInt8(v) => Some(u64::from(v)),
            Number::UInt16(v) => Some(u64::from(v)),
            Number::UInt32(v) => Some(u64::from(v)),
            Number::UInt64(v) => Some(v),
            Number::Int8(v) => u64::try_from(v).ok(),
            Number::Int16(v) => u64::try_from(v).ok(),
            Number::Int32(v) => u64::try_from(v).ok(),
            Number::Int64(v) => u64::try_from(v).ok(),
            _ => None,
        }
    }

    /// The value as an `f64`. Integers convert; overflowed values, booleans
    /// and null return `None`.
    pub fn as_f64(&self) -> Option<f64> {
        match *self {
            Number::Float32(v) => Some(f64::from(v)),
            Number::Float64(v) => Some(v),
            Number::UInt64(v) => Some(v as f64),
            _ => self.as_i64().map(|v| v as f64),
        }
    }
}

macro_rules! impl_from {
    ($($ty:ty => $variant:ident),* $(,)?) => {
        $(
            impl From<$ty> for Number {
                fn from(value: $ty) -> Self {
                    Number::$variant(value)
                }
            }
        )*
    };
}

impl_from! {
    bool => Bool,
    i8 => Int8,
    u8 => UInt8,
    i16 => Int16,
    u16 => UInt16,
    i32 => Int32,
    u32 => UInt32,
    i64 => Int64,
    u64 => UInt64,
    f32 => Float32,
    f64 => Float64,
}

impl fmt::Display for Number {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            Number::Null => f.write_str("null"),
            Number::Bool(v) => write!(f, "{v}"),
            Number::Int8(v) => write!(f, "{v}"),
            Number::UInt8(v) => write!(f, "{v}"),
            Number::Int16(v) => write!(f, "{v}"),
            Number::UInt16(v) => write!(f, "{v}"),
            Number::Int32(v) => write!(f, "{v}"),
            Number::UInt32(v) => write!(f, "{v}"),
            Number::Int64(v) | Number::Int64Overflow(v) => write!(f, "{v}"),
            Number::UInt64(v) | Number::UInt64Overflow(v) => write!(f, "{v}"),
            Number::Float32(v) => write!(f, "{v}"),
            Number::Float64(v) => write!(f, "{v}"),
        }
    }
}
