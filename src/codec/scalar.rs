// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Scalar element kinds and their binary/JSON encoding rules
//!
//! Binary layout is little-endian and fixed-width:
//! - float32: 4 bytes, IEEE-754 binary32
//! - float16: 2 bytes, IEEE-754 binary16
//! - int8 / uint8: 1 byte
//!
//! The JSON path uses the JSON number grammar; width only matters for
//! range checks on the integer kinds.

use half::f16;
use serde::{Deserialize, Serialize};
use serde_json::value::RawValue;
use std::cmp::Ordering;
use std::fmt;
use std::io;
use std::str::FromStr;

use super::errors::CodecError;
use super::format::sink_error;
use super::typed::{DecodedVector, TypedVector};

/// Element kind of a decoded embedding vector
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScalarType {
    Float32,
    Float16,
    Int8,
    UInt8,
}

impl ScalarType {
    /// All supported kinds, widest first
    pub const ALL: [ScalarType; 4] = [
        ScalarType::Float32,
        ScalarType::Float16,
        ScalarType::Int8,
        ScalarType::UInt8,
    ];

    /// Size of one element in the binary wire format
    pub const fn byte_width(self) -> usize {
        match self {
            ScalarType::Float32 => 4,
            ScalarType::Float16 => 2,
            ScalarType::Int8 | ScalarType::UInt8 => 1,
        }
    }

    /// Canonical lowercase name
    pub const fn name(self) -> &'static str {
        match self {
            ScalarType::Float32 => "float32",
            ScalarType::Float16 => "float16",
            ScalarType::Int8 => "int8",
            ScalarType::UInt8 => "uint8",
        }
    }
}

impl fmt::Display for ScalarType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ScalarType {
    type Err = CodecError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "float32" | "f32" | "float" | "single" => Ok(ScalarType::Float32),
            "float16" | "f16" | "half" => Ok(ScalarType::Float16),
            "int8" | "i8" | "sbyte" => Ok(ScalarType::Int8),
            "uint8" | "u8" | "byte" => Ok(ScalarType::UInt8),
            _ => Err(CodecError::UnsupportedType(s.to_string())),
        }
    }
}

/// Parse a JSON array of numbers, rounding each literal from its own text
///
/// Finite literals that overflow the narrower kind are rejected rather than
/// turned into infinities.
fn parse_json_floats<T>(
    payload: &[u8],
    parse: impl Fn(&str) -> Option<T>,
    is_finite: impl Fn(&T) -> bool,
) -> serde_json::Result<Vec<T>> {
    let elements: Vec<&RawValue> = serde_json::from_slice(payload)?;
    elements
        .iter()
        .enumerate()
        .map(|(i, raw)| {
            let text = raw.get();
            match parse(text) {
                Some(value) if is_finite(&value) => Ok(value),
                Some(_) => Err(serde::de::Error::custom(format!(
                    "element {} ({}) is out of range",
                    i, text
                ))),
                None => Err(serde::de::Error::custom(format!(
                    "element {} ({}) is not a number",
                    i, text
                ))),
            }
        })
        .collect()
}

/// Round a JSON number literal to the nearest binary16, ties to even
///
/// Goes through binary64 first. That can only land on the wrong neighbour
/// when the binary64 value is exactly a binary16 midpoint, so that case is
/// settled by comparing the literal's decimal digits with the midpoint.
fn parse_f16(text: &str) -> Option<f16> {
    let wide: f64 = text.parse().ok()?;
    let magnitude = wide.abs();
    let nearest = f16::from_f64(magnitude);
    let rounded = match f16_midpoint(nearest, magnitude) {
        Some((lower, upper, midpoint)) => {
            let digits = text.strip_prefix('-').unwrap_or(text);
            match compare_decimal(digits, midpoint) {
                Some(Ordering::Greater) => upper,
                Some(Ordering::Less) => lower,
                _ => nearest,
            }
        }
        None => nearest,
    };
    Some(if wide.is_sign_negative() { -rounded } else { rounded })
}

/// Neighbours of `magnitude` and their midpoint, if `magnitude` sits on it
fn f16_midpoint(nearest: f16, magnitude: f64) -> Option<(f16, f16, f64)> {
    // Infinity stands in for 2^16 when bracketing values above f16::MAX
    let value = |h: f16| if h.is_infinite() { 65536.0 } else { h.to_f64() };
    let at = value(nearest);
    if at == magnitude || magnitude.is_nan() {
        return None;
    }
    let (lower, upper) = if at < magnitude {
        (nearest, f16::from_bits(nearest.to_bits() + 1))
    } else {
        (f16::from_bits(nearest.to_bits() - 1), nearest)
    };
    let midpoint = (value(lower) + value(upper)) / 2.0;
    (midpoint == magnitude).then_some((lower, upper, midpoint))
}

/// Significant digits and decimal point position of a non-negative number
///
/// `"0.00125"` becomes `("125", -2)`, i.e. `0.125e-2`. Zero has no digits.
fn decimal_digits(text: &str) -> Option<(String, i64)> {
    let (mantissa, exponent) = match text.find(['e', 'E']) {
        Some(i) => (&text[..i], text[i + 1..].parse::<i64>().ok()?),
        None => (text, 0),
    };
    let (int, frac) = mantissa.split_once('.').unwrap_or((mantissa, ""));
    let all: String = int.chars().chain(frac.chars()).collect();
    let unpadded = all.trim_start_matches('0');
    let leading = (all.len() - unpadded.len()) as i64;
    let significant = unpadded.trim_end_matches('0');
    if significant.is_empty() {
        return Some((String::new(), 0));
    }
    Some((significant.to_string(), int.len() as i64 - leading + exponent))
}

/// Exact comparison of a decimal literal against a non-zero binary64 value
fn compare_decimal(text: &str, value: f64) -> Option<Ordering> {
    // 40 fractional digits spell out any binary16 midpoint exactly
    let (lhs, lhs_point) = decimal_digits(text)?;
    let (rhs, rhs_point) = decimal_digits(&format!("{:.40e}", value))?;
    if lhs.is_empty() {
        return Some(Ordering::Less);
    }
    Some(lhs_point.cmp(&rhs_point).then_with(|| lhs.cmp(&rhs)))
}

/// Reject NaN and infinities, which have no JSON number form
fn ensure_finite<T: Copy + fmt::Debug>(
    scalars: &[T],
    is_finite: impl Fn(T) -> bool,
) -> Result<(), CodecError> {
    match scalars.iter().position(|s| !is_finite(*s)) {
        Some(i) => Err(CodecError::UnsupportedOperation {
            operation: "write",
            reason: format!("element {} ({:?}) has no JSON representation", i, scalars[i]),
        }),
        None => Ok(()),
    }
}

mod sealed {
    pub trait Sealed {}

    impl Sealed for f32 {}
    impl Sealed for half::f16 {}
    impl Sealed for i8 {}
    impl Sealed for u8 {}
}

/// A Rust type usable as an embedding element
///
/// Implemented for `f32`, `half::f16`, `i8` and `u8` only. Each implementation
/// carries the per-kind conversion rules, so decoding is monomorphic and never
/// inspects types at runtime.
pub trait Scalar:
    sealed::Sealed + Copy + PartialEq + fmt::Debug + Send + Sync + 'static
{
    const SCALAR_TYPE: ScalarType;

    /// Read one element from exactly `byte_width` little-endian bytes
    fn read_le(bytes: &[u8]) -> Self;

    /// Append the little-endian encoding of this element
    fn write_le(self, out: &mut Vec<u8>);

    /// Parse a JSON array of numbers
    fn parse_json(payload: &[u8]) -> serde_json::Result<Vec<Self>>;

    /// Serialize elements as a JSON array of numbers
    ///
    /// Fails with `UnsupportedOperation` on NaN or infinite elements.
    fn write_json<W: io::Write>(scalars: &[Self], writer: W) -> Result<(), CodecError>;

    /// Widen to f32 (exact for every kind)
    fn to_f32(self) -> f32;

    fn wrap(vector: TypedVector<Self>) -> DecodedVector;

    fn project(vector: DecodedVector) -> Option<TypedVector<Self>>;
}

impl Scalar for f32 {
    const SCALAR_TYPE: ScalarType = ScalarType::Float32;

    #[inline]
    fn read_le(bytes: &[u8]) -> Self {
        f32::from_le_bytes([bytes[0], bytes[1], bytes[2], bytes[3]])
    }

    #[inline]
    fn write_le(self, out: &mut Vec<u8>) {
        out.extend_from_slice(&self.to_le_bytes());
    }

    fn parse_json(payload: &[u8]) -> serde_json::Result<Vec<Self>> {
        parse_json_floats(payload, |text| text.parse::<f32>().ok(), |f| f.is_finite())
    }

    fn write_json<W: io::Write>(scalars: &[Self], writer: W) -> Result<(), CodecError> {
        ensure_finite(scalars, f32::is_finite)?;
        serde_json::to_writer(writer, scalars).map_err(sink_error)
    }

    fn to_f32(self) -> f32 {
        self
    }

    fn wrap(vector: TypedVector<Self>) -> DecodedVector {
        DecodedVector::Float32(vector)
    }

    fn project(vector: DecodedVector) -> Option<TypedVector<Self>> {
        match vector {
            DecodedVector::Float32(v) => Some(v),
            _ => None,
        }
    }
}

impl Scalar for f16 {
    const SCALAR_TYPE: ScalarType = ScalarType::Float16;

    #[inline]
    fn read_le(bytes: &[u8]) -> Self {
        f16::from_bits(u16::from_le_bytes([bytes[0], bytes[1]]))
    }

    #[inline]
    fn write_le(self, out: &mut Vec<u8>) {
        out.extend_from_slice(&self.to_bits().to_le_bytes());
    }

    fn parse_json(payload: &[u8]) -> serde_json::Result<Vec<Self>> {
        parse_json_floats(payload, parse_f16, |h| h.is_finite())
    }

    // Widening is exact; the shortest f32 text parses back to the same half
    fn write_json<W: io::Write>(scalars: &[Self], writer: W) -> Result<(), CodecError> {
        ensure_finite(scalars, f16::is_finite)?;
        let wide: Vec<f32> = scalars.iter().map(|h| h.to_f32()).collect();
        serde_json::to_writer(writer, &wide).map_err(sink_error)
    }

    fn to_f32(self) -> f32 {
        f16::to_f32(self)
    }

    fn wrap(vector: TypedVector<Self>) -> DecodedVector {
        DecodedVector::Float16(vector)
    }

    fn project(vector: DecodedVector) -> Option<TypedVector<Self>> {
        match vector {
            DecodedVector::Float16(v) => Some(v),
            _ => None,
        }
    }
}

impl Scalar for i8 {
    const SCALAR_TYPE: ScalarType = ScalarType::Int8;

    #[inline]
    fn read_le(bytes: &[u8]) -> Self {
        i8::from_le_bytes([bytes[0]])
    }

    #[inline]
    fn write_le(self, out: &mut Vec<u8>) {
        out.extend_from_slice(&self.to_le_bytes());
    }

    fn parse_json(payload: &[u8]) -> serde_json::Result<Vec<Self>> {
        serde_json::from_slice(payload)
    }

    fn write_json<W: io::Write>(scalars: &[Self], writer: W) -> Result<(), CodecError> {
        serde_json::to_writer(writer, scalars).map_err(sink_error)
    }

    fn to_f32(self) -> f32 {
        f32::from(self)
    }

    fn wrap(vector: TypedVector<Self>) -> DecodedVector {
        DecodedVector::Int8(vector)
    }

    fn project(vector: DecodedVector) -> Option<TypedVector<Self>> {
        match vector {
            DecodedVector::Int8(v) => Some(v),
            _ => None,
        }
    }
}

impl Scalar for u8 {
    const SCALAR_TYPE: ScalarType = ScalarType::UInt8;

    #[inline]
    fn read_le(bytes: &[u8]) -> Self {
        bytes[0]
    }

    #[inline]
    fn write_le(self, out: &mut Vec<u8>) {
        out.push(self);
    }

    fn parse_json(payload: &[u8]) -> serde_json::Result<Vec<Self>> {
        serde_json::from_slice(payload)
    }

    fn write_json<W: io::Write>(scalars: &[Self], writer: W) -> Result<(), CodecError> {
        serde_json::to_writer(writer, scalars).map_err(sink_error)
    }

    fn to_f32(self) -> f32 {
        f32::from(self)
    }

    fn wrap(vector: TypedVector<Self>) -> DecodedVector {
        DecodedVector::UInt8(vector)
    }

    fn project(vector: DecodedVector) -> Option<TypedVector<Self>> {
        match vector {
            DecodedVector::UInt8(v) => Some(v),
            _ => None,
        }
    }
}
