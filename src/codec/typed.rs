// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Typed, immutable embedding buffers

use base64::{engine::general_purpose::STANDARD, Engine as _};
use half::f16;
use std::io;
use std::sync::Arc;
use tracing::trace;

use super::errors::Result;
use super::format::WriteFormat;
use super::scalar::{Scalar, ScalarType};

/// An immutable, contiguous buffer of scalars of one kind
///
/// Cloning shares the underlying buffer. There is no mutation API; the
/// length and element type are fixed at construction.
#[derive(Debug, Clone, PartialEq)]
pub struct TypedVector<T: Scalar> {
    scalars: Arc<[T]>,
}

impl<T: Scalar> TypedVector<T> {
    pub fn new(scalars: impl Into<Arc<[T]>>) -> Self {
        Self {
            scalars: scalars.into(),
        }
    }

    pub fn scalars(&self) -> &[T] {
        &self.scalars
    }

    /// Embedding dimensionality
    pub fn len(&self) -> usize {
        self.scalars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.scalars.is_empty()
    }

    pub fn scalar_type(&self) -> ScalarType {
        T::SCALAR_TYPE
    }

    pub fn into_vec(self) -> Vec<T> {
        self.scalars.to_vec()
    }

    /// Widen every element to f32
    pub fn to_f32_vec(&self) -> Vec<f32> {
        self.scalars.iter().map(|s| s.to_f32()).collect()
    }

    /// Flat little-endian binary form, as carried inside Base64 payloads
    pub fn to_le_bytes(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(self.len() * T::SCALAR_TYPE.byte_width());
        for scalar in self.scalars.iter() {
            scalar.write_le(&mut out);
        }
        out
    }

    /// Standard padded Base64 of [`Self::to_le_bytes`]
    pub fn to_base64(&self) -> String {
        STANDARD.encode(self.to_le_bytes())
    }

    /// Write the vector in the requested format
    ///
    /// `"J"` emits a JSON numeric array in canonical shortest form, which
    /// parses back to identical values for both float kinds. NaN and
    /// infinities cannot be written and yield `UnsupportedOperation`.
    pub fn write<W: io::Write>(&self, writer: W, format: &str) -> Result<()> {
        match WriteFormat::parse(format)? {
            WriteFormat::Json => {
                trace!(scalar_type = %T::SCALAR_TYPE, len = self.len(), "writing typed vector");
                T::write_json(&self.scalars, writer)
            }
        }
    }

    pub fn to_json_bytes(&self, format: &str) -> Result<Vec<u8>> {
        let mut out = Vec::new();
        self.write(&mut out, format)?;
        Ok(out)
    }
}

impl<T: Scalar> From<Vec<T>> for TypedVector<T> {
    fn from(scalars: Vec<T>) -> Self {
        Self::new(scalars)
    }
}

impl<T: Scalar> From<&[T]> for TypedVector<T> {
    fn from(scalars: &[T]) -> Self {
        Self::new(scalars)
    }
}

impl<T: Scalar> AsRef<[T]> for TypedVector<T> {
    fn as_ref(&self) -> &[T] {
        &self.scalars
    }
}

/// A typed vector whose element kind was chosen at runtime
#[derive(Debug, Clone, PartialEq)]
pub enum DecodedVector {
    Float32(TypedVector<f32>),
    Float16(TypedVector<f16>),
    Int8(TypedVector<i8>),
    UInt8(TypedVector<u8>),
}

impl DecodedVector {
    pub fn scalar_type(&self) -> ScalarType {
        match self {
            DecodedVector::Float32(_) => ScalarType::Float32,
            DecodedVector::Float16(_) => ScalarType::Float16,
            DecodedVector::Int8(_) => ScalarType::Int8,
            DecodedVector::UInt8(_) => ScalarType::UInt8,
        }
    }

    pub fn len(&self) -> usize {
        match self {
            DecodedVector::Float32(v) => v.len(),
            DecodedVector::Float16(v) => v.len(),
            DecodedVector::Int8(v) => v.len(),
            DecodedVector::UInt8(v) => v.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Typed view, `None` if the element kind differs
    pub fn into_typed<T: Scalar>(self) -> Option<TypedVector<T>> {
        T::project(self)
    }

    pub fn to_f32_vec(&self) -> Vec<f32> {
        match self {
            DecodedVector::Float32(v) => v.to_f32_vec(),
            DecodedVector::Float16(v) => v.to_f32_vec(),
            DecodedVector::Int8(v) => v.to_f32_vec(),
            DecodedVector::UInt8(v) => v.to_f32_vec(),
        }
    }

    pub fn to_le_bytes(&self) -> Vec<u8> {
        match self {
            DecodedVector::Float32(v) => v.to_le_bytes(),
            DecodedVector::Float16(v) => v.to_le_bytes(),
            DecodedVector::Int8(v) => v.to_le_bytes(),
            DecodedVector::UInt8(v) => v.to_le_bytes(),
        }
    }

    pub fn to_base64(&self) -> String {
        STANDARD.encode(self.to_le_bytes())
    }

    pub fn write<W: io::Write>(&self, writer: W, format: &str) -> Result<()> {
        match self {
            DecodedVector::Float32(v) => v.write(writer, format),
            DecodedVector::Float16(v) => v.write(writer, format),
            DecodedVector::Int8(v) => v.write(writer, format),
            DecodedVector::UInt8(v) => v.write(writer, format),
        }
    }

    pub fn to_json_bytes(&self, format: &str) -> Result<Vec<u8>> {
        let mut out = Vec::new();
        self.write(&mut out, format)?;
        Ok(out)
    }
}

impl<T: Scalar> From<TypedVector<T>> for DecodedVector {
    fn from(vector: TypedVector<T>) -> Self {
        T::wrap(vector)
    }
}
