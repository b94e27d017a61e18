// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Base64 payloads carrying raw little-endian scalars
//!
//! This is the layout embedding APIs return when asked for
//! `encoding_format: "base64"`: the Base64 text of a flat array of
//! fixed-width little-endian elements. The element count is implied by the
//! decoded length, which must be an exact multiple of the element width.

use base64::{engine::general_purpose::STANDARD, Engine as _};
use std::io;
use std::sync::Arc;
use tracing::debug;

use super::errors::{CodecError, Result};
use super::format::{sink_error, WriteFormat};
use super::scalar::{Scalar, ScalarType};
use super::typed::{DecodedVector, TypedVector};

/// A vector still in its Base64 text form
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Base64Vector {
    payload: Arc<[u8]>,
}

impl Base64Vector {
    /// Wrap UTF-8 Base64 text given as bytes
    pub fn new(utf8_base64: impl Into<Arc<[u8]>>) -> Self {
        Self {
            payload: utf8_base64.into(),
        }
    }

    pub fn from_text(base64: &str) -> Self {
        Self::new(base64.as_bytes())
    }

    /// The Base64 text exactly as supplied
    pub fn payload(&self) -> &[u8] {
        &self.payload
    }

    /// Decode the raw bytes behind the Base64 text
    pub fn raw_bytes(&self, target: ScalarType) -> Result<Vec<u8>> {
        STANDARD
            .decode(&self.payload)
            .map_err(|source| CodecError::MalformedBase64 { target, source })
    }

    /// Reinterpret the decoded bytes as little-endian scalars of type `T`
    ///
    /// Float kinds are bit-exact: four bytes `[b0, b1, b2, b3]` yield the
    /// binary32 value of `b3 << 24 | b2 << 16 | b1 << 8 | b0`.
    pub fn decode<T: Scalar>(&self) -> Result<TypedVector<T>> {
        let target = T::SCALAR_TYPE;
        let raw = self.raw_bytes(target)?;
        let width = target.byte_width();

        if raw.len() % width != 0 {
            return Err(CodecError::MisalignedBuffer {
                target,
                len: raw.len(),
                width,
            });
        }

        let scalars: Vec<T> = raw.chunks_exact(width).map(T::read_le).collect();
        debug!(
            scalar_type = %target,
            len = scalars.len(),
            raw_bytes = raw.len(),
            "decoded Base64 vector"
        );
        Ok(TypedVector::from(scalars))
    }

    pub fn decode_to(&self, scalar_type: ScalarType) -> Result<DecodedVector> {
        Ok(match scalar_type {
            ScalarType::Float32 => self.decode::<f32>()?.into(),
            ScalarType::Float16 => self.decode::<half::f16>()?.into(),
            ScalarType::Int8 => self.decode::<i8>()?.into(),
            ScalarType::UInt8 => self.decode::<u8>()?.into(),
        })
    }

    /// `"J"` emits the original Base64 text as a quoted JSON string
    pub fn write<W: io::Write>(&self, writer: W, format: &str) -> Result<()> {
        match WriteFormat::parse(format)? {
            WriteFormat::Json => {
                let text = std::str::from_utf8(&self.payload)?;
                serde_json::to_writer(writer, text).map_err(sink_error)
            }
        }
    }
}
