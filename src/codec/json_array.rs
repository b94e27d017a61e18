// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! JSON numeric array payloads

use std::io;
use std::sync::Arc;
use tracing::debug;

use super::errors::{CodecError, Result};
use super::format::WriteFormat;
use super::scalar::{Scalar, ScalarType};
use super::typed::{DecodedVector, TypedVector};

/// A vector still in its `[n0, n1, ...]` UTF-8 JSON form
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JsonArrayVector {
    payload: Arc<[u8]>,
}

impl JsonArrayVector {
    pub fn new(utf8_json: impl Into<Arc<[u8]>>) -> Self {
        Self {
            payload: utf8_json.into(),
        }
    }

    /// The raw payload exactly as supplied
    pub fn payload(&self) -> &[u8] {
        &self.payload
    }

    /// Parse the array into scalars of type `T`
    ///
    /// Narrowing to float16 rounds silently. Integer kinds reject fractional,
    /// out-of-range or non-numeric elements.
    pub fn decode<T: Scalar>(&self) -> Result<TypedVector<T>> {
        let scalars = T::parse_json(&self.payload).map_err(|source| CodecError::MalformedJson {
            target: T::SCALAR_TYPE,
            source,
        })?;
        debug!(
            scalar_type = %T::SCALAR_TYPE,
            len = scalars.len(),
            payload_bytes = self.payload.len(),
            "decoded JSON array vector"
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

    /// `"J"` re-emits the original bytes verbatim
    pub fn write<W: io::Write>(&self, mut writer: W, format: &str) -> Result<()> {
        match WriteFormat::parse(format)? {
            WriteFormat::Json => {
                writer.write_all(&self.payload)?;
                Ok(())
            }
        }
    }
}
