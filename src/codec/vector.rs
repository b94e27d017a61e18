// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Uniform handle over encoded and already-typed embedding vectors

use std::io;
use std::sync::Arc;
use tracing::trace;

use super::base64_vector::Base64Vector;
use super::errors::{CodecError, Result};
use super::format::SourceFormat;
use super::json_array::JsonArrayVector;
use super::scalar::{Scalar, ScalarType};
use super::typed::{DecodedVector, TypedVector};

/// An embedding vector in one of its supported representations
///
/// The caller states the wire format when constructing; payloads are never
/// sniffed. Decoding is pure and may be repeated: each call returns a fresh
/// buffer that does not alias the payload.
///
/// # Example
/// ```
/// use embedding_codec::{EmbeddingVector, ScalarType};
///
/// let vector = EmbeddingVector::from_json(b"[1,2,3]".to_vec());
/// let bytes = vector.decode_as::<u8>().unwrap();
/// assert_eq!(bytes.scalars(), &[1u8, 2, 3]);
///
/// let floats = vector.decode(ScalarType::Float32).unwrap();
/// assert_eq!(floats.to_f32_vec(), vec![1.0, 2.0, 3.0]);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub enum EmbeddingVector {
    Json(JsonArrayVector),
    Base64(Base64Vector),
    Typed(DecodedVector),
}

impl EmbeddingVector {
    /// Wrap a UTF-8 JSON numeric array
    pub fn from_json(utf8_json: impl Into<Arc<[u8]>>) -> Self {
        let vector = JsonArrayVector::new(utf8_json);
        trace!(payload_bytes = vector.payload().len(), "JSON vector created");
        EmbeddingVector::Json(vector)
    }

    /// Wrap UTF-8 Base64 text of little-endian scalars
    pub fn from_base64(utf8_base64: impl Into<Arc<[u8]>>) -> Self {
        let vector = Base64Vector::new(utf8_base64);
        trace!(payload_bytes = vector.payload().len(), "Base64 vector created");
        EmbeddingVector::Base64(vector)
    }

    pub fn from_source(payload: impl Into<Arc<[u8]>>, format: SourceFormat) -> Self {
        match format {
            SourceFormat::Json => Self::from_json(payload),
            SourceFormat::Base64 => Self::from_base64(payload),
        }
    }

    /// Build a typed vector from scalars the caller already holds
    pub fn from_scalars<T: Scalar>(scalars: &[T]) -> TypedVector<T> {
        TypedVector::from(scalars)
    }

    /// Name of the representation: `json`, `base64` or `typed`
    pub fn wire_format(&self) -> &'static str {
        match self {
            EmbeddingVector::Json(_) => "json",
            EmbeddingVector::Base64(_) => "base64",
            EmbeddingVector::Typed(_) => "typed",
        }
    }

    /// Decode into the given element kind
    ///
    /// A `Typed` vector only decodes to its own kind; converting between
    /// kinds is not defined and yields `UnsupportedOperation`.
    pub fn decode(&self, scalar_type: ScalarType) -> Result<DecodedVector> {
        match self {
            EmbeddingVector::Json(v) => v.decode_to(scalar_type),
            EmbeddingVector::Base64(v) => v.decode_to(scalar_type),
            EmbeddingVector::Typed(v) if v.scalar_type() == scalar_type => Ok(v.clone()),
            EmbeddingVector::Typed(v) => Err(CodecError::UnsupportedOperation {
                operation: "decode",
                reason: format!(
                    "vector already holds {} scalars, cannot convert to {}",
                    v.scalar_type(),
                    scalar_type
                ),
            }),
        }
    }

    /// Decode into a statically chosen element type
    pub fn decode_as<T: Scalar>(&self) -> Result<TypedVector<T>> {
        match self {
            EmbeddingVector::Json(v) => v.decode::<T>(),
            EmbeddingVector::Base64(v) => v.decode::<T>(),
            EmbeddingVector::Typed(_) => {
                let decoded = self.decode(T::SCALAR_TYPE)?;
                T::project(decoded).ok_or_else(|| CodecError::UnsupportedOperation {
                    operation: "decode",
                    reason: format!("vector does not hold {} scalars", T::SCALAR_TYPE),
                })
            }
        }
    }

    /// Decode into an element kind given by name, e.g. `"float16"` or `"sbyte"`
    pub fn decode_named(&self, scalar_type: &str) -> Result<DecodedVector> {
        self.decode(scalar_type.parse()?)
    }

    /// Write the vector using a format tag; only `"J"` is defined
    ///
    /// - JSON payloads are re-emitted verbatim
    /// - Base64 payloads are emitted as a JSON string of the original text
    /// - Typed vectors are serialized as a JSON numeric array
    pub fn write<W: io::Write>(&self, writer: W, format: &str) -> Result<()> {
        match self {
            EmbeddingVector::Json(v) => v.write(writer, format),
            EmbeddingVector::Base64(v) => v.write(writer, format),
            EmbeddingVector::Typed(v) => v.write(writer, format),
        }
    }

    pub fn to_json_bytes(&self, format: &str) -> Result<Vec<u8>> {
        let mut out = Vec::new();
        self.write(&mut out, format)?;
        Ok(out)
    }
}

impl<T: Scalar> From<TypedVector<T>> for EmbeddingVector {
    fn from(vector: TypedVector<T>) -> Self {
        EmbeddingVector::Typed(vector.into())
    }
}

impl From<DecodedVector> for EmbeddingVector {
    fn from(vector: DecodedVector) -> Self {
        EmbeddingVector::Typed(vector)
    }
}

impl From<JsonArrayVector> for EmbeddingVector {
    fn from(vector: JsonArrayVector) -> Self {
        EmbeddingVector::Json(vector)
    }
}

impl From<Base64Vector> for EmbeddingVector {
    fn from(vector: Base64Vector) -> Self {
        EmbeddingVector::Base64(vector)
    }
}
