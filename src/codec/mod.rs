// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Embedding vector codec
//!
//! Decodes vectors delivered as JSON numeric arrays or as Base64 text of
//! little-endian scalars into typed buffers, and writes them back.
//!
//! Supported element kinds per wire format:
//!
//! | kind    | JSON array | Base64 binary |
//! |---------|------------|---------------|
//! | float32 | yes        | yes (4 bytes) |
//! | float16 | yes        | yes (2 bytes) |
//! | int8    | yes        | yes (1 byte)  |
//! | uint8   | yes        | yes (1 byte)  |

pub mod base64_vector;
pub mod errors;
pub mod format;
pub mod json_array;
pub mod scalar;
pub mod typed;
pub mod vector;

pub use base64_vector::Base64Vector;
pub use errors::{CodecError, ErrorKind, Result};
pub use format::{SourceFormat, WriteFormat};
pub use json_array::JsonArrayVector;
pub use scalar::{Scalar, ScalarType};
pub use typed::{DecodedVector, TypedVector};
pub use vector::EmbeddingVector;
