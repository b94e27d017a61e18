// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
pub mod cli;
pub mod codec;
pub mod config;
pub mod document;
pub mod version;

// Re-export main codec types
pub use codec::{
    Base64Vector, CodecError, DecodedVector, EmbeddingVector, ErrorKind, JsonArrayVector, Result,
    Scalar, ScalarType, SourceFormat, TypedVector, WriteFormat,
};
pub use config::CodecConfig;
pub use half::f16;
