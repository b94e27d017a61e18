// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Error types for embedding vector decoding and write-back
//!
//! Every failure is a permanent rejection of the given input:
//! - Format errors (malformed JSON, bad Base64, misaligned binary buffers)
//! - Unsupported scalar types or write-back format tags
//! - Operations that the selected vector variant cannot perform

use thiserror::Error;

use super::scalar::ScalarType;

/// Coarse classification of a [`CodecError`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Payload does not conform to its declared wire format
    Format,
    /// Requested scalar type is not one of the supported kinds
    UnsupportedType,
    /// Requested write-back format tag is not recognized
    UnsupportedFormat,
    /// Operation has no implementation for this vector variant
    UnsupportedOperation,
    /// Writer failed while emitting a vector
    Io,
}

/// Errors that can occur while decoding or writing an embedding vector
#[derive(Error, Debug)]
pub enum CodecError {
    /// JSON payload is not a well-formed array of numbers for the target type
    #[error("Malformed JSON array for {target}: {source}")]
    MalformedJson {
        target: ScalarType,
        #[source]
        source: serde_json::Error,
    },

    /// Base64 payload contains characters outside the alphabet or bad padding
    #[error("Malformed Base64 payload for {target}: {source}")]
    MalformedBase64 {
        target: ScalarType,
        #[source]
        source: base64::DecodeError,
    },

    /// Decoded byte length is not a multiple of the element width
    #[error("Misaligned buffer for {target}: {len} bytes is not a multiple of {width}")]
    MisalignedBuffer {
        target: ScalarType,
        len: usize,
        width: usize,
    },

    /// Payload that must be UTF-8 text is not
    #[error("Payload is not valid UTF-8: {0}")]
    InvalidUtf8(#[from] std::str::Utf8Error),

    /// Response document could not be navigated
    #[error("Malformed document at {pointer}: {reason}")]
    MalformedDocument { pointer: String, reason: String },

    /// Field addressed by a JSON pointer does not exist
    #[error("Field not found: {0}")]
    FieldNotFound(String),

    /// Scalar type name is not float32, float16, int8 or uint8
    #[error("Unsupported scalar type: {0}")]
    UnsupportedType(String),

    /// Write-back format tag other than "J"
    #[error("Unsupported write format: {0:?}")]
    UnsupportedFormat(String),

    /// Operation not available on this vector variant
    #[error("Unsupported operation {operation}: {reason}")]
    UnsupportedOperation {
        operation: &'static str,
        reason: String,
    },

    /// I/O failure while writing to the caller's sink
    #[error("Write failed: {0}")]
    Io(#[from] std::io::Error),
}

impl CodecError {
    /// Spec-level classification of this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            CodecError::MalformedJson { .. }
            | CodecError::MalformedBase64 { .. }
            | CodecError::MisalignedBuffer { .. }
            | CodecError::InvalidUtf8(_)
            | CodecError::MalformedDocument { .. }
            | CodecError::FieldNotFound(_) => ErrorKind::Format,
            CodecError::UnsupportedType(_) => ErrorKind::UnsupportedType,
            CodecError::UnsupportedFormat(_) => ErrorKind::UnsupportedFormat,
            CodecError::UnsupportedOperation { .. } => ErrorKind::UnsupportedOperation,
            CodecError::Io(_) => ErrorKind::Io,
        }
    }

    /// Get error code for logging
    pub fn error_code(&self) -> &'static str {
        match self {
            CodecError::MalformedJson { .. } => "MALFORMED_JSON",
            CodecError::MalformedBase64 { .. } => "MALFORMED_BASE64",
            CodecError::MisalignedBuffer { .. } => "MISALIGNED_BUFFER",
            CodecError::InvalidUtf8(_) => "INVALID_UTF8",
            CodecError::MalformedDocument { .. } => "MALFORMED_DOCUMENT",
            CodecError::FieldNotFound(_) => "FIELD_NOT_FOUND",
            CodecError::UnsupportedType(_) => "UNSUPPORTED_TYPE",
            CodecError::UnsupportedFormat(_) => "UNSUPPORTED_FORMAT",
            CodecError::UnsupportedOperation { .. } => "UNSUPPORTED_OPERATION",
            CodecError::Io(_) => "IO_ERROR",
        }
    }

    /// Codec rejections are permanent; only sink failures may succeed on retry
    pub fn is_retryable(&self) -> bool {
        matches!(self, CodecError::Io(_))
    }

    pub fn is_format_error(&self) -> bool {
        self.kind() == ErrorKind::Format
    }
}

/// Result alias used throughout the codec
pub type Result<T> = std::result::Result<T, CodecError>;
