// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Wire format tags for reading and writing vectors

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::errors::CodecError;

/// Declared encoding of an incoming payload
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SourceFormat {
    /// UTF-8 JSON array of numbers
    Json,
    /// UTF-8 standard padded Base64 of little-endian scalars
    Base64,
}

impl SourceFormat {
    pub const fn name(self) -> &'static str {
        match self {
            SourceFormat::Json => "json",
            SourceFormat::Base64 => "base64",
        }
    }
}

impl fmt::Display for SourceFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for SourceFormat {
    type Err = CodecError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "json" => Ok(SourceFormat::Json),
            "base64" | "b64" => Ok(SourceFormat::Base64),
            _ => Err(CodecError::UnsupportedFormat(s.to_string())),
        }
    }
}

/// Write-back format selected by a tag string
///
/// Only `"J"` is defined. The comparison is ordinal, so `"j"` is rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WriteFormat {
    Json,
}

impl WriteFormat {
    pub const JSON_TAG: &'static str = "J";

    pub fn parse(tag: &str) -> Result<Self, CodecError> {
        if tag == Self::JSON_TAG {
            Ok(WriteFormat::Json)
        } else {
            Err(CodecError::UnsupportedFormat(tag.to_string()))
        }
    }

    pub const fn tag(self) -> &'static str {
        match self {
            WriteFormat::Json => Self::JSON_TAG,
        }
    }
}

// Serializing numbers or strings can only fail in the underlying writer
pub(crate) fn sink_error(err: serde_json::Error) -> CodecError {
    CodecError::Io(err.into())
}
