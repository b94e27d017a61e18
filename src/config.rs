// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Configuration for the embedding codec tools

use std::env;

use crate::codec::{ScalarType, SourceFormat};

/// Default input limit (64 MiB)
pub const DEFAULT_MAX_INPUT_BYTES: usize = 64 * 1024 * 1024;

/// Configuration for decoding front ends
#[derive(Debug, Clone)]
pub struct CodecConfig {
    /// Element kind used when none is requested explicitly
    pub default_scalar_type: ScalarType,
    /// Wire format assumed when none is declared explicitly
    pub default_source_format: SourceFormat,
    /// Largest payload the CLI will read
    pub max_input_bytes: usize,
}

impl CodecConfig {
    /// Load configuration from environment variables
    ///
    /// Unparseable values fall back to the defaults.
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            default_scalar_type: env::var("EMBEDDING_SCALAR_TYPE")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.default_scalar_type),
            default_source_format: env::var("EMBEDDING_SOURCE_FORMAT")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.default_source_format),
            max_input_bytes: env::var("EMBEDDING_MAX_INPUT_BYTES")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.max_input_bytes),
        }
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.max_input_bytes == 0 {
            return Err("Max input bytes must be greater than 0".to_string());
        }
        Ok(())
    }
}

impl Default for CodecConfig {
    fn default() -> Self {
        Self {
            default_scalar_type: ScalarType::Float32,
            default_source_format: SourceFormat::Json,
            max_input_bytes: DEFAULT_MAX_INPUT_BYTES,
        }
    }
}
