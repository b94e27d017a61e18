// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
use anyhow::{anyhow, Context, Result};
use clap::Args;
use std::fs::File;
use std::io::{self, Read, Write};
use std::path::{Path, PathBuf};
use tracing::info;

use crate::codec::{EmbeddingVector, ScalarType, SourceFormat, WriteFormat};
use crate::config::CodecConfig;
use crate::document;

/// Arguments for the decode command
#[derive(Args, Debug)]
pub struct DecodeArgs {
    /// Declared payload format (json/base64), defaults to EMBEDDING_SOURCE_FORMAT
    #[arg(long)]
    pub source: Option<SourceFormat>,

    /// Element type (float32/float16/int8/uint8), defaults to EMBEDDING_SCALAR_TYPE
    #[arg(long)]
    pub scalar: Option<ScalarType>,

    /// Read the payload from a file instead of stdin
    #[arg(long)]
    pub input: Option<PathBuf>,
}

/// Arguments for the encode command
#[derive(Args, Debug)]
pub struct EncodeArgs {
    /// Element type to encode as
    #[arg(long)]
    pub scalar: Option<ScalarType>,

    /// Read the JSON array from a file instead of stdin
    #[arg(long)]
    pub input: Option<PathBuf>,
}

/// Arguments for the extract command
#[derive(Args, Debug)]
pub struct ExtractArgs {
    /// JSON pointer to the vector field (e.g. /value/0/DescriptionVector)
    #[arg(long)]
    pub pointer: String,

    /// Treat POINTER as an array and extract this field from every element
    #[arg(long)]
    pub each: Option<String>,

    /// Declared format of the field (json/base64)
    #[arg(long)]
    pub source: Option<SourceFormat>,

    /// Element type to decode into
    #[arg(long)]
    pub scalar: Option<ScalarType>,

    /// Read the document from a file instead of stdin
    #[arg(long)]
    pub input: Option<PathBuf>,
}

/// Arguments for the passthrough command
#[derive(Args, Debug)]
pub struct PassthroughArgs {
    /// Declared payload format (json/base64)
    #[arg(long)]
    pub source: Option<SourceFormat>,

    /// Read the payload from a file instead of stdin
    #[arg(long)]
    pub input: Option<PathBuf>,
}

/// Read a payload from a file or stdin, refusing anything above `limit` bytes
pub fn read_input(path: Option<&Path>, limit: usize) -> Result<Vec<u8>> {
    let reader: Box<dyn Read> = match path {
        Some(path) => Box::new(
            File::open(path).with_context(|| format!("Failed to open {}", path.display()))?,
        ),
        None => Box::new(io::stdin()),
    };

    let mut payload = Vec::new();
    reader
        .take((limit as u64).saturating_add(1))
        .read_to_end(&mut payload)
        .context("Failed to read input")?;

    if payload.len() > limit {
        return Err(anyhow!("Input exceeds the {} byte limit", limit));
    }
    Ok(trim_ascii_whitespace(&payload).to_vec())
}

fn trim_ascii_whitespace(bytes: &[u8]) -> &[u8] {
    let start = bytes
        .iter()
        .position(|b| !b.is_ascii_whitespace())
        .unwrap_or(bytes.len());
    let end = bytes
        .iter()
        .rposition(|b| !b.is_ascii_whitespace())
        .map_or(start, |i| i + 1);
    &bytes[start..end]
}

pub fn decode<W: Write>(args: DecodeArgs, config: &CodecConfig, out: &mut W) -> Result<()> {
    let payload = read_input(args.input.as_deref(), config.max_input_bytes)?;
    let source = args.source.unwrap_or(config.default_source_format);
    let scalar = args.scalar.unwrap_or(config.default_scalar_type);

    let decoded = EmbeddingVector::from_source(payload, source)
        .decode(scalar)
        .with_context(|| format!("Failed to decode {} payload as {}", source, scalar))?;
    info!("Decoded {} {} scalars from {}", decoded.len(), scalar, source);

    decoded.write(&mut *out, WriteFormat::JSON_TAG)?;
    writeln!(out)?;
    Ok(())
}

pub fn encode<W: Write>(args: EncodeArgs, config: &CodecConfig, out: &mut W) -> Result<()> {
    let payload = read_input(args.input.as_deref(), config.max_input_bytes)?;
    let scalar = args.scalar.unwrap_or(config.default_scalar_type);

    let decoded = EmbeddingVector::from_json(payload)
        .decode(scalar)
        .with_context(|| format!("Failed to parse JSON array as {}", scalar))?;
    info!("Encoding {} {} scalars as Base64", decoded.len(), scalar);

    writeln!(out, "{}", decoded.to_base64())?;
    Ok(())
}

pub fn extract<W: Write>(args: ExtractArgs, config: &CodecConfig, out: &mut W) -> Result<()> {
    let payload = read_input(args.input.as_deref(), config.max_input_bytes)?;
    let source = args.source.unwrap_or(config.default_source_format);
    let scalar = args.scalar.unwrap_or(config.default_scalar_type);

    let vectors = match args.each.as_deref() {
        Some(field) => document::extract_all(&payload, &args.pointer, field, source)?,
        None => vec![document::extract_vector(&payload, &args.pointer, source)?],
    };
    info!("Extracted {} vector(s) at {}", vectors.len(), args.pointer);

    for (i, vector) in vectors.iter().enumerate() {
        let decoded = vector
            .decode(scalar)
            .with_context(|| format!("Failed to decode vector {} as {}", i, scalar))?;
        decoded.write(&mut *out, WriteFormat::JSON_TAG)?;
        writeln!(out)?;
    }
    Ok(())
}

pub fn passthrough<W: Write>(args: PassthroughArgs, config: &CodecConfig, out: &mut W) -> Result<()> {
    let payload = read_input(args.input.as_deref(), config.max_input_bytes)?;
    let source = args.source.unwrap_or(config.default_source_format);

    EmbeddingVector::from_source(payload, source).write(&mut *out, WriteFormat::JSON_TAG)?;
    writeln!(out)?;
    Ok(())
}
