// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
pub mod commands;

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::io::Write;

use crate::config::CodecConfig;

/// Embedding vector codec CLI
#[derive(Parser, Debug)]
#[command(name = "embedding-codec")]
#[command(version = crate::version::VERSION_NUMBER)]
#[command(about = "Decode and re-encode embedding vectors (JSON arrays / Base64)", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Decode a JSON array or Base64 payload and print it as a typed JSON array
    Decode(commands::DecodeArgs),

    /// Encode a JSON numeric array as Base64 of little-endian scalars
    Encode(commands::EncodeArgs),

    /// Extract a vector field from a response document and decode it
    Extract(commands::ExtractArgs),

    /// Print the "J" write-back of a payload without decoding it
    Passthrough(commands::PassthroughArgs),
}

/// Execute CLI command, writing results to `out`
pub fn execute<W: Write>(cli: Cli, config: &CodecConfig, out: &mut W) -> Result<()> {
    config
        .validate()
        .map_err(|e| anyhow::anyhow!("Invalid configuration: {}", e))?;

    match cli.command {
        Commands::Decode(args) => commands::decode(args, config, out),
        Commands::Encode(args) => commands::encode(args, config, out),
        Commands::Extract(args) => commands::extract(args, config, out),
        Commands::Passthrough(args) => commands::passthrough(args, config, out),
    }
}
