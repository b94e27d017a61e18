// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
use clap::Parser;
use embedding_codec::cli::{execute, Cli};
use embedding_codec::config::CodecConfig;
use std::io::Write;
use tempfile::NamedTempFile;

#[cfg(test)]
mod tests {
    use super::*;

    fn input_file(contents: &[u8]) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(contents).unwrap();
        file.flush().unwrap();
        file
    }

    fn run(args: &[&str], file: &NamedTempFile, config: &CodecConfig) -> anyhow::Result<String> {
        let path = file.path().to_str().unwrap().to_string();
        let mut argv = vec!["embedding-codec"];
        argv.extend_from_slice(args);
        argv.push("--input");
        argv.push(&path);

        let cli = Cli::try_parse_from(argv).unwrap();
        let mut out = Vec::new();
        execute(cli, config, &mut out)?;
        Ok(String::from_utf8(out).unwrap())
    }

    #[test]
    fn test_decode_base64_file() {
        // 1.0f32, -2.0f32 with a trailing newline as an editor would leave it
        let file = input_file(b"AACAPwAAAMA=\n");
        let output = run(
            &["decode", "--source", "base64", "--scalar", "float32"],
            &file,
            &CodecConfig::default(),
        )
        .unwrap();
        assert_eq!(output, "[1.0,-2.0]\n");
    }

    #[test]
    fn test_decode_uses_config_defaults() {
        let file = input_file(b"[1, 2, 255]");
        let mut config = CodecConfig::default();
        config.default_scalar_type = embedding_codec::ScalarType::UInt8;

        let output = run(&["decode"], &file, &config).unwrap();
        assert_eq!(output, "[1,2,255]\n");
    }

    #[test]
    fn test_encode_json_array() {
        let file = input_file(b"[1.0, -2.0]");
        let output = run(&["encode", "--scalar", "f32"], &file, &CodecConfig::default()).unwrap();
        assert_eq!(output, "AACAPwAAAMA=\n");
    }

    #[test]
    fn test_extract_each() {
        let file = input_file(br#"{"data":[{"embedding":"AACAPw=="},{"embedding":"AAAAwA=="}]}"#);
        let output = run(
            &["extract", "--pointer", "/data", "--each", "embedding", "--source", "base64"],
            &file,
            &CodecConfig::default(),
        )
        .unwrap();
        assert_eq!(output, "[1.0]\n[-2.0]\n");
    }

    #[test]
    fn test_passthrough_base64() {
        let file = input_file(b"AACAPw==");
        let output = run(&["passthrough", "--source", "base64"], &file, &CodecConfig::default())
            .unwrap();
        assert_eq!(output, "\"AACAPw==\"\n");
    }

    #[test]
    fn test_input_limit_enforced() {
        let file = input_file(b"[1,2,3,4,5,6,7,8]");
        let mut config = CodecConfig::default();
        config.max_input_bytes = 4;

        let err = run(&["decode"], &file, &config).unwrap_err();
        assert!(err.to_string().contains("limit"));
    }

    #[test]
    fn test_misaligned_payload_fails() {
        let file = input_file(b"AAAA");
        let err = run(
            &["decode", "--source", "base64", "--scalar", "float32"],
            &file,
            &CodecConfig::default(),
        )
        .unwrap_err();
        assert!(format!("{:#}", err).contains("Misaligned"));
    }

    #[test]
    fn test_nan_payload_not_printed_as_null() {
        // 1.0f32 followed by a quiet NaN
        let file = input_file(b"AACAPwAAwH8=");
        let err = run(
            &["decode", "--source", "base64", "--scalar", "float32"],
            &file,
            &CodecConfig::default(),
        )
        .unwrap_err();
        assert!(format!("{:#}", err).contains("no JSON representation"));
    }

    #[test]
    fn test_unknown_scalar_rejected_by_parser() {
        let result = Cli::try_parse_from(["embedding-codec", "decode", "--scalar", "float64"]);
        assert!(result.is_err());
    }
}
