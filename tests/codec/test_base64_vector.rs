// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
use base64::{engine::general_purpose::STANDARD, Engine as _};
use embedding_codec::{f16, CodecError, EmbeddingVector, ErrorKind, ScalarType};

#[cfg(test)]
mod tests {
    use super::*;

    fn float_bytes(values: &[f32]) -> Vec<u8> {
        values.iter().flat_map(|v| v.to_le_bytes()).collect()
    }

    #[test]
    fn test_base64_string_to_float() {
        let expected = [-0.0026168018f32, -0.024089903, 0.03355637];
        let base64 = STANDARD.encode(float_bytes(&expected));

        let floats = EmbeddingVector::from_base64(base64.into_bytes())
            .decode_as::<f32>()
            .unwrap();
        assert_eq!(floats.scalars(), &expected);
    }

    #[test]
    fn test_json_and_base64_agree_bit_for_bit() {
        let expected = [-0.0026168018f32, -0.024089903, 0.03355637];
        let base64 = STANDARD.encode(float_bytes(&expected));

        let from_json = EmbeddingVector::from_json(b"[-0.0026168018,-0.024089903,0.03355637]".to_vec())
            .decode_as::<f32>()
            .unwrap();
        let from_base64 = EmbeddingVector::from_base64(base64.into_bytes())
            .decode_as::<f32>()
            .unwrap();

        let json_bits: Vec<u32> = from_json.scalars().iter().map(|f| f.to_bits()).collect();
        let base64_bits: Vec<u32> = from_base64.scalars().iter().map(|f| f.to_bits()).collect();
        assert_eq!(json_bits, base64_bits);
    }

    #[test]
    fn test_base64_string_to_half() {
        let expected = [
            f16::from_f32(-0.0026168018),
            f16::from_f32(-0.024089903),
            f16::from_f32(0.03355637),
        ];
        let raw: Vec<u8> = expected.iter().flat_map(|h| h.to_bits().to_le_bytes()).collect();

        let halves = EmbeddingVector::from_base64(STANDARD.encode(raw).into_bytes())
            .decode_as::<f16>()
            .unwrap();
        assert_eq!(halves.scalars(), &expected);
    }

    #[test]
    fn test_base64_string_to_byte_and_sbyte() {
        let vector = EmbeddingVector::from_base64(STANDARD.encode([1u8, 2, 3]).into_bytes());
        assert_eq!(vector.decode_as::<u8>().unwrap().scalars(), &[1u8, 2, 3]);
        assert_eq!(vector.decode_as::<i8>().unwrap().scalars(), &[1i8, 2, 3]);

        let negative = EmbeddingVector::from_base64(STANDARD.encode([0x80u8, 0xff]).into_bytes());
        assert_eq!(negative.decode_as::<i8>().unwrap().scalars(), &[-128i8, -1]);
    }

    #[test]
    fn test_misaligned_buffer_rejected_for_float32() {
        for len in [1usize, 2, 3, 5, 7, 13] {
            let vector = EmbeddingVector::from_base64(STANDARD.encode(vec![0u8; len]).into_bytes());
            let err = vector.decode(ScalarType::Float32).unwrap_err();
            assert_eq!(err.kind(), ErrorKind::Format, "len {}", len);
            assert!(matches!(err, CodecError::MisalignedBuffer { .. }));
        }
    }

    #[test]
    fn test_odd_length_rejected_for_half() {
        let vector = EmbeddingVector::from_base64(STANDARD.encode([0u8; 3]).into_bytes());
        assert!(vector.decode(ScalarType::Float16).unwrap_err().is_format_error());
        // Single-byte kinds accept any length
        assert_eq!(vector.decode(ScalarType::UInt8).unwrap().len(), 3);
    }

    #[test]
    fn test_invalid_alphabet_rejected() {
        let vector = EmbeddingVector::from_base64(b"AAAA$AAA".to_vec());
        let err = vector.decode(ScalarType::Float32).unwrap_err();
        assert!(matches!(err, CodecError::MalformedBase64 { .. }));
        assert!(err.to_string().contains("float32"));
    }

    #[test]
    fn test_empty_payload_is_empty_vector() {
        let vector = EmbeddingVector::from_base64(Vec::new());
        assert!(vector.decode(ScalarType::Float32).unwrap().is_empty());
    }

    #[test]
    fn test_write_back_is_base64_string() {
        let base64 = STANDARD.encode(float_bytes(&[0.5, -0.25]));
        let vector = EmbeddingVector::from_base64(base64.clone().into_bytes());

        let written = vector.to_json_bytes("J").unwrap();
        assert_eq!(written, format!("\"{}\"", base64).into_bytes());

        // A JSON reader sees a string, not a numeric array
        let value: serde_json::Value = serde_json::from_slice(&written).unwrap();
        assert_eq!(value.as_str(), Some(base64.as_str()));
    }

    #[test]
    fn test_write_back_unknown_format() {
        let vector = EmbeddingVector::from_base64(b"AACAPw==".to_vec());
        let err = vector.to_json_bytes("B").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::UnsupportedFormat);
    }
}
