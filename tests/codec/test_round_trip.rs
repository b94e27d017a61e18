// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
use embedding_codec::{f16, EmbeddingVector, TypedVector};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

#[cfg(test)]
mod tests {
    use super::*;

    fn random_finite_f32(rng: &mut StdRng, len: usize) -> Vec<f32> {
        let mut values = Vec::with_capacity(len);
        while values.len() < len {
            let value = f32::from_bits(rng.gen());
            if value.is_finite() {
                values.push(value);
            }
        }
        values
    }

    #[test]
    fn test_json_round_trip_float32() {
        let mut rng = StdRng::seed_from_u64(0x5eed);
        for len in [0usize, 1, 3, 384, 1536] {
            let values = random_finite_f32(&mut rng, len);
            let json = EmbeddingVector::from_scalars(&values).to_json_bytes("J").unwrap();

            let decoded = EmbeddingVector::from_json(json).decode_as::<f32>().unwrap();
            let expected: Vec<u32> = values.iter().map(|v| v.to_bits()).collect();
            let actual: Vec<u32> = decoded.scalars().iter().map(|v| v.to_bits()).collect();
            assert_eq!(actual, expected, "len {}", len);
        }
    }

    #[test]
    fn test_json_round_trip_float16() {
        let mut rng = StdRng::seed_from_u64(16);
        let values: Vec<f16> = (0..512)
            .map(|_| f16::from_bits(rng.gen()))
            .filter(|h| h.is_finite())
            .collect();

        let json = TypedVector::from(values.clone()).to_json_bytes("J").unwrap();
        let decoded = EmbeddingVector::from_json(json).decode_as::<f16>().unwrap();

        let expected: Vec<u16> = values.iter().map(|h| h.to_bits()).collect();
        let actual: Vec<u16> = decoded.scalars().iter().map(|h| h.to_bits()).collect();
        assert_eq!(actual, expected);
    }

    #[test]
    fn test_base64_matches_le_reinterpretation() {
        let mut rng = StdRng::seed_from_u64(4);
        for words in [0usize, 1, 2, 100] {
            let raw: Vec<u8> = (0..words * 4).map(|_| rng.gen()).collect();
            let typed = TypedVector::from(raw.clone());
            let base64 = typed.to_base64();

            let decoded = EmbeddingVector::from_base64(base64.into_bytes())
                .decode_as::<f32>()
                .unwrap();

            assert_eq!(decoded.len(), words);
            for (i, value) in decoded.scalars().iter().enumerate() {
                let b = &raw[i * 4..i * 4 + 4];
                let word = (b[3] as u32) << 24 | (b[2] as u32) << 16 | (b[1] as u32) << 8 | b[0] as u32;
                assert_eq!(value.to_bits(), word);
            }
        }
    }

    #[test]
    fn test_typed_base64_round_trip_all_kinds() {
        let floats = TypedVector::from(vec![0.1f32, -3.5, 1e-30]);
        let decoded = EmbeddingVector::from_base64(floats.to_base64().into_bytes())
            .decode_as::<f32>()
            .unwrap();
        assert_eq!(decoded, floats);

        let signed = TypedVector::from(vec![-128i8, 0, 127]);
        let decoded = EmbeddingVector::from_base64(signed.to_base64().into_bytes())
            .decode_as::<i8>()
            .unwrap();
        assert_eq!(decoded, signed);
    }
}
