// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Pull embedding fields out of upstream JSON response documents
//!
//! Search services return vectors as numeric arrays inside result documents
//! (`/value/0/DescriptionVector`); embedding APIs asked for Base64 return them
//! as strings (`/data/0/embedding`). Navigation keeps the raw text of the
//! addressed field, so an array reaches the JSON decoder byte for byte.

use serde_json::value::RawValue;
use std::collections::HashMap;
use tracing::debug;

use crate::codec::{CodecError, EmbeddingVector, Result, SourceFormat};

/// Split an RFC 6901 pointer into unescaped reference tokens
fn pointer_tokens(pointer: &str) -> Result<Vec<String>> {
    if pointer.is_empty() {
        return Ok(Vec::new());
    }
    if !pointer.starts_with('/') {
        return Err(CodecError::MalformedDocument {
            pointer: pointer.to_string(),
            reason: "JSON pointer must start with '/'".to_string(),
        });
    }
    Ok(pointer[1..]
        .split('/')
        .map(|token| token.replace("~1", "/").replace("~0", "~"))
        .collect())
}

fn first_char(raw: &RawValue) -> Option<char> {
    raw.get().trim_start().chars().next()
}

/// Step from `node` into the member or element named by `token`
fn child<'a>(node: &'a RawValue, token: &str, location: &str) -> Result<&'a RawValue> {
    let malformed = |reason: String| CodecError::MalformedDocument {
        pointer: location.to_string(),
        reason,
    };

    match first_char(node) {
        Some('{') => {
            let members: HashMap<String, &'a RawValue> =
                serde_json::from_str(node.get()).map_err(|e| malformed(e.to_string()))?;
            members
                .get(token)
                .copied()
                .ok_or_else(|| CodecError::FieldNotFound(location.to_string()))
        }
        Some('[') => {
            let elements: Vec<&'a RawValue> =
                serde_json::from_str(node.get()).map_err(|e| malformed(e.to_string()))?;
            let index: usize = token
                .parse()
                .map_err(|_| malformed(format!("'{}' is not an array index", token)))?;
            elements
                .get(index)
                .copied()
                .ok_or_else(|| CodecError::FieldNotFound(location.to_string()))
        }
        _ => Err(malformed("cannot descend into a scalar value".to_string())),
    }
}

fn resolve<'a>(root: &'a RawValue, pointer: &str) -> Result<&'a RawValue> {
    let mut node = root;
    let mut location = String::new();
    for token in pointer_tokens(pointer)? {
        location.push('/');
        location.push_str(&token.replace('~', "~0").replace('/', "~1"));
        node = child(node, &token, &location)?;
    }
    Ok(node)
}

fn parse_root(document: &[u8]) -> Result<&RawValue> {
    let text = std::str::from_utf8(document)?;
    serde_json::from_str(text).map_err(|e| CodecError::MalformedDocument {
        pointer: String::new(),
        reason: e.to_string(),
    })
}

/// Return the raw JSON text of the value at `pointer`
pub fn find_raw<'a>(document: &'a [u8], pointer: &str) -> Result<&'a str> {
    let root = parse_root(document)?;
    Ok(resolve(root, pointer)?.get())
}

/// Build a vector from a field whose kind must match the declared format
fn vector_from_field(raw: &RawValue, location: &str, format: SourceFormat) -> Result<EmbeddingVector> {
    let mismatch = |expected: &str| CodecError::MalformedDocument {
        pointer: location.to_string(),
        reason: format!("expected {} for {} source", expected, format),
    };

    match format {
        SourceFormat::Json => {
            if first_char(raw) != Some('[') {
                return Err(mismatch("a JSON array"));
            }
            Ok(EmbeddingVector::from_json(raw.get().as_bytes()))
        }
        SourceFormat::Base64 => {
            let text: String =
                serde_json::from_str(raw.get()).map_err(|_| mismatch("a JSON string"))?;
            Ok(EmbeddingVector::from_base64(text.into_bytes()))
        }
    }
}

/// Extract the vector stored at `pointer`
///
/// # Example
/// ```
/// use embedding_codec::document::extract_vector;
/// use embedding_codec::SourceFormat;
///
/// let doc = br#"{"value":[{"DescriptionVector":[0.5,-1.0]}]}"#;
/// let vector = extract_vector(doc, "/value/0/DescriptionVector", SourceFormat::Json).unwrap();
/// assert_eq!(vector.decode_as::<f32>().unwrap().scalars(), &[0.5f32, -1.0]);
/// ```
pub fn extract_vector(document: &[u8], pointer: &str, format: SourceFormat) -> Result<EmbeddingVector> {
    let root = parse_root(document)?;
    let raw = resolve(root, pointer)?;
    debug!(pointer, %format, field_bytes = raw.get().len(), "extracted vector field");
    vector_from_field(raw, pointer, format)
}

/// Extract `field` from every element of the array at `array_pointer`
///
/// Suits embedding responses that return one vector per input, such as
/// `{"data": [{"embedding": ...}, ...]}` with `array_pointer = "/data"`.
pub fn extract_all(
    document: &[u8],
    array_pointer: &str,
    field: &str,
    format: SourceFormat,
) -> Result<Vec<EmbeddingVector>> {
    let root = parse_root(document)?;
    let array = resolve(root, array_pointer)?;
    if first_char(array) != Some('[') {
        return Err(CodecError::MalformedDocument {
            pointer: array_pointer.to_string(),
            reason: "expected a JSON array".to_string(),
        });
    }

    let elements: Vec<&RawValue> =
        serde_json::from_str(array.get()).map_err(|e| CodecError::MalformedDocument {
            pointer: array_pointer.to_string(),
            reason: e.to_string(),
        })?;

    let vectors = elements
        .into_iter()
        .enumerate()
        .map(|(i, element)| {
            let location = format!("{}/{}/{}", array_pointer, i, field);
            let raw = child(element, field, &location)?;
            vector_from_field(raw, &location, format)
        })
        .collect::<Result<Vec<_>>>()?;

    debug!(array_pointer, count = vectors.len(), "extracted vector fields");
    Ok(vectors)
}
