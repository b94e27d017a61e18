// Version information for the embedding codec

/// Full version string with feature description
pub const VERSION: &str = "v0.1.0-embedding-codec-2025-10-17";

/// Semantic version number
pub const VERSION_NUMBER: &str = "0.1.0";

/// Build date
pub const BUILD_DATE: &str = "2025-10-17";

/// Supported features in this version
pub const FEATURES: &[&str] = &[
    "json-array-vectors",
    "base64-binary-vectors",
    "float32",
    "float16",
    "int8",
    "uint8",
    "document-extraction",
];
