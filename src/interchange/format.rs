//! Common trait for trace document formats.

use super::InterchangeError;
use super::document::TraceDocument;

/// Trait for trace document formats.
///
/// Implementations convert between [`TraceDocument`] and the bytes of an
/// external file format.
pub trait TraceFormat: Send + Sync {
    /// Human-readable name of the format.
    fn name(&self) -> &'static str;

    /// File extension(s) for this format.
    fn extensions(&self) -> &'static [&'static str];

    /// MIME type for this format.
    fn mime_type(&self) -> &'static str;

    fn read(&self, input: &[u8]) -> Result<TraceDocument, InterchangeError>;

    fn write(&self, document: &TraceDocument) -> Result<Vec<u8>, InterchangeError>;
}

/// Pretty-printed JSON.
#[derive(Debug, Clone, Copy, Default)]
pub struct Json;

impl TraceFormat for Json {
    fn name(&self) -> &'static str {
        "JSON"
    }

    fn extensions(&self) -> &'static [&'static str] {
        &["json"]
    }

    fn mime_type(&self) -> &'static str {
        "application/json"
    }

    fn read(&self, input: &[u8]) -> Result<TraceDocument, InterchangeError> {
        Ok(serde_json::from_slice(input)?)
    }

    fn write(&self, document: &TraceDocument) -> Result<Vec<u8>, InterchangeError> {
        Ok(serde_json::to_vec_pretty(document)?)
    }
}

/// YAML format handler.
#[derive(Debug, Clone, Copy, Default)]
pub struct Yaml;

impl TraceFormat for Yaml {
    fn name(&self) -> &'static str {
        "YAML"
    }

    fn extensions(&self) -> &'static [&'static str] {
        &["yaml", "yml"]
    }

    fn mime_type(&self) -> &'static str {
        "application/x-yaml"
    }

    fn read(&self, input: &[u8]) -> Result<TraceDocument, InterchangeError> {
        Ok(serde_yaml::from_slice(input)?)
    }

    fn write(&self, document: &TraceDocument) -> Result<Vec<u8>, InterchangeError> {
        Ok(serde_yaml::to_string(document)?.into_bytes())
    }
}

/// The format registered for a file extension.
pub fn format_for_extension(ext: &str) -> Option<&'static dyn TraceFormat> {
    const FORMATS: &[&dyn TraceFormat] = &[&Json, &Yaml];
    FORMATS
        .iter()
        .copied()
        .find(|format| format.extensions().iter().any(|e| e.eq_ignore_ascii_case(ext)))
}
