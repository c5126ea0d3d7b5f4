//! JSON and YAML documents
//!
//! Loading documents into [`Value`]s and writing them back. The format is
//! picked from the file extension. Rendered documents always end with a
//! newline.

use std::fmt;
use std::path::Path;

use crate::error::{Error, Result};
use crate::value::Value;

/// Supported document formats.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Format {
    Json,
    Yaml,
}

impl fmt::Display for Format {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Format::Json => f.write_str("json"),
            Format::Yaml => f.write_str("yaml"),
        }
    }
}

impl Format {
    /// Detect the format from a file extension (`.json`, `.yaml`, `.yml`).
    pub fn from_path(path: &Path) -> Result<Self> {
        let extension = path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_ascii_lowercase());
        match extension.as_deref() {
            Some("json") => Ok(Format::Json),
            Some("yaml") | Some("yml") => Ok(Format::Yaml),
            _ => Err(Error::Document {
                format: "unknown".to_string(),
                message: format!(
                    "cannot detect format of '{}' (expected .json, .yaml or .yml)",
                    path.display()
                ),
            }),
        }
    }
}

/// Parse document text. Empty or whitespace-only text is `Null`.
pub fn parse_str(format: Format, text: &str) -> Result<Value> {
    if text.trim().is_empty() {
        return Ok(Value::Null);
    }
    match format {
        Format::Json => Ok(Value::from(serde_json::from_str::<serde_json::Value>(
            text,
        )?)),
        Format::Yaml => Ok(Value::from(serde_yaml::from_str::<serde_yaml::Value>(
            text,
        )?)),
    }
}

fn ensure_trailing_newline(mut content: String) -> String {
    if !content.ends_with('\n') {
        content.push('\n');
    }
    content
}

/// Render a value as document text.
pub fn render(format: Format, value: &Value) -> Result<String> {
    let content = match format {
        Format::Json => serde_json::to_string_pretty(&serde_json::Value::from(value))
            .map_err(|err| Error::Document {
                format: format.to_string(),
                message: format!("Failed to serialize JSON: {}", err),
            })?,
        Format::Yaml => serde_yaml::to_string(&serde_yaml::Value::from(value)).map_err(|err| {
            Error::Document {
                format: format.to_string(),
                message: format!("Failed to serialize YAML: {}", err),
            }
        })?,
    };
    Ok(ensure_trailing_newline(content))
}

/// Read and parse a document, detecting its format from the extension.
pub fn load(path: &Path) -> Result<Value> {
    let format = Format::from_path(path)?;
    let content = std::fs::read_to_string(path)?;
    parse_str(format, &content)
}

/// Like [`load`], but a missing file yields `Null` instead of an error.
pub fn load_or_null(path: &Path) -> Result<Value> {
    let format = Format::from_path(path)?;
    match std::fs::read_to_string(path) {
        Ok(content) => parse_str(format, &content),
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(Value::Null),
        Err(err) => Err(err.into()),
    }
}

/// Render and write a document, detecting its format from the extension.
pub fn save(path: &Path, value: &Value) -> Result<()> {
    let format = Format::from_path(path)?;
    std::fs::write(path, render(format, value)?)?;
    Ok(())
}
