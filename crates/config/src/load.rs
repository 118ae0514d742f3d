//! Document loading and serialization helpers.
//!
//! Text is parsed into `ConfigValue` trees without applying the schema;
//! parse failures surface as typed `ErrorEnvelope`s. Serialization is
//! deterministic and keeps mapping order.

use crate::value::ConfigValue;
use frigate_config_shared::{ErrorClass, ErrorCode, ErrorEnvelope};
use std::path::Path;

/// On-disk document format.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentFormat {
    /// `.yml`, `.yaml`, or no extension.
    Yaml,
    /// `.json`.
    Json,
    /// `.toml`.
    Toml,
}

impl DocumentFormat {
    /// Detect the format from a file extension.
    pub fn from_path(path: &Path) -> Result<Self, ErrorEnvelope> {
        let ext = path
            .extension()
            .and_then(|value| value.to_str())
            .map(str::to_ascii_lowercase);
        match ext.as_deref() {
            None | Some("yml" | "yaml") => Ok(Self::Yaml),
            Some("json") => Ok(Self::Json),
            Some("toml") => Ok(Self::Toml),
            Some(other) => Err(ErrorEnvelope::expected(
                ErrorCode::new("config", "unsupported_format"),
                "unsupported config format; use .yml, .yaml, .json or .toml",
            )
            .with_metadata("extension", other.to_string())),
        }
    }
}

/// Parse YAML text.
pub fn parse_yaml(input: &str) -> Result<ConfigValue, ErrorEnvelope> {
    serde_yaml_ng::from_str(input).map_err(|error| {
        let mut envelope = ErrorEnvelope::expected(
            ErrorCode::new("config", "invalid_yaml"),
            format!("invalid config YAML: {error}"),
        );
        if let Some(location) = error.location() {
            envelope = envelope
                .with_metadata("line", location.line().to_string())
                .with_metadata("column", location.column().to_string());
        }
        envelope
    })
}

/// Parse JSON text.
pub fn parse_json(input: &str) -> Result<ConfigValue, ErrorEnvelope> {
    serde_json::from_str(input).map_err(|error| {
        ErrorEnvelope::expected(
            ErrorCode::new("config", "invalid_json"),
            format!("invalid config JSON: {error}"),
        )
        .with_metadata("line", error.line().to_string())
        .with_metadata("column", error.column().to_string())
    })
}

/// Parse TOML text.
pub fn parse_toml(input: &str) -> Result<ConfigValue, ErrorEnvelope> {
    toml::from_str(input).map_err(|error| {
        ErrorEnvelope::expected(
            ErrorCode::new("config", "invalid_toml"),
            format!("invalid config TOML: {error}"),
        )
    })
}

/// Parse text in the given format.
pub fn parse_document(input: &str, format: DocumentFormat) -> Result<ConfigValue, ErrorEnvelope> {
    match format {
        DocumentFormat::Yaml => parse_yaml(input),
        DocumentFormat::Json => parse_json(input),
        DocumentFormat::Toml => parse_toml(input),
    }
}

/// Read and parse a document, picking the format from the extension.
pub fn load_document(path: &Path) -> Result<ConfigValue, ErrorEnvelope> {
    let format = DocumentFormat::from_path(path)?;
    let text = read_config_file(path)?;
    tracing::debug!(path = %path.display(), ?format, bytes = text.len(), "loaded config file");
    parse_document(&text, format)
        .map_err(|error| error.with_metadata("path", path.to_string_lossy().to_string()))
}

/// Serialize and write a document, picking the format from the extension.
pub fn save_document(path: &Path, document: &ConfigValue) -> Result<(), ErrorEnvelope> {
    let text = match DocumentFormat::from_path(path)? {
        DocumentFormat::Yaml => to_pretty_yaml(document)?,
        DocumentFormat::Json => to_pretty_json(document)?,
        DocumentFormat::Toml => to_pretty_toml(document)?,
    };
    std::fs::write(path, text)
        .map_err(|error| file_error(path, "failed to write config file", &error))
}

/// Serialize as YAML (with trailing newline).
pub fn to_pretty_yaml(document: &ConfigValue) -> Result<String, ErrorEnvelope> {
    let mut output = serde_yaml_ng::to_string(document)
        .map_err(|error| serialize_error("serialize_yaml", &error))?;
    if !output.ends_with('\n') {
        output.push('\n');
    }
    Ok(output)
}

/// Serialize as pretty JSON (with trailing newline).
pub fn to_pretty_json(document: &ConfigValue) -> Result<String, ErrorEnvelope> {
    let mut output = serde_json::to_string_pretty(document)
        .map_err(|error| serialize_error("serialize_json", &error))?;
    output.push('\n');
    Ok(output)
}

/// Serialize as pretty TOML (with trailing newline).
pub fn to_pretty_toml(document: &ConfigValue) -> Result<String, ErrorEnvelope> {
    let mut output = toml::to_string_pretty(document)
        .map_err(|error| serialize_error("serialize_toml", &error))?;
    if !output.ends_with('\n') {
        output.push('\n');
    }
    Ok(output)
}

fn serialize_error(code: &str, error: &dyn std::fmt::Display) -> ErrorEnvelope {
    ErrorEnvelope::unexpected(
        ErrorCode::new("config", code),
        format!("failed to serialize config: {error}"),
        ErrorClass::NonRetriable,
    )
}

fn read_config_file(path: &Path) -> Result<String, ErrorEnvelope> {
    std::fs::read_to_string(path)
        .map_err(|error| file_error(path, "failed to read config file", &error))
}

fn file_error(path: &Path, context: &str, error: &std::io::Error) -> ErrorEnvelope {
    let code = ErrorCode::for_io("config", "config_file", error.kind());
    ErrorEnvelope::from_io(code, context, error)
        .with_metadata("path", path.to_string_lossy().to_string())
}
