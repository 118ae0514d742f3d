//! Editor environment variables.
//!
//! Parsing is strict: a variable that is present must carry a usable value.

use frigate_config_shared::{ErrorCode, ErrorEnvelope};
use std::collections::BTreeMap;
use std::fmt;
use std::path::PathBuf;

/// Env var: default config document path.
pub const ENV_CONFIG_FILE: &str = "FRIGATE_CONFIG_FILE";
/// Env var: tracing filter directive for the editor tooling.
pub const ENV_LOG: &str = "FCFG_LOG";
/// Env var: default output format.
pub const ENV_OUTPUT: &str = "FCFG_OUTPUT";

const ALL_VARS: [&str; 3] = [ENV_CONFIG_FILE, ENV_LOG, ENV_OUTPUT];

/// Output format for rendered documents and reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    /// Human-readable text.
    #[default]
    Text,
    /// Pretty JSON.
    Json,
    /// YAML.
    Yaml,
}

impl OutputFormat {
    /// Parse a format name (case-insensitive).
    #[must_use]
    pub fn parse(input: &str) -> Option<Self> {
        match input.trim().to_ascii_lowercase().as_str() {
            "text" => Some(Self::Text),
            "json" => Some(Self::Json),
            "yaml" | "yml" => Some(Self::Yaml),
            _ => None,
        }
    }

    /// Lowercase name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Text => "text",
            Self::Json => "json",
            Self::Yaml => "yaml",
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str(self.as_str())
    }
}

/// Parsed editor environment.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct EditorEnv {
    /// Default document path.
    pub config_file: Option<PathBuf>,
    /// Tracing filter directive.
    pub log_filter: Option<String>,
    /// Default output format.
    pub output: Option<OutputFormat>,
}

impl EditorEnv {
    /// Parse from an explicit variable map.
    pub fn from_map(map: &BTreeMap<String, String>) -> Result<Self, EnvParseError> {
        let config_file = parse_optional_trimmed(map, ENV_CONFIG_FILE)?.map(PathBuf::from);
        let log_filter = parse_optional_trimmed(map, ENV_LOG)?;
        let output = match parse_optional_trimmed(map, ENV_OUTPUT)? {
            None => None,
            Some(value) => Some(OutputFormat::parse(&value).ok_or(EnvParseError::InvalidEnum {
                var: ENV_OUTPUT,
                value,
            })?),
        };

        Ok(Self {
            config_file,
            log_filter,
            output,
        })
    }

    /// Parse from the process environment.
    pub fn from_std_env() -> Result<Self, EnvParseError> {
        let map = ALL_VARS
            .iter()
            .filter_map(|name| {
                std::env::var(name)
                    .ok()
                    .map(|value| ((*name).to_string(), value))
            })
            .collect();
        Self::from_map(&map)
    }
}

fn parse_optional_trimmed(
    map: &BTreeMap<String, String>,
    var: &'static str,
) -> Result<Option<String>, EnvParseError> {
    let Some(raw) = map.get(var) else {
        return Ok(None);
    };

    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(EnvParseError::EmptyValue { var });
    }
    Ok(Some(trimmed.to_owned()))
}

/// Validation failures when parsing env variables.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EnvParseError {
    /// An env var was present but empty after trimming.
    EmptyValue {
        /// Env var name.
        var: &'static str,
    },
    /// Enum env var had an invalid value.
    InvalidEnum {
        /// Env var name.
        var: &'static str,
        /// Raw input value.
        value: String,
    },
}

impl EnvParseError {
    fn error_code(&self) -> ErrorCode {
        match self {
            Self::EmptyValue { .. } => ErrorCode::new("config", "empty_env"),
            Self::InvalidEnum { .. } => ErrorCode::new("config", "invalid_env_enum"),
        }
    }
}

impl fmt::Display for EnvParseError {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyValue { var } => write!(formatter, "{var} must be non-empty"),
            Self::InvalidEnum { var, value } => {
                write!(formatter, "{var} has an unsupported value: {value}")
            },
        }
    }
}

impl std::error::Error for EnvParseError {}

impl From<EnvParseError> for ErrorEnvelope {
    fn from(error: EnvParseError) -> Self {
        let envelope = Self::expected(error.error_code(), error.to_string());
        match error {
            EnvParseError::EmptyValue { var } => envelope.with_metadata("env_var", var),
            EnvParseError::InvalidEnum { var, value } => envelope
                .with_metadata("env_var", var)
                .with_metadata("value", value),
        }
    }
}
