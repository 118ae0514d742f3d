use frigate_config_shared::{ErrorEnvelope, ErrorKind, is_secret_key};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitCode {
    Ok = 0,
    InvalidInput = 2,
    Io = 3,
    Internal = 1,
}

impl ExitCode {
    #[must_use]
    pub const fn as_u8(self) -> u8 {
        self as u8
    }
}

#[derive(Debug)]
pub enum CliError {
    InvalidInput(String),
    Io(std::io::Error),
    Config(ErrorEnvelope),
    Serialization(String),
}

impl CliError {
    #[must_use]
    pub fn exit_code(&self) -> ExitCode {
        match self {
            Self::InvalidInput(_) => ExitCode::InvalidInput,
            Self::Io(_) => ExitCode::Io,
            Self::Config(envelope) => envelope_exit_code(envelope),
            Self::Serialization(_) => ExitCode::Internal,
        }
    }
}

fn envelope_exit_code(envelope: &ErrorEnvelope) -> ExitCode {
    match envelope.kind {
        ErrorKind::Expected if envelope.code.code().starts_with("config_file_") => ExitCode::Io,
        ErrorKind::Expected => ExitCode::InvalidInput,
        ErrorKind::Invariant | ErrorKind::Unexpected => ExitCode::Internal,
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidInput(message) => write!(formatter, "invalid input: {message}"),
            Self::Io(error) => write!(formatter, "io error: {error}"),
            Self::Config(envelope) => write_envelope(formatter, envelope),
            Self::Serialization(message) => write!(formatter, "serialization error: {message}"),
        }
    }
}

fn write_envelope(formatter: &mut fmt::Formatter<'_>, envelope: &ErrorEnvelope) -> fmt::Result {
    write!(formatter, "{}: {}", envelope.code, envelope.message)?;
    if envelope.metadata.is_empty() {
        return Ok(());
    }

    let secret_keys: Vec<&str> = envelope
        .metadata
        .keys()
        .map(String::as_str)
        .filter(|key| is_secret_key(key))
        .collect();
    let redacted = envelope.clone().redact_metadata(&secret_keys);
    let details: Vec<String> = redacted
        .metadata
        .iter()
        .map(|(key, value)| format!("{key}={value}"))
        .collect();
    write!(formatter, " ({})", details.join(", "))
}

impl std::error::Error for CliError {}

impl From<std::io::Error> for CliError {
    fn from(error: std::io::Error) -> Self {
        Self::Io(error)
    }
}

impl From<ErrorEnvelope> for CliError {
    fn from(error: ErrorEnvelope) -> Self {
        Self::Config(error)
    }
}

impl From<serde_json::Error> for CliError {
    fn from(error: serde_json::Error) -> Self {
        Self::Serialization(error.to_string())
    }
}

impl From<serde_yaml_ng::Error> for CliError {
    fn from(error: serde_yaml_ng::Error) -> Self {
        Self::Serialization(error.to_string())
    }
}
