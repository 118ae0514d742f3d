//! Output format helpers for CLI commands.

use crate::error::CliError;
use clap::{Args, ValueEnum};
use frigate_config_schema::OutputFormat as EnvOutputFormat;
use serde::Serialize;

/// Output format choices for CLI responses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human-friendly text output.
    Text,
    /// Machine-friendly JSON output.
    Json,
    /// YAML output.
    Yaml,
}

impl From<EnvOutputFormat> for OutputFormat {
    fn from(value: EnvOutputFormat) -> Self {
        match value {
            EnvOutputFormat::Text => Self::Text,
            EnvOutputFormat::Json => Self::Json,
            EnvOutputFormat::Yaml => Self::Yaml,
        }
    }
}

/// Log line format on stderr.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum LogFormat {
    /// Plain text lines.
    #[default]
    Text,
    /// One JSON object per line.
    Json,
}

/// Output-related CLI flags.
#[derive(Debug, Args)]
pub struct OutputArgs {
    /// Output format for command responses (defaults to `FCFG_OUTPUT`, then text).
    #[arg(long, global = true, value_enum)]
    pub output: Option<OutputFormat>,
    /// Log line format.
    #[arg(long, global = true, value_enum, default_value_t = LogFormat::Text)]
    pub log_format: LogFormat,
}

/// Output mode derived from CLI flags and the environment.
#[derive(Debug, Clone, Copy)]
pub struct OutputMode {
    pub format: OutputFormat,
}

impl OutputMode {
    /// Flags win over the environment default.
    #[must_use]
    pub fn resolve(args: &OutputArgs, env_default: Option<EnvOutputFormat>) -> Self {
        let format = args
            .output
            .or_else(|| env_default.map(OutputFormat::from))
            .unwrap_or(OutputFormat::Text);
        Self { format }
    }

    /// Returns true when JSON output is requested.
    #[must_use]
    pub const fn is_json(self) -> bool {
        matches!(self.format, OutputFormat::Json)
    }

    /// Returns true when YAML output is requested.
    #[must_use]
    pub const fn is_yaml(self) -> bool {
        matches!(self.format, OutputFormat::Yaml)
    }

    /// Render a structured payload for the JSON or YAML modes.
    pub fn render<T: Serialize>(self, payload: &T) -> Result<String, CliError> {
        let mut output = if self.is_yaml() {
            serde_yaml_ng::to_string(payload)?
        } else {
            serde_json::to_string_pretty(payload)?
        };
        if !output.ends_with('\n') {
            output.push('\n');
        }
        Ok(output)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(output: Option<OutputFormat>) -> OutputArgs {
        OutputArgs {
            output,
            log_format: LogFormat::Text,
        }
    }

    #[test]
    fn flag_overrides_env_default() {
        let mode =
            OutputMode::resolve(&args(Some(OutputFormat::Json)), Some(EnvOutputFormat::Yaml));
        assert!(mode.is_json());
    }

    #[test]
    fn env_default_applies_without_flag() {
        let mode = OutputMode::resolve(&args(None), Some(EnvOutputFormat::Yaml));
        assert!(mode.is_yaml());
        assert_eq!(OutputMode::resolve(&args(None), None).format, OutputFormat::Text);
    }

    #[test]
    fn render_appends_newline() -> Result<(), CliError> {
        let mode = OutputMode::resolve(&args(Some(OutputFormat::Json)), None);
        let output = mode.render(&serde_json::json!({ "status": "ok" }))?;
        assert!(output.ends_with("}\n"));
        Ok(())
    }
}
