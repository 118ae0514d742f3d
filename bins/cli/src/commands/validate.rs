//! Validate command handler.

use crate::CliOutput;
use crate::error::{CliError, ExitCode};
use crate::format::OutputMode;
use frigate_config_schema::{Document, ValidationError, Validator, load_document};
use frigate_config_shared::ErrorEnvelope;
use serde::Serialize;
use std::fmt::Write as _;
use std::path::Path;

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ValidationReport<'a> {
    status: &'static str,
    config_path: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    cameras: Option<Vec<&'a str>>,
    errors: &'a [ValidationError],
}

/// Run the validate command.
pub fn run_validate(mode: OutputMode, path: &Path) -> Result<CliOutput, CliError> {
    let raw = load_document(path)?;
    let outcome = Validator::new().map_err(ErrorEnvelope::from)?.validate(&raw);

    match outcome.normalized {
        Some(document) if outcome.errors.is_empty() => {
            let stdout = format_valid(mode, path, &document)?;
            Ok(CliOutput::ok(stdout))
        },
        _ => invalid_output(mode, path, &outcome.errors),
    }
}

/// Report for a document that failed validation.
pub(crate) fn invalid_output(
    mode: OutputMode,
    path: &Path,
    errors: &[ValidationError],
) -> Result<CliOutput, CliError> {
    tracing::info!(path = %path.display(), errors = errors.len(), "config is invalid");

    let stdout = if mode.is_json() || mode.is_yaml() {
        mode.render(&ValidationReport {
            status: "invalid",
            config_path: path.to_string_lossy().to_string(),
            cameras: None,
            errors,
        })?
    } else {
        let mut out = format!(
            "status: invalid\npath: {}\nerrors: {}\n",
            path.to_string_lossy(),
            errors.len()
        );
        for error in errors {
            let _ = writeln!(out, "  {error}");
        }
        out
    };

    Ok(CliOutput {
        stdout,
        exit_code: ExitCode::InvalidInput,
    })
}

fn format_valid(mode: OutputMode, path: &Path, document: &Document) -> Result<String, CliError> {
    let cameras: Vec<&str> = document.cameras().map(|(name, _)| name).collect();
    if mode.is_json() || mode.is_yaml() {
        return mode.render(&ValidationReport {
            status: "ok",
            config_path: path.to_string_lossy().to_string(),
            cameras: Some(cameras),
            errors: &[],
        });
    }

    let mut out = format!("status: ok\npath: {}\n", path.to_string_lossy());
    if cameras.is_empty() {
        out.push_str("cameras: none\n");
    } else {
        let _ = writeln!(out, "cameras: {}", cameras.join(", "));
    }
    Ok(out)
}
