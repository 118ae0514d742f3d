//! Show command handler.

use crate::CliOutput;
use crate::commands::validate::invalid_output;
use crate::error::CliError;
use crate::format::OutputMode;
use frigate_config_schema::{Validator, load_document, to_pretty_json, to_pretty_yaml};
use frigate_config_shared::ErrorEnvelope;
use std::path::Path;

/// Print the normalized document: every default filled in and enum
/// spellings canonicalized.
pub fn run_show(mode: OutputMode, path: &Path) -> Result<CliOutput, CliError> {
    let raw = load_document(path)?;
    let outcome = Validator::new().map_err(ErrorEnvelope::from)?.validate(&raw);
    if !outcome.is_valid() {
        return invalid_output(mode, path, &outcome.errors);
    }

    let document = outcome.into_result().map_err(ErrorEnvelope::from)?;
    let stdout = if mode.is_json() {
        to_pretty_json(document.as_value())?
    } else {
        to_pretty_yaml(document.as_value())?
    };
    Ok(CliOutput::ok(stdout))
}
