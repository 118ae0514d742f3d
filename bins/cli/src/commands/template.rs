//! Template command handler.

use crate::CliOutput;
use crate::error::CliError;
use crate::format::OutputMode;
use frigate_config_schema::{
    camera_document_template, camera_template, is_valid_camera_name, to_pretty_json,
    to_pretty_yaml,
};

/// Print a starter camera section, wrapped under `cameras.<name>` when a
/// name is given.
pub fn run_template(mode: OutputMode, name: Option<&str>) -> Result<CliOutput, CliError> {
    let value = match name {
        Some(name) if !is_valid_camera_name(name) => {
            return Err(CliError::InvalidInput(format!(
                "camera name {name:?} may only contain letters, digits, '_' and '-'"
            )));
        },
        Some(name) => camera_document_template(name),
        None => camera_template(),
    };

    let stdout = if mode.is_json() {
        to_pretty_json(&value)?
    } else {
        to_pretty_yaml(&value)?
    };
    Ok(CliOutput::ok(stdout))
}
