//! Camera add/remove command handlers.

use crate::CliOutput;
use crate::error::CliError;
use crate::format::OutputMode;
use frigate_config_schema::{
    ConfigValue, camera_template, cameras, load_document, remove_camera, save_document,
    upsert_camera,
};
use frigate_config_shared::ErrorEnvelope;
use std::path::Path;

/// Add a templated camera (or replace an existing one) and save the file.
/// A missing file is created.
pub fn run_add_camera(mode: OutputMode, path: &Path, name: &str) -> Result<CliOutput, CliError> {
    let document = load_or_empty(path)?;
    let replaced = cameras(&document).iter().any(|(existing, _)| *existing == name);
    let updated = upsert_camera(&document, name, camera_template())?;
    save_document(path, &updated)?;
    tracing::info!(path = %path.display(), camera = name, replaced, "camera saved");

    let action = if replaced { "replaced" } else { "added" };
    summary(mode, path, name, action, &updated)
}

/// Remove a camera and save the file. Removing an unknown camera is an
/// input error.
pub fn run_remove_camera(mode: OutputMode, path: &Path, name: &str) -> Result<CliOutput, CliError> {
    let document = load_document(path)?;
    if !cameras(&document).iter().any(|(existing, _)| *existing == name) {
        return Err(CliError::InvalidInput(format!(
            "camera {name:?} is not configured in {}",
            path.to_string_lossy()
        )));
    }

    let updated = remove_camera(&document, name)?;
    save_document(path, &updated)?;
    tracing::info!(path = %path.display(), camera = name, "camera removed");

    summary(mode, path, name, "removed", &updated)
}

fn load_or_empty(path: &Path) -> Result<ConfigValue, ErrorEnvelope> {
    if path.exists() {
        load_document(path)
    } else {
        Ok(ConfigValue::Absent)
    }
}

fn summary(
    mode: OutputMode,
    path: &Path,
    name: &str,
    action: &str,
    document: &ConfigValue,
) -> Result<CliOutput, CliError> {
    let remaining: Vec<&str> = cameras(document)
        .into_iter()
        .map(|(camera, _)| camera)
        .collect();
    let stdout = if mode.is_json() || mode.is_yaml() {
        mode.render(&serde_json::json!({
            "status": "ok",
            "configPath": path.to_string_lossy(),
            "camera": name,
            "action": action,
            "cameras": remaining,
        }))?
    } else {
        format!(
            "status: ok\npath: {}\ncamera: {name} {action}\ncameras: {}\n",
            path.to_string_lossy(),
            remaining.len()
        )
    };
    Ok(CliOutput::ok(stdout))
}
