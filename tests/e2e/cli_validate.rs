//! CLI validation and show tests against the config fixtures.

use std::io;
use std::path::{Path, PathBuf};
use std::process::Command;

fn workspace_root() -> PathBuf {
    let manifest_dir = Path::new(env!("CARGO_MANIFEST_DIR"));
    manifest_dir
        .parent()
        .and_then(Path::parent)
        .map(Path::to_path_buf)
        .unwrap_or_else(|| manifest_dir.to_path_buf())
}

fn fixture_path(name: &str) -> PathBuf {
    workspace_root()
        .join("crates")
        .join("config")
        .join("tests")
        .join("fixtures")
        .join(name)
}

fn fcfg() -> Command {
    let mut command = Command::new(env!("CARGO_BIN_EXE_fcfg"));
    command.env_remove("FRIGATE_CONFIG_FILE");
    command.env_remove("FCFG_OUTPUT");
    command.env_remove("FCFG_LOG");
    command
}

fn json_output(command: &mut Command) -> io::Result<(Option<i32>, serde_json::Value)> {
    let output = command.output()?;
    let value = serde_json::from_slice(&output.stdout).map_err(io::Error::other)?;
    Ok((output.status.code(), value))
}

#[test]
fn valid_fixture_passes() -> io::Result<()> {
    let output = fcfg()
        .arg("validate")
        .arg("--path")
        .arg(fixture_path("valid_back.yml"))
        .output()?;
    assert!(output.status.success());

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.starts_with("status: ok\n"));
    assert!(stdout.contains("cameras: back\n"));
    Ok(())
}

#[test]
fn missing_roles_fails_with_structured_errors() -> io::Result<()> {
    let (code, value) = json_output(
        fcfg()
            .args(["--output", "json", "validate", "--path"])
            .arg(fixture_path("missing_roles.yml")),
    )?;
    assert_eq!(code, Some(2));
    assert_eq!(value.get("status").and_then(|v| v.as_str()), Some("invalid"));

    let first = value
        .get("errors")
        .and_then(|errors| errors.get(0))
        .ok_or_else(|| io::Error::other("missing errors"))?;
    assert_eq!(
        first.get("path").and_then(|v| v.as_str()),
        Some("cameras.back.ffmpeg.inputs[0].roles")
    );
    assert_eq!(
        first.get("kind").and_then(|v| v.as_str()),
        Some("MISSING_REQUIRED")
    );
    Ok(())
}

#[test]
fn path_defaults_to_env() -> io::Result<()> {
    let output = fcfg()
        .env("FRIGATE_CONFIG_FILE", fixture_path("openai_no_key.yml"))
        .arg("validate")
        .output()?;
    assert_eq!(output.status.code(), Some(2));

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("semantic_search.openai [CROSS_FIELD]"), "{stdout}");
    Ok(())
}

#[test]
fn missing_file_exits_with_io_code() -> io::Result<()> {
    let output = fcfg()
        .args(["validate", "--path"])
        .arg(fixture_path("does_not_exist.yml"))
        .output()?;
    assert_eq!(output.status.code(), Some(3));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("config:config_file_not_found"), "{stderr}");
    Ok(())
}

#[test]
fn missing_path_is_invalid_input() -> io::Result<()> {
    let output = fcfg().arg("validate").output()?;
    assert_eq!(output.status.code(), Some(2));
    Ok(())
}

#[test]
fn empty_env_value_is_rejected() -> io::Result<()> {
    let output = fcfg().env("FCFG_OUTPUT", " ").arg("schema").output()?;
    assert_eq!(output.status.code(), Some(2));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("config:empty_env"), "{stderr}");
    Ok(())
}

#[test]
fn show_prints_normalized_document() -> io::Result<()> {
    let (code, value) = json_output(
        fcfg()
            .args(["--output", "json", "show", "--path"])
            .arg(fixture_path("openai_with_key.yml")),
    )?;
    assert_eq!(code, Some(0));
    assert_eq!(
        value.pointer("/semantic_search/provider").and_then(|v| v.as_str()),
        Some("openai")
    );
    assert_eq!(
        value.pointer("/semantic_search/batch_size").and_then(serde_json::Value::as_i64),
        Some(50)
    );
    Ok(())
}

#[test]
fn env_output_format_applies() -> io::Result<()> {
    let output = fcfg()
        .env("FCFG_OUTPUT", "yaml")
        .args(["show", "--path"])
        .arg(fixture_path("valid_back.json"))
        .output()?;
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("      fps: 5\n"), "{stdout}");
    Ok(())
}
