//! CLI smoke tests: help, templates and schema listing.

use std::io;
use std::process::Command;

fn fcfg() -> Command {
    let mut command = Command::new(env!("CARGO_BIN_EXE_fcfg"));
    command.env_remove("FRIGATE_CONFIG_FILE");
    command.env_remove("FCFG_OUTPUT");
    command.env_remove("FCFG_LOG");
    command
}

#[test]
fn help_lists_subcommands() -> io::Result<()> {
    let output = fcfg().arg("--help").output()?;
    assert!(output.status.success());

    let stdout = String::from_utf8_lossy(&output.stdout);
    for name in ["validate", "show", "template", "schema", "add-camera", "remove-camera"] {
        assert!(stdout.contains(name), "missing {name} in help");
    }
    Ok(())
}

#[test]
fn template_prints_yaml_camera() -> io::Result<()> {
    let output = fcfg().args(["template", "--name", "garage"]).output()?;
    assert!(output.status.success());

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.starts_with("cameras:\n  garage:\n    ffmpeg:\n"), "{stdout}");
    assert!(stdout.contains("rtsp://example.com/stream"));
    Ok(())
}

#[test]
fn template_json_is_structured() -> io::Result<()> {
    let output = fcfg().args(["--output", "json", "template"]).output()?;
    assert!(output.status.success());

    let value: serde_json::Value =
        serde_json::from_slice(&output.stdout).map_err(io::Error::other)?;
    let fps = value
        .pointer("/detect/fps")
        .and_then(serde_json::Value::as_i64);
    assert_eq!(fps, Some(5));
    Ok(())
}

#[test]
fn template_rejects_bad_names() -> io::Result<()> {
    let output = fcfg().args(["template", "--name", "front door"]).output()?;
    assert_eq!(output.status.code(), Some(2));
    Ok(())
}

#[test]
fn schema_lists_and_describes_sections() -> io::Result<()> {
    let output = fcfg().arg("schema").output()?;
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.lines().any(|line| line.starts_with("camera ")));
    assert!(stdout.lines().any(|line| line.starts_with("semantic_search ")));

    let output = fcfg().args(["--output", "json", "schema", "detect"]).output()?;
    assert!(output.status.success());
    let value: serde_json::Value =
        serde_json::from_slice(&output.stdout).map_err(io::Error::other)?;
    let fps_default = value
        .get("fields")
        .and_then(serde_json::Value::as_array)
        .and_then(|fields| {
            fields
                .iter()
                .find(|field| field.get("name").and_then(serde_json::Value::as_str) == Some("fps"))
        })
        .and_then(|field| field.get("default"))
        .and_then(serde_json::Value::as_str);
    assert_eq!(fps_default, Some("5"));
    Ok(())
}

#[test]
fn unknown_section_is_invalid_input() -> io::Result<()> {
    let output = fcfg().args(["schema", "nope"]).output()?;
    assert_eq!(output.status.code(), Some(2));
    Ok(())
}
