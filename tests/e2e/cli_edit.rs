//! CLI camera editing tests on scratch files.

use std::fs;
use std::io;
use std::path::PathBuf;
use std::process::Command;

fn fcfg() -> Command {
    let mut command = Command::new(env!("CARGO_BIN_EXE_fcfg"));
    command.env_remove("FRIGATE_CONFIG_FILE");
    command.env_remove("FCFG_OUTPUT");
    command.env_remove("FCFG_LOG");
    command
}

fn scratch_path(name: &str) -> PathBuf {
    std::env::temp_dir().join(format!("fcfg-e2e-{}-{name}", std::process::id()))
}

#[test]
fn add_validate_remove_flow() -> io::Result<()> {
    let path = scratch_path("flow.yml");
    let _ = fs::remove_file(&path);

    let output = fcfg().args(["add-camera", "front"]).arg("--path").arg(&path).output()?;
    assert!(output.status.success(), "{}", String::from_utf8_lossy(&output.stderr));
    let output = fcfg().args(["add-camera", "back"]).arg("--path").arg(&path).output()?;
    assert!(output.status.success());

    let output = fcfg().arg("validate").arg("--path").arg(&path).output()?;
    assert!(output.status.success());
    assert!(String::from_utf8_lossy(&output.stdout).contains("cameras: front, back\n"));

    let output = fcfg()
        .env("FRIGATE_CONFIG_FILE", &path)
        .args(["remove-camera", "front"])
        .output()?;
    assert!(output.status.success());

    let contents = fs::read_to_string(&path)?;
    fs::remove_file(&path)?;
    assert!(contents.starts_with("cameras:\n  back:\n"), "{contents}");
    assert!(!contents.contains("front:"));
    Ok(())
}

#[test]
fn re_adding_replaces_in_place() -> io::Result<()> {
    let path = scratch_path("replace.yml");
    fs::write(
        &path,
        "mqtt:\n  host: mqtt.local\ncameras:\n  yard:\n    ffmpeg:\n      inputs: []\n",
    )?;

    let output = fcfg()
        .args(["--output", "json", "add-camera", "yard", "--path"])
        .arg(&path)
        .output()?;
    let contents = fs::read_to_string(&path)?;
    fs::remove_file(&path)?;

    assert!(output.status.success());
    let value: serde_json::Value =
        serde_json::from_slice(&output.stdout).map_err(io::Error::other)?;
    assert_eq!(value.get("action").and_then(|v| v.as_str()), Some("replaced"));
    assert!(contents.starts_with("mqtt:\n  host: mqtt.local\n"), "{contents}");
    assert!(contents.contains("rtsp://example.com/stream"));
    Ok(())
}

#[test]
fn removing_unknown_camera_fails() -> io::Result<()> {
    let path = scratch_path("unknown.yml");
    fs::write(&path, "cameras: {}\n")?;

    let output = fcfg()
        .args(["remove-camera", "ghost", "--path"])
        .arg(&path)
        .output()?;
    fs::remove_file(&path)?;

    assert_eq!(output.status.code(), Some(2));
    Ok(())
}
