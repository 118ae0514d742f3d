//! Print a starter camera document as YAML.
//!
//! The camera name defaults to `camera_1`; pass another name as the first
//! argument.

use frigate_config_schema::{camera_document_template, to_pretty_yaml};
use std::io;
use std::io::Write;

fn main() -> std::process::ExitCode {
    match run() {
        Ok(()) => std::process::ExitCode::SUCCESS,
        Err(error) => {
            eprintln!("error: {error}");
            std::process::ExitCode::from(1)
        },
    }
}

fn run() -> Result<(), Box<dyn std::error::Error>> {
    let name = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "camera_1".to_owned());
    let output = to_pretty_yaml(&camera_document_template(&name))?;

    let mut stdout = io::stdout();
    stdout.write_all(output.as_bytes())?;
    stdout.flush()?;

    Ok(())
}
