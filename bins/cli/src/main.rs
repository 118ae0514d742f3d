//! CLI binary entrypoint.

mod commands;
mod error;
mod format;
mod logging;

use clap::{Parser, Subcommand};
use commands::{
    run_add_camera, run_remove_camera, run_schema, run_show, run_template, run_validate,
};
use error::{CliError, ExitCode};
use format::{OutputArgs, OutputMode};
use frigate_config_schema::{ENV_CONFIG_FILE, EditorEnv};
use frigate_config_shared::ErrorEnvelope;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

#[derive(Debug, Parser)]
#[command(
    name = "fcfg",
    version,
    about = "Validate and edit NVR camera configuration",
    long_about = None
)]
struct Cli {
    #[command(flatten)]
    output: OutputArgs,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Validate a config document.
    Validate {
        /// Config file (YAML/JSON/TOML). Defaults to `FRIGATE_CONFIG_FILE`.
        #[arg(long)]
        path: Option<PathBuf>,
    },
    /// Print the normalized config document.
    Show {
        /// Config file (YAML/JSON/TOML). Defaults to `FRIGATE_CONFIG_FILE`.
        #[arg(long)]
        path: Option<PathBuf>,
    },
    /// Print a starter camera section.
    Template {
        /// Wrap the section as `cameras.<NAME>`.
        #[arg(long)]
        name: Option<String>,
    },
    /// List schema sections, or describe one section's fields.
    Schema {
        /// Section name (`camera`, `detect`, `mqtt`, ...).
        #[arg(value_name = "SECTION")]
        section: Option<String>,
    },
    /// Add a templated camera to a config file.
    AddCamera {
        /// Camera name.
        #[arg(value_name = "NAME")]
        name: String,
        /// Config file (YAML/JSON/TOML). Defaults to `FRIGATE_CONFIG_FILE`.
        #[arg(long)]
        path: Option<PathBuf>,
    },
    /// Remove a camera from a config file.
    RemoveCamera {
        /// Camera name.
        #[arg(value_name = "NAME")]
        name: String,
        /// Config file (YAML/JSON/TOML). Defaults to `FRIGATE_CONFIG_FILE`.
        #[arg(long)]
        path: Option<PathBuf>,
    },
}

pub(crate) struct CliOutput {
    stdout: String,
    exit_code: ExitCode,
}

impl CliOutput {
    pub(crate) const fn ok(stdout: String) -> Self {
        Self {
            stdout,
            exit_code: ExitCode::Ok,
        }
    }
}

fn main() -> std::process::ExitCode {
    let cli = Cli::parse();

    let env = match EditorEnv::from_std_env() {
        Ok(env) => env,
        Err(error) => return exit_with_error(&CliError::from(ErrorEnvelope::from(error))),
    };
    if let Err(error) = logging::init(env.log_filter.as_deref(), cli.output.log_format) {
        return exit_with_error(&error);
    }
    let mode = OutputMode::resolve(&cli.output, env.output);

    match run(&cli.command, mode, &env) {
        Ok(output) => match write_output(&output) {
            Ok(()) => std::process::ExitCode::from(output.exit_code.as_u8()),
            Err(error) => exit_with_error(&error),
        },
        Err(error) => exit_with_error(&error),
    }
}

fn exit_with_error(error: &CliError) -> std::process::ExitCode {
    let _ = writeln!(io::stderr(), "error: {error}");
    std::process::ExitCode::from(error.exit_code().as_u8())
}

fn run(command: &Commands, mode: OutputMode, env: &EditorEnv) -> Result<CliOutput, CliError> {
    tracing::debug!(?command, format = ?mode.format, "running command");
    match command {
        Commands::Validate { path } => run_validate(mode, &resolve_path(path.as_deref(), env)?),
        Commands::Show { path } => run_show(mode, &resolve_path(path.as_deref(), env)?),
        Commands::Template { name } => run_template(mode, name.as_deref()),
        Commands::Schema { section } => run_schema(mode, section.as_deref()),
        Commands::AddCamera { name, path } => {
            run_add_camera(mode, &resolve_path(path.as_deref(), env)?, name)
        },
        Commands::RemoveCamera { name, path } => {
            run_remove_camera(mode, &resolve_path(path.as_deref(), env)?, name)
        },
    }
}

fn resolve_path(path: Option<&Path>, env: &EditorEnv) -> Result<PathBuf, CliError> {
    path.map(Path::to_path_buf)
        .or_else(|| env.config_file.clone())
        .ok_or_else(|| {
            CliError::InvalidInput(format!(
                "no config file given; pass --path or set {ENV_CONFIG_FILE}"
            ))
        })
}

fn write_output(output: &CliOutput) -> Result<(), CliError> {
    let mut stdout = io::stdout();
    stdout.write_all(output.stdout.as_bytes())?;
    stdout.flush()?;
    Ok(())
}
