//! Stderr tracing setup.

use crate::error::CliError;
use crate::format::LogFormat;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

/// Filter used when `FCFG_LOG` is unset.
pub const DEFAULT_LOG_FILTER: &str = "warn";

/// Install the global subscriber. Logs always go to stderr so stdout stays
/// machine-readable.
pub fn init(filter: Option<&str>, format: LogFormat) -> Result<(), CliError> {
    let directive = filter.unwrap_or(DEFAULT_LOG_FILTER);
    let filter = EnvFilter::try_new(directive).map_err(|error| {
        CliError::InvalidInput(format!("invalid log filter {directive:?}: {error}"))
    })?;

    let registry = tracing_subscriber::registry().with(filter);
    let installed = match format {
        LogFormat::Json => registry
            .with(
                tracing_subscriber::fmt::layer()
                    .with_writer(std::io::stderr)
                    .json(),
            )
            .try_init(),
        LogFormat::Text => registry
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .try_init(),
    };

    // A subscriber installed by an embedding process takes precedence.
    if let Err(error) = installed {
        tracing::debug!(%error, "tracing subscriber already installed");
    }
    Ok(())
}
