use thiserror::Error;
use tracing_subscriber::filter::ParseError;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Error)]
pub enum TelemetryError {
    #[error("invalid log level/filter '{value}': unable to build EnvFilter")]
    EnvFilter { value: String, source: ParseError },

    #[error("telemetry error: {0}")]
    Subscriber(Box<dyn std::error::Error + Send + Sync>),
}

/// Default filter: warnings only, or debug output for this crate when verbose.
pub fn default_filter(verbose: bool) -> &'static str {
    if verbose {
        "warn,diag_express=debug"
    } else {
        "warn"
    }
}

/// Install the stderr fmt subscriber. `RUST_LOG` wins over `verbose`.
pub fn init(verbose: bool) -> Result<(), TelemetryError> {
    let env_filter = match EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => {
            let value = default_filter(verbose);
            EnvFilter::try_new(value).map_err(|source| TelemetryError::EnvFilter {
                value: value.to_string(),
                source,
            })?
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .compact()
        .try_init()
        .map_err(TelemetryError::Subscriber)
}
