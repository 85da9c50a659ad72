//! Logging initialisation via tracing-subscriber.
//!
//! Call [`init`] once at startup, after the effective level is resolved.

use tracing_subscriber::EnvFilter;

use crate::error::Error;

/// Initialise the global tracing subscriber.
///
/// `level` accepts standard level strings: `"error"`, `"warn"`, `"info"`,
/// `"debug"`, `"trace"`.
///
/// If `prefer_level` is `true` (CLI `-v` flags were passed), `level` takes
/// precedence and `RUST_LOG` is only a fallback when `level` is invalid.
/// Otherwise `RUST_LOG` wins and `level` is the fallback.
pub fn init(level: &str, prefer_level: bool) -> Result<(), Error> {
    let filter = if prefer_level {
        EnvFilter::try_new(level).or_else(|level_err| {
            EnvFilter::try_from_default_env().map_err(|env_err| {
                Error::Logger(format!(
                    "invalid log level '{level}': {level_err}; RUST_LOG parse failed: {env_err}"
                ))
            })
        })?
    } else {
        EnvFilter::try_from_default_env()
            .or_else(|_| EnvFilter::try_new(level))
            .map_err(|e| Error::Logger(format!("invalid log level '{level}': {e}")))?
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|e| Error::Logger(format!("failed to set subscriber: {e}")))
}
