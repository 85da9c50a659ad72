//! Crate-wide error types.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("config error: {0}")]
    Config(String),

    #[error("url error: {0}")]
    Url(String),

    #[error("request failed: {0}")]
    Request(String),

    #[error("api error (HTTP {status}): {message}")]
    Api { status: u16, message: String },

    #[error("logger error: {0}")]
    Logger(String),
}
