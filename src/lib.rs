//! Client-side plumbing for the minishop frontend.
//!
//! Carries the pieces every caller of the shop API needs: configuration
//! loading with documented defaults, an explicitly constructed
//! [`ApiClient`], and the timestamp formatter used for display.
//!
//! There is no global state — the composition root loads a [`Config`],
//! builds a client from it, and passes both down.

pub mod client;
pub mod config;
pub mod error;
pub mod logger;
pub mod time;

pub use client::{ApiClient, CallOptions, Interceptor};
pub use config::{Config, ClientConfig, LogConfig, Overrides, load};
pub use error::Error;
pub use time::format_time;
