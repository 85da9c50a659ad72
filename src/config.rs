//! Configuration loading with env-var overrides.
//!
//! Reads `config/default.toml` relative to the current working directory,
//! then applies `MINISHOP_BASE_URL`, `MINISHOP_TIMEOUT_MS` and
//! `MINISHOP_LOG_LEVEL` env overrides. Every key is optional — the built-in
//! defaults are a complete configuration, so a missing default file is not
//! an error. An explicitly passed path that cannot be read is.

use std::{env, fs, path::Path};

use serde::Deserialize;

use crate::error::Error;

/// Default location searched when no config path is given.
pub const DEFAULT_CONFIG_PATH: &str = "config/default.toml";

/// Shop API client configuration.
///
/// A plain owned value — the composition root builds one and passes it to
/// [`ApiClient::new`](crate::ApiClient::new). There is no process-wide
/// instance to mutate.
#[derive(Debug, Clone, PartialEq)]
pub struct ClientConfig {
    /// URI prefix prepended to relative request paths.
    pub base_url: String,
    /// Milliseconds before an in-flight request is aborted.
    pub timeout_ms: u64,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_ms: default_timeout_ms(),
        }
    }
}

/// Logging configuration, consumed by the bootstrap binary.
#[derive(Debug, Clone)]
pub struct LogConfig {
    pub level: String,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self { level: default_log_level() }
    }
}

/// Fully-resolved configuration.
#[derive(Debug, Clone, Default)]
pub struct Config {
    pub client: ClientConfig,
    pub log: LogConfig,
}

/// Env-var overrides, passed explicitly so tests never mutate the process
/// environment.
#[derive(Debug, Default)]
pub struct Overrides {
    pub base_url: Option<String>,
    pub timeout_ms: Option<String>,
    pub log_level: Option<String>,
}

impl Overrides {
    fn from_env() -> Self {
        Self {
            base_url: env::var("MINISHOP_BASE_URL").ok(),
            timeout_ms: env::var("MINISHOP_TIMEOUT_MS").ok(),
            log_level: env::var("MINISHOP_LOG_LEVEL").ok(),
        }
    }
}

// ── Raw TOML shape — serde target before resolution ───────────────────────────

#[derive(Deserialize, Default)]
struct RawConfig {
    #[serde(default)]
    client: RawClient,
    #[serde(default)]
    log: RawLog,
}

#[derive(Deserialize)]
struct RawClient {
    #[serde(default = "default_base_url")]
    base_url: String,
    #[serde(default = "default_timeout_ms")]
    timeout_ms: u64,
}

impl Default for RawClient {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_ms: default_timeout_ms(),
        }
    }
}

#[derive(Deserialize)]
struct RawLog {
    #[serde(default = "default_log_level")]
    level: String,
}

impl Default for RawLog {
    fn default() -> Self {
        Self { level: default_log_level() }
    }
}

fn default_base_url() -> String {
    "http://127.0.0.1:5000/api/v1/".to_string()
}

fn default_timeout_ms() -> u64 {
    10_000
}

fn default_log_level() -> String {
    "info".to_string()
}

// ── Loading ───────────────────────────────────────────────────────────────────

/// Load config from `path` (or `config/default.toml` when `None`), then
/// apply env-var overrides.
pub fn load(path: Option<&Path>) -> Result<Config, Error> {
    load_from(path, &Overrides::from_env())
}

/// Internal loader — accepts explicit overrides instead of reading env vars.
pub fn load_from(path: Option<&Path>, overrides: &Overrides) -> Result<Config, Error> {
    let raw = match path {
        Some(p) => parse_file(p)?,
        None => {
            let p = Path::new(DEFAULT_CONFIG_PATH);
            if p.exists() {
                parse_file(p)?
            } else {
                RawConfig::default()
            }
        }
    };

    let base_url = overrides
        .base_url
        .clone()
        .unwrap_or(raw.client.base_url);

    let timeout_ms = match &overrides.timeout_ms {
        Some(v) => v.parse::<u64>().map_err(|e| {
            Error::Config(format!("invalid MINISHOP_TIMEOUT_MS '{v}': {e}"))
        })?,
        None => raw.client.timeout_ms,
    };

    let level = overrides
        .log_level
        .clone()
        .unwrap_or(raw.log.level);

    Ok(Config {
        client: ClientConfig { base_url, timeout_ms },
        log: LogConfig { level },
    })
}

fn parse_file(path: &Path) -> Result<RawConfig, Error> {
    let text = fs::read_to_string(path)
        .map_err(|e| Error::Config(format!("cannot read {}: {e}", path.display())))?;
    toml::from_str(&text)
        .map_err(|e| Error::Config(format!("parse error in {}: {e}", path.display())))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    const FULL_TOML: &str = r#"
[client]
base_url = "http://shop.internal:8000/api/v2/"
timeout_ms = 2500

[log]
level = "debug"
"#;

    fn write_toml(content: &str) -> NamedTempFile {
        let mut f = NamedTempFile::new().unwrap();
        f.write_all(content.as_bytes()).unwrap();
        f
    }

    #[test]
    fn defaults_match_original_literals() {
        let cfg = ClientConfig::default();
        assert_eq!(cfg.base_url, "http://127.0.0.1:5000/api/v1/");
        assert_eq!(cfg.timeout_ms, 10_000);
    }

    #[test]
    fn empty_file_yields_defaults() {
        let f = write_toml("");
        let cfg = load_from(Some(f.path()), &Overrides::default()).unwrap();
        assert_eq!(cfg.client, ClientConfig::default());
        assert_eq!(cfg.log.level, "info");
    }

    #[test]
    fn file_values_respected() {
        let f = write_toml(FULL_TOML);
        let cfg = load_from(Some(f.path()), &Overrides::default()).unwrap();
        assert_eq!(cfg.client.base_url, "http://shop.internal:8000/api/v2/");
        assert_eq!(cfg.client.timeout_ms, 2500);
        assert_eq!(cfg.log.level, "debug");
    }

    #[test]
    fn overrides_win_over_file() {
        let f = write_toml(FULL_TOML);
        let overrides = Overrides {
            base_url: Some("http://127.0.0.1:9000/api/v1/".into()),
            timeout_ms: Some("500".into()),
            log_level: Some("trace".into()),
        };
        let cfg = load_from(Some(f.path()), &overrides).unwrap();
        assert_eq!(cfg.client.base_url, "http://127.0.0.1:9000/api/v1/");
        assert_eq!(cfg.client.timeout_ms, 500);
        assert_eq!(cfg.log.level, "trace");
    }

    #[test]
    fn malformed_timeout_override_errors() {
        let f = write_toml("");
        let overrides = Overrides {
            timeout_ms: Some("ten-seconds".into()),
            ..Overrides::default()
        };
        let err = load_from(Some(f.path()), &overrides).unwrap_err();
        assert!(err.to_string().contains("MINISHOP_TIMEOUT_MS"));
    }

    #[test]
    fn missing_explicit_file_errors() {
        let result = load_from(Some(Path::new("/nonexistent/config.toml")), &Overrides::default());
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("config error"));
    }

    #[test]
    fn malformed_file_errors() {
        let f = write_toml("[client\nbase_url = ");
        let err = load_from(Some(f.path()), &Overrides::default()).unwrap_err();
        assert!(err.to_string().contains("parse error"));
    }
}
