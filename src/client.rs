//! Shop API client.
//!
//! [`ApiClient`] is constructed once by the composition root from a
//! [`ClientConfig`] and handed to whatever issues requests — there is no
//! module-level instance. Constructed once, then cheaply cloned because
//! `reqwest::Client` is an `Arc` internally.
//!
//! Request shapes stay with the caller: the client resolves paths against
//! the configured base URL, applies the configured timeout (or a per-call
//! override), runs registered interceptors, and maps non-2xx responses
//! through the shop API's `{"msg": ...}` error envelope.

use std::time::Duration;

use reqwest::{Client, Method, RequestBuilder};
use serde::{Deserialize, Serialize, de::DeserializeOwned};
use tracing::{debug, error};
use url::Url;

use crate::config::ClientConfig;
use crate::error::Error;

// ── Interceptors ──────────────────────────────────────────────────────────────

/// Request decorators applied in registration order between assembly and
/// send.
///
/// Enum dispatch keeps the seam explicit without trait objects. Adding a
/// decorator = new variant + new `apply` arm.
#[derive(Debug, Clone)]
pub enum Interceptor {
    /// Add a fixed header to every outgoing request.
    Tag { header: String, value: String },
}

impl Interceptor {
    fn apply(&self, req: RequestBuilder) -> RequestBuilder {
        match self {
            Interceptor::Tag { header, value } => req.header(header, value),
        }
    }
}

/// Per-call overrides. `Default` inherits the client configuration.
#[derive(Debug, Clone, Default)]
pub struct CallOptions {
    /// Replaces the client-wide timeout for this request only.
    pub timeout: Option<Duration>,
}

// ── Client ────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone)]
pub struct ApiClient {
    client: Client,
    base_url: Url,
    timeout_ms: u64,
    interceptors: Vec<Interceptor>,
}

impl ApiClient {
    /// Build a client from resolved configuration.
    pub fn new(config: &ClientConfig) -> Result<Self, Error> {
        let base_url = Url::parse(&config.base_url)
            .map_err(|e| Error::Url(format!("invalid base url '{}': {e}", config.base_url)))?;

        let client = Client::builder()
            .timeout(Duration::from_millis(config.timeout_ms))
            .build()
            .map_err(|e| Error::Request(format!("failed to build HTTP client: {e}")))?;

        Ok(Self {
            client,
            base_url,
            timeout_ms: config.timeout_ms,
            interceptors: Vec::new(),
        })
    }

    /// Register a request interceptor. Interceptors run in registration
    /// order on every request issued through this client.
    pub fn with_interceptor(mut self, interceptor: Interceptor) -> Self {
        self.interceptors.push(interceptor);
        self
    }

    /// Effective base URL, exactly as configured.
    pub fn base_url(&self) -> &str {
        self.base_url.as_str()
    }

    /// Client-wide request timeout in milliseconds.
    pub fn timeout_ms(&self) -> u64 {
        self.timeout_ms
    }

    /// Resolve `path` against the base URL.
    ///
    /// Relative paths append to the configured prefix; a leading `/` is
    /// stripped first, so `/products` and `products` land on the same
    /// endpoint. Absolute `http(s)` URLs pass through untouched.
    pub fn endpoint(&self, path: &str) -> Result<Url, Error> {
        if path.starts_with("http://") || path.starts_with("https://") {
            return Url::parse(path)
                .map_err(|e| Error::Url(format!("invalid url '{path}': {e}")));
        }
        let relative = path.trim_start_matches('/');
        self.base_url
            .join(relative)
            .map_err(|e| Error::Url(format!("cannot join '{path}' onto '{}': {e}", self.base_url)))
    }

    /// GET `path` and decode the JSON response body.
    pub async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, Error> {
        self.request(Method::GET, path, None::<&()>, CallOptions::default())
            .await
    }

    /// POST `body` as JSON to `path` and decode the JSON response body.
    pub async fn post_json<B, T>(&self, path: &str, body: &B) -> Result<T, Error>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        self.request(Method::POST, path, Some(body), CallOptions::default())
            .await
    }

    /// Issue a request with an explicit method and per-call options.
    pub async fn request<B, T>(
        &self,
        method: Method,
        path: &str,
        body: Option<&B>,
        opts: CallOptions,
    ) -> Result<T, Error>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let url = self.endpoint(path)?;

        let mut req = self.client.request(method.clone(), url.clone());
        if let Some(body) = body {
            req = req.json(body);
        }
        if let Some(timeout) = opts.timeout {
            req = req.timeout(timeout);
        }
        for interceptor in &self.interceptors {
            req = interceptor.apply(req);
        }

        debug!(%method, %url, "sending request");

        let response = req.send().await.map_err(|e| {
            error!(%url, error = %e, "request failed (transport)");
            Error::Request(e.to_string())
        })?;

        let response = check_status(response).await?;

        response.json::<T>().await.map_err(|e| {
            error!(%url, error = %e, "failed to decode response body");
            Error::Request(format!("failed to parse response body: {e}"))
        })
    }

    /// Lightweight reachability probe.
    ///
    /// Sends a HEAD request to the base URL. Any HTTP response (including
    /// 4xx) means the server is reachable; only a transport-level failure
    /// (connection refused, timeout) is an error.
    ///
    /// Uses a hard 5-second timeout regardless of the configured one.
    pub async fn ping(&self) -> Result<(), Error> {
        self.client
            .head(self.base_url.clone())
            .timeout(Duration::from_secs(5))
            .send()
            .await
            .map(|_| ())
            .map_err(|e| Error::Request(format!("unreachable: {e}")))
    }
}

// ── Status handling ───────────────────────────────────────────────────────────

// Error envelope returned by the shop API on failures.
#[derive(Debug, Deserialize)]
struct ErrorEnvelope {
    msg: String,
}

/// Consume the response and return it if successful, or a structured error.
async fn check_status(response: reqwest::Response) -> Result<reqwest::Response, Error> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let body = response
        .text()
        .await
        .unwrap_or_else(|_| "<failed to read error body>".to_string());

    let message = match serde_json::from_str::<ErrorEnvelope>(&body) {
        Ok(envelope) => envelope.msg,
        Err(_) => body,
    };

    error!(%status, %message, "request returned HTTP error");
    Err(Error::Api { status: status.as_u16(), message })
}
