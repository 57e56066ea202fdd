//! HTTP client for the remote records API.

use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use reqwest::Method;
use serde_json::Value;
use std::time::{Duration, Instant};
use tracing::debug;

use crate::error::FetchError;

/// Default per-call timeout in milliseconds.
const DEFAULT_TIMEOUT_MS: u64 = 30_000;

// ============================================================================
// Call Options
// ============================================================================

/// Request body: a pre-serialized string or a value serialized on send.
#[derive(Debug, Clone)]
pub enum Payload {
    /// Sent as-is.
    Raw(String),
    /// Serialized to JSON; sets the JSON content type.
    Json(Value),
}

/// Options for a single API call.
#[derive(Debug, Clone, Default)]
pub struct CallOptions {
    /// HTTP method, upper-cased before use. Defaults to `GET`.
    pub method: Option<String>,
    /// Additional request headers.
    pub headers: Vec<(String, String)>,
    /// Optional request body.
    pub payload: Option<Payload>,
    /// Per-call timeout. Defaults to 30 seconds.
    pub timeout: Option<Duration>,
}

impl CallOptions {
    /// Options for a bearer-authenticated GET.
    pub fn bearer(token: &str) -> Self {
        Self {
            headers: vec![("Authorization".to_string(), format!("Bearer {token}"))],
            ..Self::default()
        }
    }

    fn resolve_method(&self) -> Result<Method, FetchError> {
        let name = self
            .method
            .as_deref()
            .unwrap_or("GET")
            .to_ascii_uppercase();
        Method::from_bytes(name.as_bytes())
            .map_err(|_| FetchError::InvalidOption(format!("unsupported method {name:?}")))
    }

    fn resolve_headers(&self) -> Result<HeaderMap, FetchError> {
        let mut headers = HeaderMap::with_capacity(self.headers.len());
        for (name, value) in &self.headers {
            let name = HeaderName::from_bytes(name.as_bytes())
                .map_err(|_| FetchError::InvalidOption(format!("invalid header name {name:?}")))?;
            let value = HeaderValue::from_str(value).map_err(|_| {
                FetchError::InvalidOption(format!("invalid value for header {name:?}"))
            })?;
            headers.insert(name, value);
        }
        Ok(headers)
    }

    fn resolve_timeout(&self) -> Duration {
        self.timeout
            .unwrap_or(Duration::from_millis(DEFAULT_TIMEOUT_MS))
    }
}

// ============================================================================
// Api Client
// ============================================================================

/// HTTP client over the remote records API.
///
/// Calls never treat a non-2xx status as a transport failure: the status
/// is inspected after the response completes, so error bodies stay
/// available for diagnostics.
#[derive(Debug, Clone)]
pub struct ApiClient {
    inner: reqwest::Client,
}

impl ApiClient {
    /// Creates a new client.
    pub fn new() -> Result<Self, FetchError> {
        let inner = reqwest::Client::builder()
            .user_agent(concat!("sheetsync/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self { inner })
    }

    /// Performs one call and decodes the response body as JSON.
    ///
    /// Emits a timing log line per call. Fails with
    /// [`FetchError::Transport`] on network problems,
    /// [`FetchError::HttpStatus`] on a status outside `[200, 300)`, and
    /// [`FetchError::Decode`] when the body is not valid JSON.
    pub async fn call(&self, url: &str, options: &CallOptions) -> Result<Value, FetchError> {
        let method = options.resolve_method()?;
        let headers = options.resolve_headers()?;

        let mut request = self
            .inner
            .request(method.clone(), url)
            .headers(headers)
            .timeout(options.resolve_timeout());
        request = match &options.payload {
            Some(Payload::Raw(body)) => request.body(body.clone()),
            Some(Payload::Json(value)) => request.json(value),
            None => request,
        };

        let start = Instant::now();
        let response = request.send().await?;
        let status = response.status();
        let body = response.text().await?;
        #[allow(clippy::cast_possible_truncation)]
        let duration_ms = start.elapsed().as_millis() as u64;
        debug!(
            method = %method,
            url = %url,
            status = status.as_u16(),
            duration_ms,
            "API call completed"
        );

        if !status.is_success() {
            return Err(FetchError::HttpStatus {
                status: status.as_u16(),
                body,
            });
        }

        serde_json::from_str(&body).map_err(FetchError::Decode)
    }
}

impl Default for ApiClient {
    /// Creates a default client.
    ///
    /// # Panics
    ///
    /// Panics if the HTTP client cannot be created, which indicates a
    /// broken TLS configuration the application cannot run under.
    fn default() -> Self {
        Self::new().unwrap_or_else(|e| panic!("Failed to create HTTP client: {e}"))
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn method_defaults_to_get() {
        let options = CallOptions::default();
        assert_eq!(options.resolve_method().unwrap(), Method::GET);
    }

    #[test]
    fn method_is_uppercased() {
        let options = CallOptions {
            method: Some("post".to_string()),
            ..CallOptions::default()
        };
        assert_eq!(options.resolve_method().unwrap(), Method::POST);
    }

    #[test]
    fn invalid_method_is_rejected() {
        let options = CallOptions {
            method: Some("not a method".to_string()),
            ..CallOptions::default()
        };
        assert!(matches!(
            options.resolve_method(),
            Err(FetchError::InvalidOption(_))
        ));
    }

    #[test]
    fn timeout_defaults_to_thirty_seconds() {
        assert_eq!(
            CallOptions::default().resolve_timeout(),
            Duration::from_secs(30)
        );
        let options = CallOptions {
            timeout: Some(Duration::from_secs(5)),
            ..CallOptions::default()
        };
        assert_eq!(options.resolve_timeout(), Duration::from_secs(5));
    }

    #[test]
    fn bearer_options_carry_authorization() {
        let options = CallOptions::bearer("s3cret");
        let headers = options.resolve_headers().unwrap();
        assert_eq!(headers["authorization"], "Bearer s3cret");
    }

    #[test]
    fn invalid_header_value_is_rejected() {
        let options = CallOptions {
            headers: vec![("X-Test".to_string(), "bad\nvalue".to_string())],
            ..CallOptions::default()
        };
        assert!(matches!(
            options.resolve_headers(),
            Err(FetchError::InvalidOption(_))
        ));
    }

    #[test]
    fn payload_variants_construct() {
        let _ = Payload::Raw("body".to_string());
        let _ = Payload::Json(json!({"a": 1}));
    }
}
