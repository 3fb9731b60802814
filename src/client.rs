//! Authenticated HTTP transport for the AccessGrid API.
//!
//! One [`Client`] is built per set of credentials and shared by both service
//! façades. It holds no mutable state after construction, so a single
//! instance is safe to use from many tasks concurrently; each call is an
//! independent signed round trip. Cancellation is the usual async story:
//! drop the future, or rely on the configured request timeout; both surface
//! as [`AccessGridError::Http`], never as an API error.

use std::fmt;
use std::sync::LazyLock;
use std::time::Duration;

use reqwest::Method;
use reqwest::header::{CONTENT_TYPE, USER_AGENT};
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::{debug, instrument};
use url::Url;

use crate::auth::sign_payload;
use crate::error::{AccessGridError, ApiError, Result};

/// Production API endpoint.
pub(crate) const DEFAULT_BASE_URL: &str = "https://api.accessgrid.com";

/// Fixed User-Agent sent with every request.
const USER_AGENT_VALUE: &str = concat!("accessgrid-rs @ v", env!("CARGO_PKG_VERSION"));

/// Marker for requests without a body. Signed as `{}`, nothing on the wire.
pub(crate) const NO_BODY: Option<&()> = None;

/// Default HTTP client with connection pooling enabled.
///
/// Shared across all clients that do not override the transport, preserving
/// connection pooling when an application constructs several clients.
static DEFAULT_HTTP_CLIENT: LazyLock<reqwest::Client> = LazyLock::new(|| {
    reqwest::Client::builder()
        .timeout(Duration::from_secs(30))
        .connect_timeout(Duration::from_secs(10))
        .pool_max_idle_per_host(10)
        .build()
        .expect("default HTTP client configuration is valid")
});

static PATH_ENCODER_BASE: LazyLock<Url> =
    LazyLock::new(|| Url::parse(DEFAULT_BASE_URL).expect("default base URL is valid"));

/// Optional client configuration, applied at construction time.
///
/// Every field has a sensible default; construct with struct-update syntax:
///
/// ```
/// use accessgrid::ClientConfig;
///
/// let config = ClientConfig {
///     base_url: Some("https://staging.api.example.com".to_owned()),
///     ..ClientConfig::default()
/// };
/// ```
#[derive(Debug, Clone, Default)]
pub struct ClientConfig {
    /// Overrides the production base URL.
    pub base_url: Option<String>,
    /// Supplies a pre-configured HTTP client instead of the pooled default.
    pub http_client: Option<reqwest::Client>,
}

/// Authenticated transport shared by the service façades.
///
/// Immutable after construction: credentials, base URL, and the underlying
/// HTTP client never change for the lifetime of the instance.
pub(crate) struct Client {
    account_id: String,
    secret_key: String,
    base_url: String,
    http: reqwest::Client,
}

impl fmt::Debug for Client {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Client")
            .field("account_id", &self.account_id)
            .field("secret_key", &"<redacted>")
            .field("base_url", &self.base_url)
            .finish_non_exhaustive()
    }
}

impl Client {
    /// Validates credentials and configuration; no I/O is performed.
    pub(crate) fn new(account_id: String, secret_key: String, config: ClientConfig) -> Result<Self> {
        if account_id.is_empty() {
            return Err(AccessGridError::MissingAccountId);
        }
        if secret_key.is_empty() {
            return Err(AccessGridError::MissingSecretKey);
        }

        let base_url = match config.base_url {
            Some(url) => {
                Url::parse(&url).map_err(|e| AccessGridError::InvalidBaseUrl(e.to_string()))?;
                url.trim_end_matches('/').to_owned()
            }
            None => DEFAULT_BASE_URL.to_owned(),
        };

        Ok(Self {
            account_id,
            secret_key,
            base_url,
            http: config.http_client.unwrap_or_else(|| DEFAULT_HTTP_CLIENT.clone()),
        })
    }

    /// Sends one signed request and decodes the JSON response into `T`.
    pub(crate) async fn request<B, T>(&self, method: Method, path: &str, body: Option<&B>) -> Result<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let bytes = self.send(method, path, body).await?;
        serde_json::from_slice(&bytes)
            .map_err(|e| AccessGridError::Decode(format!("decoding {path} response: {e}")))
    }

    /// Sends one signed request and returns the raw response body.
    ///
    /// Used by operations whose response shape is only known after inspecting
    /// the payload (see the card/pass resolver).
    pub(crate) async fn request_raw<B>(
        &self,
        method: Method,
        path: &str,
        body: Option<&B>,
    ) -> Result<Vec<u8>>
    where
        B: Serialize + ?Sized,
    {
        self.send(method, path, body).await
    }

    /// Sends one signed request, discarding any response body.
    pub(crate) async fn request_no_content<B>(
        &self,
        method: Method,
        path: &str,
        body: Option<&B>,
    ) -> Result<()>
    where
        B: Serialize + ?Sized,
    {
        self.send(method, path, body).await?;
        Ok(())
    }

    /// Signs, sends, and normalizes one request.
    ///
    /// A `None` body sends no bytes on the wire but is still signed as the
    /// empty object, which the service requires. Responses with status >= 400
    /// are normalized into [`ApiError`]; transport failures surface as
    /// [`AccessGridError::Http`].
    #[instrument(skip(self, body), fields(method = %method, path))]
    async fn send<B>(&self, method: Method, path: &str, body: Option<&B>) -> Result<Vec<u8>>
    where
        B: Serialize + ?Sized,
    {
        let payload = match body {
            Some(value) => Some(
                serde_json::to_vec(value)
                    .map_err(|e| AccessGridError::Serialize(e.to_string()))?,
            ),
            None => None,
        };

        let signature = sign_payload(&self.secret_key, payload.as_deref())?;

        let url = format!("{}{}", self.base_url, path);
        let mut request = self
            .http
            .request(method, &url)
            .header(CONTENT_TYPE, "application/json")
            .header("X-ACCT-ID", &self.account_id)
            .header(USER_AGENT, USER_AGENT_VALUE)
            .header("X-PAYLOAD-SIG", signature);

        if let Some(bytes) = payload {
            request = request.body(bytes);
        }

        let response = request.send().await?;

        let status = response.status();
        let header_request_id = response
            .headers()
            .get("X-Request-ID")
            .and_then(|value| value.to_str().ok())
            .map(str::to_owned);

        let bytes = response.bytes().await?;
        debug!(status = status.as_u16(), body_len = bytes.len(), "response received");

        if status.as_u16() >= 400 {
            return Err(normalize_api_error(status.as_u16(), header_request_id, &bytes).into());
        }

        Ok(bytes.to_vec())
    }
}

/// Shape of the service's error body. All fields are best-effort.
#[derive(Debug, Default, serde::Deserialize)]
struct ErrorBody {
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    error: Option<String>,
    #[serde(default)]
    request_id: Option<String>,
}

/// Builds an [`ApiError`] from a response with status >= 400.
///
/// Message preference: `message` field, then `error` field, then the raw
/// body text. Request ID preference: body field, then the `X-Request-ID`
/// header. A body that is not JSON at all falls through to the raw text.
fn normalize_api_error(status: u16, header_request_id: Option<String>, body: &[u8]) -> ApiError {
    let raw_body = String::from_utf8_lossy(body).into_owned();
    let parsed: ErrorBody = serde_json::from_slice(body).unwrap_or_default();

    let message = parsed
        .message
        .filter(|m| !m.is_empty())
        .or(parsed.error.filter(|m| !m.is_empty()))
        .unwrap_or_else(|| raw_body.clone());

    let request_id = parsed.request_id.filter(|id| !id.is_empty()).or(header_request_id);

    ApiError { status, message, request_id, raw_body }
}

/// Percent-escapes one path segment (card and template identifiers come from
/// caller input and may contain reserved characters).
pub(crate) fn escape_path_segment(segment: &str) -> String {
    let mut url = PATH_ENCODER_BASE.clone();
    match url.path_segments_mut() {
        Ok(mut segments) => {
            segments.pop_if_empty().push(segment);
        }
        // Unreachable for an HTTP base URL; keep the raw value rather than panic.
        Err(()) => return segment.to_owned(),
    }
    url.path().trim_start_matches('/').to_owned()
}

/// Appends form-encoded query parameters to a path. An empty parameter list
/// leaves the path untouched (no trailing `?`).
pub(crate) fn path_with_query(path: &str, params: &[(&str, String)]) -> String {
    if params.is_empty() {
        return path.to_owned();
    }
    let mut serializer = url::form_urlencoded::Serializer::new(String::new());
    for (key, value) in params {
        serializer.append_pair(key, value);
    }
    format!("{path}?{}", serializer.finish())
}
