// pfSense API HTTP client
//
// Wraps `reqwest::Client` with endpoint URL construction, per-endpoint auth
// header selection, the 401-refresh-and-retry policy for JWT mode, and
// envelope unwrapping. Endpoint groups (system, firewall, etc.) are
// implemented as inherent methods in separate modules to keep this one
// focused on dispatch mechanics.

use std::sync::RwLock;
use std::time::Duration;

use reqwest::header::{ACCEPT, AUTHORIZATION, HeaderValue};
use reqwest::{Method, StatusCode};
use secrecy::{ExposeSecret, SecretString};
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use tracing::debug;
use url::Url;

use crate::auth::{self, AuthMode};
use crate::error::{ApiErrorKind, Error};
use crate::transport::{TlsMode, TransportConfig};

/// Endpoints reachable without credentials even on an authenticated client.
/// The access-token endpoint is the other special auth class (always basic
/// auth); it is handled directly in `auth.rs` and never dispatched here.
const NO_AUTH_ENDPOINTS: &[&str] = &[crate::system::ERROR_DEFINITIONS_ENDPOINT];

/// Client configuration. Values are read once when [`Client::new`] is
/// called; changing them afterwards has no effect.
#[derive(Debug, Clone)]
pub struct Config {
    /// Appliance base URL, e.g. `https://192.168.1.1`.
    pub host: String,
    pub auth: AuthMode,
    pub tls: TlsMode,
    pub timeout: Duration,
}

impl Config {
    /// Config for `host` with the given auth mode and default transport
    /// settings (invalid-cert acceptance, 5s timeout).
    pub fn new(host: impl Into<String>, auth: AuthMode) -> Self {
        let transport = TransportConfig::default();
        Self {
            host: host.into(),
            auth,
            tls: transport.tls,
            timeout: transport.timeout,
        }
    }
}

/// Async client for the pfSense REST API.
///
/// One instance per appliance. All endpoint methods take `&self`; the only
/// shared mutable state is the lazily cached bearer token for JWT mode.
pub struct Client {
    http: reqwest::Client,
    base_url: Url,
    auth: AuthMode,
    /// Cached JWT (JWT mode only). Minted on first use, replaced after a
    /// 401, never proactively expired.
    token: RwLock<Option<SecretString>>,
}

impl Client {
    /// Create a new client from a [`Config`].
    pub fn new(config: Config) -> Result<Self, Error> {
        let transport = TransportConfig {
            tls: config.tls,
            timeout: config.timeout,
        };
        let http = transport.build_client()?;
        let base_url = Self::normalize_base_url(&config.host)?;
        Ok(Self {
            http,
            base_url,
            auth: config.auth,
            token: RwLock::new(None),
        })
    }

    /// Client with no authentication at all.
    pub fn with_no_auth(host: &str) -> Result<Self, Error> {
        Self::new(Config::new(host, AuthMode::None))
    }

    /// Client using local username/password basic auth on every request.
    pub fn with_local_auth(host: &str, user: &str, password: SecretString) -> Result<Self, Error> {
        Self::new(Config::new(
            host,
            AuthMode::Local {
                user: user.to_owned(),
                password,
            },
        ))
    }

    /// Client using JWT bearer auth. The username and password are used to
    /// mint tokens from the access-token endpoint; tokens are cached and
    /// refreshed once when a request comes back 401.
    pub fn with_jwt_auth(host: &str, user: &str, password: SecretString) -> Result<Self, Error> {
        Self::new(Config::new(
            host,
            AuthMode::Jwt {
                user: user.to_owned(),
                password,
            },
        ))
    }

    /// Client using a pre-provisioned API client-ID/token pair.
    pub fn with_token_auth(host: &str, client_id: &str, token: SecretString) -> Result<Self, Error> {
        Self::new(Config::new(
            host,
            AuthMode::ApiToken {
                client_id: client_id.to_owned(),
                token,
            },
        ))
    }

    /// The appliance base URL.
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// The underlying HTTP client (for auth flows that need direct access).
    pub(crate) fn http(&self) -> &reqwest::Client {
        &self.http
    }

    /// The configured auth mode.
    pub(crate) fn auth(&self) -> &AuthMode {
        &self.auth
    }

    /// Parse the host and force a trailing slash so `Url::join` appends
    /// endpoint paths instead of replacing the last segment.
    fn normalize_base_url(raw: &str) -> Result<Url, Error> {
        let mut url = Url::parse(raw)?;
        let path = url.path().trim_end_matches('/').to_owned();
        url.set_path(&format!("{path}/"));
        Ok(url)
    }

    // ── Token cache ──────────────────────────────────────────────────

    pub(crate) fn cached_token(&self) -> Option<SecretString> {
        self.token.read().expect("token lock poisoned").clone()
    }

    pub(crate) fn cache_token(&self, token: SecretString) {
        *self.token.write().expect("token lock poisoned") = Some(token);
    }

    pub(crate) fn clear_token(&self) {
        *self.token.write().expect("token lock poisoned") = None;
    }

    // ── Dispatch ─────────────────────────────────────────────────────

    /// Send a request, refreshing the bearer token and retrying the same
    /// request exactly once if it came back 401 in JWT mode. Every other
    /// failure propagates directly.
    async fn request<B>(
        &self,
        method: Method,
        endpoint: &str,
        query: &[(&str, String)],
        body: Option<&B>,
    ) -> Result<reqwest::Response, Error>
    where
        B: Serialize + Sync + ?Sized,
    {
        let resp = self.send_once(method.clone(), endpoint, query, body).await?;

        if resp.status() == StatusCode::UNAUTHORIZED && matches!(self.auth, AuthMode::Jwt { .. }) {
            self.refresh_token().await?;
            return self.send_once(method, endpoint, query, body).await;
        }

        Ok(resp)
    }

    async fn send_once<B>(
        &self,
        method: Method,
        endpoint: &str,
        query: &[(&str, String)],
        body: Option<&B>,
    ) -> Result<reqwest::Response, Error>
    where
        B: Serialize + Sync + ?Sized,
    {
        let url = self.base_url.join(endpoint)?;
        debug!("{method} {url}");

        let mut builder = self
            .http
            .request(method, url)
            .header(ACCEPT, "application/json");

        if !query.is_empty() {
            builder = builder.query(query);
        }
        if let Some(body) = body {
            builder = builder.json(body);
        }

        builder = self.configure_auth(builder, endpoint).await?;
        Ok(builder.send().await?)
    }

    /// Attach the auth header the endpoint's class and the configured mode
    /// call for.
    async fn configure_auth(
        &self,
        builder: reqwest::RequestBuilder,
        endpoint: &str,
    ) -> Result<reqwest::RequestBuilder, Error> {
        if matches!(self.auth, AuthMode::None) || NO_AUTH_ENDPOINTS.contains(&endpoint) {
            return Ok(builder);
        }

        match &self.auth {
            AuthMode::None => Ok(builder),
            AuthMode::Local { user, password } => {
                Ok(builder.basic_auth(user, Some(password.expose_secret())))
            }
            AuthMode::Jwt { .. } => {
                let token = self.bearer_token().await?;
                Ok(builder.bearer_auth(token.expose_secret()))
            }
            AuthMode::ApiToken { client_id, token } => {
                let mut value = HeaderValue::from_str(&auth::api_token_header(client_id, token))
                    .map_err(|e| Error::Authentication {
                        message: format!("invalid API token header value: {e}"),
                    })?;
                value.set_sensitive(true);
                Ok(builder.header(AUTHORIZATION, value))
            }
        }
    }

    // ── Response handling ────────────────────────────────────────────

    /// Unwrap the standard `{status, code, return, message, data}` envelope,
    /// returning the typed `data` payload.
    pub(crate) async fn unwrap_envelope<T: DeserializeOwned>(
        resp: reqwest::Response,
    ) -> Result<T, Error> {
        let status = resp.status();
        let body = resp.text().await?;

        if !status.is_success() {
            return Err(error_from_response(status, &body));
        }

        let envelope: Envelope<T> =
            serde_json::from_str(&body).map_err(|e| Error::Deserialization {
                message: e.to_string(),
                body,
            })?;
        Ok(envelope.data)
    }

    /// Like [`Self::unwrap_envelope`] but for endpoints whose `data` the
    /// caller discards (apply, halt, reboot, ...).
    async fn check_status(resp: reqwest::Response) -> Result<(), Error> {
        let status = resp.status();
        if status.is_success() {
            return Ok(());
        }
        let body = resp.text().await.unwrap_or_default();
        Err(error_from_response(status, &body))
    }

    // ── Verb helpers ─────────────────────────────────────────────────

    pub(crate) async fn get<T: DeserializeOwned>(
        &self,
        endpoint: &str,
        query: &[(&str, String)],
    ) -> Result<T, Error> {
        let resp = self
            .request(Method::GET, endpoint, query, None::<&()>)
            .await?;
        Self::unwrap_envelope(resp).await
    }

    pub(crate) async fn post<T, B>(
        &self,
        endpoint: &str,
        query: &[(&str, String)],
        body: Option<&B>,
    ) -> Result<T, Error>
    where
        T: DeserializeOwned,
        B: Serialize + Sync + ?Sized,
    {
        let resp = self.request(Method::POST, endpoint, query, body).await?;
        Self::unwrap_envelope(resp).await
    }

    pub(crate) async fn put<T, B>(
        &self,
        endpoint: &str,
        query: &[(&str, String)],
        body: Option<&B>,
    ) -> Result<T, Error>
    where
        T: DeserializeOwned,
        B: Serialize + Sync + ?Sized,
    {
        let resp = self.request(Method::PUT, endpoint, query, body).await?;
        Self::unwrap_envelope(resp).await
    }

    pub(crate) async fn patch<T, B>(
        &self,
        endpoint: &str,
        query: &[(&str, String)],
        body: Option<&B>,
    ) -> Result<T, Error>
    where
        T: DeserializeOwned,
        B: Serialize + Sync + ?Sized,
    {
        let resp = self.request(Method::PATCH, endpoint, query, body).await?;
        Self::unwrap_envelope(resp).await
    }

    pub(crate) async fn delete<T: DeserializeOwned>(
        &self,
        endpoint: &str,
        query: &[(&str, String)],
    ) -> Result<T, Error> {
        let resp = self
            .request(Method::DELETE, endpoint, query, None::<&()>)
            .await?;
        Self::unwrap_envelope(resp).await
    }

    pub(crate) async fn post_empty<B>(
        &self,
        endpoint: &str,
        query: &[(&str, String)],
        body: Option<&B>,
    ) -> Result<(), Error>
    where
        B: Serialize + Sync + ?Sized,
    {
        let resp = self.request(Method::POST, endpoint, query, body).await?;
        Self::check_status(resp).await
    }

    pub(crate) async fn put_empty<B>(
        &self,
        endpoint: &str,
        query: &[(&str, String)],
        body: Option<&B>,
    ) -> Result<(), Error>
    where
        B: Serialize + Sync + ?Sized,
    {
        let resp = self.request(Method::PUT, endpoint, query, body).await?;
        Self::check_status(resp).await
    }

    pub(crate) async fn delete_empty(
        &self,
        endpoint: &str,
        query: &[(&str, String)],
    ) -> Result<(), Error> {
        let resp = self
            .request(Method::DELETE, endpoint, query, None::<&()>)
            .await?;
        Self::check_status(resp).await
    }
}

/// Success envelope. The full wire shape is
/// `{"status": "ok", "code": 200, "return": 0, "message": "...", "data": ...}`;
/// only `data` is surfaced to callers.
#[derive(Debug, Deserialize)]
struct Envelope<T> {
    data: T,
}

/// Error bodies use the same envelope; only `message` is useful.
#[derive(Deserialize)]
struct ErrorBody {
    #[serde(default)]
    message: Option<String>,
}

/// Map a non-2xx response to a typed error. A status in the fixed table
/// with a parseable body becomes [`Error::Api`]; everything else is the
/// generic [`Error::Http`].
fn error_from_response(status: StatusCode, body: &str) -> Error {
    let code = status.as_u16();
    let Some(kind) = ApiErrorKind::from_status(code) else {
        return Error::Http { status: code };
    };

    match serde_json::from_str::<ErrorBody>(body) {
        Ok(parsed) => Error::Api {
            kind,
            status: code,
            message: parsed.message.unwrap_or_else(|| status.to_string()),
        },
        Err(_) => Error::Http { status: code },
    }
}
