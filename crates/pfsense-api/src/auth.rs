// Authentication modes and access-token acquisition.
//
// The pfSense API package supports three credential schemes plus an
// unauthenticated mode. Which one applies is fixed at client construction;
// per-request header selection lives in `client.rs`. Token minting talks
// to the HTTP client directly: the access-token endpoint is its own auth
// class (always basic auth) and must not loop back through the dispatch
// path it exists to serve.

use reqwest::header::ACCEPT;
use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;
use tracing::debug;

use crate::client::Client;
use crate::error::Error;

/// `POST` here mints a JWT. Always authenticates with local credentials,
/// whatever mode the client is configured for.
pub(crate) const ACCESS_TOKEN_ENDPOINT: &str = "api/v1/access_token";

/// How the client authenticates with the appliance.
#[derive(Debug, Clone)]
pub enum AuthMode {
    /// No credentials attached to any request.
    None,
    /// HTTP basic auth with a local pfSense user on every request.
    Local { user: String, password: SecretString },
    /// Bearer-token auth. The token is minted lazily from the access-token
    /// endpoint (using these local credentials) and refreshed once when a
    /// request comes back 401.
    Jwt { user: String, password: SecretString },
    /// Pre-provisioned API client-ID/token pair, sent as
    /// `Authorization: {client_id} {token}`.
    ApiToken {
        client_id: String,
        token: SecretString,
    },
}

impl AuthMode {
    /// Local username/password, for the access-token endpoint which
    /// requires basic auth regardless of the configured mode. `Local` and
    /// `Jwt` both carry these; the other modes have none.
    pub(crate) fn local_credentials(&self) -> Option<(&str, &SecretString)> {
        match self {
            Self::Local { user, password } | Self::Jwt { user, password } => {
                Some((user, password))
            }
            Self::None | Self::ApiToken { .. } => None,
        }
    }
}

#[derive(Deserialize)]
struct AccessToken {
    token: String,
}

impl Client {
    /// Mint a new API access token.
    ///
    /// `POST api/v1/access_token` -- authenticates with the configured
    /// local username/password (required even in JWT mode; fails with
    /// [`Error::Authentication`] if none are configured). The returned
    /// token is cached and used for subsequent bearer-auth requests.
    pub async fn create_access_token(&self) -> Result<SecretString, Error> {
        let (user, password) =
            self.auth()
                .local_credentials()
                .ok_or_else(|| Error::Authentication {
                    message:
                        "access token endpoint requires local authentication, but no user/password is configured"
                            .into(),
                })?;

        let url = self.base_url().join(ACCESS_TOKEN_ENDPOINT)?;
        debug!("POST {url} (minting access token)");

        let resp = self
            .http()
            .post(url)
            .header(ACCEPT, "application/json")
            .basic_auth(user, Some(password.expose_secret()))
            .send()
            .await?;

        let data: AccessToken = Client::unwrap_envelope(resp).await?;
        let token = SecretString::from(data.token);
        self.cache_token(token.clone());
        Ok(token)
    }

    /// The cached bearer token, minting one if none is cached yet.
    pub(crate) async fn bearer_token(&self) -> Result<SecretString, Error> {
        if let Some(token) = self.cached_token() {
            return Ok(token);
        }
        self.create_access_token().await
    }

    /// Drop the cached token and mint a fresh one. Used by the dispatch
    /// loop after a 401 in JWT mode.
    pub(crate) async fn refresh_token(&self) -> Result<SecretString, Error> {
        debug!("access token rejected, refreshing");
        self.clear_token();
        self.create_access_token().await
    }
}

/// Format the `Authorization` value for [`AuthMode::ApiToken`].
pub(crate) fn api_token_header(client_id: &str, token: &SecretString) -> String {
    format!("{client_id} {}", token.expose_secret())
}
