use thiserror::Error;

/// Typed API failure kinds, keyed by the HTTP status codes the pfSense
/// API package actually emits.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApiErrorKind {
    /// 400 -- malformed or incomplete request payload.
    BadRequest,
    /// 401 -- missing or rejected credentials.
    Unauthorized,
    /// 403 -- authenticated but not permitted (ACL, read-only mode).
    Forbidden,
    /// 404 -- no such endpoint or object.
    NotFound,
    /// 405 -- HTTP method not supported by the endpoint.
    MethodNotAllowed,
    /// 406 -- requested representation not available.
    NotAcceptable,
    /// 409 -- request conflicts with existing configuration.
    Conflict,
    /// 415 -- request body content type rejected.
    UnsupportedMediaType,
    /// 422 -- payload parsed but failed remote validation.
    UnprocessableEntity,
    /// 424 -- a referenced object is missing or disabled.
    FailedDependency,
    /// 500 -- unhandled failure on the appliance.
    ServerError,
    /// 503 -- API disabled or appliance busy.
    Unavailable,
}

impl ApiErrorKind {
    /// Look up the error kind for an HTTP status code. Statuses outside
    /// the fixed table return `None` and are reported as [`Error::Http`].
    pub fn from_status(status: u16) -> Option<Self> {
        match status {
            400 => Some(Self::BadRequest),
            401 => Some(Self::Unauthorized),
            403 => Some(Self::Forbidden),
            404 => Some(Self::NotFound),
            405 => Some(Self::MethodNotAllowed),
            406 => Some(Self::NotAcceptable),
            409 => Some(Self::Conflict),
            415 => Some(Self::UnsupportedMediaType),
            422 => Some(Self::UnprocessableEntity),
            424 => Some(Self::FailedDependency),
            500 => Some(Self::ServerError),
            503 => Some(Self::Unavailable),
            _ => None,
        }
    }
}

/// Top-level error type for the `pfsense-api` crate.
///
/// Covers authentication, transport, typed API failures, and payload
/// deserialization. All client methods return `Result<_, Error>`.
#[derive(Debug, Error)]
pub enum Error {
    // ── Authentication ──────────────────────────────────────────────
    /// Credential configuration problem (e.g. the token endpoint needs
    /// local credentials that the client was not given).
    #[error("Authentication failed: {message}")]
    Authentication { message: String },

    // ── Transport ───────────────────────────────────────────────────
    /// HTTP transport error (connection refused, DNS failure, timeout).
    #[error("HTTP transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// URL parsing error.
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// TLS setup or client construction error.
    #[error("TLS error: {0}")]
    Tls(String),

    // ── API ─────────────────────────────────────────────────────────
    /// Non-2xx response whose body carried the standard envelope.
    /// `message` is the remote-supplied diagnostic.
    #[error("{message}, response code {status}")]
    Api {
        kind: ApiErrorKind,
        status: u16,
        message: String,
    },

    /// Non-2xx response outside the typed table, or whose body could
    /// not be parsed as the standard envelope.
    #[error("non-2xx response code received: {status}")]
    Http { status: u16 },

    // ── Data ────────────────────────────────────────────────────────
    /// JSON deserialization failed, with the raw body for debugging.
    #[error("Deserialization error: {message}")]
    Deserialization { message: String, body: String },

    /// A client-side index lookup found no matching object. Some write
    /// endpoints address objects by array position, which the client
    /// resolves by listing and matching a key field.
    #[error("no matching {resource}: {detail}")]
    NoMatch {
        resource: &'static str,
        detail: String,
    },
}

impl Error {
    /// Returns `true` if this error indicates auth was rejected and
    /// re-authentication might resolve it.
    pub fn is_auth_expired(&self) -> bool {
        matches!(
            self,
            Self::Api {
                kind: ApiErrorKind::Unauthorized,
                ..
            } | Self::Authentication { .. }
        )
    }

    /// Returns `true` if this is a "not found" error.
    pub fn is_not_found(&self) -> bool {
        match self {
            Self::Api { kind, .. } => *kind == ApiErrorKind::NotFound,
            Self::Http { status } => *status == 404,
            Self::Transport(e) => e.status() == Some(reqwest::StatusCode::NOT_FOUND),
            _ => false,
        }
    }

    /// The HTTP status code behind this error, if there was a response.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Api { status, .. } | Self::Http { status } => Some(*status),
            Self::Transport(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_table_is_complete() {
        let expected = [
            (400, ApiErrorKind::BadRequest),
            (401, ApiErrorKind::Unauthorized),
            (403, ApiErrorKind::Forbidden),
            (404, ApiErrorKind::NotFound),
            (405, ApiErrorKind::MethodNotAllowed),
            (406, ApiErrorKind::NotAcceptable),
            (409, ApiErrorKind::Conflict),
            (415, ApiErrorKind::UnsupportedMediaType),
            (422, ApiErrorKind::UnprocessableEntity),
            (424, ApiErrorKind::FailedDependency),
            (500, ApiErrorKind::ServerError),
            (503, ApiErrorKind::Unavailable),
        ];
        for (status, kind) in expected {
            assert_eq!(ApiErrorKind::from_status(status), Some(kind));
        }
        assert_eq!(ApiErrorKind::from_status(418), None);
        assert_eq!(ApiErrorKind::from_status(200), None);
    }

    #[test]
    fn api_error_display_includes_remote_message() {
        let err = Error::Api {
            kind: ApiErrorKind::Conflict,
            status: 409,
            message: "Object exists".into(),
        };
        assert_eq!(err.to_string(), "Object exists, response code 409");
    }

    #[test]
    fn auth_expiry_detection() {
        let unauthorized = Error::Api {
            kind: ApiErrorKind::Unauthorized,
            status: 401,
            message: String::new(),
        };
        assert!(unauthorized.is_auth_expired());

        let not_found = Error::Api {
            kind: ApiErrorKind::NotFound,
            status: 404,
            message: String::new(),
        };
        assert!(!not_found.is_auth_expired());
        assert!(not_found.is_not_found());
    }
}
