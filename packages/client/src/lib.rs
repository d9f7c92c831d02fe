#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions)]

//! Typed REST client for the sauti reporting API.
//!
//! [`ApiClient`] is a stateless request-shaping layer over one shared
//! [`reqwest::Client`]: it attaches the bearer token when one is held,
//! normalizes list query parameters (dropping empty values and the
//! `"all"` sentinel), and decodes server bodies without reshaping them.
//!
//! The failure contract keeps "server rejected" and "server unreachable"
//! distinct all the way to the UI layer:
//!
//! - non-2xx → [`ApiError::ServerRejected`] with the verbatim payload
//! - no response received → [`ApiError::Network`] classified from
//!   `reqwest`'s structured error predicates
//! - `401` → the held token is cleared and [`ApiError::AuthExpired`] is
//!   returned so the caller can route to login (auth endpoints instead
//!   surface the server's own rejection payload)

pub mod query;

mod admin;
mod auth;
mod public;
mod records;

use std::sync::RwLock;
use std::time::Duration;

use serde::de::DeserializeOwned;
use thiserror::Error;

pub use auth::{ProfilePatch, SignupRequest};
pub use records::RecordPatch;

/// Default API endpoint when `SAUTI_API_URL` is unset.
pub const DEFAULT_BASE_URL: &str = "http://localhost:5000";

/// Per-request deadline.
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Classification of a transport-level failure (no response received).
///
/// Derived from `reqwest`'s structured error predicates, not message
/// matching. This is best-effort UX labeling only; callers must not
/// branch control flow on the kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NetworkErrorKind {
    /// The connection was refused or could not be established.
    ConnectionRefused,
    /// The server accepted the connection but never answered in time.
    Timeout,
    /// Any other transport failure.
    Other,
}

impl NetworkErrorKind {
    /// Classifies a transport error.
    #[must_use]
    pub fn classify(error: &reqwest::Error) -> Self {
        if error.is_timeout() {
            Self::Timeout
        } else if error.is_connect() {
            Self::ConnectionRefused
        } else {
            Self::Other
        }
    }

    /// A user-facing remediation message for this failure class.
    #[must_use]
    pub const fn remediation(self) -> &'static str {
        match self {
            Self::ConnectionRefused => {
                "Connection refused: the reporting server is not reachable at the \
                 configured URL. Check SAUTI_API_URL and that the server is running."
            }
            Self::Timeout => {
                "The server did not answer within the request deadline. It may be \
                 overloaded; try again shortly."
            }
            Self::Other => {
                "Network error: unable to reach the reporting server. Check your \
                 internet connection and the configured URL."
            }
        }
    }
}

/// Errors surfaced to callers of [`ApiClient`].
#[derive(Debug, Error)]
pub enum ApiError {
    /// The server answered with a non-2xx status. The payload is passed
    /// through verbatim.
    #[error("server rejected the request ({status}): {body}")]
    ServerRejected {
        /// HTTP status of the rejection.
        status: reqwest::StatusCode,
        /// The server's error payload, undecoded beyond JSON parsing.
        body: serde_json::Value,
    },

    /// No response was received.
    #[error("{}", .0.remediation())]
    Network(NetworkErrorKind),

    /// The server answered `401`; the held token has been cleared.
    #[error("session expired; sign in again")]
    AuthExpired,

    /// A 2xx body did not decode into the expected shape.
    #[error("failed to decode server response: {0}")]
    Decode(#[from] serde_json::Error),

    /// The underlying HTTP client could not be constructed.
    #[error("failed to build HTTP client: {0}")]
    Init(reqwest::Error),
}

/// Connection settings for [`ApiClient`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiConfig {
    /// Base URL of the reporting API.
    pub base_url: String,
    /// Per-request deadline.
    pub timeout: Duration,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_owned(),
            timeout: REQUEST_TIMEOUT,
        }
    }
}

impl ApiConfig {
    /// Reads the base URL from `SAUTI_API_URL`, falling back to the
    /// default.
    #[must_use]
    pub fn from_env() -> Self {
        let base_url = std::env::var("SAUTI_API_URL")
            .ok()
            .filter(|url| !url.is_empty())
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_owned());
        Self {
            base_url,
            ..Self::default()
        }
    }
}

/// Client for the sauti reporting API.
///
/// Cheap to share behind an `Arc`; the held token is interior-mutable so
/// a `401` can clear it from any call site.
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
    token: RwLock<Option<String>>,
}

impl ApiClient {
    /// Creates a client for the given endpoint.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Init`] if the underlying HTTP client cannot
    /// be constructed.
    pub fn new(config: &ApiConfig) -> Result<Self, ApiError> {
        let mut headers = reqwest::header::HeaderMap::new();
        headers.insert(
            reqwest::header::ACCEPT,
            reqwest::header::HeaderValue::from_static("application/json"),
        );

        let http = reqwest::Client::builder()
            .timeout(config.timeout)
            .default_headers(headers)
            .build()
            .map_err(ApiError::Init)?;

        Ok(Self {
            http,
            base_url: config.base_url.trim_end_matches('/').to_owned(),
            token: RwLock::new(None),
        })
    }

    /// The configured base URL.
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Holds a bearer token for subsequent requests.
    pub fn set_token(&self, token: &str) {
        let mut guard = self
            .token
            .write()
            .unwrap_or_else(std::sync::PoisonError::into_inner);
        *guard = Some(token.to_owned());
    }

    /// Drops the held bearer token.
    pub fn clear_token(&self) {
        let mut guard = self
            .token
            .write()
            .unwrap_or_else(std::sync::PoisonError::into_inner);
        *guard = None;
    }

    /// The currently held bearer token, if any.
    #[must_use]
    pub fn token(&self) -> Option<String> {
        self.token
            .read()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
            .clone()
    }

    /// Joins a path onto the base URL.
    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    /// Sends a request and decodes the response.
    async fn execute<T: DeserializeOwned>(
        &self,
        builder: reqwest::RequestBuilder,
    ) -> Result<T, ApiError> {
        self.execute_opts(builder, false).await
    }

    /// Sends a request. `auth_request` marks the login/signup endpoints,
    /// whose `401` is a credential rejection rather than an expired
    /// session.
    async fn execute_opts<T: DeserializeOwned>(
        &self,
        mut builder: reqwest::RequestBuilder,
        auth_request: bool,
    ) -> Result<T, ApiError> {
        if let Some(token) = self.token() {
            builder = builder.bearer_auth(token);
        }

        let request = builder
            .build()
            .map_err(|e| ApiError::Network(NetworkErrorKind::classify(&e)))?;
        log::debug!("{} {}", request.method(), request.url());

        let response = self
            .http
            .execute(request)
            .await
            .map_err(|e| ApiError::Network(NetworkErrorKind::classify(&e)))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| ApiError::Network(NetworkErrorKind::classify(&e)))?;

        self.interpret(status, &body, auth_request)
    }

    /// Maps a received response onto the error taxonomy and decodes
    /// successful bodies. Factored out of [`Self::execute_opts`] so the
    /// contract is testable without a live server.
    fn interpret<T: DeserializeOwned>(
        &self,
        status: reqwest::StatusCode,
        body: &str,
        auth_request: bool,
    ) -> Result<T, ApiError> {
        if status == reqwest::StatusCode::UNAUTHORIZED {
            self.clear_token();
            if !auth_request {
                return Err(ApiError::AuthExpired);
            }
        }

        if !status.is_success() {
            let payload = serde_json::from_str(body)
                .unwrap_or_else(|_| serde_json::Value::String(body.to_owned()));
            log::debug!("request rejected ({status}): {payload}");
            return Err(ApiError::ServerRejected {
                status,
                body: payload,
            });
        }

        // Confirmation-only responses (e.g. DELETE) may have no body.
        let body = if body.trim().is_empty() { "null" } else { body };
        Ok(serde_json::from_str(body)?)
    }
}

#[cfg(test)]
mod tests {
    use reqwest::StatusCode;
    use sauti_record_models::Record;

    use super::*;

    fn client() -> ApiClient {
        ApiClient::new(&ApiConfig::default()).unwrap()
    }

    #[test]
    fn unauthorized_clears_token_and_expires_session() {
        let client = client();
        client.set_token("abc123");

        let result: Result<Record, ApiError> =
            client.interpret(StatusCode::UNAUTHORIZED, "{\"error\":\"expired\"}", false);

        assert!(matches!(result, Err(ApiError::AuthExpired)));
        assert!(client.token().is_none());
    }

    #[test]
    fn unauthorized_on_auth_endpoint_surfaces_server_payload() {
        let client = client();
        let result: Result<Record, ApiError> = client.interpret(
            StatusCode::UNAUTHORIZED,
            "{\"error\":\"Invalid credentials\"}",
            true,
        );

        let Err(ApiError::ServerRejected { status, body }) = result else {
            panic!("expected ServerRejected");
        };
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(body["error"], "Invalid credentials");
    }

    #[test]
    fn rejection_payload_is_verbatim() {
        let client = client();
        let result: Result<Record, ApiError> = client.interpret(
            StatusCode::UNPROCESSABLE_ENTITY,
            "{\"errors\":{\"title\":\"too long\"}}",
            false,
        );

        let Err(ApiError::ServerRejected { body, .. }) = result else {
            panic!("expected ServerRejected");
        };
        assert_eq!(body["errors"]["title"], "too long");
    }

    #[test]
    fn non_json_rejection_is_preserved_as_text() {
        let client = client();
        let result: Result<Record, ApiError> =
            client.interpret(StatusCode::BAD_GATEWAY, "upstream down", false);

        let Err(ApiError::ServerRejected { body, .. }) = result else {
            panic!("expected ServerRejected");
        };
        assert_eq!(body, serde_json::Value::String("upstream down".to_owned()));
    }

    #[test]
    fn empty_success_body_decodes_as_null() {
        let client = client();
        let value: serde_json::Value = client.interpret(StatusCode::OK, "", false).unwrap();
        assert!(value.is_null());
    }

    #[test]
    fn remediation_messages_are_distinct() {
        let kinds = [
            NetworkErrorKind::ConnectionRefused,
            NetworkErrorKind::Timeout,
            NetworkErrorKind::Other,
        ];
        for a in kinds {
            for b in kinds {
                if a != b {
                    assert_ne!(a.remediation(), b.remediation());
                }
            }
        }
    }

    #[test]
    fn base_url_trailing_slash_is_normalized() {
        let client = ApiClient::new(&ApiConfig {
            base_url: "http://localhost:5000/".to_owned(),
            ..ApiConfig::default()
        })
        .unwrap();
        assert_eq!(client.url("/public/records"), "http://localhost:5000/public/records");
    }
}
