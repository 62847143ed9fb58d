use crate::prelude::{Error, Result};
use derive_more::Display;
use reqwest::{Method, StatusCode};
use secrecy::SecretString;
use serde::Serialize;
use serde_json::Value;
use std::fmt;
use std::str::FromStr;
use std::time::Duration;

/// Path prefix of every versioned LibreNMS API route.
///
pub const API_PREFIX: &str = "/api/v0/";

/// Message fragment LibreNMS uses to reject a create for an existing resource.
///
pub const ALREADY_EXISTS: &str = "already exists";

/// Message fragment LibreNMS uses when the resource to act on is absent.
///
pub const NOT_FOUND: &str = "not found";

// -----------------------------------------------------------------------------

/// The three calls exposed to the orchestration host.
///
/// Each variant carries its own policy: the HTTP method, which status codes
/// are acceptable and how the response message maps to the `changed` flag.
///
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum ApiCall {
    Get,
    Add,
    Delete,
}

impl ApiCall {
    /// HTTP method used for the call.
    ///
    pub fn method(&self) -> Method {
        match self {
            ApiCall::Get => Method::GET,
            ApiCall::Add => Method::POST,
            ApiCall::Delete => Method::DELETE,
        }
    }

    /// Name of the module binary performing the call.
    ///
    pub fn module_name(&self) -> &'static str {
        match self {
            ApiCall::Get => "librenms_get",
            ApiCall::Add => "librenms_add",
            ApiCall::Delete => "librenms_delete",
        }
    }

    /// Whether the call only reads remote state and so may run in check mode.
    ///
    pub fn is_read_only(&self) -> bool {
        matches!(self, ApiCall::Get)
    }

    /// Turns a raw response into a [`CallResult`].
    ///
    /// # Arguments
    ///
    /// * `endpoint`: Endpoint the request was sent to, kept for diagnostics.
    /// * `status`: Status code returned by the server.
    /// * `text`: Raw response body.
    ///
    /// # Returns
    ///
    /// `Error::Request` when the status is outside the acceptable set for the
    /// call, `Error::Parse` when an accepted response is not valid JSON.
    ///
    pub fn classify(self, endpoint: &Endpoint, status: StatusCode, text: String) -> Result<CallResult> {
        let parsed = serde_json::from_str::<Value>(&text);
        let message = parsed.as_ref().map(response_message).unwrap_or_default();

        let accepted = match (self, status) {
            (_, StatusCode::OK) => true,
            (ApiCall::Add, StatusCode::INTERNAL_SERVER_ERROR) => message.contains(ALREADY_EXISTS),
            (ApiCall::Delete, StatusCode::NOT_FOUND) => true,
            _ => false,
        };
        let changed = match self {
            ApiCall::Get => false,
            ApiCall::Add => !message.contains(ALREADY_EXISTS),
            ApiCall::Delete => !message.contains(NOT_FOUND),
        };

        if !accepted {
            return Err(Error::Request(self, endpoint.to_string(), status, text));
        }

        Ok(CallResult {
            status_code: status.as_u16(),
            data: parsed?,
            changed,
        })
    }
}

/// Top-level `message` string of a LibreNMS response, or `""` if absent.
///
pub fn response_message(data: &Value) -> &str {
    data.get("message").and_then(Value::as_str).unwrap_or_default()
}

// -----------------------------------------------------------------------------

/// Endpoint path relative to the versioned API root, e.g. `devices/server1`.
///
/// Filters may be embedded directly by the caller (`devices?type=server`);
/// the text is passed through untouched.
///
#[derive(Debug, Clone, PartialEq)]
pub struct Endpoint(String);

impl Endpoint {
    /// Request path including the API prefix.
    ///
    pub fn path(&self) -> String {
        format!("{}{}", API_PREFIX, self.0)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for Endpoint {
    fn from(value: &str) -> Self {
        Self(value.to_owned())
    }
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

// -----------------------------------------------------------------------------

/// JSON body sent with an `Add` call.
///
/// Callers often hand over Python-style text with single quotes
/// (`{'hostname': 'server1'}`), so every `'` is replaced with `"` before the
/// text is parsed.
///
#[derive(Debug, Clone, PartialEq)]
pub struct JsonPayload(Value);

impl JsonPayload {
    /// Builds a payload from a raw module argument.
    ///
    /// Strings are normalized and parsed, structured values are used as they
    /// are. Null and blank strings mean "no payload".
    ///
    pub fn from_argument(value: &Value) -> Result<Option<Self>> {
        match value {
            Value::Null => Ok(None),
            Value::String(text) if text.trim().is_empty() => Ok(None),
            Value::String(text) => text.parse().map(Some),
            other => Ok(Some(Self(other.clone()))),
        }
    }

    pub fn as_value(&self) -> &Value {
        &self.0
    }
}

impl FromStr for JsonPayload {
    type Err = Error;

    fn from_str(text: &str) -> Result<Self> {
        let normalized = text.replace('\'', "\"");
        Ok(Self(serde_json::from_str(&normalized)?))
    }
}

// -----------------------------------------------------------------------------

/// Outcome of a single accepted call.
///
/// # Fields
///
/// * `status_code`: Status code returned by the server.
/// * `data`: Parsed response body.
/// * `changed`: Whether the call mutated remote state.
///
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CallResult {
    pub changed: bool,
    pub status_code: u16,
    pub data: Value,
}

// -----------------------------------------------------------------------------

/// Everything needed to reach a LibreNMS server.
///
/// # Fields
///
/// * `url`: Base URL of the server, without the API prefix.
/// * `token`: API token sent in the `X-Auth-Token` header.
/// * `ssl_verify`: Whether the server certificate is validated.
/// * `timeout`: Optional whole-request timeout; `None` waits indefinitely.
///
#[derive(Debug, Clone)]
pub struct ConnectionSettings {
    pub url: String,
    pub token: SecretString,
    pub ssl_verify: bool,
    pub timeout: Option<Duration>,
}

impl ConnectionSettings {
    /// Creates settings with certificate validation on and no timeout.
    ///
    pub fn new(url: &str, token: SecretString) -> Self {
        Self {
            url: url.trim_end_matches('/').to_owned(),
            token,
            ssl_verify: true,
            timeout: None,
        }
    }

    pub fn with_ssl_verify(mut self, ssl_verify: bool) -> Self {
        self.ssl_verify = ssl_verify;
        self
    }

    pub fn with_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }

    /// Full request URL for an endpoint.
    ///
    pub fn url_for(&self, endpoint: &Endpoint) -> String {
        format!("{}{}", self.url, endpoint.path())
    }
}
