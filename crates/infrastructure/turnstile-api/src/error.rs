use std::collections::BTreeMap;

use serde::Deserialize;

/// Fallback shown when a 403 body does not carry a usable detail message.
pub const LOCATION_DENIED_FALLBACK: &str = "You are not at the event location";

/// Typed classification of everything the remote service can throw at us.
/// Callers switch on the variant instead of inspecting raw status codes.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// Transport-level failure: DNS, refused connection, timeout.
    #[error("connection error: {0}")]
    Connection(String),
    /// Login rejected with 400/401.
    #[error("invalid credentials")]
    InvalidCredentials,
    /// Registration rejected with a structured validation body.
    #[error("{message}")]
    Validation {
        message: String,
        field_errors: BTreeMap<String, Vec<String>>,
    },
    /// QR generation rejected because the caller is not at the venue.
    #[error("{0}")]
    LocationDenied(String),
    /// Any other non-2xx response.
    #[error("server error: {0}")]
    Status(u16),
    /// 2xx response whose body did not match the expected shape.
    #[error("malformed response: {0}")]
    Decode(String),
}

/// Error body the service sends on 4xx: either a `detail` string, a
/// `message`, and/or per-field validation errors.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ErrorBody {
    #[serde(default)]
    pub detail: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub errors: Option<BTreeMap<String, Vec<String>>>,
}

impl ErrorBody {
    /// Best human-readable message, falling back to a per-status default.
    pub fn display_message(&self, status: u16) -> String {
        self.detail
            .clone()
            .or_else(|| self.message.clone())
            .unwrap_or_else(|| default_status_message(status))
    }
}

pub(crate) fn default_status_message(status: u16) -> String {
    match status {
        400 => "invalid data".to_string(),
        409 => "user or email already exists".to_string(),
        422 => "validation error".to_string(),
        code => format!("server error: {code}"),
    }
}
