//! Request descriptor and response envelope
//!
//! Every path through the router ends in exactly one [`Response`]: a status
//! code, the fixed CORS header set, and a JSON-encoded body string.

use serde::Serialize;
use std::collections::BTreeMap;

/// Headers attached to every response, success or error
pub const CORS_HEADERS: [(&str, &str); 4] = [
    ("Content-Type", "application/json"),
    ("Access-Control-Allow-Origin", "*"),
    ("Access-Control-Allow-Headers", "Content-Type"),
    ("Access-Control-Allow-Methods", "GET,POST,PUT,DELETE,OPTIONS"),
];

/// Fallback body if serialization of a reply ever fails
const INTERNAL_ERROR_BODY: &str = r#"{"error":"Internal Server Error"}"#;

/// Abstract request handed to the router by the hosting layer
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Request {
    pub method: String,
    pub path: String,
    /// Raw body, assumed JSON when present
    pub body: Option<String>,
}

impl Request {
    pub fn new(method: impl Into<String>, path: impl Into<String>) -> Self {
        Self {
            method: method.into(),
            path: path.into(),
            body: None,
        }
    }

    #[must_use]
    pub fn with_body(mut self, body: impl Into<String>) -> Self {
        self.body = Some(body.into());
        self
    }
}

/// Normalized response envelope
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Response {
    pub status_code: u16,
    pub headers: BTreeMap<String, String>,
    pub body: String,
}

impl Response {
    /// Build an envelope whose body is `value` serialized as JSON
    pub fn json<T: Serialize>(status_code: u16, value: &T) -> Self {
        match serde_json::to_string(value) {
            Ok(body) => Self::raw(status_code, body),
            Err(e) => {
                crate::logger::log_error(&format!("Failed to serialize response: {e}"));
                Self::internal_error()
            }
        }
    }

    /// `{"error": message}` with the given status
    pub fn error(status_code: u16, message: &str) -> Self {
        Self::json(status_code, &serde_json::json!({ "error": message }))
    }

    pub fn not_found() -> Self {
        Self::error(404, "Not Found")
    }

    pub fn internal_error() -> Self {
        Self::raw(500, INTERNAL_ERROR_BODY.to_string())
    }

    pub fn payload_too_large() -> Self {
        Self::error(413, "Payload Too Large")
    }

    fn raw(status_code: u16, body: String) -> Self {
        let headers = CORS_HEADERS
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        Self {
            status_code,
            headers,
            body,
        }
    }
}

#[cfg(test)]
impl Response {
    /// Parse the body back into JSON
    pub(crate) fn body_json(&self) -> serde_json::Result<serde_json::Value> {
        serde_json::from_str(&self.body)
    }
}
