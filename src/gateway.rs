//! API-gateway proxy integration
//!
//! Decodes the gateway's JSON request descriptor (`httpMethod`, `path`,
//! `body`) and encodes the envelope back as `{statusCode, headers, body}`.

use serde::Deserialize;

use crate::envelope::{Request, Response};
use crate::logger;
use crate::router::Router;

/// Envelope written if encoding a reply ever fails
const FALLBACK_ENVELOPE: &str = concat!(
    r#"{"statusCode":500,"headers":{"#,
    r#""Access-Control-Allow-Headers":"Content-Type","#,
    r#""Access-Control-Allow-Methods":"GET,POST,PUT,DELETE,OPTIONS","#,
    r#""Access-Control-Allow-Origin":"*","#,
    r#""Content-Type":"application/json"},"#,
    r#""body":"{\"error\":\"Internal Server Error\"}"}"#,
);

/// Inbound proxy event; fields the router does not use are ignored
///
/// `path` is required: an event without one cannot be routed and yields the
/// 500 envelope. A missing or null `httpMethod` matches no route (404).
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GatewayEvent {
    #[serde(default)]
    pub http_method: Option<String>,
    pub path: String,
    #[serde(default)]
    pub body: Option<String>,
}

impl From<GatewayEvent> for Request {
    fn from(event: GatewayEvent) -> Self {
        Self {
            method: event.http_method.unwrap_or_default(),
            path: event.path,
            body: event.body,
        }
    }
}

/// Route one raw gateway event and return the encoded envelope
///
/// An undecodable event still yields an envelope (the 500 one).
pub fn handle_event(router: &Router, raw_event: &str) -> String {
    let response = match serde_json::from_str::<GatewayEvent>(raw_event) {
        Ok(event) => router.handle(&event.into()),
        Err(e) => {
            logger::log_error(&format!("Invalid gateway event: {e}"));
            Response::internal_error()
        }
    };
    encode(&response)
}

fn encode(response: &Response) -> String {
    serde_json::to_string(response).unwrap_or_else(|e| {
        logger::log_error(&format!("Failed to encode envelope: {e}"));
        FALLBACK_ENVELOPE.to_string()
    })
}
