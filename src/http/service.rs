//! HTTP request entry point
//!
//! Turns a hyper request into the router's descriptor, enforces the body size
//! limit, and writes the access log line.

use http_body_util::{BodyExt, Full, LengthLimitError, Limited};
use hyper::body::{Body, Bytes};
use hyper::{header, Request, Response, Version};
use std::convert::Infallible;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Instant;

use super::response::build_envelope_response;
use crate::config::AppState;
use crate::envelope;
use crate::logger::{self, AccessLogEntry};

/// Main entry point for HTTP request handling
pub async fn handle_request<B>(
    req: Request<B>,
    state: Arc<AppState>,
    peer_addr: SocketAddr,
) -> Result<Response<Full<Bytes>>, Infallible>
where
    B: Body,
    B::Error: std::error::Error + Send + Sync + 'static,
{
    let started = Instant::now();
    let access_log = state.access_log_enabled().then(|| access_entry(&req, peer_addr));

    let envelope = match read_request(req, state.config.http.max_body_size).await {
        Ok(descriptor) => state.router.handle(&descriptor),
        Err(resp) => resp,
    };

    if let Some(mut entry) = access_log {
        entry.status = envelope.status_code;
        entry.body_bytes = envelope.body.len();
        entry.request_time_us = u64::try_from(started.elapsed().as_micros()).unwrap_or(u64::MAX);
        logger::log_access(&entry, &state.config.logging.access_log_format);
    }

    Ok(build_envelope_response(envelope))
}

/// Collect the body and build the router's request descriptor
///
/// Fails with a ready-made envelope: 413 past the size limit, 500 when the
/// body cannot be read or is not UTF-8.
async fn read_request<B>(
    req: Request<B>,
    max_body_size: u64,
) -> Result<envelope::Request, envelope::Response>
where
    B: Body,
    B::Error: std::error::Error + Send + Sync + 'static,
{
    if let Some(resp) = check_content_length(&req, max_body_size) {
        return Err(resp);
    }

    let (parts, body) = req.into_parts();
    let limit = usize::try_from(max_body_size).unwrap_or(usize::MAX);

    let bytes = match Limited::new(body, limit).collect().await {
        Ok(collected) => collected.to_bytes(),
        Err(e) if e.downcast_ref::<LengthLimitError>().is_some() => {
            logger::log_warning(&format!("Request body exceeds {max_body_size} bytes"));
            return Err(envelope::Response::payload_too_large());
        }
        Err(e) => {
            logger::log_error(&format!("Failed to read request body: {e}"));
            return Err(envelope::Response::internal_error());
        }
    };

    let body = if bytes.is_empty() {
        None
    } else {
        match String::from_utf8(bytes.to_vec()) {
            Ok(text) => Some(text),
            Err(e) => {
                logger::log_error(&format!("Request body is not UTF-8: {e}"));
                return Err(envelope::Response::internal_error());
            }
        }
    };

    Ok(envelope::Request {
        method: parts.method.as_str().to_string(),
        path: parts.uri.path().to_string(),
        body,
    })
}

/// Reject early when Content-Length already exceeds the limit
fn check_content_length<B>(req: &Request<B>, max_body_size: u64) -> Option<envelope::Response> {
    let value = req.headers().get(header::CONTENT_LENGTH)?;
    match value.to_str().ok().and_then(|v| v.parse::<u64>().ok()) {
        Some(size) if size > max_body_size => {
            logger::log_warning(&format!(
                "Request body too large: {size} bytes (max: {max_body_size})"
            ));
            Some(envelope::Response::payload_too_large())
        }
        Some(_) => None,
        None => {
            logger::log_warning("Invalid Content-Length header, skipping size check");
            None
        }
    }
}

fn access_entry<B>(req: &Request<B>, peer_addr: SocketAddr) -> AccessLogEntry {
    let header_value = |name: header::HeaderName| {
        req.headers()
            .get(name)
            .and_then(|v| v.to_str().ok())
            .map(ToString::to_string)
    };

    let mut entry = AccessLogEntry::new(
        peer_addr.ip().to_string(),
        req.method().to_string(),
        req.uri().path().to_string(),
    );
    entry.query = req.uri().query().map(ToString::to_string);
    entry.http_version = version_label(req.version()).to_string();
    entry.referer = header_value(header::REFERER);
    entry.user_agent = header_value(header::USER_AGENT);
    entry
}

const fn version_label(version: Version) -> &'static str {
    match version {
        Version::HTTP_09 => "0.9",
        Version::HTTP_10 => "1.0",
        Version::HTTP_2 => "2",
        Version::HTTP_3 => "3",
        _ => "1.1",
    }
}
